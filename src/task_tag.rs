use crate::tag::Tag;
use crate::task::Task;
use crate::traits::Indexable;

/// Association record linking exactly one task to exactly one tag. The linked
/// ids are derived from the attached entities and cannot be set on their own,
/// so the record can never point at an id the caller never held an entity
/// for. The association does not own the task or the tag: deleting either
/// leaves the record behind until an orchestrating layer cleans it up.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TaskTag {
  id: uuid::Uuid,
  task_id: uuid::Uuid,
  tag_id: uuid::Uuid,
}

impl Indexable for TaskTag {
  fn id(&self) -> uuid::Uuid {
    self.id
  }
}

impl TaskTag {
  pub fn new(task: &Task, tag: &Tag) -> Self {
    Self {
      id: uuid::Uuid::new_v4(),
      task_id: task.id(),
      tag_id: tag.id(),
    }
  }

  pub fn task_id(&self) -> uuid::Uuid {
    self.task_id
  }

  pub fn tag_id(&self) -> uuid::Uuid {
    self.tag_id
  }

  /// Re-points the association at another task.
  pub fn attach_task(&mut self, task: &Task) {
    self.task_id = task.id();
  }

  /// Re-points the association at another tag.
  pub fn attach_tag(&mut self, tag: &Tag) {
    self.tag_id = tag.id();
  }
}
