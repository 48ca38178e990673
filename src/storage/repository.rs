use crate::error::Result;
use crate::tag::Tag;
use crate::task::Task;
use crate::task_tag::TaskTag;

/// Tag persistence contract. Lookups never fail: a miss is `None`, and
/// replace/remove on an unknown id is a logged no-op.
pub trait TagRepository {
  /// Cache contents in insertion order.
  fn tags(&self) -> Vec<Tag>;
  fn tag_by_id(&self, id: uuid::Uuid) -> Option<Tag>;

  /// Fails with [`crate::error::Error::DuplicateKey`] when the id is already
  /// stored; persists before returning.
  fn add_tag(&self, tag: &Tag) -> Result<()>;
  fn replace_tag(&self, tag: &Tag) -> Result<()>;
  fn remove_tag(&self, id: uuid::Uuid) -> Result<()>;
  fn remove_tags(&self, ids: &[uuid::Uuid]) -> Result<()>;
}

/// Task persistence contract, same shape as [`TagRepository`].
pub trait TaskRepository {
  fn tasks(&self) -> Vec<Task>;
  fn task_by_id(&self, id: uuid::Uuid) -> Option<Task>;

  fn add_task(&self, task: &Task) -> Result<()>;
  fn replace_task(&self, task: &Task) -> Result<()>;
  fn remove_task(&self, id: uuid::Uuid) -> Result<()>;
  fn remove_tasks(&self, ids: &[uuid::Uuid]) -> Result<()>;
}

/// Association persistence contract. On top of the common shape it answers
/// which associations touch a given task or tag. The repository does not
/// reject duplicate (task, tag) pairs itself; callers that want that
/// guarantee check [`TaskTagRepository::relation_exists`] first.
pub trait TaskTagRepository {
  fn task_tags(&self) -> Vec<TaskTag>;
  fn task_tag_by_id(&self, id: uuid::Uuid) -> Option<TaskTag>;

  fn add_task_tag(&self, task_tag: &TaskTag) -> Result<()>;
  fn replace_task_tag(&self, task_tag: &TaskTag) -> Result<()>;
  fn remove_task_tag(&self, id: uuid::Uuid) -> Result<()>;
  fn remove_task_tags(&self, ids: &[uuid::Uuid]) -> Result<()>;

  fn find_by_task_id(&self, task_id: uuid::Uuid) -> Vec<TaskTag>;
  fn find_by_tag_id(&self, tag_id: uuid::Uuid) -> Vec<TaskTag>;

  /// Union of the per-id queries. An association matching more than one
  /// queried id shows up once per match; callers tolerate duplicates.
  fn find_by_task_ids(&self, task_ids: &[uuid::Uuid]) -> Vec<TaskTag>;
  fn find_by_tag_ids(&self, tag_ids: &[uuid::Uuid]) -> Vec<TaskTag>;

  fn relation_exists(&self, task_id: uuid::Uuid, tag_id: uuid::Uuid) -> bool;
}
