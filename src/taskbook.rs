use log::debug;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::storage::{JsonStorage, TagRepository, TaskRepository, TaskTagRepository};
use crate::tag::Tag;
use crate::task::Task;
use crate::task_tag::TaskTag;
use crate::traits::Indexable;

/// The orchestration layer over the three repositories. The repositories only
/// guarantee integrity of their own store; everything spanning two of them
/// lives here: pairing a live task with a live tag, refusing duplicate pairs,
/// and cascading association cleanup when a task or tag goes away. None of
/// the cross-store sequences are atomic: a failure between the two steps of a
/// cascade leaves the associations gone and the entity still present.
pub struct Taskbook {
  storage: JsonStorage,
}

impl Taskbook {
  pub fn new() -> Result<Self> {
    let config = Config::new()?;
    Self::with_storage_dir(&config.storage_dir_path)
  }

  pub fn with_storage_dir(storage_dir_path: &str) -> Result<Self> {
    debug!("taskbook data folder: {}", storage_dir_path);
    std::fs::create_dir_all(storage_dir_path)?;

    return Ok(Self {
      storage: JsonStorage::new(storage_dir_path)?,
    });
  }

  pub fn storage(&self) -> &JsonStorage {
    &self.storage
  }

  pub fn add_task(&self, task: &Task) -> Result<()> {
    self.storage.tasks().add_task(task)
  }

  pub fn add_tag(&self, tag: &Tag) -> Result<()> {
    self.storage.tags().add_tag(tag)
  }

  pub fn tasks(&self) -> Vec<Task> {
    self.storage.tasks().tasks()
  }

  pub fn tags(&self) -> Vec<Tag> {
    self.storage.tags().tags()
  }

  pub fn task_by_id(&self, task_id: uuid::Uuid) -> Option<Task> {
    self.storage.tasks().task_by_id(task_id)
  }

  pub fn tag_by_id(&self, tag_id: uuid::Uuid) -> Option<Tag> {
    self.storage.tags().tag_by_id(tag_id)
  }

  pub fn tags_of_task(&self, task_id: uuid::Uuid) -> Vec<Tag> {
    self
      .storage
      .task_tags()
      .find_by_task_id(task_id)
      .iter()
      .filter_map(|link| self.storage.tags().tag_by_id(link.tag_id()))
      .collect()
  }

  /// Links an existing task to an existing tag. This is where the "no
  /// duplicate (task, tag) pair" rule lives; the association store itself
  /// does not enforce it.
  pub fn assign(&self, task_id: uuid::Uuid, tag_id: uuid::Uuid) -> Result<TaskTag> {
    let task = self
      .storage
      .tasks()
      .task_by_id(task_id)
      .ok_or(Error::NotFound("task", task_id))?;
    let tag = self
      .storage
      .tags()
      .tag_by_id(tag_id)
      .ok_or(Error::NotFound("tag", tag_id))?;

    if self.storage.task_tags().relation_exists(task_id, tag_id) {
      return Err(Error::DuplicateRelation(task_id, tag_id));
    }

    let link = TaskTag::new(&task, &tag);
    self.storage.task_tags().add_task_tag(&link)?;
    debug!("linked task {} to tag {}", task_id, tag_id);
    return Ok(link);
  }

  pub fn unassign(&self, task_id: uuid::Uuid, tag_id: uuid::Uuid) -> Result<()> {
    let link_ids: Vec<uuid::Uuid> = self
      .storage
      .task_tags()
      .find_by_task_id(task_id)
      .iter()
      .filter(|link| link.tag_id() == tag_id)
      .map(|link| link.id())
      .collect();

    self.storage.task_tags().remove_task_tags(&link_ids)
  }

  /// Cascade: drops the task's associations, then the task itself.
  pub fn remove_task(&self, task_id: uuid::Uuid) -> Result<()> {
    let link_ids: Vec<uuid::Uuid> = self
      .storage
      .task_tags()
      .find_by_task_id(task_id)
      .iter()
      .map(|link| link.id())
      .collect();

    self.storage.task_tags().remove_task_tags(&link_ids)?;
    self.storage.tasks().remove_task(task_id)
  }

  /// Cascade: drops the tag's associations, then the tag itself.
  pub fn remove_tag(&self, tag_id: uuid::Uuid) -> Result<()> {
    let link_ids: Vec<uuid::Uuid> = self
      .storage
      .task_tags()
      .find_by_tag_id(tag_id)
      .iter()
      .map(|link| link.id())
      .collect();

    self.storage.task_tags().remove_task_tags(&link_ids)?;
    self.storage.tags().remove_tag(tag_id)
  }

  pub fn complete_task(&self, task_id: uuid::Uuid) -> Result<Task> {
    let mut task = self
      .storage
      .tasks()
      .task_by_id(task_id)
      .ok_or(Error::NotFound("task", task_id))?;

    task.complete();
    self.storage.tasks().replace_task(&task)?;
    return Ok(task);
  }

  pub fn rename_task(&self, task_id: uuid::Uuid, name: &str) -> Result<Task> {
    let mut task = self
      .storage
      .tasks()
      .task_by_id(task_id)
      .ok_or(Error::NotFound("task", task_id))?;

    task.rename(name)?;
    self.storage.tasks().replace_task(&task)?;
    return Ok(task);
  }
}
