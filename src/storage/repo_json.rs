use std::path::Path;

use crate::error::Result;
use crate::tag::Tag;
use crate::task::Task;
use crate::task_tag::TaskTag;

use super::repository::{TagRepository, TaskRepository, TaskTagRepository};
use super::store_json::JsonStore;

pub struct JsonTagRepository {
  store: JsonStore<Tag>,
}

impl JsonTagRepository {
  pub fn new(filepath: &Path) -> Result<Self> {
    return Ok(Self {
      store: JsonStore::open(filepath)?,
    });
  }
}

impl TagRepository for JsonTagRepository {
  fn tags(&self) -> Vec<Tag> {
    self.store.all()
  }

  fn tag_by_id(&self, id: uuid::Uuid) -> Option<Tag> {
    self.store.get(id)
  }

  fn add_tag(&self, tag: &Tag) -> Result<()> {
    self.store.add(tag.clone())
  }

  fn replace_tag(&self, tag: &Tag) -> Result<()> {
    self.store.replace(tag)
  }

  fn remove_tag(&self, id: uuid::Uuid) -> Result<()> {
    self.store.remove(id)
  }

  fn remove_tags(&self, ids: &[uuid::Uuid]) -> Result<()> {
    self.store.remove_many(ids)
  }
}

pub struct JsonTaskRepository {
  store: JsonStore<Task>,
}

impl JsonTaskRepository {
  pub fn new(filepath: &Path) -> Result<Self> {
    return Ok(Self {
      store: JsonStore::open(filepath)?,
    });
  }
}

impl TaskRepository for JsonTaskRepository {
  fn tasks(&self) -> Vec<Task> {
    self.store.all()
  }

  fn task_by_id(&self, id: uuid::Uuid) -> Option<Task> {
    self.store.get(id)
  }

  fn add_task(&self, task: &Task) -> Result<()> {
    self.store.add(task.clone())
  }

  fn replace_task(&self, task: &Task) -> Result<()> {
    self.store.replace(task)
  }

  fn remove_task(&self, id: uuid::Uuid) -> Result<()> {
    self.store.remove(id)
  }

  fn remove_tasks(&self, ids: &[uuid::Uuid]) -> Result<()> {
    self.store.remove_many(ids)
  }
}

pub struct JsonTaskTagRepository {
  store: JsonStore<TaskTag>,
}

impl JsonTaskTagRepository {
  pub fn new(filepath: &Path) -> Result<Self> {
    return Ok(Self {
      store: JsonStore::open(filepath)?,
    });
  }
}

impl TaskTagRepository for JsonTaskTagRepository {
  fn task_tags(&self) -> Vec<TaskTag> {
    self.store.all()
  }

  fn task_tag_by_id(&self, id: uuid::Uuid) -> Option<TaskTag> {
    self.store.get(id)
  }

  fn add_task_tag(&self, task_tag: &TaskTag) -> Result<()> {
    self.store.add(task_tag.clone())
  }

  fn replace_task_tag(&self, task_tag: &TaskTag) -> Result<()> {
    self.store.replace(task_tag)
  }

  fn remove_task_tag(&self, id: uuid::Uuid) -> Result<()> {
    self.store.remove(id)
  }

  fn remove_task_tags(&self, ids: &[uuid::Uuid]) -> Result<()> {
    self.store.remove_many(ids)
  }

  fn find_by_task_id(&self, task_id: uuid::Uuid) -> Vec<TaskTag> {
    self.store.filter(|link| link.task_id() == task_id)
  }

  fn find_by_tag_id(&self, tag_id: uuid::Uuid) -> Vec<TaskTag> {
    self.store.filter(|link| link.tag_id() == tag_id)
  }

  fn find_by_task_ids(&self, task_ids: &[uuid::Uuid]) -> Vec<TaskTag> {
    task_ids
      .iter()
      .flat_map(|task_id| self.find_by_task_id(*task_id))
      .collect()
  }

  fn find_by_tag_ids(&self, tag_ids: &[uuid::Uuid]) -> Vec<TaskTag> {
    tag_ids
      .iter()
      .flat_map(|tag_id| self.find_by_tag_id(*tag_id))
      .collect()
  }

  fn relation_exists(&self, task_id: uuid::Uuid, tag_id: uuid::Uuid) -> bool {
    self
      .store
      .any(|link| link.task_id() == task_id && link.tag_id() == tag_id)
  }
}

/// The three JSON repositories over one storage folder, one file per entity
/// kind.
pub struct JsonStorage {
  tags: JsonTagRepository,
  tasks: JsonTaskRepository,
  task_tags: JsonTaskTagRepository,
}

impl JsonStorage {
  pub fn new(database_folder: &str) -> Result<Self> {
    let database_path = Path::new(database_folder);

    return Ok(Self {
      tags: JsonTagRepository::new(&database_path.join("tags.json"))?,
      tasks: JsonTaskRepository::new(&database_path.join("tasks.json"))?,
      task_tags: JsonTaskTagRepository::new(&database_path.join("task_tags.json"))?,
    });
  }

  pub fn tags_filepath(&self) -> &Path {
    self.tags.store.storage_path()
  }

  pub fn tasks_filepath(&self) -> &Path {
    self.tasks.store.storage_path()
  }

  pub fn task_tags_filepath(&self) -> &Path {
    self.task_tags.store.storage_path()
  }

  pub fn tags(&self) -> &JsonTagRepository {
    &self.tags
  }

  pub fn tasks(&self) -> &JsonTaskRepository {
    &self.tasks
  }

  pub fn task_tags(&self) -> &JsonTaskTagRepository {
    &self.task_tags
  }
}
