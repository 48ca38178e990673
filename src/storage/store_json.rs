use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use log::{debug, error, warn};

use crate::error::{Error, Result};
use crate::traits::Indexable;

/// One entity kind's cache plus its backing file: a `Vec` in insertion order,
/// mirrored to a pretty-printed JSON array that is rewritten wholesale on
/// every successful mutation.
///
/// All mutations run under the store's mutex as a single unit: validate,
/// mutate a working copy, serialize, write. The cache only commits once the
/// file write succeeded, so after a failed write both the cache and the file
/// still hold the previous state.
pub(super) struct JsonStore<T> {
  filepath: PathBuf,
  buffer: Mutex<Vec<T>>,
}

impl<T> JsonStore<T>
where
  T: Indexable + Clone + serde::de::DeserializeOwned + serde::ser::Serialize,
{
  /// Opens the store over `filepath`. A missing or empty file yields an empty
  /// cache; an existing file that cannot be read or parsed fails the whole
  /// construction. Starting empty over a corrupt file would overwrite it on
  /// the next mutation.
  pub(super) fn open(filepath: &Path) -> Result<Self> {
    let buffer: Vec<T> = match std::fs::read_to_string(filepath) {
      Ok(contents) if contents.trim().is_empty() => Vec::new(),
      Ok(contents) => match serde_json::from_str(&contents) {
        Ok(items) => items,
        Err(err) => {
          error!("can't parse {}: {}", filepath.display(), err);
          return Err(Error::Serde(err));
        }
      },
      Err(err) if err.kind() == std::io::ErrorKind::NotFound => Vec::new(),
      Err(err) => {
        error!("can't read {}: {}", filepath.display(), err);
        return Err(Error::Io(err));
      }
    };

    debug!(
      "restored {} items from: {}",
      buffer.len(),
      filepath.display()
    );

    return Ok(Self {
      filepath: filepath.to_owned(),
      buffer: Mutex::new(buffer),
    });
  }

  pub(super) fn storage_path(&self) -> &Path {
    self.filepath.as_path()
  }

  pub(super) fn all(&self) -> Vec<T> {
    self.lock().clone()
  }

  pub(super) fn get(&self, id: uuid::Uuid) -> Option<T> {
    self.lock().iter().find(|item| item.id() == id).cloned()
  }

  pub(super) fn filter(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
    self
      .lock()
      .iter()
      .filter(|item| predicate(item))
      .cloned()
      .collect()
  }

  pub(super) fn any(&self, predicate: impl Fn(&T) -> bool) -> bool {
    self.lock().iter().any(|item| predicate(item))
  }

  pub(super) fn add(&self, item: T) -> Result<()> {
    self.mutate(|items| {
      if items.iter().any(|existing| existing.id() == item.id()) {
        return Err(Error::DuplicateKey(item.id()));
      }
      items.push(item);
      Ok(true)
    })
  }

  /// Swaps the cached item carrying the same id. A miss is a warned no-op,
  /// never a failure.
  pub(super) fn replace(&self, item: &T) -> Result<()> {
    self.mutate(|items| {
      let position = items.iter().position(|existing| existing.id() == item.id());
      match position {
        Some(position) => {
          items[position] = item.clone();
          Ok(true)
        }
        None => {
          warn!(
            "nothing to replace: id {} is not in {}",
            item.id(),
            self.filepath.display()
          );
          Ok(false)
        }
      }
    })
  }

  pub(super) fn remove(&self, id: uuid::Uuid) -> Result<()> {
    self.remove_many(&[id])
  }

  /// Removes every matching id; missing ids are warned and skipped. The file
  /// is rewritten once for the whole batch, and only when something was
  /// actually removed.
  pub(super) fn remove_many(&self, ids: &[uuid::Uuid]) -> Result<()> {
    self.mutate(|items| {
      let mut removed_any = false;
      for id in ids {
        match items.iter().position(|existing| existing.id() == *id) {
          Some(position) => {
            items.remove(position);
            removed_any = true;
          }
          None => warn!(
            "nothing to remove: id {} is not in {}",
            id,
            self.filepath.display()
          ),
        }
      }
      Ok(removed_any)
    })
  }

  /// The single critical section: `op` mutates a working copy and reports
  /// whether anything changed; a change is written out before the cache
  /// commits to it.
  fn mutate<F>(&self, op: F) -> Result<()>
  where
    F: FnOnce(&mut Vec<T>) -> Result<bool>,
  {
    let mut buffer = self.lock();
    let mut next = buffer.clone();

    if op(&mut next)? {
      self.persist(&next)?;
      *buffer = next;
    }

    Ok(())
  }

  fn persist(&self, items: &[T]) -> Result<()> {
    let payload = serde_json::to_string_pretty(items)?;
    if let Err(err) = std::fs::write(&self.filepath, payload) {
      error!("can't write {}: {}", self.filepath.display(), err);
      return Err(Error::Io(err));
    }
    Ok(())
  }

  fn lock(&self) -> MutexGuard<'_, Vec<T>> {
    // A poisoned lock only means another thread panicked mid-read; the cache
    // itself is only replaced after a successful write.
    self
      .buffer
      .lock()
      .unwrap_or_else(|poisoned| poisoned.into_inner())
  }
}

#[cfg(test)]
mod test {
  use super::JsonStore;
  use crate::error::Error;
  use crate::traits::Indexable;

  #[derive(Clone, serde::Serialize, serde::Deserialize)]
  struct TestType {
    id: uuid::Uuid,
    title: String,
  }

  impl TestType {
    fn new(title: &str) -> Self {
      Self {
        id: uuid::Uuid::new_v4(),
        title: title.to_string(),
      }
    }

    fn title(&self) -> &str {
      self.title.as_str()
    }
  }

  impl Indexable for TestType {
    fn id(&self) -> uuid::Uuid {
      self.id
    }
  }

  fn store_in(dir: &tempfile::TempDir) -> JsonStore<TestType> {
    let _ = env_logger::builder().is_test(true).try_init();
    JsonStore::<TestType>::open(&dir.path().join("items.json")).unwrap()
  }

  #[test]
  fn store_add() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    store.add(TestType::new("Hello")).unwrap();

    assert_eq!(store.all().len(), 1);
  }

  #[test]
  fn store_add_duplicate_id_fails() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    let item = TestType::new("Hello");

    store.add(item.clone()).unwrap();
    let err = store.add(item).unwrap_err();

    assert!(matches!(err, Error::DuplicateKey(_)));
    assert_eq!(store.all().len(), 1);
  }

  #[test]
  fn store_get_by_id() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    let item = TestType::new("Hello");
    let id = item.id();

    store.add(item).unwrap();

    assert_eq!(store.get(id).unwrap().title(), "Hello");
    assert!(store.get(uuid::Uuid::new_v4()).is_none());
  }

  #[test]
  fn store_remove() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    let item = TestType::new("Hello");
    let id = item.id();

    store.add(item).unwrap();
    store.remove(id).unwrap();

    assert!(store.all().is_empty());
  }

  #[test]
  fn store_remove_missing_id_is_a_noop() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    store.add(TestType::new("Hello")).unwrap();

    store.remove(uuid::Uuid::new_v4()).unwrap();

    assert_eq!(store.all().len(), 1);
  }

  #[test]
  fn store_remove_many() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    let first = TestType::new("a");
    let second = TestType::new("b");
    let ids = [first.id(), second.id()];

    store.add(first).unwrap();
    store.add(second).unwrap();
    store.remove_many(&ids).unwrap();

    assert!(store.all().is_empty());
  }

  #[test]
  fn store_replace() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    let item = TestType::new("Hello");
    let id = item.id();
    store.add(item).unwrap();

    let mut updated = TestType::new("Hello, world!");
    updated.id = id;
    store.replace(&updated).unwrap();

    let all_items = store.all();
    assert_eq!(all_items.len(), 1);
    assert_eq!(all_items[0].title(), "Hello, world!");
  }

  #[test]
  fn store_replace_missing_id_is_a_noop() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    store.replace(&TestType::new("ghost")).unwrap();

    assert!(store.all().is_empty());
  }

  #[test]
  fn store_keeps_insertion_order() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    for title in ["a", "b", "c"] {
      store.add(TestType::new(title)).unwrap();
    }

    let titles: Vec<String> = store.all().iter().map(|item| item.title.clone()).collect();
    assert_eq!(titles, vec!["a", "b", "c"]);
  }

  #[test]
  fn store_restores_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let item = TestType::new("persisted");
    let id = item.id();

    {
      let store = store_in(&dir);
      store.add(item).unwrap();
    }

    let reopened = store_in(&dir);
    assert_eq!(reopened.all().len(), 1);
    assert_eq!(reopened.get(id).unwrap().title(), "persisted");
  }

  #[test]
  fn store_open_missing_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    assert!(store.all().is_empty());
  }

  #[test]
  fn store_open_empty_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("items.json"), "").unwrap();

    let store = store_in(&dir);
    assert!(store.all().is_empty());
  }

  #[test]
  fn store_open_corrupt_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("items.json"), "{not json").unwrap();

    let err = JsonStore::<TestType>::open(&dir.path().join("items.json"))
      .err()
      .unwrap();
    assert!(matches!(err, Error::Serde(_)));
  }
}
