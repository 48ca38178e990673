use crate::error::{Error, Result};
use crate::traits::Indexable;

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize,
)]
pub enum Priority {
  Low,
  #[default]
  Medium,
  High,
}

/// One unit of work. Constructed through [`TaskBuilder`] only; every named
/// setter re-runs the same field validation the builder applies, so a task
/// can never hold an empty name or a deadline in the past.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Task {
  id: uuid::Uuid,
  name: String,
  description: Option<String>,
  priority: Priority,
  deadline: Option<chrono::DateTime<chrono::Local>>,
  created_at: chrono::DateTime<chrono::Local>,
  completed: bool,
}

impl Indexable for Task {
  fn id(&self) -> uuid::Uuid {
    self.id
  }
}

impl Task {
  pub fn builder() -> TaskBuilder {
    TaskBuilder::new()
  }

  pub fn name(&self) -> &str {
    self.name.as_str()
  }

  pub fn description(&self) -> Option<&str> {
    self.description.as_deref()
  }

  pub fn priority(&self) -> Priority {
    self.priority
  }

  /// `None` means "no deadline".
  pub fn deadline(&self) -> Option<chrono::DateTime<chrono::Local>> {
    self.deadline
  }

  /// Time remaining until the deadline; `None` when the task has no deadline.
  /// May be negative once the deadline has passed.
  pub fn time_left(&self) -> Option<chrono::Duration> {
    self
      .deadline
      .map(|deadline| deadline.signed_duration_since(chrono::Local::now()))
  }

  pub fn created_at(&self) -> chrono::DateTime<chrono::Local> {
    self.created_at
  }

  pub fn is_completed(&self) -> bool {
    self.completed
  }

  pub fn rename(&mut self, name: &str) -> Result<()> {
    self.name = validated_name(name)?;
    Ok(())
  }

  pub fn set_description(&mut self, description: Option<String>) {
    self.description = description;
  }

  pub fn set_priority(&mut self, priority: Priority) {
    self.priority = priority;
  }

  /// Moves the deadline. `None` clears it; a moment strictly before now is
  /// rejected and the previous deadline stays in place.
  pub fn set_deadline(&mut self, deadline: Option<chrono::DateTime<chrono::Local>>) -> Result<()> {
    self.deadline = validated_deadline(deadline)?;
    Ok(())
  }

  /// One-way: there is no way to mark a completed task pending again.
  pub fn complete(&mut self) {
    self.completed = true;
  }
}

pub struct TaskBuilder {
  name: Option<String>,
  description: Option<String>,
  priority: Priority,
  deadline: Option<chrono::DateTime<chrono::Local>>,
}

impl TaskBuilder {
  pub fn new() -> Self {
    Self {
      name: None,
      description: None,
      priority: Priority::default(),
      deadline: None,
    }
  }

  pub fn name(mut self, name: &str) -> Self {
    self.name = Some(name.to_owned());
    self
  }

  pub fn description(mut self, description: &str) -> Self {
    self.description = Some(description.to_owned());
    self
  }

  pub fn priority(mut self, priority: Priority) -> Self {
    self.priority = priority;
    self
  }

  pub fn deadline(mut self, deadline: chrono::DateTime<chrono::Local>) -> Self {
    self.deadline = Some(deadline);
    self
  }

  /// Validates the accumulated fields and freezes the task. Identity and
  /// creation time are assigned here.
  pub fn build(self) -> Result<Task> {
    let name = match self.name {
      Some(name) => validated_name(&name)?,
      None => return Err(Error::MissingRequiredField("name")),
    };

    return Ok(Task {
      id: uuid::Uuid::new_v4(),
      name,
      description: self.description,
      priority: self.priority,
      deadline: validated_deadline(self.deadline)?,
      created_at: chrono::Local::now(),
      completed: false,
    });
  }
}

impl Default for TaskBuilder {
  fn default() -> Self {
    Self::new()
  }
}

pub(crate) fn validated_name(name: &str) -> Result<String> {
  if name.is_empty() {
    return Err(Error::MissingRequiredField("name"));
  }
  return Ok(name.to_owned());
}

fn validated_deadline(
  deadline: Option<chrono::DateTime<chrono::Local>>,
) -> Result<Option<chrono::DateTime<chrono::Local>>> {
  match deadline {
    Some(moment) if moment < chrono::Local::now() => Err(Error::InvalidDeadline(moment)),
    other => Ok(other),
  }
}

#[cfg(test)]
mod test {
  use super::{Priority, Task};
  use crate::error::Error;
  use crate::traits::Indexable;

  #[test]
  fn builds_with_defaults() {
    let task = Task::builder().name("Write report").build().unwrap();

    assert_eq!(task.name(), "Write report");
    assert_eq!(task.description(), None);
    assert_eq!(task.priority(), Priority::Medium);
    assert_eq!(task.deadline(), None);
    assert_eq!(task.time_left(), None);
    assert!(!task.is_completed());
  }

  #[test]
  fn ids_are_unique_across_builds() {
    let first = Task::builder().name("a").build().unwrap();
    let second = Task::builder().name("a").build().unwrap();
    assert_ne!(first.id(), second.id());
  }

  #[test]
  fn build_without_name_fails() {
    let err = Task::builder().build().unwrap_err();
    assert!(matches!(err, Error::MissingRequiredField("name")));
  }

  #[test]
  fn build_with_empty_name_fails() {
    let err = Task::builder().name("").build().unwrap_err();
    assert!(matches!(err, Error::MissingRequiredField("name")));
  }

  #[test]
  fn rename_rejects_empty_name() {
    let mut task = Task::builder().name("Write report").build().unwrap();
    task.rename("").unwrap_err();
    assert_eq!(task.name(), "Write report");

    task.rename("Send report").unwrap();
    assert_eq!(task.name(), "Send report");
  }

  #[test]
  fn build_with_past_deadline_fails() {
    let yesterday = chrono::Local::now() - chrono::Duration::days(1);
    let err = Task::builder()
      .name("too late")
      .deadline(yesterday)
      .build()
      .unwrap_err();
    assert!(matches!(err, Error::InvalidDeadline(_)));
  }

  #[test]
  fn past_deadline_keeps_previous_value() {
    let tomorrow = chrono::Local::now() + chrono::Duration::days(1);
    let mut task = Task::builder()
      .name("report")
      .deadline(tomorrow)
      .build()
      .unwrap();

    let yesterday = chrono::Local::now() - chrono::Duration::days(1);
    task.set_deadline(Some(yesterday)).unwrap_err();

    assert_eq!(task.deadline(), Some(tomorrow));
  }

  #[test]
  fn clearing_deadline_is_allowed() {
    let tomorrow = chrono::Local::now() + chrono::Duration::days(1);
    let mut task = Task::builder()
      .name("report")
      .deadline(tomorrow)
      .build()
      .unwrap();

    task.set_deadline(None).unwrap();
    assert_eq!(task.deadline(), None);
    assert_eq!(task.time_left(), None);
  }

  #[test]
  fn time_left_tracks_deadline() {
    let deadline = chrono::Local::now() + chrono::Duration::hours(2);
    let task = Task::builder()
      .name("report")
      .deadline(deadline)
      .build()
      .unwrap();

    let left = task.time_left().unwrap();
    assert!(left <= chrono::Duration::hours(2));
    assert!(left > chrono::Duration::hours(1));
  }

  #[test]
  fn complete_is_one_way() {
    let mut task = Task::builder().name("report").build().unwrap();
    task.complete();
    task.complete();
    assert!(task.is_completed());
  }
}
