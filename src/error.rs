pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong in the core: field validation at entity
/// construction or mutation, identity clashes inside a repository, and
/// persistence failures bubbling up from the backing file.
#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error("missing required field: {0}")]
  MissingRequiredField(&'static str),

  #[error("invalid argument: {0}")]
  InvalidArgument(String),

  #[error("deadline {0} is not in the future")]
  InvalidDeadline(chrono::DateTime<chrono::Local>),

  #[error("entity with id {0} already exists")]
  DuplicateKey(uuid::Uuid),

  #[error("task {0} is already linked to tag {1}")]
  DuplicateRelation(uuid::Uuid, uuid::Uuid),

  #[error("{0} with id {1} not found")]
  NotFound(&'static str, uuid::Uuid),

  #[error("storage io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("storage serialization error: {0}")]
  Serde(#[from] serde_json::Error),
}
