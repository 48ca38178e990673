mod repo_json;
mod repository;
mod store_json;

pub use repo_json::{JsonStorage, JsonTagRepository, JsonTaskRepository, JsonTaskTagRepository};
pub use repository::{TagRepository, TaskRepository, TaskTagRepository};
