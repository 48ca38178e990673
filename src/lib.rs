extern crate chrono;
extern crate serde;
extern crate serde_json;
extern crate uuid;

mod taskbook;

pub mod color;
pub mod config;
pub mod error;
pub mod storage;
pub mod tag;
pub mod task;
pub mod task_tag;
pub mod traits;

pub use taskbook::*;
