pub mod ai;
pub mod config;
pub mod error;
pub mod post;
pub mod render;
pub mod storage;

pub use config::{AppConfig, DisplayConfig, DisplayStyle};
pub use error::{Error, GenerationError, Result};
