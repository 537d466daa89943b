pub mod add;
pub mod edit;
pub mod generate;
pub mod list;
pub mod models;
pub mod render;
pub mod show;
pub mod summarize;
