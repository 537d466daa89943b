mod database;
mod post_repo;

pub use database::Database;
pub use post_repo::PostRepository;
