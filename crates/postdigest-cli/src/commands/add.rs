use std::path::Path;

use anyhow::{Context, Result};

use postdigest_core::{
    post::NewPost,
    storage::{Database, PostRepository},
};

pub async fn run(db: &Database, title: &str, file: &Path, post_type: &str) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let new_post = NewPost {
        post_type: post_type.to_string(),
        title: title.to_string(),
        content,
    };

    let post = PostRepository::new(db).create(&new_post).await?;
    println!("Created {} {}: {}", post.post_type, post.id, post.title);
    println!("\nTo generate its excerpt and summary, run:");
    println!("  postdigest summarize {}", post.id);

    Ok(())
}
