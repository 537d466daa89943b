use anyhow::Result;

use postdigest_core::{
    post::{META_EXCERPT, META_SUMMARY},
    storage::{Database, PostRepository},
};

pub async fn run(db: &Database) -> Result<()> {
    let repo = PostRepository::new(db);
    let posts = repo.list_all().await?;

    if posts.is_empty() {
        println!("No posts yet.");
        println!("\nTo add a post, run:");
        println!("  postdigest add -t <title> -f <file>");
        return Ok(());
    }

    println!("Posts ({}):\n", posts.len());

    for post in &posts {
        let has_excerpt = repo.get_meta(post.id, META_EXCERPT).await?.is_some();
        let has_summary = repo.get_meta(post.id, META_SUMMARY).await?.is_some();

        let status = match (has_excerpt, has_summary) {
            (true, true) => " [excerpt, summary]",
            (true, false) => " [excerpt]",
            (false, true) => " [summary]",
            (false, false) => "",
        };

        println!("  {:>4}  {} ({}){}", post.id, post.title, post.post_type, status);
        println!("        Updated: {}", post.updated_at.format("%Y-%m-%d %H:%M"));
    }

    Ok(())
}
