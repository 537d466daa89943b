use anyhow::Result;

use postdigest_core::{
    ai::{clean_content, DigestService, Generator},
    storage::{Database, PostRepository},
    AppConfig, Error,
};

pub async fn run(db: &Database, config: &AppConfig, id: i64) -> Result<()> {
    let post = PostRepository::new(db)
        .find_by_id(id)
        .await?
        .ok_or(Error::PostNotFound(id))?;

    let generator = Generator::new(&config.ai)?;
    let (excerpt, summary) = DigestService::new(db, config, &generator).load(id).await?;

    println!("{} ({} {})", post.title, post.post_type, post.id);
    println!("Created: {}", post.created_at.format("%Y-%m-%d %H:%M"));

    let text = clean_content(&post.content);
    let preview: String = text.chars().take(200).collect();
    let ellipsis = if text.chars().count() > 200 { "..." } else { "" };
    println!("\n{}{}", preview, ellipsis);

    println!("\nAI excerpt:\n{}", excerpt.as_deref().unwrap_or("(none)"));
    println!("\nAI summary:\n{}", summary.as_deref().unwrap_or("(none)"));
    println!("\nPost excerpt:\n{}", post.excerpt.as_deref().unwrap_or("(none)"));

    Ok(())
}
