use anyhow::Result;

use postdigest_core::{
    ai::{DigestService, Generator},
    render::{expand_shortcodes, inject_into_content, render_digest_html},
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

    let html = render_digest_html(excerpt.as_deref(), summary.as_deref(), &config.display);
    let content = inject_into_content(&post, excerpt.as_deref(), summary.as_deref(), &config.display);

    println!("{}", expand_shortcodes(&content, html.as_deref()));

    Ok(())
}
