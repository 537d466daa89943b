use anyhow::Result;

use postdigest_core::{
    ai::{DigestService, Generator, SaveContext},
    storage::Database,
    AppConfig,
};

/// Requested edits; untouched fields keep their stored value
pub struct Changes {
    pub excerpt: Option<String>,
    pub summary: Option<String>,
    pub clear_excerpt: bool,
    pub clear_summary: bool,
}

pub async fn run(db: &Database, config: &AppConfig, id: i64, changes: Changes) -> Result<()> {
    let generator = Generator::new(&config.ai)?;
    let service = DigestService::new(db, config, &generator);
    let (current_excerpt, current_summary) = service.load(id).await?;

    let excerpt = if changes.clear_excerpt {
        None
    } else {
        changes.excerpt.or(current_excerpt)
    };
    let summary = if changes.clear_summary {
        None
    } else {
        changes.summary.or(current_summary)
    };

    let mut ctx = SaveContext::default();
    service
        .save_post_meta(id, excerpt.as_deref(), summary.as_deref(), &mut ctx)
        .await?;

    println!("Saved excerpt and summary for post {}.", id);

    Ok(())
}
