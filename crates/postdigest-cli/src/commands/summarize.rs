use anyhow::Result;

use postdigest_core::{
    ai::{get_model, DigestService, Generator},
    storage::Database,
    AppConfig,
};

pub async fn run(db: &Database, config: &AppConfig, id: i64) -> Result<()> {
    let label = get_model(&config.ai.model)
        .map(|m| m.label)
        .unwrap_or("unknown model");
    println!("Summarizing post {} with {}...", id, label);

    let generator = Generator::new(&config.ai)?;
    let service = DigestService::new(db, config, &generator);

    match service.generate_for_post(id).await {
        Ok(digest) => {
            println!("\nExcerpt:\n{}", digest.excerpt);
            println!("\nSummary:\n{}", digest.summary);
            if config.sync.sync_excerpt_to_post_excerpt {
                println!("\nThe post excerpt was updated as well.");
            }
            Ok(())
        }
        Err(postdigest_core::Error::Generation(e)) => {
            println!("Generation failed ({}): {}", e.kind().as_str(), e);
            println!("Nothing was saved.");
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}
