use super::content::strip_tags;
use super::Generator;
use crate::config::AppConfig;
use crate::post::{PostDigest, META_EXCERPT, META_SUMMARY};
use crate::storage::{Database, PostRepository};
use crate::Result;

/// Re-entrancy state for a chain of meta saves.
///
/// Syncing the AI excerpt writes the post itself; a save triggered from
/// inside that write must not sync again.
#[derive(Debug, Default)]
pub struct SaveContext {
    pub updating_excerpt: bool,
}

/// Generates and stores the excerpt and summary of a post
pub struct DigestService<'a> {
    db: &'a Database,
    config: &'a AppConfig,
    generator: &'a Generator,
}

impl<'a> DigestService<'a> {
    pub fn new(db: &'a Database, config: &'a AppConfig, generator: &'a Generator) -> Self {
        Self {
            db,
            config,
            generator,
        }
    }

    /// Generate both texts for a post and persist them.
    ///
    /// The excerpt is requested first. If either call fails the error is
    /// returned and nothing is written, including a successful excerpt.
    pub async fn generate_for_post(&self, post_id: i64) -> Result<PostDigest> {
        let repo = PostRepository::new(self.db);
        let content = repo.content(post_id).await?;
        let model = &self.config.ai.model;

        tracing::info!(post_id, model = %model, "Generating excerpt and summary");

        let excerpt = self
            .generator
            .generate(model, &content, &self.config.ai.excerpt_prompt())
            .await?;
        let summary = self
            .generator
            .generate(model, &content, &self.config.ai.summary_prompt())
            .await?;

        let mut ctx = SaveContext::default();
        self.save_post_meta(post_id, Some(&excerpt), Some(&summary), &mut ctx)
            .await?;

        Ok(PostDigest { excerpt, summary })
    }

    /// Store or clear the AI meta values of a post.
    ///
    /// `None` deletes the value. Stored text has markup removed. When excerpt
    /// sync is enabled and `ctx` is not already inside a sync, the post's own
    /// excerpt is overwritten too.
    pub async fn save_post_meta(
        &self,
        post_id: i64,
        excerpt: Option<&str>,
        summary: Option<&str>,
        ctx: &mut SaveContext,
    ) -> Result<()> {
        let repo = PostRepository::new(self.db);

        match excerpt {
            Some(excerpt) => {
                let excerpt = sanitize_text(excerpt);
                repo.set_meta(post_id, META_EXCERPT, &excerpt).await?;

                if self.config.sync.sync_excerpt_to_post_excerpt && !ctx.updating_excerpt {
                    ctx.updating_excerpt = true;
                    let synced = repo.update_excerpt(post_id, &excerpt).await;
                    ctx.updating_excerpt = false;
                    synced?;
                    tracing::debug!(post_id, "Synced AI excerpt to post excerpt");
                }
            }
            None => {
                repo.delete_meta(post_id, META_EXCERPT).await?;
            }
        }

        match summary {
            Some(summary) => {
                repo.set_meta(post_id, META_SUMMARY, &sanitize_text(summary))
                    .await?;
            }
            None => {
                repo.delete_meta(post_id, META_SUMMARY).await?;
            }
        }

        Ok(())
    }

    /// Stored excerpt and summary, if any
    pub async fn load(&self, post_id: i64) -> Result<(Option<String>, Option<String>)> {
        let repo = PostRepository::new(self.db);
        let excerpt = repo.get_meta(post_id, META_EXCERPT).await?;
        let summary = repo.get_meta(post_id, META_SUMMARY).await?;
        Ok((excerpt, summary))
    }
}

/// Textarea-style sanitizing: markup removed, line breaks kept
fn sanitize_text(text: &str) -> String {
    strip_tags(text)
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
