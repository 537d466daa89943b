use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Meta key holding the AI excerpt
pub const META_EXCERPT: &str = "_ai_excerpt";
/// Meta key holding the AI summary
pub const META_SUMMARY: &str = "_ai_summary";

/// A stored post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub post_type: String,
    pub title: String,
    pub content: String,
    /// The post's own excerpt field
    pub excerpt: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new post
#[derive(Debug, Clone)]
pub struct NewPost {
    pub post_type: String,
    pub title: String,
    pub content: String,
}

impl NewPost {
    pub fn new(title: &str, content: &str) -> Self {
        Self {
            post_type: "post".to_string(),
            title: title.to_string(),
            content: content.to_string(),
        }
    }
}

/// AI excerpt and summary generated for one post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDigest {
    pub excerpt: String,
    pub summary: String,
}
