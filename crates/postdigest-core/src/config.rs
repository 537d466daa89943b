use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::ai::{Provider, ProviderCredentials};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub ai: AiConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub sync: SyncConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// Registry id of the selected model ("none" = manual mode)
    #[serde(default = "default_ai_model")]
    pub model: String,
    /// OpenAI API key
    #[serde(default)]
    pub openai_api_key: Option<String>,
    /// Anthropic API key
    #[serde(default)]
    pub anthropic_api_key: Option<String>,
    /// Google Gemini API key
    #[serde(default)]
    pub google_api_key: Option<String>,
    /// Hugging Face access token
    #[serde(default)]
    pub huggingface_api_key: Option<String>,
    /// Target excerpt length in words
    #[serde(default = "default_excerpt_word_length")]
    pub excerpt_word_length: u32,
    /// Target summary length in words
    #[serde(default = "default_summary_word_length")]
    pub summary_word_length: u32,
    /// Style instruction appended to the generated prompts
    #[serde(default = "default_prose_style")]
    pub prose_style: String,
    /// Full excerpt prompt, overrides the generated one
    #[serde(default)]
    pub excerpt_prompt: Option<String>,
    /// Full summary prompt, overrides the generated one
    #[serde(default)]
    pub summary_prompt: Option<String>,
    /// Provider request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// Reject prompts longer than this many chars (unset = no limit)
    #[serde(default)]
    pub max_prompt_chars: Option<usize>,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            model: default_ai_model(),
            openai_api_key: None,
            anthropic_api_key: None,
            google_api_key: None,
            huggingface_api_key: None,
            excerpt_word_length: default_excerpt_word_length(),
            summary_word_length: default_summary_word_length(),
            prose_style: default_prose_style(),
            excerpt_prompt: None,
            summary_prompt: None,
            request_timeout_secs: default_request_timeout(),
            max_prompt_chars: None,
        }
    }
}

impl AiConfig {
    /// Read-only view of the configured provider keys
    pub fn credentials(&self) -> ProviderCredentials {
        let mut credentials = ProviderCredentials::default();
        let keys = [
            (Provider::OpenAi, &self.openai_api_key),
            (Provider::Anthropic, &self.anthropic_api_key),
            (Provider::Google, &self.google_api_key),
            (Provider::HuggingFace, &self.huggingface_api_key),
        ];
        for (provider, key) in keys {
            if let Some(key) = key {
                credentials.insert(provider, key);
            }
        }
        credentials
    }

    /// Prompt used to generate the excerpt
    pub fn excerpt_prompt(&self) -> String {
        match &self.excerpt_prompt {
            Some(prompt) => prompt.clone(),
            None => format!(
                "Write an excerpt of no more than {} words for the following article. {}",
                self.excerpt_word_length, self.prose_style
            ),
        }
    }

    /// Prompt used to generate the summary
    pub fn summary_prompt(&self) -> String {
        match &self.summary_prompt {
            Some(prompt) => prompt.clone(),
            None => format!(
                "Write a summary of no more than {} words for the following article. {}",
                self.summary_word_length, self.prose_style
            ),
        }
    }
}

/// Visual style used when rendering excerpts and summaries into content
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayStyle {
    #[default]
    Block,
    Writer,
    Card,
    Tab,
}

impl DisplayStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Block => "block",
            Self::Writer => "writer",
            Self::Card => "card",
            Self::Tab => "tab",
        }
    }
}

/// Section titles for one display style
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StyleTitles {
    #[serde(default)]
    pub excerpt_title: String,
    #[serde(default)]
    pub summary_title: String,
}

impl StyleTitles {
    fn new(excerpt_title: &str, summary_title: &str) -> Self {
        Self {
            excerpt_title: excerpt_title.to_string(),
            summary_title: summary_title.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Post types that get excerpts and summaries injected
    #[serde(default = "default_post_types")]
    pub post_types: Vec<String>,
    #[serde(default = "default_true")]
    pub show_excerpt: bool,
    #[serde(default = "default_true")]
    pub show_summary: bool,
    #[serde(default)]
    pub style: DisplayStyle,
    #[serde(default = "default_block_titles")]
    pub block: StyleTitles,
    #[serde(default)]
    pub writer: StyleTitles,
    #[serde(default = "default_card_titles")]
    pub card: StyleTitles,
    #[serde(default = "default_tab_titles")]
    pub tab: StyleTitles,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            post_types: default_post_types(),
            show_excerpt: default_true(),
            show_summary: default_true(),
            style: DisplayStyle::default(),
            block: default_block_titles(),
            writer: StyleTitles::default(),
            card: default_card_titles(),
            tab: default_tab_titles(),
        }
    }
}

impl DisplayConfig {
    /// Titles configured for the active style
    pub fn titles(&self) -> &StyleTitles {
        match self.style {
            DisplayStyle::Block => &self.block,
            DisplayStyle::Writer => &self.writer,
            DisplayStyle::Card => &self.card,
            DisplayStyle::Tab => &self.tab,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Copy the AI excerpt into the post's own excerpt field on save
    #[serde(default = "default_true")]
    pub sync_excerpt_to_post_excerpt: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            sync_excerpt_to_post_excerpt: default_true(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("postdigest")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_ai_model() -> String {
    "none".to_string()
}

fn default_excerpt_word_length() -> u32 {
    55
}

fn default_summary_word_length() -> u32 {
    150
}

fn default_prose_style() -> String {
    "Write the summary in the style of the article.".to_string()
}

fn default_request_timeout() -> u64 {
    60
}

fn default_post_types() -> Vec<String> {
    vec!["post".to_string()]
}

fn default_block_titles() -> StyleTitles {
    StyleTitles::new("", "Summary")
}

fn default_card_titles() -> StyleTitles {
    StyleTitles::new("", "Summary")
}

pub(crate) fn default_tab_titles() -> StyleTitles {
    StyleTitles::new("Excerpt", "Summary")
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Get the configuration file path
    /// Always uses ~/.config/postdigest/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("postdigest")
            .join("config.toml")
    }

    /// Get the database file path
    pub fn database_path(&self) -> PathBuf {
        self.data_dir().join("postdigest.db")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_file() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.ai.model, "none");
        assert_eq!(config.ai.request_timeout_secs, 60);
        assert!(config.ai.max_prompt_chars.is_none());
        assert_eq!(config.display.style, DisplayStyle::Block);
        assert_eq!(config.display.post_types, vec!["post".to_string()]);
        assert_eq!(config.display.tab.excerpt_title, "Excerpt");
        assert!(config.sync.sync_excerpt_to_post_excerpt);
    }

    #[test]
    fn test_parse_ai_and_display_sections() {
        let config = AppConfig::from_toml(
            r#"
            [ai]
            model = "openai-gpt-5-mini"
            openai_api_key = "sk-test"
            excerpt_prompt = "Tease:"

            [display]
            style = "tab"
            show_summary = false

            [display.tab]
            excerpt_title = "Short"
            "#,
        )
        .unwrap();

        assert_eq!(config.ai.model, "openai-gpt-5-mini");
        assert_eq!(config.ai.credentials().api_key(Provider::OpenAi), "sk-test");
        assert_eq!(config.ai.credentials().api_key(Provider::Google), "");
        assert_eq!(config.ai.excerpt_prompt(), "Tease:");
        assert_eq!(config.display.style, DisplayStyle::Tab);
        assert!(!config.display.show_summary);
        assert_eq!(config.display.titles().excerpt_title, "Short");
        assert_eq!(config.display.titles().summary_title, "");
    }

    #[test]
    fn test_generated_prompts_use_word_lengths() {
        let ai = AiConfig::default();
        assert_eq!(
            ai.excerpt_prompt(),
            "Write an excerpt of no more than 55 words for the following article. \
Write the summary in the style of the article."
        );
        assert!(ai.summary_prompt().contains("no more than 150 words"));
    }

    #[test]
    fn test_invalid_style_is_config_error() {
        let err = AppConfig::from_toml("[display]\nstyle = \"fancy\"").unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }
}
