use serde::{Deserialize, Serialize};
use std::fmt;

/// External LLM vendor behind a model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Manual mode, nothing is generated
    None,
    HuggingFace,
    OpenAi,
    Anthropic,
    Google,
}

impl Provider {
    /// Settings key used for this provider
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::HuggingFace => "huggingface",
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
            Self::Google => "google",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::HuggingFace => "Hugging Face",
            Self::OpenAi => "OpenAI",
            Self::Anthropic => "Anthropic",
            Self::Google => "Google",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One selectable model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelEntry {
    pub id: &'static str,
    pub label: &'static str,
    pub provider: Provider,
    /// Identifier the provider's API expects
    pub model_name: &'static str,
}

const fn entry(
    id: &'static str,
    label: &'static str,
    provider: Provider,
    model_name: &'static str,
) -> ModelEntry {
    ModelEntry {
        id,
        label,
        provider,
        model_name,
    }
}

const MODELS: &[ModelEntry] = &[
    entry("none", "None (Manual)", Provider::None, ""),
    entry("openai-gpt-5-mini", "ChatGPT 5 Mini (gpt-5-mini)", Provider::OpenAi, "gpt-5-mini"),
    entry("openai-gpt-5-nano", "ChatGPT 5 Nano (gpt-5-nano)", Provider::OpenAi, "gpt-5-nano"),
    entry("openai-gpt-4o-mini", "ChatGPT 4o Mini (gpt-4o-mini)", Provider::OpenAi, "gpt-4o-mini"),
    entry(
        "anthropic-claude-sonnet-4-5",
        "Claude Sonnet 4.5 (claude-sonnet-4-5)",
        Provider::Anthropic,
        "claude-sonnet-4-5",
    ),
    entry(
        "anthropic-claude-haiku-4-5",
        "Claude Haiku 4.5 (claude-haiku-4-5)",
        Provider::Anthropic,
        "claude-haiku-4-5",
    ),
    entry(
        "google-gemini-2-5-flash",
        "Gemini 2.5 Flash (gemini-2.5-flash)",
        Provider::Google,
        "gemini-2.5-flash",
    ),
    entry(
        "google-gemini-2-5-pro",
        "Gemini 2.5 Pro (gemini-2.5-pro)",
        Provider::Google,
        "gemini-2.5-pro",
    ),
    entry(
        "huggingface-mistral-7b-instruct",
        "Mistral 7B Instruct (Hugging Face)",
        Provider::HuggingFace,
        "mistralai/Mistral-7B-Instruct-v0.3",
    ),
    entry(
        "huggingface-bart-large-cnn",
        "BART Large CNN (Hugging Face)",
        Provider::HuggingFace,
        "facebook/bart-large-cnn",
    ),
];

/// All models in display order
pub fn list_models() -> &'static [ModelEntry] {
    MODELS
}

/// Look up a model by its exact id
pub fn get_model(id: &str) -> Option<&'static ModelEntry> {
    MODELS.iter().find(|m| m.id == id)
}

/// Ordered id -> label pairs for dropdowns
pub fn labels_only() -> Vec<(&'static str, &'static str)> {
    MODELS.iter().map(|m| (m.id, m.label)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<_> = list_models().iter().map(|m| m.id).collect();
        assert_eq!(ids.len(), list_models().len());
    }

    #[test]
    fn test_model_names_present_except_manual() {
        for model in list_models() {
            if model.provider == Provider::None {
                assert!(model.model_name.is_empty());
            } else {
                assert!(!model.model_name.is_empty(), "{} has no model name", model.id);
            }
        }
    }

    #[test]
    fn test_get_model_is_exact_match() {
        let model = get_model("openai-gpt-5-mini").unwrap();
        assert_eq!(model.provider, Provider::OpenAi);
        assert_eq!(model.model_name, "gpt-5-mini");

        assert!(get_model("OPENAI-GPT-5-MINI").is_none());
        assert!(get_model("openai-gpt-5").is_none());
        assert!(get_model("").is_none());
    }

    #[test]
    fn test_labels_keep_order() {
        let labels = labels_only();
        assert_eq!(labels[0], ("none", "None (Manual)"));
        let ids: Vec<_> = labels.iter().map(|(id, _)| *id).collect();
        let expected: Vec<_> = list_models().iter().map(|m| m.id).collect();
        assert_eq!(ids, expected);
    }
}
