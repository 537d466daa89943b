use anyhow::Result;

use postdigest_core::{ai::list_models, AppConfig};

pub fn run(config: &AppConfig) -> Result<()> {
    println!("Available models:\n");

    for model in list_models() {
        let marker = if model.id == config.ai.model { "*" } else { " " };
        println!("{} {:<36} {}", marker, model.id, model.label);
        if !model.model_name.is_empty() {
            println!("    {} / {}", model.provider.display_name(), model.model_name);
        }
    }

    println!("\n* = selected in config ({})", AppConfig::config_path().display());

    Ok(())
}
