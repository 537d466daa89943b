use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};

use postdigest_core::{ai::Generator, AppConfig};

pub async fn run(config: &AppConfig, model: &str, prompt: &str, file: Option<&Path>) -> Result<()> {
    let content = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let generator = Generator::new(&config.ai)?;
    let text = generator.generate(model, &content, prompt).await?;

    println!("{}", text);

    Ok(())
}
