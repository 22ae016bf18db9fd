use std::path::Path;

use anyhow::{Context, Result};

use carousel_core::AppConfig;

pub fn run(config: &AppConfig, path: &Path, init: bool) -> Result<()> {
    if init {
        if path.exists() {
            println!("Config already exists at {}", path.display());
        } else {
            config
                .save_to(path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote default config to {}", path.display());
            println!("Created {}", path.display());
        }
    }

    println!("# {}", path.display());
    print!("{}", config.to_toml()?);
    Ok(())
}
