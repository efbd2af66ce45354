use crate::core::config::AppConfig;
use crate::core::currency::CurrencyCode;
use anyhow::{Context, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = include_str!("../../docs/example_config.yaml");
const CURRENCY_LINE: &str = "currency: \"RUB\"";

/// Creates the configuration file at the default location
pub fn setup(currency: Option<&str>) -> Result<()> {
    let path = AppConfig::default_config_path()?;
    setup_at_path(path, currency)
}

/// Example config with the home currency swapped in when one is given.
fn render_config(currency: Option<&str>) -> Result<String> {
    match currency {
        Some(code) => {
            let code: CurrencyCode = code.parse()?;
            Ok(DEFAULT_CONFIG.replacen(CURRENCY_LINE, &format!("currency: \"{code}\""), 1))
        }
        None => Ok(DEFAULT_CONFIG.to_string()),
    }
}

/// Creates the configuration file at the specified path
pub fn setup_at_path<P: AsRef<Path>>(path: P, currency: Option<&str>) -> Result<()> {
    let path = path.as_ref();
    let content = render_config(currency)?;

    if path.exists() {
        anyhow::bail!("Configuration file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(path, content)
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;

    tracing::info!("Created default configuration at {}", path.display());
    Ok(())
}
