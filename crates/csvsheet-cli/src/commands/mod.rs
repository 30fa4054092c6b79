//! CLI command implementations.

pub mod import;
pub mod inspect;

use std::path::Path;

use csvsheet::ImporterConfig;

/// Load the optional config file and apply command-line overrides.
pub fn load_config(
    config: Option<&Path>,
    encoding: Option<&str>,
    strict: bool,
) -> Result<ImporterConfig, Box<dyn std::error::Error>> {
    let mut loaded = match config {
        Some(path) => ImporterConfig::load(path)?,
        None => ImporterConfig::default(),
    };

    if let Some(label) = encoding {
        loaded = loaded.with_encoding(label);
    }
    if strict {
        loaded = loaded.with_strict_decoding(true);
    }

    loaded.validate()?;
    Ok(loaded)
}
