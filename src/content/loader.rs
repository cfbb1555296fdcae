//! Loader for the RON config file at startup.

use ron::Options;
use std::fs;
use std::path::Path;
use thiserror::Error;

use super::data::MeleeConfig;

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read {file}: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {file}: {message}")]
    Parse { file: String, message: String },
}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

pub fn parse_config(contents: &str, file: &str) -> Result<MeleeConfig, ConfigLoadError> {
    ron_options()
        .from_str(contents)
        .map_err(|e| ConfigLoadError::Parse {
            file: file.to_string(),
            message: e.to_string(),
        })
}

pub fn load_config(path: &Path) -> Result<MeleeConfig, ConfigLoadError> {
    let file = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
        file: file.clone(),
        source,
    })?;
    parse_config(&contents, &file)
}
