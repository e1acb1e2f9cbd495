#![forbid(unsafe_code)]

use std::io;
use std::path::PathBuf;

use rescuenet_content::ContentError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error(transparent)]
    Content(#[from] ContentError),
    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}
