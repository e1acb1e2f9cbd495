#![forbid(unsafe_code)]

//! `rescuenet.toml`.
//!
//! ```toml
//! [html]
//! dist_dir = "dist"
//! entry = "index.html"
//! ```
//!
//! Every key is optional. A missing file means all defaults; command-line
//! flags override the file.

use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::BuildError;

/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = "rescuenet.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    pub html: HtmlConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HtmlConfig {
    /// Bundler output directory.
    pub dist_dir: PathBuf,
    /// HTML entry file inside `dist_dir`.
    pub entry: String,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            dist_dir: PathBuf::from("dist"),
            entry: "index.html".to_string(),
        }
    }
}

impl BuildConfig {
    /// Parse a config document.
    ///
    /// # Errors
    ///
    /// Returns the TOML error for malformed input or unknown keys.
    pub fn from_toml(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }

    /// Read `path`, falling back to defaults when it does not exist.
    ///
    /// # Errors
    ///
    /// [`BuildError::Read`] for I/O failures other than a missing file and
    /// [`BuildError::Config`] for invalid contents.
    pub fn load(path: &Path) -> Result<Self, BuildError> {
        let source = match std::fs::read_to_string(path) {
            Ok(source) => source,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(BuildError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        Self::from_toml(&source).map_err(|source| BuildError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Path of the HTML entry file.
    #[must_use]
    pub fn entry_path(&self) -> PathBuf {
        self.html.dist_dir.join(&self.html.entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_all_defaults() {
        let config = BuildConfig::from_toml("").expect("empty config parses");
        assert_eq!(config, BuildConfig::default());
        assert_eq!(config.entry_path(), Path::new("dist").join("index.html"));
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config = BuildConfig::from_toml("[html]\ndist_dir = \"public\"\n").expect("valid");
        assert_eq!(config.html.dist_dir, PathBuf::from("public"));
        assert_eq!(config.html.entry, "index.html");
    }

    #[test]
    fn unknown_key_is_rejected() {
        assert!(BuildConfig::from_toml("[html]\ndist = \"x\"\n").is_err());
    }
}
