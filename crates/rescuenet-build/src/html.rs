#![forbid(unsafe_code)]

//! Non-blocking stylesheet loading for the bundled `index.html`.
//!
//! The bundler emits `<link rel="stylesheet" crossorigin href="...">`, which
//! blocks first paint. Each such link becomes a preload that promotes itself
//! to a stylesheet once loaded, followed by a `<noscript>` copy of the plain
//! link:
//!
//! ```text
//! <link rel="stylesheet" crossorigin href="/assets/index.css">
//!   ↓
//! <link rel="preload" href="/assets/index.css" as="style"
//!       onload="this.onload=null;this.rel='stylesheet'">
//! <noscript><link rel="stylesheet" href="/assets/index.css"></noscript>
//! ```
//!
//! # Invariants
//!
//! 1. Markup other than the matched links is byte-for-byte unchanged.
//! 2. The rewrite is idempotent: its output contains no matching link.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex_lite::{Captures, Regex};

use crate::error::BuildError;

static STYLESHEET_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<link rel="stylesheet" crossorigin href="([^"]+)">"#)
        .expect("stylesheet link pattern is valid")
});

/// Result of [`defer_stylesheets`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub html: String,
    /// Number of links rewritten.
    pub rewritten: usize,
}

/// Rewrite every render-blocking stylesheet link in `html`.
#[must_use]
pub fn defer_stylesheets(html: &str) -> Rewrite {
    let mut rewritten = 0;
    let html = STYLESHEET_LINK
        .replace_all(html, |caps: &Captures<'_>| {
            rewritten += 1;
            let href = &caps[1];
            format!(
                r#"<link rel="preload" href="{href}" as="style" onload="this.onload=null;this.rel='stylesheet'"><noscript><link rel="stylesheet" href="{href}"></noscript>"#
            )
        })
        .into_owned();
    Rewrite { html, rewritten }
}

/// Outcome of [`optimize_file`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizeReport {
    pub path: PathBuf,
    pub rewritten: usize,
    /// Whether the file on disk was replaced.
    pub written: bool,
}

/// Apply [`defer_stylesheets`] to the file at `path`, in place. The file is
/// left untouched when nothing matched or when `dry_run` is set.
///
/// # Errors
///
/// [`BuildError::Read`] / [`BuildError::Write`] with the offending path.
pub fn optimize_file(path: &Path, dry_run: bool) -> Result<OptimizeReport, BuildError> {
    let html = std::fs::read_to_string(path).map_err(|source| BuildError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let rewrite = defer_stylesheets(&html);
    let written = rewrite.rewritten > 0 && !dry_run;
    if written {
        std::fs::write(path, &rewrite.html).map_err(|source| BuildError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }
    tracing::info!(
        path = %path.display(),
        rewritten = rewrite.rewritten,
        dry_run,
        "stylesheet links deferred"
    );
    Ok(OptimizeReport {
        path: path.to_path_buf(),
        rewritten: rewrite.rewritten,
        written,
    })
}
