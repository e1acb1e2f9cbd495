#![forbid(unsafe_code)]

//! Dataset loading errors.

use std::fmt;

/// Errors from building a [`ContentStore`](crate::ContentStore).
#[derive(Debug)]
pub enum ContentError {
    /// A dataset was not valid JSON for its record type.
    Parse {
        dataset: &'static str,
        source: serde_json::Error,
    },
    /// Two records in one dataset share an id.
    DuplicateId { dataset: &'static str, id: u32 },
    /// Two records in one dataset share a slug.
    DuplicateSlug { dataset: &'static str, slug: String },
}

impl fmt::Display for ContentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse { dataset, source } => write!(f, "invalid {dataset} dataset: {source}"),
            Self::DuplicateId { dataset, id } => write!(f, "duplicate id {id} in {dataset}"),
            Self::DuplicateSlug { dataset, slug } => {
                write!(f, "duplicate slug '{slug}' in {dataset}")
            }
        }
    }
}

impl std::error::Error for ContentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse { source, .. } => Some(source),
            _ => None,
        }
    }
}
