#![forbid(unsafe_code)]

//! Page metadata derived from a route.
//!
//! # Invariants
//!
//! 1. The Open Graph and Twitter fields always mirror `title` and
//!    `description`.
//! 2. A route with no metadata, or with an empty title or description,
//!    falls back to [`DEFAULT_TITLE`] / [`DEFAULT_DESCRIPTION`] field by field.
//!    Only the empty string counts as missing; whitespace is kept as given.

use serde::Serialize;

use crate::document::{MetaDocument, MetaTag};
use crate::table::RouteMeta;

pub const DEFAULT_TITLE: &str = "RescueNet - Disaster Relief";
pub const DEFAULT_DESCRIPTION: &str =
    "RescueNet provides rapid disaster relief and humanitarian aid worldwide.";

/// Everything written to the page head on navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub og_title: String,
    pub og_description: String,
    pub twitter_title: String,
    pub twitter_description: String,
}

impl PageMetadata {
    fn new(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            og_title: title.to_string(),
            og_description: description.to_string(),
            twitter_title: title.to_string(),
            twitter_description: description.to_string(),
        }
    }

    /// Content for each meta tag.
    #[must_use]
    pub fn tag_content(&self, tag: MetaTag) -> &str {
        match tag {
            MetaTag::Description => &self.description,
            MetaTag::OgTitle => &self.og_title,
            MetaTag::OgDescription => &self.og_description,
            MetaTag::TwitterTitle => &self.twitter_title,
            MetaTag::TwitterDescription => &self.twitter_description,
        }
    }
}

impl Default for PageMetadata {
    fn default() -> Self {
        Self::new(DEFAULT_TITLE, DEFAULT_DESCRIPTION)
    }
}

/// Metadata for a route, with site defaults filling the gaps.
#[must_use]
pub fn compute_metadata(meta: Option<&RouteMeta>) -> PageMetadata {
    let non_empty = |s: &str, fallback: &'static str| -> String {
        if s.is_empty() {
            fallback.to_string()
        } else {
            s.to_string()
        }
    };
    match meta {
        Some(meta) => {
            let title = non_empty(&meta.title, DEFAULT_TITLE);
            let description = non_empty(&meta.description, DEFAULT_DESCRIPTION);
            PageMetadata::new(&title, &description)
        }
        None => PageMetadata::default(),
    }
}

/// Write `metadata` into `doc`. Returns how many meta tags were updated;
/// tags missing from the document are skipped.
pub fn apply_metadata<D: MetaDocument + ?Sized>(doc: &mut D, metadata: &PageMetadata) -> usize {
    doc.set_title(&metadata.title);
    let updated = MetaTag::ALL
        .iter()
        .filter(|tag| doc.set_meta_content(**tag, metadata.tag_content(**tag)))
        .count();
    #[cfg(feature = "tracing")]
    tracing::debug!(
        target: "rescuenet::router",
        title = %metadata.title,
        updated,
        "page metadata applied"
    );
    updated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::HeadSnapshot;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_meta_uses_defaults() {
        let meta = compute_metadata(None);
        assert_eq!(meta.title, DEFAULT_TITLE);
        assert_eq!(meta.twitter_description, DEFAULT_DESCRIPTION);
    }

    #[test]
    fn empty_fields_fall_back_individually() {
        let route = RouteMeta::new("Donate Now - RescueNet", "");
        let meta = compute_metadata(Some(&route));
        assert_eq!(meta.og_title, "Donate Now - RescueNet");
        assert_eq!(meta.og_description, DEFAULT_DESCRIPTION);
    }

    #[test]
    fn whitespace_title_is_not_treated_as_missing() {
        let route = RouteMeta::new(" ", "Stories");
        let meta = compute_metadata(Some(&route));
        assert_eq!(meta.title, " ");
        assert_eq!(meta.twitter_title, " ");
    }

    #[test]
    fn apply_writes_title_and_existing_tags() {
        let mut head = HeadSnapshot::new()
            .with_tag(MetaTag::Description, "")
            .with_tag(MetaTag::OgTitle, "");
        let meta = compute_metadata(Some(&RouteMeta::new("Blog - RescueNet", "Stories")));
        assert_eq!(apply_metadata(&mut head, &meta), 2);
        assert_eq!(head.title(), "Blog - RescueNet");
        assert_eq!(head.meta(MetaTag::Description), Some("Stories"));
        assert_eq!(head.meta(MetaTag::OgTitle), Some("Blog - RescueNet"));
        assert_eq!(head.meta(MetaTag::TwitterTitle), None);
    }
}
