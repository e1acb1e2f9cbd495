#![forbid(unsafe_code)]

//! The page head as the router sees it.
//!
//! A [`MetaDocument`] is anything that can set the document title and the
//! `content` attribute of a fixed set of `<meta>` tags. The browser host
//! implements it over `web_sys::Document`; [`HeadSnapshot`] is an in-memory
//! implementation for tests and prerendering.
//!
//! # Failure Modes
//!
//! | Condition | Behavior |
//! |-----------|----------|
//! | Tag absent from the head | `set_meta_content` returns `false`, nothing is created |

use std::collections::BTreeMap;

/// The `<meta>` tags kept in sync with the current route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MetaTag {
    Description,
    OgTitle,
    OgDescription,
    TwitterTitle,
    TwitterDescription,
}

impl MetaTag {
    pub const ALL: [Self; 5] = [
        Self::Description,
        Self::OgTitle,
        Self::OgDescription,
        Self::TwitterTitle,
        Self::TwitterDescription,
    ];

    /// CSS selector locating the tag in the document head.
    #[must_use]
    pub const fn selector(self) -> &'static str {
        match self {
            Self::Description => r#"meta[name="description"]"#,
            Self::OgTitle => r#"meta[property="og:title"]"#,
            Self::OgDescription => r#"meta[property="og:description"]"#,
            Self::TwitterTitle => r#"meta[name="twitter:title"]"#,
            Self::TwitterDescription => r#"meta[name="twitter:description"]"#,
        }
    }

    /// Attribute value identifying the tag (`name` or `property`).
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Description => "description",
            Self::OgTitle => "og:title",
            Self::OgDescription => "og:description",
            Self::TwitterTitle => "twitter:title",
            Self::TwitterDescription => "twitter:description",
        }
    }
}

/// Writable page head.
pub trait MetaDocument {
    fn set_title(&mut self, title: &str);

    /// Set the `content` of `tag`. Returns `false` when the tag is not
    /// present in the document.
    fn set_meta_content(&mut self, tag: MetaTag, content: &str) -> bool;
}

impl<D: MetaDocument + ?Sized> MetaDocument for &mut D {
    fn set_title(&mut self, title: &str) {
        (**self).set_title(title);
    }

    fn set_meta_content(&mut self, tag: MetaTag, content: &str) -> bool {
        (**self).set_meta_content(tag, content)
    }
}

/// In-memory head holding a title and the tags it was created with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadSnapshot {
    title: String,
    tags: BTreeMap<MetaTag, String>,
}

impl HeadSnapshot {
    /// A head with no meta tags.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A head containing every [`MetaTag`] with empty content, matching the
    /// site's `index.html`.
    #[must_use]
    pub fn with_all_tags() -> Self {
        Self {
            title: String::new(),
            tags: MetaTag::ALL.iter().map(|t| (*t, String::new())).collect(),
        }
    }

    /// Builder: add `tag` with initial content.
    #[must_use]
    pub fn with_tag(mut self, tag: MetaTag, content: &str) -> Self {
        self.tags.insert(tag, content.to_string());
        self
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn meta(&self, tag: MetaTag) -> Option<&str> {
        self.tags.get(&tag).map(String::as_str)
    }
}

impl MetaDocument for HeadSnapshot {
    fn set_title(&mut self, title: &str) {
        title.clone_into(&mut self.title);
    }

    fn set_meta_content(&mut self, tag: MetaTag, content: &str) -> bool {
        match self.tags.get_mut(&tag) {
            Some(slot) => {
                content.clone_into(slot);
                true
            }
            None => false,
        }
    }
}
