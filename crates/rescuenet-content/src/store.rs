#![forbid(unsafe_code)]

//! The content repository.
//!
//! # Invariants
//!
//! 1. Ids and slugs are unique within each dataset (checked at load).
//! 2. Lookups never allocate; list accessors return records in dataset order
//!    unless documented otherwise.
//! 3. The store is immutable after construction.

use std::collections::HashSet;

use serde::Deserialize;

use crate::error::ContentError;
use crate::model::{BlogPost, Campaign, Disaster, DisasterStatus, DisasterType};

const BLOG_POSTS_JSON: &str = include_str!("../data/blog_posts.json");
const CAMPAIGNS_JSON: &str = include_str!("../data/campaigns.json");
const DISASTERS_JSON: &str = include_str!("../data/disasters.json");

/// Number of posts returned by [`ContentStore::recent_posts`] on the home page.
pub const DEFAULT_RECENT_COUNT: usize = 3;

#[derive(Deserialize)]
struct DisasterDataset {
    disaster_types: Vec<DisasterType>,
    disasters: Vec<Disaster>,
}

/// Blog posts, disasters and campaigns, loaded once.
#[derive(Debug, Clone)]
pub struct ContentStore {
    posts: Vec<BlogPost>,
    disaster_types: Vec<DisasterType>,
    disasters: Vec<Disaster>,
    campaigns: Vec<Campaign>,
}

impl ContentStore {
    /// Parse the datasets bundled with the crate.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError`] if a bundled dataset is malformed.
    pub fn load() -> Result<Self, ContentError> {
        Self::from_json(BLOG_POSTS_JSON, CAMPAIGNS_JSON, DISASTERS_JSON)
    }

    /// Parse custom datasets. `disasters` is an object with `disaster_types`
    /// and `disasters` arrays.
    ///
    /// # Errors
    ///
    /// - [`ContentError::Parse`] for malformed JSON or records.
    /// - [`ContentError::DuplicateId`] / [`ContentError::DuplicateSlug`] when
    ///   a dataset repeats a key.
    pub fn from_json(blog: &str, campaigns: &str, disasters: &str) -> Result<Self, ContentError> {
        let posts: Vec<BlogPost> = parse("blog posts", blog)?;
        let campaigns: Vec<Campaign> = parse("campaigns", campaigns)?;
        let DisasterDataset {
            disaster_types,
            disasters,
        } = parse("disasters", disasters)?;

        check_unique("blog posts", posts.iter().map(|p| (p.id, p.slug.as_str())))?;
        check_unique("campaigns", campaigns.iter().map(|c| (c.id, c.slug.as_str())))?;
        check_unique("disasters", disasters.iter().map(|d| (d.id, d.slug.as_str())))?;
        check_unique(
            "disaster types",
            disaster_types.iter().map(|t| (t.id, t.name.as_str())),
        )?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "rescuenet::content",
            posts = posts.len(),
            disasters = disasters.len(),
            campaigns = campaigns.len(),
            "content store loaded"
        );

        Ok(Self {
            posts,
            disaster_types,
            disasters,
            campaigns,
        })
    }

    // ---- Blog ----

    #[must_use]
    pub fn blog_posts(&self) -> &[BlogPost] {
        &self.posts
    }

    #[must_use]
    pub fn blog_post_by_id(&self, id: u32) -> Option<&BlogPost> {
        self.posts.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn blog_post_by_slug(&self, slug: &str) -> Option<&BlogPost> {
        self.posts.iter().find(|p| p.slug == slug)
    }

    /// The `count` most recently published posts, newest first. Posts with
    /// the same date keep dataset order.
    #[must_use]
    pub fn recent_posts(&self, count: usize) -> Vec<&BlogPost> {
        let mut posts: Vec<&BlogPost> = self.posts.iter().collect();
        posts.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        posts.truncate(count);
        posts
    }

    #[must_use]
    pub fn posts_by_category(&self, category: &str) -> Vec<&BlogPost> {
        self.posts
            .iter()
            .filter(|p| p.category == category)
            .collect()
    }

    /// Distinct categories in order of first appearance.
    #[must_use]
    pub fn all_categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.posts
            .iter()
            .map(|p| p.category.as_str())
            .filter(|c| seen.insert(*c))
            .collect()
    }

    // ---- Disasters ----

    #[must_use]
    pub fn disasters(&self) -> &[Disaster] {
        &self.disasters
    }

    #[must_use]
    pub fn disaster_types(&self) -> &[DisasterType] {
        &self.disaster_types
    }

    #[must_use]
    pub fn disaster_by_id(&self, id: u32) -> Option<&Disaster> {
        self.disasters.iter().find(|d| d.id == id)
    }

    #[must_use]
    pub fn disaster_by_slug(&self, slug: &str) -> Option<&Disaster> {
        self.disasters.iter().find(|d| d.slug == slug)
    }

    #[must_use]
    pub fn active_disasters(&self) -> Vec<&Disaster> {
        self.disasters
            .iter()
            .filter(|d| d.status == DisasterStatus::Active)
            .collect()
    }

    // ---- Campaigns ----

    #[must_use]
    pub fn campaigns(&self) -> &[Campaign] {
        &self.campaigns
    }

    #[must_use]
    pub fn campaign_by_id(&self, id: u32) -> Option<&Campaign> {
        self.campaigns.iter().find(|c| c.id == id)
    }

    /// First campaign that is both featured and active.
    #[must_use]
    pub fn featured_campaign(&self) -> Option<&Campaign> {
        self.campaigns.iter().find(|c| c.is_featured && c.is_active)
    }

    #[must_use]
    pub fn campaigns_for_disaster(&self, disaster_id: u32) -> Vec<&Campaign> {
        self.campaigns
            .iter()
            .filter(|c| c.disaster_id == Some(disaster_id))
            .collect()
    }
}

fn parse<T: for<'de> Deserialize<'de>>(dataset: &'static str, json: &str) -> Result<T, ContentError> {
    serde_json::from_str(json).map_err(|source| ContentError::Parse { dataset, source })
}

fn check_unique<'a>(
    dataset: &'static str,
    keys: impl Iterator<Item = (u32, &'a str)>,
) -> Result<(), ContentError> {
    let mut ids = HashSet::new();
    let mut slugs = HashSet::new();
    for (id, slug) in keys {
        if !ids.insert(id) {
            return Err(ContentError::DuplicateId { dataset, id });
        }
        if !slugs.insert(slug) {
            return Err(ContentError::DuplicateSlug {
                dataset,
                slug: slug.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMPTY_DISASTERS: &str = r#"{"disaster_types": [], "disasters": []}"#;

    fn post(id: u32, slug: &str, date: &str, category: &str) -> String {
        format!(
            r#"{{"id":{id},"slug":"{slug}","title":"t","excerpt":"e","content":"c",
            "author":"a","author_image":"i","published_at":"{date}","read_time":5,
            "category":"{category}","image_url":"u"}}"#
        )
    }

    #[test]
    fn recent_posts_sort_newest_first_and_keep_ties_stable() {
        let blog = format!(
            "[{},{},{}]",
            post(1, "old", "2024-01-01", "A"),
            post(2, "tie-a", "2024-03-01", "B"),
            post(3, "tie-b", "2024-03-01", "A"),
        );
        let store = ContentStore::from_json(&blog, "[]", EMPTY_DISASTERS).expect("valid data");
        let slugs: Vec<_> = store.recent_posts(3).iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["tie-a", "tie-b", "old"]);
        assert_eq!(store.recent_posts(0).len(), 0);
        assert_eq!(store.recent_posts(10).len(), 3);
        assert_eq!(store.all_categories(), vec!["A", "B"]);
    }

    #[test]
    fn duplicate_slug_is_rejected() {
        let blog = format!(
            "[{},{}]",
            post(1, "same", "2024-01-01", "A"),
            post(2, "same", "2024-01-02", "A"),
        );
        let err = ContentStore::from_json(&blog, "[]", EMPTY_DISASTERS).unwrap_err();
        assert!(matches!(
            err,
            ContentError::DuplicateSlug { dataset: "blog posts", ref slug } if slug == "same"
        ));
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let blog = format!(
            "[{},{}]",
            post(4, "a", "2024-01-01", "A"),
            post(4, "b", "2024-01-02", "A"),
        );
        let err = ContentStore::from_json(&blog, "[]", EMPTY_DISASTERS).unwrap_err();
        assert_eq!(err.to_string(), "duplicate id 4 in blog posts");
    }

    #[test]
    fn malformed_json_names_the_dataset() {
        let err = ContentStore::from_json("[]", "{", EMPTY_DISASTERS).unwrap_err();
        assert!(err.to_string().starts_with("invalid campaigns dataset"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn bad_date_is_a_parse_error() {
        let blog = format!("[{}]", post(1, "x", "15/11/2024", "A"));
        let err = ContentStore::from_json(&blog, "[]", EMPTY_DISASTERS).unwrap_err();
        assert!(matches!(err, ContentError::Parse { dataset: "blog posts", .. }));
    }
}
