#![forbid(unsafe_code)]

//! Read-only views of the route table and the content datasets.

use chrono::NaiveDate;
use rescuenet_content::ContentStore;
use rescuenet_router::{RouteTable, compute_metadata};
use serde::Serialize;

/// One line of `rescuenet-build routes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteRow {
    pub path: String,
    pub name: &'static str,
    pub title: String,
}

#[must_use]
pub fn route_rows(table: &RouteTable) -> Vec<RouteRow> {
    table
        .routes()
        .iter()
        .map(|route| RouteRow {
            path: route.pattern.as_str().to_string(),
            name: route.page.name(),
            title: compute_metadata(route.meta.as_ref()).title,
        })
        .collect()
}

/// Summary printed by `rescuenet-build check-content`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentReport {
    pub blog_posts: usize,
    pub categories: usize,
    pub disaster_types: usize,
    pub disasters: usize,
    pub active_disasters: usize,
    pub campaigns: usize,
    pub featured_campaign: Option<String>,
    /// Active campaigns whose end date is before `today`.
    pub expired_campaigns: Vec<String>,
    /// Campaigns pointing at a disaster id that does not exist.
    pub orphan_campaigns: Vec<String>,
}

impl ContentReport {
    /// Whether the datasets need attention.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.expired_campaigns.is_empty() || !self.orphan_campaigns.is_empty()
    }
}

#[must_use]
pub fn check_content(store: &ContentStore, today: NaiveDate) -> ContentReport {
    let expired_campaigns = store
        .campaigns()
        .iter()
        .filter(|c| c.is_active && c.ends_at.is_some_and(|end| end < today))
        .map(|c| c.slug.clone())
        .collect();
    let orphan_campaigns = store
        .campaigns()
        .iter()
        .filter(|c| c.disaster_id.is_some_and(|id| store.disaster_by_id(id).is_none()))
        .map(|c| c.slug.clone())
        .collect();

    ContentReport {
        blog_posts: store.blog_posts().len(),
        categories: store.all_categories().len(),
        disaster_types: store.disaster_types().len(),
        disasters: store.disasters().len(),
        active_disasters: store.active_disasters().len(),
        campaigns: store.campaigns().len(),
        featured_campaign: store.featured_campaign().map(|c| c.slug.clone()),
        expired_campaigns,
        orphan_campaigns,
    }
}
