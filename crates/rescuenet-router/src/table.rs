#![forbid(unsafe_code)]

//! Route patterns and the site's route table.
//!
//! Patterns are `/`-separated segments; a segment starting with `:` captures
//! one path segment under that name. Matching ignores the query string, the
//! fragment, repeated slashes and a trailing slash. The first matching route
//! wins.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// The page views the site can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    Home,
    About,
    Contact,
    Disasters,
    DisasterDetail,
    Campaigns,
    CampaignDetail,
    Volunteer,
    Donate,
    Blog,
    BlogDetail,
}

impl Page {
    /// Route name, e.g. `"disaster-detail"`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::About => "about",
            Self::Contact => "contact",
            Self::Disasters => "disasters",
            Self::DisasterDetail => "disaster-detail",
            Self::Campaigns => "campaigns",
            Self::CampaignDetail => "campaign-detail",
            Self::Volunteer => "volunteer",
            Self::Donate => "donate",
            Self::Blog => "blog",
            Self::BlogDetail => "blog-detail",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Title and description attached to a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteMeta {
    pub title: String,
    pub description: String,
}

impl RouteMeta {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
}

/// A parsed route pattern such as `/blog/:slug`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    #[must_use]
    pub fn parse(pattern: &str) -> Self {
        let segments = split_path(pattern)
            .map(|s| match s.strip_prefix(':') {
                Some(name) => Segment::Param(name.to_string()),
                None => Segment::Static(s.to_string()),
            })
            .collect();
        Self {
            raw: pattern.to_string(),
            segments,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Captured params if `path` matches.
    #[must_use]
    pub fn matches(&self, path: &str) -> Option<Params> {
        let mut parts = split_path(strip_query(path));
        let mut params = Params::default();
        for segment in &self.segments {
            let part = parts.next()?;
            match segment {
                Segment::Static(s) if s == part => {}
                Segment::Static(_) => return None,
                Segment::Param(name) => {
                    params.0.insert(name.clone(), part.to_string());
                }
            }
        }
        if parts.next().is_some() {
            return None;
        }
        Some(params)
    }

    /// Build a concrete path, filling params from `values`. Returns `None`
    /// when a param has no value.
    #[must_use]
    pub fn build(&self, values: &[(&str, &str)]) -> Option<String> {
        if self.segments.is_empty() {
            return Some("/".to_string());
        }
        let mut path = String::new();
        for segment in &self.segments {
            path.push('/');
            match segment {
                Segment::Static(s) => path.push_str(s),
                Segment::Param(name) => {
                    let (_, value) = values.iter().find(|(k, _)| k == name)?;
                    path.push_str(value);
                }
            }
        }
        Some(path)
    }
}

/// Params captured from a matched path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// A param parsed as a numeric id (`/disasters/:id`).
    #[must_use]
    pub fn id(&self, name: &str) -> Option<u32> {
        self.get(name)?.parse().ok()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One row of the route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDef {
    pub page: Page,
    pub pattern: RoutePattern,
    pub meta: Option<RouteMeta>,
}

/// A resolved path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'a> {
    pub route: &'a RouteDef,
    pub params: Params,
}

/// Ordered list of routes.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<RouteDef>,
}

impl RouteTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a route. Earlier routes take precedence.
    #[must_use]
    pub fn route(mut self, page: Page, pattern: &str, meta: Option<RouteMeta>) -> Self {
        self.routes.push(RouteDef {
            page,
            pattern: RoutePattern::parse(pattern),
            meta,
        });
        self
    }

    /// The RescueNet site routes.
    #[must_use]
    pub fn standard() -> Self {
        let m = |title: &str, description: &str| Some(RouteMeta::new(title, description));
        Self::new()
            .route(
                Page::Home,
                "/",
                m(
                    "RescueNet - Disaster Relief & Humanitarian Aid",
                    "RescueNet provides rapid disaster relief and humanitarian aid worldwide. Donate, volunteer, or support communities affected by disasters.",
                ),
            )
            .route(
                Page::About,
                "/about",
                m(
                    "About Us - RescueNet",
                    "Learn about RescueNet's mission to provide rapid disaster relief and humanitarian aid to communities worldwide since 2010.",
                ),
            )
            .route(
                Page::Contact,
                "/contact",
                m(
                    "Contact Us - RescueNet",
                    "Get in touch with RescueNet. Contact our team for inquiries about donations, volunteering, partnerships, or disaster relief.",
                ),
            )
            .route(
                Page::Disasters,
                "/disasters",
                m(
                    "Active Disasters - RescueNet",
                    "View current disaster situations worldwide and learn how RescueNet is responding with emergency relief and humanitarian aid.",
                ),
            )
            .route(
                Page::DisasterDetail,
                "/disasters/:id",
                m(
                    "Disaster Details - RescueNet",
                    "Detailed information about this disaster and RescueNet's relief efforts.",
                ),
            )
            .route(
                Page::Campaigns,
                "/campaigns",
                m(
                    "Donation Campaigns - RescueNet",
                    "Support our fundraising campaigns for disaster relief. Every donation helps provide food, shelter, and medical care to those in need.",
                ),
            )
            .route(
                Page::CampaignDetail,
                "/campaigns/:id",
                m(
                    "Campaign Details - RescueNet",
                    "Support this campaign and help provide disaster relief to communities in need.",
                ),
            )
            .route(
                Page::Volunteer,
                "/volunteer",
                m(
                    "Volunteer With Us - RescueNet",
                    "Join our global network of volunteers. Make a difference by helping communities recover from disasters and emergencies.",
                ),
            )
            .route(
                Page::Donate,
                "/donate",
                m(
                    "Donate Now - RescueNet",
                    "Your donation provides life-saving relief to disaster victims. Support food, shelter, medical care, and recovery efforts.",
                ),
            )
            .route(
                Page::Blog,
                "/blog",
                m(
                    "Blog - RescueNet",
                    "Stories, tips & updates from our rescue community. Read about disaster preparedness, relief efforts, and community impact.",
                ),
            )
            .route(
                Page::BlogDetail,
                "/blog/:slug",
                m(
                    "Blog Article - RescueNet",
                    "Read this article from RescueNet about disaster relief and humanitarian aid.",
                ),
            )
    }

    /// First route matching `path`.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<RouteMatch<'_>> {
        self.routes.iter().find_map(|route| {
            route
                .pattern
                .matches(path)
                .map(|params| RouteMatch { route, params })
        })
    }

    /// The route that renders `page`.
    #[must_use]
    pub fn find(&self, page: Page) -> Option<&RouteDef> {
        self.routes.iter().find(|r| r.page == page)
    }

    #[must_use]
    pub fn routes(&self) -> &[RouteDef] {
        &self.routes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

fn strip_query(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    &path[..end]
}

fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}
