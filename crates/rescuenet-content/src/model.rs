#![forbid(unsafe_code)]

//! Content record types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A blog article. `content` is Markdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: u32,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub author: String,
    pub author_image: String,
    pub published_at: NaiveDate,
    /// Estimated reading time in minutes.
    pub read_time: u32,
    pub category: String,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisasterType {
    pub id: u32,
    pub name: String,
    pub icon: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Moderate,
    High,
    Critical,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisasterStatus {
    Monitoring,
    Active,
    Recovery,
    Resolved,
}

impl DisasterStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monitoring => "monitoring",
            Self::Active => "active",
            Self::Recovery => "recovery",
            Self::Resolved => "resolved",
        }
    }
}

/// An ongoing or recent disaster the organization responds to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disaster {
    pub id: u32,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub status: DisasterStatus,
    pub location_name: String,
    pub started_at: NaiveDate,
    pub estimated_affected_people: u64,
    pub estimated_damage_usd: u64,
    pub disaster_type: DisasterType,
    pub image_url: String,
}

/// A donation campaign, optionally tied to a disaster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: u32,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub goal_amount: u64,
    pub current_amount: u64,
    pub progress_percentage: u8,
    pub is_featured: bool,
    pub is_active: bool,
    pub donor_count: u32,
    pub image_url: String,
    pub ends_at: Option<NaiveDate>,
    pub disaster_id: Option<u32>,
}

impl Campaign {
    /// Amount still needed to reach the goal.
    #[must_use]
    pub fn remaining_amount(&self) -> u64 {
        self.goal_amount.saturating_sub(self.current_amount)
    }
}
