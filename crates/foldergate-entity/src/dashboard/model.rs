//! Dashboard entity model.
//!
//! Folders and ordinary dashboards share one table; `is_folder`
//! discriminates them.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A dashboard-like record, possibly a folder.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Dashboard {
    /// Unique dashboard identifier.
    pub id: i64,
    /// Owning organization.
    pub org_id: i64,
    /// URL slug derived from the title.
    pub slug: String,
    /// Display title.
    pub title: String,
    /// Whether this record is a folder.
    pub is_folder: bool,
    /// Whether access is governed by explicit ACL entries.
    pub has_acl: bool,
    /// Parent folder ID (0 for the root level).
    pub folder_id: i64,
    /// Creating user ID (0 when unknown).
    pub created_by: i64,
    /// Last updating user ID (0 when unknown).
    pub updated_by: i64,
    /// When the record was created.
    pub created: DateTime<Utc>,
    /// When the record was last updated.
    pub updated: DateTime<Utc>,
    /// Incremented on every save.
    pub version: i32,
}

impl Dashboard {
    /// Build a folder with the given title, slugged the same way saves do.
    pub fn new_folder(org_id: i64, title: impl Into<String>) -> Self {
        let title = title.into();
        let now = Utc::now();
        Self {
            id: 0,
            org_id,
            slug: slugify(&title),
            title,
            is_folder: true,
            has_acl: false,
            folder_id: 0,
            created_by: 0,
            updated_by: 0,
            created: now,
            updated: now,
            version: 0,
        }
    }
}

/// Key used to look a dashboard up within an org.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "by", content = "value")]
pub enum DashboardRef {
    /// Primary key.
    Id(i64),
    /// URL slug.
    Slug(String),
}

impl fmt::Display for DashboardRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "id:{id}"),
            Self::Slug(slug) => write!(f, "slug:{slug}"),
        }
    }
}

impl From<i64> for DashboardRef {
    fn from(id: i64) -> Self {
        Self::Id(id)
    }
}

/// Lowercase, alphanumeric runs joined by single dashes.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for c in title.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}
