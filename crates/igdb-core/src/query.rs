//! Apicalypse query bodies for the IGDB `games` endpoint.

use crate::types::GameId;
use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use std::fmt::Write;

/// Page size of every catalog request.
pub const CATALOG_LIMIT: u32 = 30;

/// Metric the recent-releases listing is ordered by.
pub const POPULARITY_FIELD: &str = "total_rating_count";

/// Fields needed to render a catalog entry.
pub const CATALOG_FIELDS: &[&str] = &["name", "cover.url"];

/// Fields needed to render a full meta item. Nested names and URLs are
/// expanded in the same request.
pub const META_FIELDS: &[&str] = &[
    "name",
    "cover.url",
    "summary",
    "first_release_date",
    "screenshots.url",
    "artworks.url",
    "videos.video_id",
    "videos.name",
    "genres.name",
    "rating",
    "platforms.name",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// A query against the `games` endpoint.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GameQuery {
    pub fields: Vec<String>,
    pub search: Option<String>,
    pub filters: Vec<String>,
    pub sort: Option<(String, SortOrder)>,
    pub limit: Option<u32>,
}

impl GameQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Free-text search for catalog entries. IGDB refuses `sort` together
    /// with `search`, so results come back in relevance order.
    pub fn catalog_search(text: &str) -> Self {
        Self::new()
            .with_fields(CATALOG_FIELDS)
            .with_search(text)
            .with_limit(CATALOG_LIMIT)
    }

    /// Popular games released between January 1st of last year and today.
    pub fn recent_releases(now: DateTime<Utc>) -> Self {
        let (from, to) = release_window(now);
        Self::new()
            .with_fields(CATALOG_FIELDS)
            .with_filter(format!("first_release_date > {}", from))
            .with_filter(format!("first_release_date < {}", to))
            .with_sort(POPULARITY_FIELD, SortOrder::Desc)
            .with_limit(CATALOG_LIMIT)
    }

    /// A single game with the full meta field set.
    pub fn by_id(id: GameId) -> Self {
        Self::new()
            .with_fields(META_FIELDS)
            .with_filter(format!("id = {}", id))
            .with_limit(1)
    }

    pub fn with_fields(mut self, fields: &[&str]) -> Self {
        self.fields.extend(fields.iter().map(|f| f.to_string()));
        self
    }

    pub fn with_search(mut self, text: &str) -> Self {
        self.search = Some(text.to_string());
        self
    }

    /// Add a `where` condition. Conditions are joined with `&`.
    pub fn with_filter(mut self, condition: impl Into<String>) -> Self {
        self.filters.push(condition.into());
        self
    }

    pub fn with_sort(mut self, field: &str, order: SortOrder) -> Self {
        self.sort = Some((field.to_string(), order));
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Render the request body.
    pub fn to_body(&self) -> String {
        let mut body = String::new();

        if self.fields.is_empty() {
            body.push_str("fields *;");
        } else {
            let _ = write!(body, "fields {};", self.fields.join(","));
        }

        if let Some(ref text) = self.search {
            let _ = write!(body, " search \"{}\";", escape(text));
        }

        if !self.filters.is_empty() {
            let _ = write!(body, " where {};", self.filters.join(" & "));
        }

        if let Some((ref field, order)) = self.sort {
            let _ = write!(body, " sort {} {};", field, order.as_str());
        }

        if let Some(limit) = self.limit {
            let _ = write!(body, " limit {};", limit);
        }

        body
    }
}

/// Unix-second bounds (exclusive) of the recent-releases listing: midnight
/// of January 1st of the previous year, and midnight of today (UTC).
pub fn release_window(now: DateTime<Utc>) -> (i64, i64) {
    let today = now.date_naive();
    let from = NaiveDate::from_ymd_opt(today.year() - 1, 1, 1).unwrap_or(today);
    (midnight(from), midnight(today))
}

fn midnight(date: NaiveDate) -> i64 {
    Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN)).timestamp()
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
