use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

use super::{Activity, Catalog};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Name,
    Date,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Date => "date",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "name" => Some(SortKey::Name),
            "date" => Some(SortKey::Date),
            _ => None,
        }
    }
}

/// Search/filter/sort state read off the page controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub search: String,
    pub category: String,
    /// `None` keeps the catalog order.
    pub sort: Option<SortKey>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: String::new(),
            sort: Some(SortKey::Name),
        }
    }
}

impl ListQuery {
    pub fn matches(&self, activity: &Activity) -> bool {
        self.matches_search(activity) && self.matches_category(activity)
    }

    fn matches_search(&self, activity: &Activity) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        activity.name.to_lowercase().contains(&needle)
            || activity.description.to_lowercase().contains(&needle)
    }

    fn matches_category(&self, activity: &Activity) -> bool {
        self.category.is_empty() || activity.category.as_deref() == Some(self.category.as_str())
    }
}

impl Catalog {
    /// Activities surviving the search and category filters, sorted per
    /// `query.sort`. Sorting is stable.
    pub fn query(&self, query: &ListQuery) -> Vec<&Activity> {
        let mut filtered: Vec<&Activity> = self.iter().filter(|a| query.matches(a)).collect();
        match query.sort {
            Some(SortKey::Name) => filtered.sort_by(|a, b| compare_names(&a.name, &b.name)),
            Some(SortKey::Date) => filtered.sort_by_key(|a| date_millis(a.date.as_deref())),
            None => {}
        }
        filtered
    }
}

/// Collation order for display names. Letters compare by their base form
/// first, ignoring case and accents, so `Écriture` sorts with the `E`s.
/// Ties fall back to case-insensitive code point order, then lowercase
/// ahead of uppercase.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| b.cmp(a))
}

fn collation_key(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

const ZONED_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M%#z", "%Y-%m-%d %H:%M:%S%#z"];
const NAIVE_DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y", "%b %d, %Y"];

/// Milliseconds since the epoch. Missing or unparseable dates are the epoch.
///
/// Accepts RFC 3339, RFC 2822, ISO 8601 date-times without seconds, and
/// plain dates (`2024-03-01`, `2024/03/01`, `March 1, 2024`). Values with no
/// offset, plain dates included, are read as UTC rather than local time.
pub fn date_millis(date: Option<&str>) -> i64 {
    date.and_then(parse_date)
        .unwrap_or(0)
}

fn parse_date(s: &str) -> Option<i64> {
    let s = s.trim();
    let zoned = DateTime::parse_from_rfc3339(s)
        .or_else(|_| DateTime::parse_from_rfc2822(s))
        .ok()
        .or_else(|| ZONED_FORMATS.iter().find_map(|f| DateTime::parse_from_str(s, f).ok()));
    if let Some(dt) = zoned {
        return Some(dt.timestamp_millis());
    }
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .map(|dt| dt.and_utc().timestamp_millis())
}
