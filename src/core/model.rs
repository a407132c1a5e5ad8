//! Record Model
//!
//! The two record shapes exchanged between the search backend and the
//! front end. Wire keys are camelCase; the snake_case spelling some
//! producers emit is accepted on input.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::schema::RecordKind;

/// One displayable search result entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SearchResult {
    /// Human-readable title
    pub title: String,

    /// Display name of the originating site
    #[serde(alias = "site_name")]
    pub site_name: String,

    /// Canonical locator of the result
    pub url: String,

    /// Short excerpt of the result content
    pub snippet: String,

    /// Relevance value as produced upstream (unit and range are not fixed)
    pub score: f64,

    /// Where the site's favicon can be fetched from
    #[serde(alias = "favicon_location")]
    pub favicon_location: String,

    /// Publication date as text, usually ISO-8601
    pub published: String,
}

impl SearchResult {
    pub fn new(
        title: impl Into<String>,
        site_name: impl Into<String>,
        url: impl Into<String>,
        snippet: impl Into<String>,
        score: f64,
        favicon_location: impl Into<String>,
        published: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            site_name: site_name.into(),
            url: url.into(),
            snippet: snippet.into(),
            score,
            favicon_location: favicon_location.into(),
            published: published.into(),
        }
    }

    /// The url/favicon part of this result
    pub fn favicon_pair(&self) -> UrlFaviconPair {
        UrlFaviconPair::from(self)
    }

    /// Parse `published` as RFC 3339 or a plain `YYYY-MM-DD` date.
    ///
    /// Returns `None` for any other format; the field stays valid text.
    pub fn published_at(&self) -> Option<DateTime<FixedOffset>> {
        let text = self.published.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return Some(dt);
        }

        NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc().fixed_offset())
    }
}

/// A URL together with its favicon locator
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UrlFaviconPair {
    pub url: String,

    #[serde(alias = "favicon_location")]
    pub favicon_location: String,
}

impl UrlFaviconPair {
    pub fn new(url: impl Into<String>, favicon_location: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            favicon_location: favicon_location.into(),
        }
    }
}

impl From<&SearchResult> for UrlFaviconPair {
    fn from(result: &SearchResult) -> Self {
        Self {
            url: result.url.clone(),
            favicon_location: result.favicon_location.clone(),
        }
    }
}

impl From<SearchResult> for UrlFaviconPair {
    fn from(result: SearchResult) -> Self {
        Self {
            url: result.url,
            favicon_location: result.favicon_location,
        }
    }
}

/// Either record kind
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Record {
    SearchResult(SearchResult),
    UrlFaviconPair(UrlFaviconPair),
}

impl Record {
    pub fn kind(&self) -> RecordKind {
        match self {
            Record::SearchResult(_) => RecordKind::SearchResult,
            Record::UrlFaviconPair(_) => RecordKind::UrlFaviconPair,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            Record::SearchResult(r) => &r.url,
            Record::UrlFaviconPair(p) => &p.url,
        }
    }

    /// The url/favicon part of the record
    pub fn favicon_pair(&self) -> UrlFaviconPair {
        match self {
            Record::SearchResult(r) => r.favicon_pair(),
            Record::UrlFaviconPair(p) => p.clone(),
        }
    }
}

impl From<SearchResult> for Record {
    fn from(result: SearchResult) -> Self {
        Record::SearchResult(result)
    }
}

impl From<UrlFaviconPair> for Record {
    fn from(pair: UrlFaviconPair) -> Self {
        Record::UrlFaviconPair(pair)
    }
}

/// Ordered collection of records; keeps input order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecordSet {
    pub items: Vec<Record>,
}

impl RecordSet {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn push(&mut self, record: impl Into<Record>) {
        self.items.push(record.into());
    }

    pub fn extend(&mut self, records: impl IntoIterator<Item = Record>) {
        self.items.extend(records);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.items.iter()
    }
}

impl IntoIterator for RecordSet {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl FromIterator<Record> for RecordSet {
    fn from_iter<T: IntoIterator<Item = Record>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
