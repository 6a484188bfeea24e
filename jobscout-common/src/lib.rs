//! Common types and utilities shared across JobScout crates.
//!
//! This crate defines the job record model, search criteria, the keyword
//! taxonomy, text normalisation and observability helpers used throughout the
//! JobScout workspace. It is intentionally lightweight so that every crate can
//! depend on it without pulling in the browser stack.
//!
//! # Overview
//!
//! - [`JobRecord`]: one extracted listing plus its relevance annotation
//! - [`SearchCriteria`] and [`SearchPair`]: the (location, query) cross product
//! - [`DateRange`]: the fixed "date posted" filter enumeration
//! - [`keywords`]: the tiered [`KeywordTable`]
//! - [`observability`]: centralised tracing/logging initialisation
//!
//! # Examples
//!
//! ```rust
//! use jobscout_common::{DateRange, SearchCriteria};
//!
//! let criteria = SearchCriteria::new(
//!     vec!["validation".into(), "firmware".into()],
//!     vec!["United States".into()],
//!     DateRange::Week,
//! )
//! .unwrap();
//!
//! let pairs: Vec<_> = criteria.pairs().collect();
//! assert_eq!(pairs.len(), 2);
//! assert_eq!(pairs[1].sink_name(), "1_United States");
//! ```
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

pub mod keywords;
pub mod observability;

pub use keywords::{KeywordTable, KeywordTier};

/// One job posting scraped from a results page.
///
/// `score` and `keywords` stay at their defaults until the scorer annotates
/// the record; afterwards `score` is the sum of the weights of `keywords`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub link: String,
    pub title: String,
    pub location: String,
    pub company: String,
    pub description: String,
    pub score: u32,
    pub keywords: BTreeSet<String>,
}

impl JobRecord {
    /// Render the matched keywords as a displayable list, e.g. `[dut, python]`.
    pub fn keywords_display(&self) -> String {
        let joined = self
            .keywords
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        format!("[{joined}]")
    }
}

/// "Date posted" filter offered by the search page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateRange {
    #[serde(rename = "any time", alias = "any-time", alias = "anytime")]
    AnyTime,
    #[serde(rename = "month")]
    Month,
    #[serde(rename = "week")]
    Week,
    #[serde(rename = "24hr", alias = "last-24h", alias = "24h")]
    Last24Hours,
}

impl DateRange {
    /// Visible label of the matching entry in the date filter menu.
    pub fn filter_label(&self) -> &'static str {
        match self {
            DateRange::AnyTime => "Filter by Any time",
            DateRange::Month => "Filter by Past month",
            DateRange::Week => "Filter by Past week",
            DateRange::Last24Hours => "Filter by Past 24 hours",
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DateRange::AnyTime => "any time",
            DateRange::Month => "month",
            DateRange::Week => "week",
            DateRange::Last24Hours => "24hr",
        };
        f.write_str(s)
    }
}

/// Errors raised while assembling [`SearchCriteria`].
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum CriteriaError {
    #[error("at least one search query is required")]
    NoQueries,

    #[error("at least one search location is required")]
    NoLocations,
}

/// Queries and locations searched for a single date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchCriteria {
    queries: Vec<String>,
    locations: Vec<String>,
    date_range: DateRange,
}

impl SearchCriteria {
    pub fn new(
        queries: Vec<String>,
        locations: Vec<String>,
        date_range: DateRange,
    ) -> Result<Self, CriteriaError> {
        if queries.is_empty() {
            return Err(CriteriaError::NoQueries);
        }
        if locations.is_empty() {
            return Err(CriteriaError::NoLocations);
        }
        Ok(Self {
            queries,
            locations,
            date_range,
        })
    }

    pub fn queries(&self) -> &[String] {
        &self.queries
    }

    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    pub fn date_range(&self) -> DateRange {
        self.date_range
    }

    /// Locations × queries, locations outermost, in configured order.
    pub fn pairs(&self) -> impl Iterator<Item = SearchPair> + '_ {
        self.locations.iter().flat_map(move |location| {
            self.queries
                .iter()
                .enumerate()
                .map(move |(query_index, query)| SearchPair {
                    location: location.clone(),
                    query: query.clone(),
                    query_index,
                    date_range: self.date_range,
                })
        })
    }
}

/// One (location, query) combination from the configured cross product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPair {
    pub location: String,
    pub query: String,
    pub query_index: usize,
    pub date_range: DateRange,
}

impl SearchPair {
    /// Export sink name for this pair: `<query-index>_<location>`.
    pub fn sink_name(&self) -> String {
        format!("{}_{}", self.query_index, self.location)
    }

    /// Location with all whitespace removed, used in file names.
    pub fn location_slug(&self) -> String {
        self.location.split_whitespace().collect()
    }
}

/// Sign-in credentials handed to the sign-in helper before each pair.
#[derive(Clone, Default, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Collapse line breaks into spaces so a text field fits on one CSV line.
pub fn normalize_description(raw: &str) -> String {
    raw.replace("\r\n", " ").replace(['\n', '\r'], " ")
}
