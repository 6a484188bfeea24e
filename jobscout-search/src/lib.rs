//! Job search workflow: navigate the results pages, extract listings, score
//! them and export one CSV per (location, query) pair.
//!
//! - [`navigator`]: the per-pair state machine (search, filter, paging)
//! - [`extract`]: reading one listing's detail pane into a [`JobRecord`]
//! - [`scoring`]: weighted keyword scoring
//! - [`signin`]: optional sign-in form fill
//! - [`export`]: CSV sink
//! - [`run`]: drives every pair of the configured cross product
//!
//! [`JobRecord`]: jobscout_common::JobRecord
pub mod error;
pub mod export;
pub mod extract;
pub mod locators;
pub mod navigator;
pub mod pacing;
pub mod run;
pub mod scoring;
pub mod signin;

pub use error::{ExportError, FailureKind, FilterError, ListingError, SearchError};
pub use export::{CsvSink, RecordSink};
pub use locators::SiteLocators;
pub use navigator::{clamp_page_count, Navigator, NavigatorSettings, PairHarvest, SearchState};
pub use pacing::Pacer;
pub use run::{RunSummary, SearchRun};
pub use scoring::{KeywordMatch, KeywordScorer};
