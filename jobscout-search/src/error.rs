//! Error taxonomy of the search workflow.
//!
//! - [`SearchError`]: fatal for the current pair, the run moves on
//! - [`FilterError`]: the date filter could not be applied, defaults stay
//! - [`ListingError`]: one listing could not be read and is omitted
//! - [`ExportError`]: the CSV for a pair could not be written
use jobscout_drivers::DriverError;
use std::fmt;
use std::path::PathBuf;

/// The two search inputs on the jobs page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchInput {
    Keywords,
    Location,
}

impl fmt::Display for SearchInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchInput::Keywords => f.write_str("keyword search box"),
            SearchInput::Location => f.write_str("location search box"),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SearchError {
    #[error("could not load {url}: {source}")]
    Navigation {
        url: String,
        #[source]
        source: DriverError,
    },

    #[error("{input} never became available: {source}")]
    InputUnavailable {
        input: SearchInput,
        #[source]
        source: DriverError,
    },

    #[error("driver fault while entering the search: {0}")]
    Driver(#[from] DriverError),
}

#[derive(thiserror::Error, Debug)]
pub enum FilterError {
    #[error("date filter control unavailable: {0}")]
    Control(#[source] DriverError),

    #[error("no date filter entry labelled '{label}'")]
    EntryMissing { label: &'static str },

    #[error("could not apply the date filter: {0}")]
    Apply(#[source] DriverError),
}

/// Part of a listing that was being read when extraction failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingField {
    Activate,
    DetailPane,
    Link,
    Title,
    Location,
    Company,
    Description,
}

impl fmt::Display for ListingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ListingField::Activate => "activate",
            ListingField::DetailPane => "detail pane",
            ListingField::Link => "link",
            ListingField::Title => "title",
            ListingField::Location => "location",
            ListingField::Company => "company",
            ListingField::Description => "description",
        };
        f.write_str(s)
    }
}

/// Classification of a per-listing failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    MissingElement,
    StaleReference,
    Timeout,
    DriverFault,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FailureKind::MissingElement => "missing_element",
            FailureKind::StaleReference => "stale_reference",
            FailureKind::Timeout => "timeout",
            FailureKind::DriverFault => "driver_fault",
        };
        f.write_str(s)
    }
}

/// A single listing could not be extracted.
#[derive(thiserror::Error, Debug)]
#[error("reading {field} failed: {source}")]
pub struct ListingError {
    pub field: ListingField,
    #[source]
    pub source: DriverError,
}

impl ListingError {
    pub fn kind(&self) -> FailureKind {
        match self.source {
            DriverError::NotFound(_) => FailureKind::MissingElement,
            DriverError::Stale => FailureKind::StaleReference,
            DriverError::Timeout { .. } => FailureKind::Timeout,
            DriverError::Connect { .. } | DriverError::Command(_) => FailureKind::DriverFault,
        }
    }
}

/// Tag a driver failure with the listing field being read.
pub(crate) fn reading(field: ListingField) -> impl FnOnce(DriverError) -> ListingError {
    move |source| ListingError { field, source }
}

#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    #[error("could not create {}: {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("could not write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("could not flush {}: {source}", path.display())]
    Flush {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
