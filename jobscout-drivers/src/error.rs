use fantoccini::error::{CmdError, NewSessionError};
use std::time::Duration;

/// Failures reported by a [`Browser`](crate::Browser) implementation.
#[derive(thiserror::Error, Debug)]
pub enum DriverError {
    /// No element matched the locator.
    #[error("no element matches {0}")]
    NotFound(String),

    /// A previously found element is no longer attached to the page.
    #[error("stale element reference")]
    Stale,

    /// A bounded wait expired before its condition held.
    #[error("timed out after {waited:?} waiting for {what}")]
    Timeout { what: String, waited: Duration },

    /// The WebDriver session could not be created.
    #[error("could not start a WebDriver session at {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: NewSessionError,
    },

    /// Any other command failure.
    #[error("WebDriver command failed: {0}")]
    Command(String),
}

pub type DriverResult<T> = std::result::Result<T, DriverError>;

impl From<CmdError> for DriverError {
    fn from(err: CmdError) -> Self {
        if err.is_no_such_element() {
            DriverError::NotFound(err.to_string())
        } else if err.is_stale_element_reference() {
            DriverError::Stale
        } else {
            DriverError::Command(err.to_string())
        }
    }
}

impl From<serde_json::Error> for DriverError {
    fn from(err: serde_json::Error) -> Self {
        DriverError::Command(format!("could not encode script argument: {err}"))
    }
}
