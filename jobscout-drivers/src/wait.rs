//! Bounded waits for UI conditions.
//!
//! These poll the page until the condition holds or the timeout expires. An
//! expired wait surfaces as [`DriverError::Timeout`] and is handled by the
//! caller's per-step policy.
use crate::browser::Browser;
use crate::error::{DriverError, DriverResult};
use crate::locator::Locator;
use std::fmt;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::trace;

/// Timeout and polling interval for a wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    pub timeout: Duration,
    pub poll: Duration,
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            poll: Duration::from_millis(250),
        }
    }
}

impl WaitPolicy {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Condition {
    Visible,
    Enabled,
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Visible => f.write_str("visible"),
            Condition::Enabled => f.write_str("enabled"),
        }
    }
}

/// Wait until the first element matching `locator` is displayed.
pub async fn until_visible<B>(
    browser: &B,
    locator: &Locator,
    policy: WaitPolicy,
) -> DriverResult<B::Element>
where
    B: Browser + ?Sized,
{
    until(browser, locator, Condition::Visible, policy).await
}

/// Wait until the first element matching `locator` is enabled.
pub async fn until_enabled<B>(
    browser: &B,
    locator: &Locator,
    policy: WaitPolicy,
) -> DriverResult<B::Element>
where
    B: Browser + ?Sized,
{
    until(browser, locator, Condition::Enabled, policy).await
}

async fn until<B>(
    browser: &B,
    locator: &Locator,
    condition: Condition,
    policy: WaitPolicy,
) -> DriverResult<B::Element>
where
    B: Browser + ?Sized,
{
    let started = Instant::now();
    loop {
        match browser.find(locator).await {
            Ok(element) => {
                let holds = match condition {
                    Condition::Visible => browser.is_displayed(&element).await,
                    Condition::Enabled => browser.is_enabled(&element).await,
                };
                match holds {
                    Ok(true) => return Ok(element),
                    Ok(false) | Err(DriverError::Stale) => {}
                    Err(e) => return Err(e),
                }
            }
            Err(DriverError::NotFound(_)) | Err(DriverError::Stale) => {}
            Err(e) => return Err(e),
        }

        if started.elapsed() >= policy.timeout {
            return Err(DriverError::Timeout {
                what: format!("{locator} to be {condition}"),
                waited: policy.timeout,
            });
        }
        trace!(target: "browser.wait", %locator, %condition, "condition not met yet");
        sleep(policy.poll).await;
    }
}
