//! Optional sign-in form fill.
//!
//! The jobs page only sometimes shows the sign-in inputs. Missing inputs are
//! logged and otherwise ignored; this helper never fails the run.
use crate::locators::SiteLocators;
use jobscout_common::Credentials;
use jobscout_drivers::{wait, Browser, DriverResult, Locator, WaitPolicy};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignInOutcome {
    /// Both inputs were filled and the form submitted.
    Submitted,
    /// The form was absent or incomplete; nothing was submitted.
    Skipped,
}

pub async fn sign_in<B>(
    browser: &B,
    locators: &SiteLocators,
    credentials: &Credentials,
    policy: WaitPolicy,
) -> SignInOutcome
where
    B: Browser + ?Sized,
{
    match fill_unique(browser, &locators.username_input, &credentials.username).await {
        Ok(true) => {}
        Ok(false) => warn!(target: "search.signin", "unable to find username input"),
        Err(err) => warn!(target: "search.signin", error = %err, "could not fill username input"),
    }

    match fill_unique(browser, &locators.password_input, &credentials.password).await {
        Ok(true) => {}
        Ok(false) => {
            warn!(target: "search.signin", "unable to find password input");
            return SignInOutcome::Skipped;
        }
        Err(err) => {
            warn!(target: "search.signin", error = %err, "could not fill password input");
            return SignInOutcome::Skipped;
        }
    }

    let submitted = async {
        let button = wait::until_visible(browser, &locators.sign_in_button, policy).await?;
        browser.click(&button).await
    };
    match submitted.await {
        Ok(()) => {
            info!(target: "search.signin", "sign-in form submitted");
            SignInOutcome::Submitted
        }
        Err(err) => {
            warn!(target: "search.signin", error = %err, "sign-in button unavailable");
            SignInOutcome::Skipped
        }
    }
}

/// Type `text` into the input if exactly one element matches.
async fn fill_unique<B>(browser: &B, locator: &Locator, text: &str) -> DriverResult<bool>
where
    B: Browser + ?Sized,
{
    let found = browser.find_all(locator).await?;
    match found.as_slice() {
        [input] => {
            browser.send_keys(input, text).await?;
            Ok(true)
        }
        _ => Ok(false),
    }
}
