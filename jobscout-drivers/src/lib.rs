//! Driver layer for browser automation.
//!
//! The search workflow only needs a handful of primitives (navigate, find,
//! wait, click, type, read). They are expressed by the [`Browser`] trait so the
//! workflow can run against a real WebDriver session or an in-memory fake.
//!
//! - [`browser::Browser`]: the primitive operations
//! - [`browser::driver::WebDriverBrowser`]: `fantoccini`-backed implementation
//! - [`locator::Locator`]: CSS / XPath / id element locators
//! - [`wait`]: bounded polling waits for visibility and enablement
pub mod browser;
pub mod error;
pub mod locator;
pub mod wait;

pub use browser::Browser;
pub use error::{DriverError, DriverResult};
pub use locator::Locator;
pub use wait::WaitPolicy;
