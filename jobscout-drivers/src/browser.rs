//! The primitive browser operations the search workflow relies on.
use crate::error::DriverResult;
use crate::locator::Locator;
use async_trait::async_trait;

pub mod driver;

/// Keys understood by WebDriver `send_keys`.
pub mod keys {
    pub const ENTER: &str = "\u{E007}";
}

/// A controlled browser session.
///
/// Elements are opaque handles; every interaction goes through the browser so
/// a single session owns all page state.
#[async_trait]
pub trait Browser: Send + Sync {
    type Element: Clone + Send + Sync;

    async fn goto(&self, url: &str) -> DriverResult<()>;

    async fn current_url(&self) -> DriverResult<String>;

    async fn maximize(&self) -> DriverResult<()>;

    /// First element matching `locator`, or
    /// [`DriverError::NotFound`](crate::DriverError::NotFound) if none.
    async fn find(&self, locator: &Locator) -> DriverResult<Self::Element>;

    /// Every element matching `locator`, possibly none.
    async fn find_all(&self, locator: &Locator) -> DriverResult<Vec<Self::Element>>;

    async fn find_in(&self, parent: &Self::Element, locator: &Locator)
        -> DriverResult<Self::Element>;

    async fn find_all_in(
        &self,
        parent: &Self::Element,
        locator: &Locator,
    ) -> DriverResult<Vec<Self::Element>>;

    async fn is_displayed(&self, element: &Self::Element) -> DriverResult<bool>;

    async fn is_enabled(&self, element: &Self::Element) -> DriverResult<bool>;

    async fn click(&self, element: &Self::Element) -> DriverResult<()>;

    async fn scroll_into_view(&self, element: &Self::Element) -> DriverResult<()>;

    async fn clear(&self, element: &Self::Element) -> DriverResult<()>;

    async fn send_keys(&self, element: &Self::Element, text: &str) -> DriverResult<()>;

    async fn text(&self, element: &Self::Element) -> DriverResult<String>;

    async fn attr(&self, element: &Self::Element, name: &str) -> DriverResult<Option<String>>;
}
