use std::time::Duration;
use tokio::time::sleep;
use tracing::trace;

/// Workflow points that need client-side rendering to catch up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settle {
    /// Manual verification window after loading the jobs page.
    Verification,
    AfterSearch,
    AfterFilterPick,
    AfterFilterApply,
    AfterPageChange,
    BeforeListingClick,
    AfterListingClick,
}

/// Fixed settle pauses inserted between workflow steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pacer {
    pub verification: Duration,
    pub after_search: Duration,
    pub after_filter_pick: Duration,
    pub after_filter_apply: Duration,
    pub after_page_change: Duration,
    pub before_listing_click: Duration,
    pub after_listing_click: Duration,
}

impl Default for Pacer {
    fn default() -> Self {
        Self {
            verification: Duration::from_secs(12),
            after_search: Duration::from_secs(3),
            after_filter_pick: Duration::from_secs(1),
            after_filter_apply: Duration::from_secs(2),
            after_page_change: Duration::from_secs(2),
            before_listing_click: Duration::from_millis(200),
            after_listing_click: Duration::from_millis(500),
        }
    }
}

impl Pacer {
    /// No pauses at all; used against in-memory pages.
    pub fn immediate() -> Self {
        Self {
            verification: Duration::ZERO,
            after_search: Duration::ZERO,
            after_filter_pick: Duration::ZERO,
            after_filter_apply: Duration::ZERO,
            after_page_change: Duration::ZERO,
            before_listing_click: Duration::ZERO,
            after_listing_click: Duration::ZERO,
        }
    }

    pub fn duration(&self, point: Settle) -> Duration {
        match point {
            Settle::Verification => self.verification,
            Settle::AfterSearch => self.after_search,
            Settle::AfterFilterPick => self.after_filter_pick,
            Settle::AfterFilterApply => self.after_filter_apply,
            Settle::AfterPageChange => self.after_page_change,
            Settle::BeforeListingClick => self.before_listing_click,
            Settle::AfterListingClick => self.after_listing_click,
        }
    }

    pub async fn settle(&self, point: Settle) {
        let pause = self.duration(point);
        if pause.is_zero() {
            return;
        }
        trace!(target: "search.pacing", ?point, ?pause, "settling");
        sleep(pause).await;
    }
}
