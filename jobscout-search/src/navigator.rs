//! Per-pair search workflow.
//!
//! Each (location, query) pair walks
//! `Idle -> SearchEntered -> ResultsFiltered -> PagingResults -> Done`.
//! Failure policy per state:
//!
//! | state            | failure                         | effect              |
//! |------------------|---------------------------------|---------------------|
//! | Idle             | search input never visible      | pair aborted        |
//! | SearchEntered    | date filter control/entry gone  | site default kept   |
//! | ResultsFiltered  | pagination unreadable           | one page assumed    |
//! | PagingResults    | page button unreachable         | page skipped        |
//! | PagingResults    | "no matching jobs" marker       | page skipped        |
//! | PagingResults    | one listing unreadable          | listing skipped     |
use crate::error::{FilterError, SearchError, SearchInput};
use crate::extract::extract_listing;
use crate::locators::SiteLocators;
use crate::pacing::{Pacer, Settle};
use jobscout_common::{DateRange, JobRecord, SearchPair};
use jobscout_drivers::browser::keys;
use jobscout_drivers::{wait, Browser, DriverError, DriverResult, Locator, WaitPolicy};
use tracing::{debug, info, warn};

/// Hard ceiling on result pages visited per pair.
pub const DEFAULT_MAX_PAGES: usize = 15;

#[derive(Debug, Clone)]
pub struct NavigatorSettings {
    /// First page to extract (1-based).
    pub start_page: usize,
    /// Ceiling applied to the site-reported page count.
    pub max_pages: usize,
    pub wait: WaitPolicy,
    pub pacer: Pacer,
}

impl Default for NavigatorSettings {
    fn default() -> Self {
        Self {
            start_page: 1,
            max_pages: DEFAULT_MAX_PAGES,
            wait: WaitPolicy::default(),
            pacer: Pacer::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    Idle,
    SearchEntered,
    ResultsFiltered,
    PagingResults { page: usize, last_page: usize },
    Done,
}

/// Records gathered for one pair plus counters for the run summary.
#[derive(Debug, Default)]
pub struct PairHarvest {
    pub records: Vec<JobRecord>,
    pub pages_visited: usize,
    pub pages_empty: usize,
    pub pages_skipped: usize,
    pub listings_failed: usize,
}

/// Effective number of pages to walk: at least one, at most `ceiling`.
pub fn clamp_page_count(reported: usize, ceiling: usize) -> usize {
    reported.clamp(1, ceiling.max(1))
}

pub struct Navigator<'a, B: Browser + ?Sized> {
    browser: &'a B,
    locators: &'a SiteLocators,
    settings: &'a NavigatorSettings,
}

impl<'a, B: Browser + ?Sized> Navigator<'a, B> {
    pub fn new(
        browser: &'a B,
        locators: &'a SiteLocators,
        settings: &'a NavigatorSettings,
    ) -> Self {
        Self {
            browser,
            locators,
            settings,
        }
    }

    /// Run the state machine for one pair on an already loaded search page.
    pub async fn run_pair(&self, pair: &SearchPair) -> Result<PairHarvest, SearchError> {
        let mut harvest = PairHarvest::default();
        let mut state = SearchState::Idle;

        loop {
            debug!(target: "search.navigator", ?state, "entering state");
            state = match state {
                SearchState::Idle => {
                    self.enter_search(pair).await?;
                    SearchState::SearchEntered
                }
                SearchState::SearchEntered => {
                    if let Err(err) = self.apply_date_filter(pair.date_range).await {
                        warn!(
                            target: "search.navigator",
                            query = %pair.query,
                            location = %pair.location,
                            error = %err,
                            "date filter not applied; continuing with the site default"
                        );
                    }
                    SearchState::ResultsFiltered
                }
                SearchState::ResultsFiltered => {
                    let reported = self.reported_page_count(pair).await;
                    let last_page = clamp_page_count(reported, self.settings.max_pages);
                    info!(
                        target: "search.navigator",
                        query = %pair.query,
                        location = %pair.location,
                        reported,
                        last_page,
                        "paging results"
                    );
                    SearchState::PagingResults {
                        page: self.settings.start_page.max(1),
                        last_page,
                    }
                }
                SearchState::PagingResults { page, last_page } if page > last_page => {
                    SearchState::Done
                }
                SearchState::PagingResults { page, last_page } => {
                    self.harvest_page(page, pair, &mut harvest).await;
                    SearchState::PagingResults {
                        page: page + 1,
                        last_page,
                    }
                }
                SearchState::Done => return Ok(harvest),
            };
        }
    }

    async fn enter_search(&self, pair: &SearchPair) -> Result<(), SearchError> {
        self.submit_input(&self.locators.keyword_input, SearchInput::Keywords, &pair.query)
            .await?;
        self.submit_input(&self.locators.location_input, SearchInput::Location, &pair.location)
            .await
    }

    async fn submit_input(
        &self,
        locator: &Locator,
        input: SearchInput,
        text: &str,
    ) -> Result<(), SearchError> {
        let element = wait::until_visible(self.browser, locator, self.settings.wait)
            .await
            .map_err(|source| SearchError::InputUnavailable { input, source })?;
        self.browser.clear(&element).await?;
        self.browser.send_keys(&element, text).await?;
        self.browser.send_keys(&element, keys::ENTER).await?;
        Ok(())
    }

    async fn apply_date_filter(&self, range: DateRange) -> Result<(), FilterError> {
        let b = self.browser;
        let loc = self.locators;
        self.settings.pacer.settle(Settle::AfterSearch).await;

        let toggle = b.find(&loc.date_filter_toggle).await.map_err(FilterError::Control)?;
        b.click(&toggle).await.map_err(FilterError::Control)?;
        wait::until_enabled(b, &loc.date_filter_legend, self.settings.wait)
            .await
            .map_err(FilterError::Control)?;
        let menu = b.find(&loc.date_filter_menu).await.map_err(FilterError::Control)?;
        let items = b
            .find_all_in(&menu, &loc.date_filter_items)
            .await
            .map_err(FilterError::Control)?;

        let label = range.filter_label();
        let label_locator = loc.date_filter_label(label);
        let mut entry = None;
        for item in &items {
            let hits = b
                .find_all_in(item, &label_locator)
                .await
                .map_err(FilterError::Control)?;
            if !hits.is_empty() {
                entry = Some(item);
                break;
            }
        }
        let entry = entry.ok_or(FilterError::EntryMissing { label })?;

        let radio = b
            .find_in(entry, &loc.date_filter_input)
            .await
            .map_err(FilterError::Control)?;
        b.scroll_into_view(&radio).await.map_err(FilterError::Control)?;
        b.click(&radio).await.map_err(FilterError::Control)?;
        self.settings.pacer.settle(Settle::AfterFilterPick).await;

        let apply = b.find(&loc.apply_filter_button).await.map_err(FilterError::Apply)?;
        b.click(&apply).await.map_err(FilterError::Apply)?;
        self.settings.pacer.settle(Settle::AfterFilterApply).await;

        debug!(target: "search.navigator", %range, "date filter applied");
        Ok(())
    }

    /// Number of page buttons in the pagination list; 1 without pagination.
    async fn reported_page_count(&self, pair: &SearchPair) -> usize {
        match self.count_page_buttons().await {
            Ok(count) => count,
            Err(err) => {
                warn!(
                    target: "search.navigator",
                    query = %pair.query,
                    location = %pair.location,
                    error = %err,
                    "could not read pagination; assuming a single page"
                );
                1
            }
        }
    }

    async fn count_page_buttons(&self) -> DriverResult<usize> {
        let lists = self.browser.find_all(&self.locators.pagination).await?;
        match lists.first() {
            None => Ok(1),
            Some(list) => Ok(self
                .browser
                .find_all_in(list, &self.locators.page_buttons)
                .await?
                .len()),
        }
    }

    async fn open_page(&self, page: usize) -> DriverResult<()> {
        let list = self.browser.find(&self.locators.pagination).await?;
        let button = self
            .browser
            .find_in(&list, &self.locators.page_button(page))
            .await?;
        self.browser.scroll_into_view(&button).await?;
        self.browser.click(&button).await
    }

    async fn listing_entries(&self) -> DriverResult<Vec<B::Element>> {
        let list = self.browser.find(&self.locators.results_list).await?;
        let body = self
            .browser
            .find_in(&list, &self.locators.results_list_body)
            .await?;
        self.browser
            .find_all_in(&body, &self.locators.listing_entries)
            .await
    }

    async fn harvest_page(&self, page: usize, pair: &SearchPair, harvest: &mut PairHarvest) {
        if page != 1 {
            if let Err(err) = self.open_page(page).await {
                harvest.pages_skipped += 1;
                warn!(
                    target: "search.navigator",
                    page,
                    query = %pair.query,
                    location = %pair.location,
                    error = %err,
                    "could not open results page; skipping it"
                );
                return;
            }
        }
        self.settings.pacer.settle(Settle::AfterPageChange).await;

        match self.browser.find_all(&self.locators.no_results).await {
            Ok(markers) if !markers.is_empty() => {
                harvest.pages_empty += 1;
                info!(
                    target: "search.navigator",
                    page,
                    query = %pair.query,
                    location = %pair.location,
                    "no matching jobs on this page"
                );
                return;
            }
            Ok(_) => {}
            Err(err) => return self.skip_page(page, pair, harvest, err),
        }

        let listings = match self.listing_entries().await {
            Ok(listings) => listings,
            Err(err) => return self.skip_page(page, pair, harvest, err),
        };
        harvest.pages_visited += 1;

        let before = harvest.records.len();
        for (index, listing) in listings.iter().enumerate() {
            let extracted =
                extract_listing(self.browser, self.locators, &self.settings.pacer, listing).await;
            match extracted {
                Ok(record) => harvest.records.push(record),
                Err(err) => {
                    harvest.listings_failed += 1;
                    warn!(
                        target: "search.navigator",
                        page,
                        listing = index + 1,
                        query = %pair.query,
                        location = %pair.location,
                        kind = %err.kind(),
                        error = %err,
                        "skipping listing"
                    );
                }
            }
        }
        debug!(
            target: "search.navigator",
            page,
            listings = listings.len(),
            extracted = harvest.records.len() - before,
            "page harvested"
        );
    }

    fn skip_page(
        &self,
        page: usize,
        pair: &SearchPair,
        harvest: &mut PairHarvest,
        err: DriverError,
    ) {
        harvest.pages_skipped += 1;
        warn!(
            target: "search.navigator",
            page,
            query = %pair.query,
            location = %pair.location,
            error = %err,
            "results list unreadable; skipping page"
        );
    }
}
