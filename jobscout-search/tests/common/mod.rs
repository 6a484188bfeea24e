//! In-memory stand-in for the LinkedIn jobs pages.
//!
//! Elements are plain enum values and locators are matched against
//! `SiteLocators::default()`, so the workflow under test runs unchanged.
#![allow(dead_code)]

use async_trait::async_trait;
use jobscout_common::{JobRecord, SearchPair};
use jobscout_drivers::{Browser, DriverError, DriverResult, Locator, WaitPolicy};
use jobscout_search::{ExportError, NavigatorSettings, Pacer, RecordSink, SiteLocators};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum El {
    KeywordInput,
    LocationInput,
    Username,
    Password,
    SignInButton,
    FilterToggle,
    FilterLegend,
    FilterMenu,
    FilterItem(usize),
    FilterLabel(usize),
    FilterInput(usize),
    ApplyButton,
    Pagination,
    PageButton(usize),
    NoResults,
    ResultsList,
    ResultsBody,
    Listing(usize),
    ListingAnchor(usize),
    DetailPane,
    DetailLocation,
    DetailCompany,
    DescriptionContainer,
    DescriptionText,
}

/// Which step of reading a listing blows up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    Activate,
    Pane,
    Location,
    Company,
    Description,
}

#[derive(Debug, Clone)]
pub struct FakeListing {
    pub title: String,
    pub location: String,
    pub company: String,
    pub description: String,
    pub fault: Option<Fault>,
}

impl FakeListing {
    pub fn new(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            location: "Austin, TX".to_string(),
            company: "Acme".to_string(),
            description: description.to_string(),
            fault: None,
        }
    }

    pub fn failing(mut self, fault: Fault) -> Self {
        self.fault = Some(fault);
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct FakePage {
    pub listings: Vec<FakeListing>,
    pub no_results: bool,
}

impl FakePage {
    pub fn with_listings(count: usize) -> Self {
        Self {
            listings: (1..=count)
                .map(|n| FakeListing::new(&format!("Job {n}"), "Embedded firmware role"))
                .collect(),
            no_results: false,
        }
    }

    pub fn empty() -> Self {
        Self {
            listings: vec![],
            no_results: true,
        }
    }
}

#[derive(Debug, Default)]
pub struct SiteState {
    pub visits: usize,
    pub current_page: usize,
    pub selected: Option<usize>,
    pub typed: Vec<(El, String)>,
    pub clicks: Vec<El>,
    pub chosen_filter: Option<&'static str>,
    pub filter_applied: bool,
}

pub struct FakeSite {
    loc: SiteLocators,
    pub pages: Vec<FakePage>,
    /// Page buttons shown in the pagination list; 0 hides pagination.
    pub reported_pages: usize,
    /// 1-based visits on which the search inputs never render.
    pub inputs_missing_on_visits: Vec<usize>,
    pub date_filter: bool,
    /// Menu entries left out of the date filter.
    pub hidden_filter_labels: Vec<&'static str>,
    pub sign_in_form: bool,
    pub state: Mutex<SiteState>,
}

const FILTER_LABELS: [&str; 4] = [
    "Filter by Any time",
    "Filter by Past month",
    "Filter by Past week",
    "Filter by Past 24 hours",
];

impl FakeSite {
    pub fn new(pages: Vec<FakePage>) -> Self {
        let reported_pages = if pages.len() > 1 { pages.len() } else { 0 };
        Self {
            loc: SiteLocators::default(),
            pages,
            reported_pages,
            inputs_missing_on_visits: vec![],
            date_filter: true,
            hidden_filter_labels: vec![],
            sign_in_form: false,
            state: Mutex::new(SiteState {
                current_page: 1,
                ..SiteState::default()
            }),
        }
    }

    pub fn state(&self) -> std::sync::MutexGuard<'_, SiteState> {
        self.state.lock().unwrap()
    }

    fn page(&self, n: usize) -> Option<&FakePage> {
        n.checked_sub(1).and_then(|i| self.pages.get(i))
    }

    fn selected_listing(&self) -> Option<FakeListing> {
        let state = self.state();
        let index = state.selected?;
        self.page(state.current_page)
            .and_then(|p| p.listings.get(index))
            .cloned()
    }

    fn inputs_available(&self) -> bool {
        !self.inputs_missing_on_visits.contains(&self.state().visits)
    }

    fn missing(locator: &Locator) -> DriverError {
        DriverError::NotFound(locator.to_string())
    }

    fn detail(&self, locator: &Locator, el: El, fault: Fault) -> DriverResult<El> {
        match self.selected_listing() {
            Some(listing) if listing.fault == Some(fault) => Err(match fault {
                Fault::Company => {
                    DriverError::Command("unknown error: target frame detached".into())
                }
                _ => Self::missing(locator),
            }),
            Some(_) => Ok(el),
            None => Err(Self::missing(locator)),
        }
    }
}

pub fn fast_settings() -> NavigatorSettings {
    NavigatorSettings {
        wait: WaitPolicy {
            timeout: Duration::from_millis(20),
            poll: Duration::from_millis(1),
        },
        pacer: Pacer::immediate(),
        ..NavigatorSettings::default()
    }
}

#[async_trait]
impl Browser for FakeSite {
    type Element = El;

    async fn goto(&self, _url: &str) -> DriverResult<()> {
        let mut state = self.state();
        state.visits += 1;
        state.current_page = 1;
        state.selected = None;
        state.chosen_filter = None;
        state.filter_applied = false;
        Ok(())
    }

    async fn current_url(&self) -> DriverResult<String> {
        let state = self.state();
        Ok(match state.selected {
            Some(i) => format!(
                "https://www.linkedin.com/jobs/view/{}{:02}",
                state.current_page, i
            ),
            None => self.loc.jobs_url.clone(),
        })
    }

    async fn maximize(&self) -> DriverResult<()> {
        Ok(())
    }

    async fn find(&self, locator: &Locator) -> DriverResult<El> {
        let l = &self.loc;
        if locator == &l.keyword_input || locator == &l.location_input {
            if !self.inputs_available() {
                return Err(Self::missing(locator));
            }
            return Ok(if locator == &l.keyword_input {
                El::KeywordInput
            } else {
                El::LocationInput
            });
        }
        if self.date_filter {
            if locator == &l.date_filter_toggle {
                return Ok(El::FilterToggle);
            }
            if locator == &l.date_filter_legend {
                return Ok(El::FilterLegend);
            }
            if locator == &l.date_filter_menu {
                return Ok(El::FilterMenu);
            }
            if locator == &l.apply_filter_button {
                return Ok(El::ApplyButton);
            }
        }
        if locator == &l.sign_in_button && self.sign_in_form {
            return Ok(El::SignInButton);
        }
        if locator == &l.pagination && self.reported_pages > 0 {
            return Ok(El::Pagination);
        }
        if locator == &l.results_list {
            return Ok(El::ResultsList);
        }
        if locator == &l.detail_pane {
            return self.detail(locator, El::DetailPane, Fault::Pane);
        }
        if locator == &l.description_container {
            return self.detail(locator, El::DescriptionContainer, Fault::Description);
        }
        Err(Self::missing(locator))
    }

    async fn find_all(&self, locator: &Locator) -> DriverResult<Vec<El>> {
        let l = &self.loc;
        if locator == &l.username_input {
            return Ok(if self.sign_in_form { vec![El::Username] } else { vec![] });
        }
        if locator == &l.password_input {
            return Ok(if self.sign_in_form { vec![El::Password] } else { vec![] });
        }
        if locator == &l.no_results {
            let current = self.state().current_page;
            let empty = self.page(current).map(|p| p.no_results).unwrap_or(false);
            return Ok(if empty { vec![El::NoResults] } else { vec![] });
        }
        Ok(self.find(locator).await.into_iter().collect())
    }

    async fn find_in(&self, parent: &El, locator: &Locator) -> DriverResult<El> {
        let l = &self.loc;
        match parent {
            El::ResultsList if locator == &l.results_list_body => Ok(El::ResultsBody),
            El::Listing(i) if locator == &l.listing_anchor => Ok(El::ListingAnchor(*i)),
            El::DetailPane if locator == &l.detail_location => {
                self.detail(locator, El::DetailLocation, Fault::Location)
            }
            El::DetailPane if locator == &l.detail_company => {
                self.detail(locator, El::DetailCompany, Fault::Company)
            }
            El::DescriptionContainer if locator == &l.description_text => Ok(El::DescriptionText),
            El::FilterItem(i) if locator == &l.date_filter_input => Ok(El::FilterInput(*i)),
            El::Pagination => (1..=self.reported_pages)
                .find(|n| &l.page_button(*n) == locator)
                .map(El::PageButton)
                .ok_or_else(|| Self::missing(locator)),
            _ => Err(Self::missing(locator)),
        }
    }

    async fn find_all_in(&self, parent: &El, locator: &Locator) -> DriverResult<Vec<El>> {
        let l = &self.loc;
        Ok(match parent {
            El::ResultsBody if locator == &l.listing_entries => {
                let current = self.state().current_page;
                let count = self.page(current).map(|p| p.listings.len()).unwrap_or(0);
                (0..count).map(El::Listing).collect()
            }
            El::Pagination if locator == &l.page_buttons => {
                (1..=self.reported_pages).map(El::PageButton).collect()
            }
            El::FilterMenu if locator == &l.date_filter_items => {
                (0..FILTER_LABELS.len()).map(El::FilterItem).collect()
            }
            El::FilterItem(i)
                if locator == &l.date_filter_label(FILTER_LABELS[*i])
                    && !self.hidden_filter_labels.contains(&FILTER_LABELS[*i]) =>
            {
                vec![El::FilterLabel(*i)]
            }
            _ => vec![],
        })
    }

    async fn is_displayed(&self, _element: &El) -> DriverResult<bool> {
        Ok(true)
    }

    async fn is_enabled(&self, _element: &El) -> DriverResult<bool> {
        Ok(true)
    }

    async fn click(&self, element: &El) -> DriverResult<()> {
        let mut state = self.state();
        state.clicks.push(element.clone());
        match element {
            El::ListingAnchor(i) => state.selected = Some(*i),
            El::PageButton(n) => {
                state.current_page = *n;
                state.selected = None;
            }
            El::FilterInput(i) => state.chosen_filter = Some(FILTER_LABELS[*i]),
            El::ApplyButton => state.filter_applied = true,
            _ => {}
        }
        Ok(())
    }

    async fn scroll_into_view(&self, element: &El) -> DriverResult<()> {
        if let El::Listing(i) = element {
            let current = self.state().current_page;
            let fault = self
                .page(current)
                .and_then(|p| p.listings.get(*i))
                .and_then(|l| l.fault);
            if fault == Some(Fault::Activate) {
                return Err(DriverError::Stale);
            }
        }
        Ok(())
    }

    async fn clear(&self, _element: &El) -> DriverResult<()> {
        Ok(())
    }

    async fn send_keys(&self, element: &El, text: &str) -> DriverResult<()> {
        self.state().typed.push((element.clone(), text.to_string()));
        Ok(())
    }

    async fn text(&self, element: &El) -> DriverResult<String> {
        let listing = self
            .selected_listing()
            .ok_or_else(|| DriverError::Stale)?;
        match element {
            El::DetailLocation => Ok(listing.location),
            El::DetailCompany => Ok(listing.company),
            El::DescriptionText => Ok(listing.description),
            _ => Ok(String::new()),
        }
    }

    async fn attr(&self, element: &El, name: &str) -> DriverResult<Option<String>> {
        match (element, name) {
            (El::DetailPane, "aria-label") => Ok(self.selected_listing().map(|l| l.title)),
            _ => Ok(None),
        }
    }
}

/// Sink that keeps every export in memory.
#[derive(Default)]
pub struct MemorySink {
    pub exports: Vec<(String, Vec<JobRecord>)>,
}

impl RecordSink for MemorySink {
    fn write(&mut self, pair: &SearchPair, records: &[JobRecord]) -> Result<PathBuf, ExportError> {
        self.exports.push((pair.sink_name(), records.to_vec()));
        Ok(PathBuf::from(pair.sink_name()))
    }
}

/// Sink whose writes fail for the given 0-based call numbers.
#[derive(Default)]
pub struct FailingSink {
    pub fail_on: Vec<usize>,
    pub calls: usize,
    pub inner: MemorySink,
}

impl RecordSink for FailingSink {
    fn write(&mut self, pair: &SearchPair, records: &[JobRecord]) -> Result<PathBuf, ExportError> {
        let call = self.calls;
        self.calls += 1;
        if self.fail_on.contains(&call) {
            return Err(ExportError::Flush {
                path: PathBuf::from(pair.sink_name()),
                source: io::Error::new(io::ErrorKind::Other, "disk full"),
            });
        }
        self.inner.write(pair, records)
    }
}
