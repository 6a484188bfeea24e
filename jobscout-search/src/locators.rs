//! Element locators for the LinkedIn jobs pages.
use jobscout_drivers::Locator;

const SEARCH_BOX: &str = "//div[contains(@class, 'jobs-search-box__input')]";
const DATE_POSTED_LEGEND: &str = "//legend[text()='Filter results by: Date posted']";

/// Where the workflow finds things on the site. Built once and shared.
#[derive(Debug, Clone)]
pub struct SiteLocators {
    pub jobs_url: String,

    pub username_input: Locator,
    pub password_input: Locator,
    pub sign_in_button: Locator,

    pub keyword_input: Locator,
    pub location_input: Locator,

    pub date_filter_toggle: Locator,
    pub date_filter_legend: Locator,
    pub date_filter_menu: Locator,
    pub date_filter_items: Locator,
    pub date_filter_input: Locator,
    pub apply_filter_button: Locator,

    pub pagination: Locator,
    pub page_buttons: Locator,
    pub no_results: Locator,

    pub results_list: Locator,
    pub results_list_body: Locator,
    pub listing_entries: Locator,
    pub listing_anchor: Locator,

    pub detail_pane: Locator,
    pub detail_location: Locator,
    pub detail_company: Locator,
    pub description_container: Locator,
    pub description_text: Locator,
}

impl SiteLocators {
    /// Menu entry whose span text equals `label`, relative to a menu item.
    pub fn date_filter_label(&self, label: &str) -> Locator {
        Locator::xpath(format!(".//span[text()='{label}']"))
    }

    /// Pagination button for `page`, relative to the pagination list.
    pub fn page_button(&self, page: usize) -> Locator {
        Locator::xpath(format!(".//button[contains(@aria-label, 'Page {page}')]"))
    }
}

impl Default for SiteLocators {
    fn default() -> Self {
        Self {
            jobs_url: "https://www.linkedin.com/jobs/".to_string(),

            username_input: Locator::id("session_key"),
            password_input: Locator::id("session_password"),
            sign_in_button: Locator::xpath(
                "//button[contains(@class, 'sign-in-form__submit-btn')]",
            ),

            keyword_input: Locator::xpath(format!(
                "{SEARCH_BOX}//input[contains(@aria-label, 'Search by title, skill, or company')]"
            )),
            location_input: Locator::xpath(format!(
                "{SEARCH_BOX}//input[contains(@id, 'jobs-search-box-location-id') and contains(@aria-label, 'City, state, or zip code')]"
            )),

            date_filter_toggle: Locator::id("searchFilter_timePostedRange"),
            date_filter_legend: Locator::xpath(DATE_POSTED_LEGEND),
            date_filter_menu: Locator::xpath(format!("{DATE_POSTED_LEGEND}/..")),
            date_filter_items: Locator::xpath(
                ".//li[contains(@class, 'search-reusables__collection-values-item')]",
            ),
            date_filter_input: Locator::xpath(".//input"),
            apply_filter_button: Locator::xpath(
                "//button[contains(@aria-label, 'Apply current filter to show')]",
            ),

            pagination: Locator::xpath("//ul[contains(@class, 'pages--number')]"),
            page_buttons: Locator::xpath(".//button[contains(@aria-label, 'Page')]"),
            no_results: Locator::xpath("//p[text()='No matching jobs found.']"),

            results_list: Locator::xpath(
                "//header[contains(@class, 'jobs-search-results-list')]/..",
            ),
            results_list_body: Locator::xpath(".//ul"),
            listing_entries: Locator::xpath("./*"),
            listing_anchor: Locator::xpath(".//a"),

            detail_pane: Locator::class("jobs-search__job-details--container"),
            detail_location: Locator::xpath(
                ".//div[contains(@class, 'primary-description-container')]//span",
            ),
            detail_company: Locator::xpath(".//div[contains(@class, 'top-card__company-name')]/a"),
            description_container: Locator::id("job-details"),
            description_text: Locator::xpath(".//p[contains(@dir, 'ltr')]"),
        }
    }
}
