use anyhow::{Context, Result};
use jobscout_common::{Credentials, SearchCriteria};
use jobscout_config::JobScoutConfig;
use jobscout_drivers::WaitPolicy;
use jobscout_drivers::browser::driver::{DriverSettings, WebDriverBrowser};
use jobscout_search::{
    CsvSink, KeywordScorer, NavigatorSettings, Pacer, RunSummary, SearchRun, SiteLocators,
};
use tracing::{info, warn};

/// Everything a run needs, wired from the loaded config.
pub struct Session {
    browser: WebDriverBrowser,
    locators: SiteLocators,
    settings: NavigatorSettings,
    scorer: KeywordScorer,
    credentials: Credentials,
    criteria: SearchCriteria,
    sink: CsvSink,
}

impl Session {
    /// Walk every pair, then close the browser regardless of how the run went.
    pub async fn run(mut self) -> Result<RunSummary> {
        let summary = SearchRun::new(
            &self.browser,
            &self.locators,
            &self.settings,
            &self.scorer,
            &self.credentials,
        )
        .execute(&self.criteria, &mut self.sink)
        .await;

        if let Err(err) = self.browser.close().await {
            warn!(error = %err, "closing the browser session failed");
        }
        Ok(summary)
    }
}

fn navigator_settings(cfg: &JobScoutConfig) -> NavigatorSettings {
    NavigatorSettings {
        start_page: cfg.search.start_page,
        max_pages: cfg.search.max_pages,
        wait: WaitPolicy::with_timeout(cfg.browser.wait_timeout()),
        pacer: Pacer {
            verification: cfg.browser.verification_pause(),
            ..Pacer::default()
        },
    }
}

pub async fn build_from_config(cfg: JobScoutConfig) -> Result<Session> {
    let criteria = cfg.criteria()?;
    let scorer = KeywordScorer::new(&cfg.keyword_table()?);

    std::fs::create_dir_all(&cfg.output.directory)
        .with_context(|| format!("creating {}", cfg.output.directory.display()))?;
    let sink = CsvSink::new(cfg.output.directory.clone(), cfg.output.file_prefix.clone());

    let driver = DriverSettings {
        webdriver_url: cfg.browser.webdriver_url.clone(),
        headless: cfg.browser.headless,
    };
    let browser = WebDriverBrowser::connect(&driver)
        .await
        .with_context(|| format!("connecting to {}", driver.webdriver_url))?;
    info!(
        webdriver = %driver.webdriver_url,
        headless = driver.headless,
        queries = criteria.queries().len(),
        locations = criteria.locations().len(),
        "browser session ready"
    );

    Ok(Session {
        browser,
        locators: SiteLocators::default(),
        settings: navigator_settings(&cfg),
        scorer,
        credentials: cfg.credentials,
        criteria,
        sink,
    })
}
