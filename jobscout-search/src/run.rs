//! Drives every (location, query) pair of a search to completion.
use crate::error::SearchError;
use crate::export::RecordSink;
use crate::locators::SiteLocators;
use crate::navigator::{Navigator, NavigatorSettings, PairHarvest};
use crate::pacing::Settle;
use crate::scoring::KeywordScorer;
use crate::signin::sign_in;
use jobscout_common::{Credentials, SearchCriteria, SearchPair};
use jobscout_drivers::Browser;
use std::path::PathBuf;
use tracing::{debug, error, info, info_span, Instrument};

/// What happened across all pairs of a run.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub pairs_completed: usize,
    pub pairs_failed: usize,
    pub records_exported: usize,
    pub listings_failed: usize,
    pub exports: Vec<PathBuf>,
}

/// One browser session walking the whole cross product, pair by pair.
pub struct SearchRun<'a, B: Browser + ?Sized> {
    browser: &'a B,
    locators: &'a SiteLocators,
    settings: &'a NavigatorSettings,
    scorer: &'a KeywordScorer,
    credentials: &'a Credentials,
}

impl<'a, B: Browser + ?Sized> SearchRun<'a, B> {
    pub fn new(
        browser: &'a B,
        locators: &'a SiteLocators,
        settings: &'a NavigatorSettings,
        scorer: &'a KeywordScorer,
        credentials: &'a Credentials,
    ) -> Self {
        Self {
            browser,
            locators,
            settings,
            scorer,
            credentials,
        }
    }

    /// Search, score and export every pair. A failing pair is logged and the
    /// run moves on to the next one.
    pub async fn execute(
        &self,
        criteria: &SearchCriteria,
        sink: &mut dyn RecordSink,
    ) -> RunSummary {
        let mut summary = RunSummary::default();

        for pair in criteria.pairs() {
            let span = info_span!(
                "pair",
                location = %pair.location,
                query = %pair.query,
                query_index = pair.query_index,
            );
            let harvest = match self.search_pair(&pair).instrument(span).await {
                Ok(harvest) => harvest,
                Err(err) => {
                    summary.pairs_failed += 1;
                    error!(
                        target: "search.run",
                        location = %pair.location,
                        query = %pair.query,
                        error = %err,
                        "search pair aborted"
                    );
                    continue;
                }
            };

            summary.listings_failed += harvest.listings_failed;
            let mut records = harvest.records;
            self.scorer.score_all(&mut records);

            match sink.write(&pair, &records) {
                Ok(path) => {
                    summary.pairs_completed += 1;
                    summary.records_exported += records.len();
                    summary.exports.push(path);
                }
                Err(err) => {
                    summary.pairs_failed += 1;
                    error!(
                        target: "search.run",
                        sink = %pair.sink_name(),
                        error = %err,
                        "export failed"
                    );
                }
            }
        }

        info!(
            target: "search.run",
            completed = summary.pairs_completed,
            failed = summary.pairs_failed,
            records = summary.records_exported,
            "search run finished"
        );
        summary
    }

    async fn search_pair(&self, pair: &SearchPair) -> Result<PairHarvest, SearchError> {
        let url = &self.locators.jobs_url;
        self.browser
            .goto(url)
            .await
            .map_err(|source| SearchError::Navigation {
                url: url.clone(),
                source,
            })?;

        sign_in(self.browser, self.locators, self.credentials, self.settings.wait).await;
        self.settings.pacer.settle(Settle::Verification).await;
        if let Err(err) = self.browser.maximize().await {
            debug!(target: "search.run", error = %err, "could not maximize window");
        }

        let harvest = Navigator::new(self.browser, self.locators, self.settings)
            .run_pair(pair)
            .await?;
        info!(
            target: "search.run",
            records = harvest.records.len(),
            pages = harvest.pages_visited,
            empty_pages = harvest.pages_empty,
            skipped_pages = harvest.pages_skipped,
            failed_listings = harvest.listings_failed,
            "pair harvested"
        );
        Ok(harvest)
    }
}
