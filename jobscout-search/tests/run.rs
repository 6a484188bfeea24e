mod common;

use common::{fast_settings, El, FailingSink, FakeListing, FakePage, FakeSite, MemorySink};
use jobscout_common::{Credentials, DateRange, KeywordTable, SearchCriteria};
use jobscout_search::{CsvSink, KeywordScorer, SearchRun, SiteLocators};
use pretty_assertions::assert_eq;

fn scorer() -> KeywordScorer {
    KeywordScorer::new(&KeywordTable::default())
}

fn criteria(queries: &[&str], locations: &[&str]) -> SearchCriteria {
    SearchCriteria::new(
        queries.iter().map(|s| s.to_string()).collect(),
        locations.iter().map(|s| s.to_string()).collect(),
        DateRange::Last24Hours,
    )
    .unwrap()
}

#[tokio::test]
async fn failed_pair_does_not_stop_the_run() {
    let mut site = FakeSite::new(vec![FakePage::with_listings(3)]);
    // second visit (United States, query 1) never renders its inputs
    site.inputs_missing_on_visits = vec![2];
    let locators = SiteLocators::default();
    let settings = fast_settings();
    let scorer = scorer();
    let credentials = Credentials::default();
    let mut sink = MemorySink::default();

    let summary = SearchRun::new(&site, &locators, &settings, &scorer, &credentials)
        .execute(
            &criteria(&["validation", "firmware"], &["United States", "Canada"]),
            &mut sink,
        )
        .await;

    assert_eq!(summary.pairs_completed, 3);
    assert_eq!(summary.pairs_failed, 1);
    assert_eq!(summary.records_exported, 9);
    let names: Vec<&str> = sink.exports.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["0_United States", "0_Canada", "1_Canada"]);
}

#[tokio::test]
async fn records_are_scored_before_export_and_not_shared_between_pairs() {
    let site = FakeSite::new(vec![FakePage {
        listings: vec![
            FakeListing::new(
                "Validation",
                "Seeking a Hardware Validation engineer with Python experience",
            ),
            FakeListing::new("Writer", "Technical writer, no travel"),
        ],
        no_results: false,
    }]);
    let locators = SiteLocators::default();
    let settings = fast_settings();
    let scorer = scorer();
    let credentials = Credentials::default();
    let mut sink = MemorySink::default();

    SearchRun::new(&site, &locators, &settings, &scorer, &credentials)
        .execute(&criteria(&["a", "b"], &["Remote"]), &mut sink)
        .await;

    assert_eq!(sink.exports.len(), 2);
    for (_, records) in &sink.exports {
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].score, 15);
        assert_eq!(
            records[0].keywords_display(),
            "[hardware validation, python, validation engineer]"
        );
        assert_eq!(records[1].score, 0);
    }
}

#[tokio::test]
async fn sign_in_form_is_filled_when_present() {
    let mut site = FakeSite::new(vec![FakePage::with_listings(1)]);
    site.sign_in_form = true;
    let locators = SiteLocators::default();
    let settings = fast_settings();
    let scorer = scorer();
    let credentials = Credentials {
        username: "scout@example.com".into(),
        password: "s3cret".into(),
    };
    let mut sink = MemorySink::default();

    SearchRun::new(&site, &locators, &settings, &scorer, &credentials)
        .execute(&criteria(&["validation"], &["United States"]), &mut sink)
        .await;

    let state = site.state();
    assert_eq!(state.typed[0], (El::Username, "scout@example.com".to_string()));
    assert_eq!(state.typed[1], (El::Password, "s3cret".to_string()));
    assert_eq!(state.clicks[0], El::SignInButton);
}

#[tokio::test]
async fn csv_export_has_header_plus_one_row_per_record() {
    let site = FakeSite::new(vec![FakePage::with_listings(5)]);
    let locators = SiteLocators::default();
    let settings = fast_settings();
    let scorer = scorer();
    let credentials = Credentials::default();
    let dir = tempfile::tempdir().unwrap();
    let mut sink = CsvSink::new(dir.path(), "todays_jobs");

    let summary = SearchRun::new(&site, &locators, &settings, &scorer, &credentials)
        .execute(&criteria(&["validation"], &["United States"]), &mut sink)
        .await;

    assert_eq!(summary.exports, vec![dir.path().join("todays_jobs_UnitedStates_0.csv")]);
    let text = String::from_utf8(std::fs::read(&summary.exports[0]).unwrap()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], "link,title,location,score,company,keywords,description");
    // "Embedded firmware role": embedded (4) + firmware (4)
    assert!(lines[1].contains(",8,"), "{}", lines[1]);
}

#[tokio::test]
async fn export_failure_is_counted_and_later_pairs_still_export() {
    let site = FakeSite::new(vec![FakePage::with_listings(2)]);
    let locators = SiteLocators::default();
    let settings = fast_settings();
    let scorer = scorer();
    let credentials = Credentials::default();
    let mut sink = FailingSink {
        fail_on: vec![0],
        ..FailingSink::default()
    };

    let summary = SearchRun::new(&site, &locators, &settings, &scorer, &credentials)
        .execute(&criteria(&["validation"], &["United States", "Canada"]), &mut sink)
        .await;

    assert_eq!(sink.calls, 2);
    assert_eq!(summary.pairs_failed, 1);
    assert_eq!(summary.pairs_completed, 1);
    assert_eq!(summary.records_exported, 2);
    let names: Vec<&str> = sink.inner.exports.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["0_Canada"]);
}

#[tokio::test]
async fn csv_rows_stay_on_one_line_when_fields_contain_line_breaks() {
    let mut listing = FakeListing::new("Firmware\nEngineer", "Line one\nline two");
    listing.company = "Acme\r\nSilicon".into();
    listing.location = "Austin,\nTX".into();
    let site = FakeSite::new(vec![FakePage {
        listings: vec![listing.clone(), listing],
        no_results: false,
    }]);
    let locators = SiteLocators::default();
    let settings = fast_settings();
    let scorer = scorer();
    let credentials = Credentials::default();
    let dir = tempfile::tempdir().unwrap();
    let mut sink = CsvSink::new(dir.path(), "todays_jobs");

    let summary = SearchRun::new(&site, &locators, &settings, &scorer, &credentials)
        .execute(&criteria(&["firmware"], &["Remote"]), &mut sink)
        .await;

    let text = std::fs::read_to_string(&summary.exports[0]).unwrap();
    assert_eq!(text.lines().count(), 3);
    assert!(text.contains("Firmware Engineer,\"Austin, TX\""), "{text}");
    assert!(text.contains("Acme Silicon"), "{text}");
}
