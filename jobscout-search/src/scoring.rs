//! Weighted keyword scoring of job descriptions.
//!
//! Matching is plain case-insensitive substring containment: no stemming,
//! tokenization or word boundaries. A short phrase such as `DUT` therefore
//! also matches inside longer words (`duty`).
use jobscout_common::{JobRecord, KeywordTable};
use std::collections::BTreeSet;
use tracing::debug;

/// Outcome of scoring one description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordMatch {
    pub score: u32,
    pub keywords: BTreeSet<String>,
}

struct Entry {
    phrase: String,
    lowered: String,
    weight: u32,
}

/// Scores descriptions against a [`KeywordTable`].
pub struct KeywordScorer {
    entries: Vec<Entry>,
}

impl KeywordScorer {
    pub fn new(table: &KeywordTable) -> Self {
        let entries = table
            .tiers()
            .iter()
            .flat_map(|tier| {
                tier.phrases.iter().map(move |phrase| Entry {
                    phrase: phrase.clone(),
                    lowered: phrase.to_lowercase(),
                    weight: tier.weight,
                })
            })
            .collect();
        Self { entries }
    }

    /// Sum the weight of every phrase contained in `description`. Each
    /// phrase counts once however often it occurs.
    pub fn score(&self, description: &str) -> KeywordMatch {
        let haystack = description.to_lowercase();
        let mut matched = KeywordMatch::default();
        for entry in &self.entries {
            if haystack.contains(&entry.lowered) && matched.keywords.insert(entry.phrase.clone()) {
                matched.score = matched.score.saturating_add(entry.weight);
                debug!(
                    target: "search.scoring",
                    keyword = %entry.phrase,
                    weight = entry.weight,
                    "keyword matched"
                );
            }
        }
        matched
    }

    /// Overwrite the record's score and keywords from its description.
    pub fn score_record(&self, record: &mut JobRecord) {
        debug!(target: "search.scoring", title = %record.title, "scoring job");
        let KeywordMatch { score, keywords } = self.score(&record.description);
        record.score = score;
        record.keywords = keywords;
    }

    pub fn score_all(&self, records: &mut [JobRecord]) {
        for record in records {
            self.score_record(record);
        }
    }
}
