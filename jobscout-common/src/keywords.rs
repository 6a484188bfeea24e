//! Tiered keyword taxonomy used to rank job descriptions.
//!
//! A [`KeywordTable`] is built once at startup (either [`KeywordTable::default`]
//! or from configuration) and shared read-only afterwards.
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Largest weight a tier may carry. Keeps any realistic score far below
/// `u32::MAX`.
pub const MAX_TIER_WEIGHT: u32 = 1000;

/// Keywords sharing one weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordTier {
    pub weight: u32,
    pub phrases: Vec<String>,
}

impl KeywordTier {
    pub fn new<I, S>(weight: u32, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            weight,
            phrases: phrases.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum KeywordTableError {
    #[error("keyword tier {index} has weight 0")]
    ZeroWeight { index: usize },

    #[error(
        "keyword tier {index} has weight {weight}, above the maximum of {max}",
        max = MAX_TIER_WEIGHT
    )]
    WeightTooLarge { index: usize, weight: u32 },

    #[error("keyword tier {index} contains an empty phrase")]
    EmptyPhrase { index: usize },

    #[error("phrase `{phrase}` in tier {index} repeats `{first}` from tier {first_index}")]
    DuplicatePhrase {
        index: usize,
        phrase: String,
        first_index: usize,
        first: String,
    },
}

/// Ordered tiers of weighted phrases. Tiers are independent: a description
/// may match phrases from several tiers and every match contributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordTable {
    tiers: Vec<KeywordTier>,
}

impl KeywordTable {
    /// Validate and freeze a table. Phrases are compared case-insensitively,
    /// so each one can appear only once across all tiers.
    pub fn new(tiers: Vec<KeywordTier>) -> Result<Self, KeywordTableError> {
        validate(&tiers)?;
        Ok(Self { tiers })
    }

    pub fn tiers(&self) -> &[KeywordTier] {
        &self.tiers
    }
}

fn validate(tiers: &[KeywordTier]) -> Result<(), KeywordTableError> {
    let mut seen: HashMap<String, (usize, &str)> = HashMap::new();
    for (index, tier) in tiers.iter().enumerate() {
        if tier.weight == 0 {
            return Err(KeywordTableError::ZeroWeight { index });
        }
        if tier.weight > MAX_TIER_WEIGHT {
            return Err(KeywordTableError::WeightTooLarge {
                index,
                weight: tier.weight,
            });
        }
        for phrase in &tier.phrases {
            if phrase.is_empty() {
                return Err(KeywordTableError::EmptyPhrase { index });
            }
            let previous = seen.insert(phrase.to_lowercase(), (index, phrase.as_str()));
            if let Some((first_index, first)) = previous {
                return Err(KeywordTableError::DuplicatePhrase {
                    index,
                    phrase: phrase.clone(),
                    first_index,
                    first: first.to_string(),
                });
            }
        }
    }
    Ok(())
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self {
            tiers: vec![
                KeywordTier::new(
                    5,
                    [
                        "validation engineer",
                        "hardware validation",
                        "python",
                        "soc validation",
                        "silicon validation",
                        "post-si validation",
                        "post-silicon validation",
                        "IP validation",
                    ],
                ),
                KeywordTier::new(
                    4,
                    [
                        "software validation",
                        "embedded",
                        "firmware",
                        "automation",
                        "C/C++",
                        " C ",
                        "system validation",
                        "hardware debug",
                        "firmware debug",
                        "system debug",
                        "system test",
                        "system-level debug",
                        "system-level test",
                        "system level debug",
                        "systems debug",
                        "systems test",
                        "platform debug",
                        "platform test",
                        "platform-level debug",
                        "platform-level test",
                        "platform level debug",
                        "platform level test",
                        "asic debug",
                        "asic test",
                    ],
                ),
                KeywordTier::new(
                    3,
                    [
                        "field engineer",
                        "project manager",
                        "computer architecture",
                        "soc architecture",
                    ],
                ),
                KeywordTier::new(
                    2,
                    [
                        "design engineer",
                        "test plan",
                        "system under test",
                        "SUT",
                        "device under test",
                        "DUT",
                        "shift-left",
                        "shift left",
                    ],
                ),
                KeywordTier::new(1, ["technician", "JTAG", "T32", "Trace32"]),
            ],
        }
    }
}
