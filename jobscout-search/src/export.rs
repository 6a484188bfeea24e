//! CSV export of scored records.
use crate::error::ExportError;
use jobscout_common::{JobRecord, SearchPair};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

pub const HEADER: [&str; 7] = [
    "link",
    "title",
    "location",
    "score",
    "company",
    "keywords",
    "description",
];

/// Destination for the scored records of one pair.
pub trait RecordSink {
    /// Persist `records` for `pair` and return where they went.
    fn write(&mut self, pair: &SearchPair, records: &[JobRecord]) -> Result<PathBuf, ExportError>;
}

#[derive(Serialize)]
struct Row<'a> {
    link: &'a str,
    title: &'a str,
    location: &'a str,
    score: u32,
    company: &'a str,
    keywords: String,
    description: &'a str,
}

impl<'a> From<&'a JobRecord> for Row<'a> {
    fn from(record: &'a JobRecord) -> Self {
        Self {
            link: &record.link,
            title: &record.title,
            location: &record.location,
            score: record.score,
            company: &record.company,
            keywords: record.keywords_display(),
            description: &record.description,
        }
    }
}

/// Writes `<prefix>_<location>_<query-index>.csv` files into a directory.
#[derive(Debug, Clone)]
pub struct CsvSink {
    directory: PathBuf,
    file_prefix: String,
}

impl CsvSink {
    pub fn new(directory: impl Into<PathBuf>, file_prefix: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            file_prefix: file_prefix.into(),
        }
    }

    pub fn path_for(&self, pair: &SearchPair) -> PathBuf {
        self.directory.join(format!(
            "{}_{}_{}.csv",
            self.file_prefix,
            pair.location_slug(),
            pair.query_index
        ))
    }
}

impl RecordSink for CsvSink {
    fn write(&mut self, pair: &SearchPair, records: &[JobRecord]) -> Result<PathBuf, ExportError> {
        let path = self.path_for(pair);
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&path)
            .map_err(|source| ExportError::Create {
                path: path.clone(),
                source,
            })?;

        writer
            .write_record(HEADER)
            .map_err(|source| ExportError::Write {
                path: path.clone(),
                source,
            })?;
        for record in records {
            writer
                .serialize(Row::from(record))
                .map_err(|source| ExportError::Write {
                    path: path.clone(),
                    source,
                })?;
        }
        writer.flush().map_err(|source| ExportError::Flush {
            path: path.clone(),
            source,
        })?;

        info!(
            target: "search.export",
            sink = %pair.sink_name(),
            path = %path.display(),
            records = records.len(),
            "records exported"
        );
        Ok(path)
    }
}
