//! Loader for JobScout configuration with YAML + environment overlays.
//!
//! Sources are merged in this order, later ones winning:
//!
//! 1. YAML files / inline snippets, in the order they were attached
//! 2. `JOBSCOUT__`-prefixed environment variables
//!    (`JOBSCOUT__BROWSER__HEADLESS=true` sets `browser.headless`)
//!
//! String values may reference environment variables as `${VAR}`; these are
//! expanded recursively before the typed structs are built, which keeps
//! credentials out of the file:
//!
//! ```yaml
//! search:
//!   queries: ['"validation" OR "Technical Writer"']
//!   locations: ["United States"]
//!   date_range: "24hr"
//! credentials:
//!   username: "${LINKEDIN_USERNAME}"
//!   password: "${LINKEDIN_PASSWORD}"
//! ```
use config::{Config, ConfigError, Environment, File};
use jobscout_common::keywords::KeywordTable;
use jobscout_common::observability::{LogConfig, LogFormat};
use jobscout_common::{Credentials, DateRange, KeywordTier, SearchCriteria};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;
pub const DEFAULT_CONFIG_FILE: &str = "jobscout.yaml";

#[derive(Debug, Deserialize)]
pub struct JobScoutConfig {
    pub search: SearchConfig,
    #[serde(default)]
    pub credentials: Credentials,
    #[serde(default)]
    pub browser: BrowserConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Replaces the built-in keyword table when present.
    #[serde(default)]
    pub keywords: Option<Vec<KeywordTier>>,
}

#[derive(Debug, Deserialize)]
pub struct SearchConfig {
    pub queries: Vec<String>,
    pub locations: Vec<String>,
    #[serde(default = "default_date_range")]
    pub date_range: DateRange,
    #[serde(default = "default_start_page")]
    pub start_page: usize,
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,
}

#[derive(Debug, Deserialize)]
pub struct BrowserConfig {
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,
    #[serde(default)]
    pub headless: bool,
    #[serde(default = "default_wait_timeout_secs")]
    pub wait_timeout_secs: u64,
    /// Pause after loading the jobs page, leaving time for manual verification.
    #[serde(default = "default_verification_pause_secs")]
    pub verification_pause_secs: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            webdriver_url: default_webdriver_url(),
            headless: false,
            wait_timeout_secs: default_wait_timeout_secs(),
            verification_pause_secs: default_verification_pause_secs(),
        }
    }
}

impl BrowserConfig {
    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout_secs)
    }

    pub fn verification_pause(&self) -> Duration {
        Duration::from_secs(self.verification_pause_secs)
    }
}

#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_directory")]
    pub directory: PathBuf,
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
            file_prefix: default_file_prefix(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub directory: Option<PathBuf>,
    #[serde(default = "default_true")]
    pub emit_stderr: bool,
    #[serde(default)]
    pub format: LogFormat,
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: None,
            emit_stderr: true,
            format: LogFormat::Text,
            filter: default_log_filter(),
        }
    }
}

fn default_date_range() -> DateRange {
    DateRange::AnyTime
}
fn default_start_page() -> usize {
    1
}
fn default_max_pages() -> usize {
    15
}
fn default_webdriver_url() -> String {
    "http://localhost:9515".into()
}
fn default_wait_timeout_secs() -> u64 {
    10
}
fn default_verification_pause_secs() -> u64 {
    12
}
fn default_output_directory() -> PathBuf {
    PathBuf::from(".")
}
fn default_file_prefix() -> String {
    "todays_jobs".into()
}
fn default_true() -> bool {
    true
}
fn default_log_filter() -> String {
    "info".into()
}

impl JobScoutConfig {
    /// The (location, query) cross product to search.
    pub fn criteria(&self) -> Result<SearchCriteria, ConfigError> {
        SearchCriteria::new(
            self.search.queries.clone(),
            self.search.locations.clone(),
            self.search.date_range,
        )
        .map_err(|e| ConfigError::Message(format!("search: {e}")))
    }

    /// The configured keyword table, or the built-in one.
    pub fn keyword_table(&self) -> Result<KeywordTable, ConfigError> {
        match &self.keywords {
            None => Ok(KeywordTable::default()),
            Some(tiers) => KeywordTable::new(tiers.clone())
                .map_err(|e| ConfigError::Message(format!("keywords: {e}"))),
        }
    }

    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            log_dir: self.logging.directory.clone(),
            emit_stderr: self.logging.emit_stderr,
            format: self.logging.format,
            default_filter: self.logging.filter.clone(),
            ..LogConfig::default()
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.criteria()?;
        self.keyword_table()?;
        if self.search.start_page == 0 {
            return Err(ConfigError::Message("search.start_page must be at least 1".into()));
        }
        if self.search.max_pages == 0 {
            return Err(ConfigError::Message("search.max_pages must be at least 1".into()));
        }
        Ok(())
    }
}

/// `./jobscout.yaml` when present, otherwise `<config dir>/jobscout/jobscout.yaml`.
pub fn default_config_path() -> PathBuf {
    let local = PathBuf::from(DEFAULT_CONFIG_FILE);
    if local.exists() {
        return local;
    }
    dirs::config_dir()
        .map(|dir| dir.join("jobscout").join(DEFAULT_CONFIG_FILE))
        .unwrap_or(local)
}

/// Expand `$VAR` / `${VAR}` until the string stops changing. Unknown
/// variables are left in place and reference cycles stop after a few rounds.
fn expand_placeholders(raw: &str) -> String {
    let mut current = raw.to_owned();
    for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
        let Ok(next) = shellexpand::env(&current) else {
            break;
        };
        if next == current {
            break;
        }
        current = next.into_owned();
    }
    current
}

fn expand_env_in_value(value: &mut Value) {
    match value {
        Value::String(text) if text.contains('$') => *text = expand_placeholders(text),
        Value::Array(items) => items.iter_mut().for_each(expand_env_in_value),
        Value::Object(fields) => fields.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hiding the `config` crate wiring.
pub struct JobScoutConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for JobScoutConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl JobScoutConfigLoader {
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
        }
    }

    /// Attach a YAML/TOML/JSON file; the format is inferred from the suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Merge an inline YAML snippet.
    ///
    /// ```
    /// use jobscout_config::JobScoutConfigLoader;
    ///
    /// let cfg = JobScoutConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// search:
    ///   queries: ["firmware"]
    ///   locations: ["Remote"]
    ///   date_range: week
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(cfg.search.max_pages, 15);
    /// assert_eq!(cfg.output.file_prefix, "todays_jobs");
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Merge the sources with `JOBSCOUT__` environment overrides, expand
    /// `${VAR}` placeholders, deserialize and validate.
    pub fn load(self) -> Result<JobScoutConfig, ConfigError> {
        let cfg = self
            .builder
            .add_source(
                Environment::with_prefix("JOBSCOUT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        let typed: JobScoutConfig =
            serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))?;
        typed.validate()?;
        Ok(typed)
    }
}
