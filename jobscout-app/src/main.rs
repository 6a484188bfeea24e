use anyhow::{Context, Result};
use clap::Parser;
use jobscout_common::observability::init_logging;
use jobscout_config::{JobScoutConfig, JobScoutConfigLoader, default_config_path};
use session::build_from_config;
use std::path::PathBuf;
use tracing::info;
mod session;

/// Search LinkedIn job listings, score them against a keyword table and
/// export one CSV per (location, query) pair.
#[derive(Debug, Parser)]
#[command(name = "jobscout", version)]
struct Cli {
    /// YAML config file. Defaults to ./jobscout.yaml, then the user config dir.
    #[arg(short, long, env = "JOBSCOUT_CONFIG")]
    config: Option<PathBuf>,

    /// Run the browser without a window.
    #[arg(long)]
    headless: bool,

    /// Directory the CSV files are written to.
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// WebDriver endpoint, e.g. a running chromedriver.
    #[arg(long, env = "JOBSCOUT_WEBDRIVER_URL")]
    webdriver_url: Option<String>,
}

impl Cli {
    /// Command-line flags win over the file and `JOBSCOUT__` variables.
    fn apply(self, cfg: &mut JobScoutConfig) {
        if self.headless {
            cfg.browser.headless = true;
        }
        if let Some(dir) = self.output_dir {
            cfg.output.directory = dir;
        }
        if let Some(url) = self.webdriver_url {
            cfg.browser.webdriver_url = url;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut cli = Cli::parse();

    // 1) Load config (env wins over the file, flags win over both)
    let path = cli.config.take().unwrap_or_else(default_config_path);
    let mut cfg = JobScoutConfigLoader::new()
        .with_file(&path)
        .load()
        .with_context(|| format!("loading {}", path.display()))?;
    cli.apply(&mut cfg);

    let log_file = init_logging(cfg.log_config())?;
    info!(config = %path.display(), log_file = %log_file.display(), "jobscout starting");

    let session = build_from_config(cfg).await?;
    let summary = session.run().await?;

    info!(
        pairs_completed = summary.pairs_completed,
        pairs_failed = summary.pairs_failed,
        records = summary.records_exported,
        failed_listings = summary.listings_failed,
        "done"
    );
    for path in &summary.exports {
        println!("{}", path.display());
    }
    Ok(())
}
