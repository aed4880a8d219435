//! `recount` — batch narrative generation from raw activity logs.
//!
//! Reads `logon.csv`, `device.csv`, and `http.csv` from the data directory
//! and the role directory's CSV exports, then writes one narrative per
//! (user, day) to the output CSV.
//!
//! # Usage
//!
//! ```
//! recount --data-dir data/raw/r1 --output out/narratives.csv
//! recount --config recount.toml --sample 5
//! ```

mod output;
mod settings;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use rayon::prelude::*;
use recount_core::{group::group_by_day, merge::merge_events, record::NarrativeRecord};
use recount_ingest::{
  load_role_map, read_auth_events, read_device_events, read_web_events,
};
use recount_narrative::narrate;
use settings::Settings;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "recount", about = "Daily user-activity narrative generator")]
struct Cli {
  /// Path to a TOML configuration file.
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Directory holding logon.csv, device.csv, and http.csv.
  #[arg(long, value_name = "DIR")]
  data_dir: Option<PathBuf>,

  /// Directory of role-directory CSV exports (default: <data-dir>/ldap).
  #[arg(long, value_name = "DIR")]
  ldap_dir: Option<PathBuf>,

  /// Output CSV path.
  #[arg(short, long, value_name = "FILE")]
  output: Option<PathBuf>,

  /// Print the first N narratives to stdout after the run.
  #[arg(long, value_name = "N")]
  sample: Option<usize>,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let mut settings = settings::load(cli.config.as_deref())?;
  // CLI flags override config file and environment.
  if let Some(dir) = cli.data_dir {
    settings.data_dir = dir;
  }
  if let Some(dir) = cli.ldap_dir {
    settings.ldap_dir = Some(dir);
  }
  if let Some(path) = cli.output {
    settings.output = path;
  }

  let narratives = run(&settings)?;

  if let Some(n) = cli.sample {
    for record in narratives.iter().take(n) {
      println!("{} {} {}", record.date, record.user_id, record.narrative);
    }
  }

  Ok(())
}

// ─── Pipeline ─────────────────────────────────────────────────────────────────

fn run(settings: &Settings) -> anyhow::Result<Vec<NarrativeRecord>> {
  info!(dir = %settings.ldap_dir().display(), "processing role directory");
  let roles = load_role_map(&settings.ldap_dir())
    .context("loading role directory")?;

  let data = &settings.data_dir;
  info!("processing logon.csv");
  let auth = read_auth_events(&data.join("logon.csv"), &roles)
    .context("reading authentication events")?;
  info!("processing device.csv");
  let device = read_device_events(&data.join("device.csv"), &roles)
    .context("reading device events")?;
  info!("processing http.csv");
  let web = read_web_events(&data.join("http.csv"), &roles)
    .context("reading web events")?;

  info!(
    events = auth.len() + device.len() + web.len(),
    "combining and sorting events"
  );
  // Concatenation order is the tie-break for equal (user, timestamp) keys.
  let merged = merge_events(vec![auth, device, web]);
  let buckets = group_by_day(merged);

  info!(buckets = buckets.len(), "generating narratives");
  // Each bucket's reduction is pure and the role map is already folded into
  // the events, so the fan-out shares nothing mutable.
  let mut narratives: Vec<NarrativeRecord> =
    buckets.par_iter().map(narrate).collect();
  narratives
    .sort_by(|a, b| a.user_id.cmp(&b.user_id).then_with(|| a.date.cmp(&b.date)));

  output::write_narratives(&settings.output, &narratives)
    .with_context(|| format!("writing {}", settings.output.display()))?;
  info!(
    records = narratives.len(),
    path = %settings.output.display(),
    "run complete"
  );

  Ok(narratives)
}
