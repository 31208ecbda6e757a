use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Parser};
use fmirror_core::{utils::byte_count_iec, MirrorConfig, SyncManager};
use fmirror_remote_sftp::SftpRemote;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Per-user settings file read after `./.env`.
const USER_ENV_FILE: &str = "fmirror.env";

#[derive(Parser)]
#[command(
    name = "fmirror",
    version,
    about = "fmirror – mirror remote SFTP directories onto local storage",
    disable_version_flag = true
)]
struct Cli {
    /// Print version and exit
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: Option<bool>,

    /// Read settings from a config file (YAML / JSON) instead of the environment
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn init_logging(level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{level},russh=warn,russh_sftp=warn")));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stdout)
        .with_target(false)
        .init();
}

/// Load `./.env` and `$HOME/fmirror.env`. Variables already set win.
fn load_env_files(home: Option<&Path>) {
    let mut files = vec![PathBuf::from(".env")];
    if let Some(home) = home {
        files.push(home.join(USER_ENV_FILE));
    }
    for file in files {
        match dotenvy::from_path(&file) {
            Ok(()) => debug!("loaded {}", file.display()),
            Err(e) if e.not_found() => {}
            Err(e) => warn!("ignoring {}: {e}", file.display()),
        }
    }
}

fn parse_config_file(path: &Path, text: &str) -> Result<MirrorConfig> {
    // Detect format by extension
    let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("");
    let cfg = match ext {
        "json" => serde_json::from_str(text)?,
        _ => serde_yaml::from_str(text)?, // default to yaml
    };
    Ok(cfg)
}

fn load_config(cli: &Cli) -> Result<MirrorConfig> {
    let home = dirs::home_dir();
    let cfg = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| anyhow!("read config {} failed: {e}", path.display()))?;
            parse_config_file(path, &text)
                .with_context(|| format!("parse config {}", path.display()))?
        }
        None => {
            load_env_files(home.as_deref());
            MirrorConfig::from_lookup(|name| std::env::var(name).ok(), home.as_deref())?
        }
    };
    cfg.validate()?;
    Ok(cfg)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);
    info!("fmirror {}", env!("CARGO_PKG_VERSION"));

    let cfg = load_config(&cli)?;
    let remote = SftpRemote::connect(&cfg).await?;

    let report = SyncManager::new().run(&remote, &cfg.folders).await;
    let totals = report.totals();
    info!(
        "done: {} folders, {} failed, {} files copied ({}), {} unchanged",
        report.folders.len(),
        report.failed(),
        totals.files_copied,
        byte_count_iec(totals.bytes_copied),
        totals.files_skipped
    );

    if let Err(e) = remote.close().await {
        warn!("disconnect: {e:#}");
    }
    Ok(())
}
