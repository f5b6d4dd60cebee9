// # cfsync - Cloudflare address list sync
//
// One-shot program, meant to be run by an external scheduler (cron, systemd
// timer). Each invocation:
// 1. Reads configuration from environment variables
// 2. Initializes logging and a single-threaded runtime
// 3. Resolves the zone, then for each configured subdomain fetches its
//    address list, deletes the existing A/AAAA records and creates the new set
//
// All sync logic lives in cfsync-core; this binary only wires it together.
//
// ## Configuration
//
// - `CF_API_TOKEN`: Cloudflare API token (required)
// - `CF_SYNC_LOG_LEVEL`: trace, debug, info, warn, error (default: info)
// - `CF_SYNC_MODE`: live or dry-run (default: live)
//
// The subdomain → list mapping is fixed in `SyncConfig::default()`.
//
// ## Example
//
// ```bash
// export CF_API_TOKEN=your_token
// CF_SYNC_MODE=dry-run cfsync
// ```

use anyhow::Result;
use cfsync_core::{ApiToken, RunReport, SyncConfig, SyncEngine};
use cfsync_list_http::HttpListSource;
use cfsync_provider_cloudflare::CloudflareProvider;
use std::env;
use std::process::ExitCode;
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for different termination scenarios
///
/// - 0: Run completed (individual record creations may have been rejected)
/// - 1: Configuration or startup error
/// - 2: Runtime error (HTTP failure, no zones)
#[derive(Debug, Clone, Copy)]
enum SyncExitCode {
    /// Run completed
    Success = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Fatal error during the run
    RuntimeError = 2,
}

impl From<SyncExitCode> for ExitCode {
    fn from(code: SyncExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Application configuration
#[derive(Debug)]
struct Config {
    api_token: ApiToken,
    log_level: Level,
    dry_run: bool,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_token = lookup("CF_API_TOKEN")
            .filter(|token| !token.is_empty())
            .ok_or_else(|| anyhow::anyhow!("CF_API_TOKEN not set"))?;

        let log_level = lookup("CF_SYNC_LOG_LEVEL").unwrap_or_else(|| "info".to_string());
        let log_level = match log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => anyhow::bail!(
                "CF_SYNC_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                log_level
            ),
        };

        let mode = lookup("CF_SYNC_MODE").unwrap_or_else(|| "live".to_string());
        let dry_run = match mode.to_lowercase().as_str() {
            "live" => false,
            "dry-run" => true,
            _ => anyhow::bail!(
                "CF_SYNC_MODE '{}' is not valid. Valid modes: live, dry-run",
                mode
            ),
        };

        Ok(Self {
            api_token: ApiToken::new(api_token)?,
            log_level,
            dry_run,
        })
    }
}

fn main() -> ExitCode {
    // Load configuration from environment
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return SyncExitCode::ConfigError.into();
        }
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return SyncExitCode::ConfigError.into();
    }

    // Every call is awaited in sequence; one thread is enough
    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return SyncExitCode::RuntimeError.into();
        }
    };

    let code = rt.block_on(async {
        match run(config).await {
            Ok(report) => {
                log_summary(&report);
                SyncExitCode::Success
            }
            Err(e) => {
                error!("Sync failed: {:#}", e);
                SyncExitCode::RuntimeError
            }
        }
    });

    code.into()
}

/// Build the engine and run one sync
async fn run(config: Config) -> Result<RunReport> {
    let provider = CloudflareProvider::new(config.api_token)?;
    let source = HttpListSource::new()?;
    let sync_config = SyncConfig::default().with_dry_run(config.dry_run);

    for target in &sync_config.targets {
        info!("Managing subdomain: {} <- {}", target.subdomain, target.source_url);
    }

    let engine = SyncEngine::new(Box::new(source), Box::new(provider), sync_config)?;
    Ok(engine.run().await?)
}

fn log_summary(report: &RunReport) {
    for target in &report.targets {
        info!(
            "{}: fetched {}, deleted {}, created {}, failed {}",
            target.record_name, target.fetched, target.deleted, target.created, target.failed
        );
    }

    let failed = report.failed();
    if failed > 0 {
        warn!("{} record creation(s) were rejected", failed);
    }
}
