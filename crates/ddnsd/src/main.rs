// # ddnsd - DDNS Updater
//
// Keeps the A and/or AAAA record of one hostname pointed at this machine's
// public addresses, using Cloudflare's API.
//
// The ddnsd binary is responsible for:
// 1. Parsing flags (and their environment fallbacks)
// 2. Initializing logging and the runtime
// 3. Wiring the HTTP resolver and the Cloudflare provider into the engine
// 4. Running once (`--once`) or polling forever
//
// ## Example
//
// ```bash
// # Poll every 30 minutes
// ddnsd -k "$CF_TOKEN" -d home.example.com -m 30
//
// # Update only the AAAA record, once
// ddnsd -k "$CF_TOKEN" -d home.example.com --family v6 --once
// ```

use anyhow::Result;
use clap::{Parser, ValueEnum};
use ddns_core::config::{
    DEFAULT_API_BASE, DEFAULT_IPV4_ECHO_URL, DEFAULT_IPV6_ECHO_URL, DEFAULT_LOG_FILE,
};
use ddns_core::{DdnsEngine, Diagnostics, EndpointConfig, FamilySelection, UpdaterConfig};
use ddns_ip_http::HttpAddressResolver;
use ddns_provider_cloudflare::CloudflareProvider;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for different termination scenarios
#[derive(Debug, Clone, Copy)]
enum DdnsExitCode {
    /// Records reconciled (one-shot) or clean shutdown
    Success = 0,
    /// Configuration, startup or reconciliation failure
    Failure = 1,
}

impl From<DdnsExitCode> for ExitCode {
    fn from(code: DdnsExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Dynamic-DNS updater for Cloudflare A/AAAA records
#[derive(Parser, Debug)]
#[command(name = "ddnsd", version, about, long_about = None)]
struct Cli {
    /// Cloudflare API key
    #[arg(short = 'k', long = "api-key", env = "DDNS_PROVIDER_API_TOKEN", hide_env_values = true)]
    api_key: Option<String>,

    /// DDNS record name (e.g. home.example.com)
    #[arg(short = 'd', long = "record", env = "DDNS_RECORD")]
    record_name: Option<String>,

    /// Monitoring interval in minutes
    #[arg(short = 'm', long = "interval", env = "DDNS_INTERVAL_MINUTES", default_value_t = 60)]
    interval_minutes: u64,

    /// Reconcile once and exit instead of polling
    #[arg(long)]
    once: bool,

    /// Address families to maintain
    #[arg(long, value_enum, default_value_t = FamilyArg::Both)]
    family: FamilyArg,

    /// Append-only log file
    #[arg(long, env = "DDNS_LOG_FILE", default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,

    /// Do not write a log file
    #[arg(long)]
    no_log_file: bool,

    /// Console log level (trace, debug, info, warn, error)
    #[arg(long, env = "DDNS_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Provider API base URL
    #[arg(long, hide = true, default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// IPv4 echo service
    #[arg(long, hide = true, default_value = DEFAULT_IPV4_ECHO_URL)]
    ipv4_url: String,

    /// IPv6 echo service
    #[arg(long, hide = true, default_value = DEFAULT_IPV6_ECHO_URL)]
    ipv6_url: String,
}

/// `--family` values
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FamilyArg {
    Both,
    V4,
    V6,
}

impl From<FamilyArg> for FamilySelection {
    fn from(arg: FamilyArg) -> Self {
        match arg {
            FamilyArg::Both => FamilySelection::Both,
            FamilyArg::V4 => FamilySelection::V4,
            FamilyArg::V6 => FamilySelection::V6,
        }
    }
}

impl Cli {
    /// Build and validate the updater configuration
    fn to_config(&self) -> Result<UpdaterConfig> {
        let (Some(api_key), Some(record_name)) = (&self.api_key, &self.record_name) else {
            anyhow::bail!("API key or DDNS record name not provided (use -k and -d)");
        };

        let config = UpdaterConfig {
            api_token: api_key.clone(),
            record_name: record_name.trim().trim_end_matches('.').to_string(),
            families: self.family.into(),
            interval_minutes: self.interval_minutes,
            log_file: (!self.no_log_file).then(|| self.log_file.clone()),
            endpoints: EndpointConfig {
                api_base: self.api_base.clone(),
                ipv4_echo_url: self.ipv4_url.clone(),
                ipv6_echo_url: self.ipv6_url.clone(),
            },
        };

        config.validate()?;
        Ok(config)
    }

    fn level(&self) -> Result<Level> {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Ok(Level::TRACE),
            "debug" => Ok(Level::DEBUG),
            "info" => Ok(Level::INFO),
            "warn" => Ok(Level::WARN),
            "error" => Ok(Level::ERROR),
            other => anyhow::bail!(
                "Log level '{}' is not valid. Valid levels: trace, debug, info, warn, error",
                other
            ),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match cli.to_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            Diagnostics::from_option((!cli.no_log_file).then(|| cli.log_file.clone()))
                .error(&format!("Configuration error: {}", e));
            return DdnsExitCode::Failure.into();
        }
    };

    let log_level = match cli.level() {
        Ok(level) => level,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return DdnsExitCode::Failure.into();
        }
    };

    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return DdnsExitCode::Failure.into();
    }

    info!("Starting ddnsd for {}", config.record_name);

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return DdnsExitCode::Failure.into();
        }
    };

    let once = cli.once;
    rt.block_on(async {
        match run(config, once).await {
            Ok(()) => DdnsExitCode::Success,
            Err(e) => {
                eprintln!("{}", e);
                DdnsExitCode::Failure
            }
        }
    })
    .into()
}

/// Build the engine and run it in the requested mode
async fn run(config: UpdaterConfig, once: bool) -> Result<()> {
    let diagnostics = Diagnostics::from_option(config.log_file.clone());
    let resolver = HttpAddressResolver::from_endpoints(&config.endpoints)?;
    let provider = CloudflareProvider::with_base_url(&config.api_token, &config.endpoints.api_base)?;

    let engine = DdnsEngine::new(Box::new(resolver), Box::new(provider), diagnostics, &config)?;

    if once {
        let outcomes = engine.run_once().await?;
        let wrote = outcomes.iter().filter(|outcome| outcome.wrote()).count();
        println!(
            "DNS records for {} reconciled successfully ({} written, {} unchanged)",
            config.record_name,
            wrote,
            outcomes.len() - wrote
        );
        return Ok(());
    }

    engine.run().await?;
    Ok(())
}
