/// Version injected at compile time via RSLB_VERSION env var (set by CI/CD),
/// or "dev" for local builds.
pub const VERSION: &str = match option_env!("RSLB_VERSION") {
    Some(v) => v,
    None => "dev",
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rslb::config::Config;
use rslb::lb::ListOpts;
use rslb::rackspace::client::{regional_endpoint, LbClient};
use rslb::rackspace::http::format_api_error;
use serde::Serialize;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use url::Url;

/// Command line client for Rackspace Cloud Load Balancers
#[derive(Parser, Debug)]
#[command(name = "rslb", version, about, long_about = None)]
struct Args {
    /// Region to use (dfw, ord, iad, lon, syd, hkg)
    #[arg(short, long)]
    region: Option<String>,

    /// Account number
    #[arg(short, long)]
    tenant: Option<String>,

    /// Full endpoint URL, overriding region and tenant
    #[arg(long)]
    endpoint: Option<String>,

    /// Identity token
    #[arg(long, env = "RSLB_AUTH_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    output: Option<OutputFormat>,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off")]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List load balancers
    List {
        /// Page size
        #[arg(long)]
        limit: Option<u32>,

        /// Only load balancers with a node at this address
        #[arg(long)]
        node_address: Option<String>,
    },
    /// Show one load balancer
    Get { id: i64 },
    /// Delete a load balancer
    Delete { id: i64 },
    /// Remember region and account for later runs
    Configure {
        #[arg(long)]
        region: String,
        #[arg(long)]
        tenant: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq)]
enum OutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let Some(tracing_level) = level.to_tracing_level() else {
        return Ok(None);
    };

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {:?}", log_path))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("rslb {} started with log level: {:?}", VERSION, level);
    tracing::info!("Log file: {:?}", log_path);

    Ok(Some(guard))
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("rslb").join("rslb.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".rslb").join("rslb.log");
    }
    PathBuf::from("rslb.log")
}

fn output_format(args: &Args, config: &Config) -> OutputFormat {
    args.output.unwrap_or_else(|| match config.output.as_deref() {
        Some("yaml") => OutputFormat::Yaml,
        _ => OutputFormat::Json,
    })
}

fn print<T: Serialize>(format: OutputFormat, value: &T) -> Result<()> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
    };
    println!("{}", rendered.trim_end());
    Ok(())
}

fn build_client(args: &Args, config: &Config) -> Result<LbClient> {
    let token = args
        .token
        .as_deref()
        .context("No auth token. Set RSLB_AUTH_TOKEN or use --token")?;

    let endpoint = match config.effective_endpoint(args.endpoint.as_deref()) {
        Some(raw) => Url::parse(&raw).with_context(|| format!("Invalid endpoint: {}", raw))?,
        None => {
            let region = config.effective_region(args.region.as_deref());
            let tenant = config
                .effective_tenant(args.tenant.as_deref())
                .context("No account configured. Set RSLB_TENANT_ID or use --tenant")?;
            regional_endpoint(&region, &tenant)?
        }
    };

    tracing::info!("Using endpoint: {}", endpoint);
    Ok(LbClient::new(endpoint, token)?)
}

async fn run(args: Args) -> Result<()> {
    let mut config = Config::load();
    let format = output_format(&args, &config);

    if let Command::Configure { region, tenant } = &args.command {
        config.set_account(region, tenant)?;
        if let Some(path) = Config::config_path() {
            println!("Saved {}", path.display());
        }
        return Ok(());
    }

    let client = build_client(&args, &config)?;

    match &args.command {
        Command::List {
            limit,
            node_address,
        } => {
            let opts = ListOpts {
                node_address: node_address.clone(),
                limit: *limit,
                marker: None,
            };
            let lbs = client
                .list_all(&opts)
                .await
                .map_err(|e| anyhow::anyhow!(format_api_error(&e)))?;
            print(format, &lbs)
        }
        Command::Get { id } => {
            let lb = client
                .get(*id)
                .await
                .extract()
                .map_err(|e| anyhow::anyhow!(format_api_error(&e)))?;
            print(format, &lb)
        }
        Command::Delete { id } => {
            client
                .delete(*id)
                .await
                .extract_err()
                .map_err(|e| anyhow::anyhow!(format_api_error(&e)))?;
            println!("Deletion of load balancer {} accepted", id);
            Ok(())
        }
        Command::Configure { .. } => Ok(()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level)?;

    let result = run(args).await;
    if let Err(err) = &result {
        tracing::error!("{:?}", err);
    }

    result
}
