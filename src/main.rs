use anyhow::{Context, Result};
use cf_terraforming::cloudflare::format_api_error;
use cf_terraforming::commands::{self, generate, import, ImportStyle};
use cf_terraforming::config::Config;
use cf_terraforming::VERSION;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Generate Terraform configuration from existing Cloudflare resources
#[derive(Parser, Debug)]
#[command(name = "cf-terraforming", version = VERSION, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Zone ID to read resources from
    #[arg(short, long, global = true, conflicts_with = "account")]
    zone: Option<String>,

    /// Account ID to read resources from
    #[arg(short, long, global = true)]
    account: Option<String>,

    /// API token
    #[arg(short, long, global = true)]
    token: Option<String>,

    /// Account email, used with --key
    #[arg(short, long, global = true)]
    email: Option<String>,

    /// Global API key, used with --email
    #[arg(short, long, global = true)]
    key: Option<String>,

    /// API hostname or base URL
    #[arg(long, global = true)]
    hostname: Option<String>,

    /// Config file (default: ~/.cf-terraforming.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Shorthand for --log-level debug
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log level for debugging
    #[arg(long, value_enum, global = true)]
    log_level: Option<LogLevel>,

    /// Write logs to a file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print Terraform resource blocks for existing resources
    Generate {
        /// Resource types to generate, comma separated
        #[arg(long, required = true, value_delimiter = ',')]
        resource_type: Vec<String>,
    },
    /// Print import statements for existing resources
    Import {
        /// Resource types to import, comma separated
        #[arg(long, required = true, value_delimiter = ',')]
        resource_type: Vec<String>,

        /// Emit Terraform 1.5+ import blocks instead of CLI commands
        #[arg(long)]
        modern_import_block: bool,
    },
    /// Print the version
    Version,
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
    fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl Args {
    fn effective_log_level(&self) -> LogLevel {
        match (self.log_level, self.verbose) {
            (Some(level), _) => level,
            (None, true) => LogLevel::Debug,
            (None, false) => LogLevel::Warn,
        }
    }

    fn flag_settings(&self) -> Config {
        Config {
            token: self.token.clone(),
            email: self.email.clone(),
            key: self.key.clone(),
            zone: self.zone.clone(),
            account: self.account.clone(),
            hostname: self.hostname.clone(),
        }
    }
}

fn setup_logging(
    level: LogLevel,
    log_file: Option<&Path>,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    if matches!(level, LogLevel::Off) {
        return Ok(None);
    }

    let (writer, guard) = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_appender::non_blocking(file)
        }
        None => tracing_appender::non_blocking(std::io::stderr()),
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("cf_terraforming={}", level.as_directive())));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_file(log_file.is_some())
        .with_line_number(log_file.is_some())
        .init();

    tracing::debug!("cf-terraforming {} started with log level: {:?}", VERSION, level);

    Ok(Some(guard))
}

async fn run(args: Args) -> Result<()> {
    let settings = args
        .flag_settings()
        .or(Config::from_env())
        .or(Config::load(args.config.as_deref()));

    let output = match &args.command {
        Command::Version => format!("cf-terraforming {}", VERSION),
        Command::Generate { resource_type } => {
            generate::run(resource_type, || commands::connect(&settings)).await?
        }
        Command::Import {
            resource_type,
            modern_import_block,
        } => {
            let style = if *modern_import_block {
                ImportStyle::Block
            } else {
                ImportStyle::Command
            };
            import::run(resource_type, style, || commands::connect(&settings)).await?
        }
    };

    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_guard = setup_logging(args.effective_log_level(), args.log_file.as_deref())?;

    if let Err(err) = run(args).await {
        tracing::debug!("{:?}", err);
        drop(log_guard);
        eprintln!("Error: {}", format_api_error(&err));
        std::process::exit(1);
    }

    Ok(())
}
