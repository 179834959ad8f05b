//! faleproxy - rewrite brand phrases in fetched HTML

use std::io::{Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use faleproxy::server::{self, ServerConfig};
use faleproxy::{BrandRules, Rewriter};

#[derive(Parser)]
#[command(name = "faleproxy")]
#[command(version, about = "Fetch HTML pages and rewrite brand phrases", long_about = None)]
#[command(after_help = "EXAMPLES:
    faleproxy serve                      Serve the API on 0.0.0.0:3001 (or $PORT)
    faleproxy serve -l 127.0.0.1:8080    Serve on a specific address
    faleproxy rewrite page.html          Rewrite a local file to stdout")]
struct Cli {
    /// Log level (RUST_LOG takes precedence)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP service
    Serve {
        /// Configuration file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Listen address, overrides the configuration
        #[arg(short, long)]
        listen: Option<String>,
    },
    /// Rewrite an HTML file (or stdin) to stdout
    Rewrite {
        /// Input file; reads stdin when omitted
        #[arg(value_name = "INPUT")]
        input: Option<PathBuf>,

        /// Configuration file whose rules to use
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn setup_logging(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so `rewrite` output stays clean
    if json {
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(&cli.log_level, cli.json_logs);

    let result = match cli.command {
        Command::Serve { config, listen } => serve(config, listen).await,
        Command::Rewrite { input, config } => rewrite(input, config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn serve(config: Option<PathBuf>, listen: Option<String>) -> anyhow::Result<()> {
    let mut config = match config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::from_env()?,
    };
    if let Some(listen) = listen {
        config.listen_addr = listen;
    }
    server::run(config).await
}

fn rewrite(input: Option<PathBuf>, config: Option<PathBuf>) -> anyhow::Result<()> {
    let rules = match config {
        Some(path) => ServerConfig::load(path)?.rules,
        None => BrandRules::default(),
    };
    let rewriter = Rewriter::new(rules)?;

    let bytes = match input {
        Some(path) => std::fs::read(&path)?,
        None => {
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf)?;
            buf
        }
    };

    let output = rewriter.transform_bytes(&bytes, None);
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
