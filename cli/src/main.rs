mod commands;
mod config;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{config::ConfigCommand, query::QueryArgs};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "gqlr")]
#[command(about = "cli for running graphql queries", long_about = None)]
struct Cli {
    /// Endpoint url (overides config)
    #[arg(long, global = true)]
    url: Option<String>,

    /// Output format (table or json)
    #[arg(long, global = true, value_parser = ["table", "json"])]
    output: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Clone)]
enum Command {
    /// Run a query and print the result
    Query(QueryArgs),
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{}\n{:#}", "Error:".red().bold(), err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Config { command } => command.execute(),
        Command::Query(args) => {
            let cfg = config::load_config().context("Fail to load config")?;

            let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
            let _ = FmtSubscriber::builder()
                .with_env_filter(cfg.log_filter(directives.as_deref()))
                .with_writer(std::io::stderr)
                .try_init();

            let url = cli.url.as_ref().unwrap_or(&cfg.url).clone();
            let output_format = cli
                .output
                .as_deref()
                .map(|fmt| match fmt {
                    "json" => config::OutputFormat::Json,
                    _ => config::OutputFormat::Table,
                })
                .unwrap_or(cfg.output_format.clone());

            args.execute(&cfg, &url, &output_format).await
        }
    }
}
