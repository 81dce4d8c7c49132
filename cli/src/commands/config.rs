use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use crate::config::{load_config, save_config, OutputFormat};

#[derive(Subcommand, Clone)]
pub enum ConfigCommand {
    Show,
    Set {
        #[arg(value_enum)]
        key: ConfigKey,
        value: String,
    },
    Get {
        #[arg(value_enum)]
        key: ConfigKey,
    },
    /// Add a header sent with every query
    AddHeader { name: String, value: String },
    RemoveHeader { name: String },
}

#[derive(clap::ValueEnum, Clone)]
pub enum ConfigKey {
    Url,
    OutputFormat,
    Log,
}

impl ConfigCommand {
    pub fn execute(self) -> Result<()> {
        match self {
            ConfigCommand::Show => {
                let cfg = load_config()?;
                println!("{}", "Current configuration:".blue().bold());
                println!("  url: {}", cfg.url);
                println!("  output_format: {:?}", cfg.output_format);
                println!("  log: {}", cfg.log.as_deref().unwrap_or("-"));
                if !cfg.headers.is_empty() {
                    println!("  headers:");
                    for (name, value) in &cfg.headers {
                        println!("    {}: {}", name, value);
                    }
                }
            }
            ConfigCommand::Set { key, value } => {
                let mut cfg = load_config()?;
                match key {
                    ConfigKey::Url => {
                        cfg.url = value.clone();
                        println!("{} url = {}", "Set".green(), value);
                    }
                    ConfigKey::OutputFormat => {
                        cfg.output_format = match value.to_lowercase().as_str() {
                            "table" => OutputFormat::Table,
                            "json" => OutputFormat::Json,
                            _ => anyhow::bail!("Invalid output format. Use 'table' or 'json'"),
                        };
                        println!("{} output_format = {}", "Set".green(), value);
                    }
                    ConfigKey::Log => {
                        cfg.log = Some(value.clone());
                        println!("{} log = {}", "Set".green(), value);
                    }
                }
                save_config(&cfg)?;
            }
            ConfigCommand::Get { key } => {
                let cfg = load_config()?;
                match key {
                    ConfigKey::Url => println!("{}", cfg.url),
                    ConfigKey::OutputFormat => println!("{:?}", cfg.output_format),
                    ConfigKey::Log => println!("{}", cfg.log.unwrap_or_default()),
                }
            }
            ConfigCommand::AddHeader { name, value } => {
                let mut cfg = load_config()?;
                println!("{} header {}: {}", "Set".green(), name, value);
                cfg.headers.insert(name, value);
                save_config(&cfg)?;
            }
            ConfigCommand::RemoveHeader { name } => {
                let mut cfg = load_config()?;
                if cfg.headers.remove(&name).is_none() {
                    anyhow::bail!("Header '{}' is not configured", name);
                }
                println!("{} header {}", "Removed".green(), name);
                save_config(&cfg)?;
            }
        }
        Ok(())
    }
}
