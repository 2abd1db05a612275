//! VeriPort daemon, the entry point for running a verification node.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

use veriport_node::{init_logging, LogFormat, Node, NodeConfig};

#[derive(Parser)]
#[command(name = "veriport-daemon", about = "VeriPort traveler verification daemon")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "VERIPORT_CONFIG")]
    config: Option<PathBuf>,

    /// Address the RPC server listens on, e.g. "0.0.0.0:7410".
    #[arg(long, env = "VERIPORT_LISTEN")]
    listen: Option<String>,

    /// Registry directory entries as comma-separated ID=URL pairs
    /// (e.g. "registry-eu=https://eu.example.net").
    #[arg(long = "registry", env = "VERIPORT_REGISTRIES", value_delimiter = ',')]
    registries: Vec<String>,

    /// Registry consulted for carriers with no explicit route.
    #[arg(long, env = "VERIPORT_DEFAULT_REGISTRY")]
    default_registry: Option<String>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "VERIPORT_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "VERIPORT_LOG_FORMAT")]
    log_format: Option<String>,

    /// Subcommand.
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Run the verification node.
    Run,
    /// Print the effective configuration as TOML and exit.
    PrintConfig,
}

fn resolve_config(cli: &Cli) -> anyhow::Result<NodeConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let path = path.to_str().context("config path is not valid UTF-8")?;
            NodeConfig::from_toml_file(path)
                .with_context(|| format!("failed to load config file {path}"))?
        }
        None => NodeConfig::default(),
    };

    if let Some(listen) = &cli.listen {
        config.listen_addr = listen.clone();
    }
    for spec in &cli.registries {
        let (id, url) = spec
            .split_once('=')
            .with_context(|| format!("invalid --registry value {spec:?}, expected ID=URL"))?;
        config
            .registries
            .insert(id.trim().to_string(), url.trim().to_string());
    }
    if let Some(default_registry) = &cli.default_registry {
        config.default_registry = Some(default_registry.clone());
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        config.log_format = format.clone();
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    match cli.command {
        Command::PrintConfig => {
            println!("{}", config.to_toml_string());
        }
        Command::Run => {
            init_logging(LogFormat::from_config(&config.log_format), &config.log_level);
            tracing::info!(
                listen = %config.listen_addr,
                registries = config.registries.len(),
                "starting veriport daemon"
            );

            let mut node = Node::new(config)?;
            node.start().await;

            tracing::info!("shutdown signal received, stopping node");
            node.stop().await;

            tracing::info!("veriport daemon exited cleanly");
        }
    }

    Ok(())
}
