#![allow(clippy::multiple_crate_versions)]

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use voxbridge::config::{ClientConfig, ServerConfig};
use voxbridge::{log_debug, log_fatal, log_info, telemetry, Logger};

#[derive(Parser)]
#[command(name = "voxbridge")]
#[command(about = "Load and inspect voice client/server configuration", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the client configuration and print the effective values
    Client(LoadArgs),
    /// Load the server configuration and print the effective values
    Server(LoadArgs),
}

#[derive(Args)]
struct LoadArgs {
    /// Config file (defaults to the per-user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Print as JSON instead of TOML
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Client(args) => run_client(&args),
        Commands::Server(args) => run_server(&args),
    }
}

fn run_client(args: &LoadArgs) -> Result<()> {
    // Initialize logging; stdout is reserved for the rendered config
    telemetry::init("", "")?;

    let bootstrap =
        Logger::with_writer(ClientConfig::default().client.debug_enabled, io::stderr())
            .with("bootstrap");
    log_debug!(bootstrap, "loading client config from {}", describe(args));

    let config = match ClientConfig::load_or_default(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => log_fatal!(bootstrap, "{e}"),
    };

    // With debug enabled the client logs to its debug file
    let logger = if config.client.debug_enabled {
        Logger::for_client(&config.client)?
    } else {
        Logger::with_writer(false, io::stderr())
    };
    log_info!(
        logger.with("config"),
        "client config loaded, server {} audio {} Hz x{}",
        config.server.url,
        config.audio.sample_rate,
        config.audio.channels
    );

    print_config(&config, args.json)
}

fn run_server(args: &LoadArgs) -> Result<()> {
    let bootstrap =
        Logger::with_writer(ServerConfig::default().server.debug_enabled, io::stderr())
            .with("bootstrap");
    log_debug!(bootstrap, "loading server config from {}", describe(args));

    let config = match ServerConfig::load_or_default(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => log_fatal!(bootstrap, "{e}"),
    };

    // Subscriber needs the loaded log_level/log_format
    telemetry::init_for_server(&config.server)?;
    tracing::debug!("Server settings: {:?}", config.server);

    let logger = Logger::with_writer(config.server.debug_enabled, io::stderr());
    log_info!(
        logger.with("config"),
        "server config loaded, bind {} with {} ICE server(s)",
        config.server.bind_address,
        config.webrtc.ice_servers.len()
    );

    print_config(&config, args.json)
}

fn describe(args: &LoadArgs) -> String {
    args.config.as_ref().map_or_else(
        || "the default location".to_string(),
        |path| path.display().to_string(),
    )
}

fn print_config<T: Serialize>(config: &T, json: bool) -> Result<()> {
    // Only the rendered config goes to stdout
    let rendered = if json {
        serde_json::to_string_pretty(config)?
    } else {
        toml::to_string_pretty(config)?
    };
    println!("{rendered}");
    Ok(())
}
