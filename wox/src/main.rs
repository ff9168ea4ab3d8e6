//! Wox - a native plugin host
//!
//! This is the main entry point for the Wox CLI.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::ffi::OsString;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use wox_core::config::{ConfigLoader, HostConfig};
use wox_plugin::{PluginLoader, PluginManager};

/// Overrides `plugins.dir` from the config file
const PLUGIN_DIR_ENV: &str = "WOX_PLUGIN_DIR";

/// Wox - load native plugins from a directory and run them side by side
#[derive(Parser)]
#[command(name = "wox")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to a config file (.toml or .json), defaults to ./wox.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load every plugin in a directory and run them until they all return
    Run {
        /// Plugin directory (overrides config and WOX_PLUGIN_DIR)
        dir: Option<PathBuf>,
    },

    /// Load every plugin in a directory and list them without running
    List {
        /// Plugin directory (overrides config and WOX_PLUGIN_DIR)
        dir: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = ConfigLoader::load_or_default(cli.config.as_deref())?;
    init_tracing(cli.verbose, &config.logging.level);

    if cli.verbose {
        tracing::debug!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Run { dir } => {
            let dir = plugin_dir(dir, std::env::var_os(PLUGIN_DIR_ENV), &config);
            tracing::info!("🚀 Starting Wox v{}", wox_core::VERSION);

            let manager = load_plugins(&dir, &config);
            tracing::info!("🔌 Loaded {} plugin(s) from {}", manager.count(), dir.display());

            run_plugins(manager)?;
        }

        Commands::List { dir } => {
            let dir = plugin_dir(dir, std::env::var_os(PLUGIN_DIR_ENV), &config);
            let manager = load_plugins(&dir, &config);

            for info in manager.list() {
                println!("{}\t{}\t{}", info.name, info.version, info.description);
            }
            tracing::info!("{} plugin(s) in {}", manager.count(), dir.display());
        }

        Commands::Version => {
            println!("Wox v{}", wox_core::VERSION);
            println!(
                "Plugin ABI v{} ({})",
                wox_plugin::ABI_VERSION,
                wox_plugin::RUSTC_VERSION
            );
        }
    }

    Ok(())
}

/// `-v` wins, then `RUST_LOG`, then `logging.level` from the config
fn init_tracing(verbose: bool, level: &str) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_thread_names(true),
        )
        .with(filter)
        .init();
}

/// Argument, then environment, then config
fn plugin_dir(arg: Option<PathBuf>, env: Option<OsString>, config: &HostConfig) -> PathBuf {
    arg.or_else(|| env.filter(|v| !v.is_empty()).map(PathBuf::from))
        .unwrap_or_else(|| config.plugins.dir.clone())
}

/// Load the plugin directory or exit: the host never starts with a partial set
fn load_plugins(dir: &Path, config: &HostConfig) -> PluginManager {
    let loader = PluginLoader::from_config(&config.plugins);
    let mut manager = PluginManager::new();

    if let Err(e) = manager.load_with(&loader, dir) {
        tracing::error!("❌ Failed to load plugins from {}: {}", dir.display(), e);
        std::process::exit(1);
    }

    manager
}

/// Run all plugins until they return or Ctrl-C arrives
fn run_plugins(manager: PluginManager) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("Failed to create runtime")?;

    let interrupted = runtime.block_on(async move {
        let plugins = tokio::task::spawn_blocking(move || manager.run());

        tokio::select! {
            result = plugins => {
                if let Err(e) = result {
                    if e.is_panic() {
                        std::panic::resume_unwind(e.into_panic());
                    }
                    return Err(anyhow::Error::new(e).context("Plugin runner was cancelled"));
                }
                Ok(false)
            }
            signal = tokio::signal::ctrl_c() => {
                signal.context("Failed to listen for Ctrl-C")?;
                Ok(true)
            }
        }
    })?;

    if interrupted {
        tracing::info!("🛑 Interrupted, shutting down");
        // Plugin threads may never return; don't wait for them.
        runtime.shutdown_background();
    } else {
        tracing::info!("✅ All plugins finished");
    }

    Ok(())
}
