mod paths;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use lmi_bridge::ProviderInvoker;
use lmi_invoker_http::HttpInvoker;
use lmi_registry::{MergeOutcome, ProviderCatalog, Registry};

#[derive(Parser)]
#[command(name = "lmi", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the bridge server over stdin/stdout.
    Serve,
    /// Merge the provider blocks into the host configuration file.
    Setup {
        /// Configuration file to update (defaults to the user config dir).
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the rendered provider configuration document.
    Render,
    /// List the cataloged bridge providers.
    Providers,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let _ = dotenvy::dotenv();

    // Logs go to stderr; stdout is the protocol stream when serving.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Serve => run_serve().await,
        Command::Setup { config } => run_setup(config),
        Command::Render => {
            let registry = Registry::derive(&ProviderCatalog::builtin());
            print!("{}", lmi_registry::render(&registry));
            Ok(())
        }
        Command::Providers => {
            print_providers(&Registry::derive(&ProviderCatalog::builtin()));
            Ok(())
        }
    }
}

async fn run_serve() -> Result<(), Box<dyn std::error::Error>> {
    let invoker: Arc<dyn ProviderInvoker> = Arc::new(HttpInvoker::builtin());

    info!("bridge server listening on stdin");

    // The loop flushes after every response, so a termination signal only
    // abandons the in-flight request; nothing already answered is lost.
    tokio::select! {
        result = lmi_bridge::serve(invoker, tokio::io::stdin(), tokio::io::stdout()) => {
            result?;
            info!("input closed, bridge server done");
        }
        result = shutdown_signal() => {
            result?;
            info!("termination signal received, bridge server exiting");
        }
    }

    Ok(())
}

/// Resolve on SIGINT or, on unix, SIGTERM.
async fn shutdown_signal() -> Result<(), std::io::Error> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        let mut sigterm = signal(SignalKind::terminate())?;
        tokio::select! {
            result = tokio::signal::ctrl_c() => result,
            _ = sigterm.recv() => Ok(()),
        }
    }
    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await
    }
}

fn run_setup(config: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let path = match config {
        Some(path) => path,
        None => paths::config_file()?,
    };

    let registry = Registry::derive(&ProviderCatalog::builtin());

    let existing = match std::fs::read_to_string(&path) {
        Ok(document) => document,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(err) => return Err(err.into()),
    };

    match lmi_registry::merge(&existing, &registry) {
        MergeOutcome::Inserted(document) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, document)?;
            println!(
                "Added {} bridge provider entries to {}",
                registry.len(),
                path.display()
            );
        }
        MergeOutcome::AlreadyPresent => {
            println!(
                "Bridge provider entries already present in {}",
                path.display()
            );
        }
    }

    Ok(())
}

fn print_providers(registry: &Registry) {
    for config in registry.configs() {
        let credential = config.credential_env_var.as_deref().unwrap_or("no key");
        println!(
            "{} ({}) [{} | {}]",
            config.id, config.display_name, config.wire_protocol, credential
        );
        println!("  {}", config.credential_hint);
    }
}
