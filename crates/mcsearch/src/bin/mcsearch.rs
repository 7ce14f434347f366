//! mcsearch - Minecraft server status prober
//!
//! `mcsearch probe <host>` prints one server's status once.
//! `mcsearch watch --config <file>` keeps a set of servers refreshed until
//! interrupted.

use std::{path::PathBuf, process, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};

use mcsearch::{
    MonitorConfig, ProbeOptions, StatusStore, StatusUpdater, probe::DEFAULT_PORT, probe_with,
    telemetry,
};
use mcsearch_protocol::Version;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Probe one server and print its status
    Probe {
        host: String,

        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,

        /// Protocol version announced in the handshake
        #[arg(long, default_value_t = Version::DEFAULT.protocol_number())]
        protocol: i32,

        /// Bound on the whole exchange, e.g. "5s" or "1500ms"
        #[arg(long, default_value = "5s", value_parser = humantime::parse_duration)]
        timeout: Duration,
    },
    /// Refresh the configured servers periodically and print each group
    Watch {
        #[arg(long, default_value = "mcsearch.toml")]
        config: PathBuf,

        /// Only print this group
        #[arg(long)]
        group: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    telemetry::init_subscriber(args.debug);

    let result = match args.command {
        Command::Probe {
            host,
            port,
            protocol,
            timeout,
        } => run_probe(&host, port, protocol, timeout).await,
        Command::Watch { config, group } => run_watch(config, group).await,
    };

    if let Err(e) = result {
        error!("{:#}", e);
        process::exit(1);
    }
}

async fn run_probe(host: &str, port: u16, protocol: i32, timeout: Duration) -> Result<()> {
    let options = ProbeOptions::default()
        .with_protocol_version(protocol)
        .with_timeout(timeout);

    let text = probe_with(host, port, &options)
        .await
        .with_context(|| format!("Failed to probe {host}:{port}"))?;
    println!("{text}");
    Ok(())
}

async fn run_watch(path: PathBuf, group: Option<String>) -> Result<()> {
    let config = MonitorConfig::load(&path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;

    if let Some(group) = &group
        && !config.groups().contains(&group.as_str())
    {
        anyhow::bail!("Group '{group}' is not used by any target");
    }

    let groups: Vec<String> = match group {
        Some(group) => vec![group],
        None => config.groups().into_iter().map(str::to_string).collect(),
    };

    let config = Arc::new(config);
    let store = Arc::new(StatusStore::new());
    let updater = StatusUpdater::new(Arc::clone(&config), Arc::clone(&store));
    let mut refreshed = updater.subscribe();
    let handle = updater.start();

    info!(
        targets = config.targets.len(),
        interval = ?config.interval,
        "Watching servers, press Ctrl-C to stop"
    );

    loop {
        tokio::select! {
            signal = tokio::signal::ctrl_c() => {
                signal.context("Failed to listen for Ctrl-C")?;
                break;
            }
            changed = refreshed.changed() => {
                if changed.is_err() {
                    break;
                }
                let report = *refreshed.borrow_and_update();
                if let Some(report) = report {
                    info!(succeeded = report.succeeded, failed = report.failed, "Refreshed");
                }
                print_groups(&store, &groups);
            }
        }
    }

    info!("Stopping status updater");
    handle.stop().await;
    Ok(())
}

fn print_groups(store: &StatusStore, groups: &[String]) {
    for group in groups {
        match store.lookup(group) {
            Some(text) => println!("== {group} ==\n{text}\n"),
            None => println!("== {group} ==\n(no server responded)\n"),
        }
    }
}
