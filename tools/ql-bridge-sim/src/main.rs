//! ql-bridge-sim: drive the command bridge against a simulated host.
//!
//! Runs a short session (settings, files, dialog, clipboard, a burst of
//! concurrent reads) and logs every outcome.

use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use futures::future::join_all;
use ql_01_correlation_transport::BridgeConfig;
use ql_02_command_facade::{names, FileFilter, OpenDialogOptions};
use ql_bridge_sim::SimulatedBridge;
use quill_telemetry::{init_logging, TelemetryConfig};
use serde_json::json;
use std::sync::atomic::Ordering;
use tracing::{info, warn};

/// Quill bridge simulator
#[derive(Parser, Debug)]
#[command(name = "ql-bridge-sim")]
#[command(about = "Exercise the Quill command bridge against an in-process host")]
struct Args {
    /// Base reply latency of the simulated host, in milliseconds
    #[arg(short, long, default_value = "20")]
    latency_ms: u64,

    /// Per-call timeout in milliseconds (overrides QUILL_BRIDGE_TIMEOUT_MS)
    #[arg(short, long)]
    timeout_ms: Option<u64>,

    /// Number of concurrent reads in the burst phase
    #[arg(short, long, default_value = "16")]
    burst: usize,

    /// Emit JSON logs
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut telemetry = TelemetryConfig::for_component("bridge-sim");
    telemetry.json_logs |= args.json;
    init_logging(&telemetry).context("failed to initialize logging")?;

    let mut config = BridgeConfig::from_env();
    if let Some(ms) = args.timeout_ms {
        config.default_timeout = Some(Duration::from_millis(ms));
    }
    config.validate().context("invalid bridge configuration")?;
    info!(?config, "Starting simulated bridge");

    let bridge = SimulatedBridge::start(config, Duration::from_millis(args.latency_ms));
    let facade = &bridge.facade;

    facade.on(names::SETTINGS_CHANGED, |settings| {
        info!(%settings, "Settings changed");
    });
    facade.on(names::FILE_CHANGED, |data| {
        info!(%data, "File changed");
    });

    if !facade.is_available() {
        anyhow::bail!("bridge unavailable");
    }

    let settings = facade.get_settings().await?;
    info!(%settings, "Loaded settings");

    facade
        .save_settings(&json!({ "theme": "light", "fontSize": 16 }))
        .await?;

    facade
        .write_file("/notes/welcome.md", "# Welcome to Quill\n")
        .await?;
    let contents = facade.read_file("/notes/welcome.md").await?;
    info!(bytes = contents.len(), "Read back note");

    match facade.read_file("/notes/missing.md").await {
        Ok(_) => warn!("Missing note unexpectedly readable"),
        Err(e) => info!(error = %e, "Missing note rejected as expected"),
    }

    bridge
        .host
        .set_dialog_selection(Some(vec!["/notes/welcome.md".to_string()]));
    let chosen = facade
        .show_open_dialog(&OpenDialogOptions {
            title: Some("Open note".into()),
            filters: vec![FileFilter {
                name: "Markdown".into(),
                extensions: vec!["md".into()],
            }],
            ..Default::default()
        })
        .await?;
    info!(?chosen, "Dialog closed");

    facade.clipboard_write_text("copied from the simulator").await?;
    facade.window_maximize().await?;

    let reads = (0..args.burst).map(|_| facade.read_file("/notes/welcome.md"));
    let results = join_all(reads).await;
    let ok = results.iter().filter(|r| r.is_ok()).count();
    info!(ok, total = results.len(), "Burst complete");

    let stats = facade.transport().stats();
    info!(
        registered = stats.total_registered.load(Ordering::Relaxed),
        completed = stats.total_completed.load(Ordering::Relaxed),
        timeouts = stats.total_timeouts.load(Ordering::Relaxed),
        "Session finished"
    );

    let rejected = bridge.shutdown();
    info!(rejected, "Bridge closed");
    Ok(())
}
