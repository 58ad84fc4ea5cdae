use anyhow::Context;
use clap::Parser;
use generator::feed::{run_feed, FeedPlan};
use log::info;
use scopecore::frame::{build_frame, SessionState};
use scopecore::readings::WINDOW_CAP;
use scopecore::store::ReadingStore;
use scopecore::telemetry::MetricsRecorder;
use service::bridge::UploadBridge;
use service::config::ServiceConfig;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;

mod generator;
mod service;

#[derive(Parser)]
#[command(author, version, about = "Radar reading collector and development feeder")]
struct Args {
    /// Load collector settings from YAML
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the reading log location
    #[arg(long)]
    data_file: Option<PathBuf>,
    /// Override the listen port
    #[arg(long)]
    port: Option<u16>,
    /// Summarize the current reading log and exit
    #[arg(long, default_value_t = false)]
    inspect: bool,
    /// Post this many synthetic readings to a running collector, then exit
    #[arg(long, default_value_t = 0)]
    feed: usize,
    /// Where the feeder posts its readings
    #[arg(long, default_value = "http://127.0.0.1:5000/upload")]
    feed_url: String,
    /// Seed for the feeder's jitter
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Feeder delay between posts, in milliseconds
    #[arg(long, default_value_t = 150)]
    period_ms: u64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = ServiceConfig::resolve(args.config.as_deref(), args.data_file.clone(), args.port)?;

    if args.inspect {
        return inspect(&config);
    }

    let runtime = TokioBuilder::new_current_thread()
        .enable_all()
        .build()
        .context("creating collector runtime")?;

    if args.feed > 0 {
        let plan = FeedPlan {
            url: args.feed_url.clone(),
            count: args.feed,
            seed: args.seed,
            period: Duration::from_millis(args.period_ms),
        };
        return runtime.block_on(run_feed(&plan));
    }

    let store = Arc::new(ReadingStore::open(&config.data_file));
    let metrics = Arc::new(MetricsRecorder::new());
    let bridge = UploadBridge::new(store, metrics);

    let addr = config.bind_addr()?;
    bridge.spawn(addr);
    info!(
        "collector listening on {} writing {} (Ctrl+C to stop)",
        addr,
        config.data_file.display()
    );

    runtime.block_on(async {
        signal::ctrl_c().await.context("awaiting Ctrl+C to exit")?;
        Ok::<(), anyhow::Error>(())
    })?;

    Ok(())
}

/// One offline frame evaluation against the current reading log.
fn inspect(config: &ServiceConfig) -> anyhow::Result<()> {
    let store = ReadingStore::open(&config.data_file);
    let window = store
        .load_window(WINDOW_CAP)
        .with_context(|| format!("loading reading log {}", config.data_file.display()))?;

    let mut session = SessionState::new();
    match build_frame(&window, &mut session) {
        Ok(frame) => println!(
            "Inspect -> readings {}, distinct angles {}, tracked {}, beam at {:.1} deg",
            frame.raw.len(),
            window.distinct_angles().len(),
            frame.tracked.len(),
            frame.beams.first().map(|beam| beam.angle).unwrap_or(0.0)
        ),
        Err(err) => println!("Inspect -> {}", err),
    }
    Ok(())
}
