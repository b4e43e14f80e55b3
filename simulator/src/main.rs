use anyhow::Context;
use clap::Parser;
use generator::profile::SyntheticSource;
use generator::replay::ReplaySource;
use gui_bridge::bridge::{default_bind_address, GuiBridge};
use log::info;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::config::WorkflowConfig;
use workflow::runner::{RoleSummary, Runner, WorkflowResult};

mod generator;
mod gui_bridge;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Offline driver and HTTP bridge for two-hand gesture tracking")]
struct Args {
    /// Run the synthetic (or replayed) session once and print a summary
    #[arg(long, default_value_t = false)]
    offline: bool,
    /// Load a workflow config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    #[arg(long, default_value_t = 300)]
    frames: usize,
    #[arg(long, default_value_t = 30.0)]
    fps: f64,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Per-coordinate landmark jitter
    #[arg(long, default_value_t = 0.002)]
    noise: f32,
    /// Replay detector output from a JSON-lines file instead of generating it
    #[arg(long)]
    replay: Option<PathBuf>,
    /// Append a JSON summary line to this file
    #[arg(long)]
    report: Option<PathBuf>,
    /// Simulate a missing camera
    #[arg(long, default_value_t = false)]
    no_camera: bool,
    /// Keep the HTTP bridge alive for a live detector
    #[arg(long, default_value_t = false)]
    serve: bool,
    #[arg(long)]
    bind: Option<SocketAddr>,
}

fn describe(name: &str, summary: &RoleSummary) -> String {
    let g = summary.gestures;
    format!(
        "{}: present {} (fist {}, gun {}, palm {}, none {}), flicks {}, jitter raw {:.4} filtered {:.4}",
        name,
        summary.frames_present,
        g.fist,
        g.gun,
        g.palm,
        g.none,
        summary.flicks,
        summary.raw_jitter,
        summary.filtered_jitter
    )
}

fn append_report(path: &PathBuf, result: &WorkflowResult) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut line = serde_json::to_string(result).context("serializing run report")?;
    line.push('\n');
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening report {}", path.display()))?;
    file.write_all(line.as_bytes())?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut workflow_config = if let Some(path) = &args.workflow {
        WorkflowConfig::load(path)?
    } else {
        WorkflowConfig::from_args(args.frames, args.fps, args.seed, args.noise)
    };
    if args.no_camera {
        workflow_config.generator.camera_available = false;
    }

    if args.offline {
        let runner = Runner::new(workflow_config.clone());
        let result = match &args.replay {
            Some(path) => {
                let replay = ReplaySource::load(path, workflow_config.frame_period_ms())?;
                info!("replaying {} detections from {}", replay.len(), path.display());
                let timestamps = replay.timestamps();
                runner.execute(replay, &timestamps)?
            }
            None => {
                let source = SyntheticSource::new(workflow_config.generator.clone());
                runner.execute(source, &workflow_config.timestamps())?
            }
        };

        println!("Offline run -> {} frames", result.frames);
        println!("  {}", describe("pilot", &result.pilot));
        println!("  {}", describe("gunner", &result.gunner));
        println!(
            "  duplicates {}, role conflicts {}, degenerate {}, low confidence {}",
            result.metrics.duplicate_frames,
            result.metrics.role_conflicts,
            result.metrics.degenerate_hands,
            result.metrics.low_confidence_hands
        );

        if let Some(path) = &args.report {
            append_report(path, &result)?;
        }
    }

    if args.serve {
        let bridge = GuiBridge::new(workflow_config.tracker, workflow_config.frame_period_ms())
            .context("starting hand tracker for the bridge")?;
        let addr = args.bind.unwrap_or_else(default_bind_address);
        bridge.serve(addr);
        println!("HTTP bridge running on {} (Ctrl+C to stop)...", addr);
        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("creating runtime for signal handling")?;
        runtime.block_on(async {
            signal::ctrl_c().await.context("awaiting Ctrl+C to exit")?;
            Ok::<(), anyhow::Error>(())
        })?;
    }

    Ok(())
}
