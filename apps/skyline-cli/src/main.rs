mod script;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use skyline_common::{EntityId, SceneNode, SharedObject, shared};
use skyline_ecs::Limbs;
use skyline_kernel::{SkylineConfig, World};
use skyline_tools::{EntityInfo, WorldInspector, WorldSummary};
use skyline_world::CityLayout;
use tracing_subscriber::EnvFilter;

use crate::script::{ScriptAction, ScriptEvent};

/// Host frame period for headless runs.
const FRAME_MS: f64 = 1000.0 / 60.0;

#[derive(Parser)]
#[command(name = "skyline-cli", about = "Headless driver for the skyline runtime")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// YAML config file; defaults apply for anything it leaves out
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and the effective configuration
    Info,
    /// Run the frame loop headless with scripted input
    Simulate {
        /// Number of frames to run at 60 Hz
        #[arg(short, long, default_value = "300")]
        frames: u64,
        /// Layout seed (overrides the config file)
        #[arg(short, long)]
        seed: Option<u64>,
        /// Input script, e.g. "10:w+,40:w-,50:space+,52:space-"
        #[arg(long, default_value = "")]
        script: String,
        /// Print the player every N frames (0 prints only the final state)
        #[arg(long, default_value = "0")]
        every: u64,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the generated city layout
    Layout {
        /// Layout seed (overrides the config file)
        #[arg(short, long)]
        seed: Option<u64>,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct SimulationReport {
    summary: WorldSummary,
    trace: Vec<TraceFrame>,
    player: Option<EntityInfo>,
}

#[derive(Serialize)]
struct TraceFrame {
    frame: u64,
    player: EntityInfo,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose when set.
    let filter = if cli.verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => SkylineConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SkylineConfig::default(),
    };

    match cli.command {
        Commands::Info => {
            println!("skyline-cli v{}", env!("CARGO_PKG_VERSION"));
            let world = World::from_config(&config)?;
            println!("{}", WorldInspector::summary(&world));
            println!("---");
            print!("{}", config.to_yaml()?);
        }
        Commands::Simulate {
            frames,
            seed,
            script,
            every,
            json,
        } => {
            if let Some(seed) = seed {
                config.world.seed = seed;
            }
            let events = script::parse(&script)?;
            let report = simulate(&config, frames, &events, every)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for frame in &report.trace {
                    println!("#{:>5} {}", frame.frame, frame.player);
                }
                println!("{}", report.summary);
                if let Some(player) = &report.player {
                    println!("{player}");
                }
            }
        }
        Commands::Layout { seed, json } => {
            if let Some(seed) = seed {
                config.world.seed = seed;
            }
            let layout = CityLayout::generate(&config.world)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&layout)?);
            } else {
                print_layout(&layout);
            }
        }
    }

    Ok(())
}

/// Headless body plus four limb nodes, so the procedural animation runs.
fn headless_rig() -> (SharedObject, Limbs) {
    let node = || shared(SceneNode::default());
    let limbs = Limbs {
        left_arm: node(),
        right_arm: node(),
        left_leg: node(),
        right_leg: node(),
    };
    (node(), limbs)
}

fn simulate(
    config: &SkylineConfig,
    frames: u64,
    events: &[ScriptEvent],
    every: u64,
) -> anyhow::Result<SimulationReport> {
    let mut world = World::from_config(config)?;
    let (body, limbs) = headless_rig();
    let player = world.spawn_player(&config.player, body, Some(limbs))?;
    tracing::info!(frames, events = events.len(), "simulation start");

    let mut pending = events.iter().peekable();
    let mut trace = Vec::new();
    for frame in 0..frames {
        while let Some(event) = pending.next_if(|e| e.frame <= frame) {
            apply(&mut world, player, event)?;
        }
        world.frame(frame as f64 * FRAME_MS);

        if every > 0 && frame % every == 0 {
            if let Some(info) = WorldInspector::inspect_entity(&world, player) {
                trace.push(TraceFrame {
                    frame,
                    player: info,
                });
            }
        }
    }

    let report = SimulationReport {
        summary: WorldInspector::summary(&world),
        trace,
        player: WorldInspector::inspect_entity(&world, player),
    };
    world.shutdown();
    Ok(report)
}

fn apply(world: &mut World, player: EntityId, event: &ScriptEvent) -> anyhow::Result<()> {
    tracing::debug!(frame = event.frame, action = ?event.action, "script");
    match &event.action {
        ScriptAction::Jump => {
            let outcome = world.jump(player)?;
            tracing::info!(frame = event.frame, ?outcome, "scripted jump");
        }
        ScriptAction::KeyDown(key) => world
            .input_mut()
            .context("input system is not registered")?
            .key_down(key),
        ScriptAction::KeyUp(key) => world
            .input_mut()
            .context("input system is not registered")?
            .key_up(key),
    }
    Ok(())
}

fn print_layout(layout: &CityLayout) {
    let (lo, hi) = layout.bounds();
    println!(
        "seed={} tiles={} buildings={} ground={:.2} extent=({:.1}, {:.1})..({:.1}, {:.1})",
        layout.seed(),
        layout.tiles().len(),
        layout.buildings().len(),
        layout.ground_level(),
        lo.x,
        lo.z,
        hi.x,
        hi.z,
    );
    for lot in layout.lots() {
        let b = &lot.building;
        println!(
            "  [{:>3},{:>3}] center=({:.1}, {:.2}, {:.1}) size={}x{}x{} color=#{:06x}",
            lot.i, lot.j, b.x, b.y, b.z, b.width, b.depth, b.height, lot.color
        );
    }
}
