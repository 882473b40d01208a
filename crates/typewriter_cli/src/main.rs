//! Typewriter CLI - headless scenario player
//!
//! Loads a typewriter scenario from TOML or JSON and either validates it or
//! plays it back, printing every event with its virtual time and the text
//! right after it.

mod report;

use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use typewriter_animation::{FrameClock, Typewriter};
use typewriter_core::TypewriterConfig;

/// Validate and play typewriter scenarios
#[derive(Parser, Debug)]
#[command(name = "typewriter")]
#[command(about = "Validate and play typewriter animation scenarios")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load and validate a scenario, then print a summary
    Check {
        /// Scenario file (.toml or .json)
        file: PathBuf,
    },

    /// Play a scenario and print the event log
    Play {
        /// Scenario file (.toml or .json)
        file: PathBuf,

        /// Pace playback with the wall clock instead of jumping timer to timer
        #[arg(long)]
        realtime: bool,

        /// Playback speed multiplier for --realtime
        #[arg(long, default_value = "1.0")]
        speed: f64,

        /// Stop after this much virtual time (needed for endless repeats)
        #[arg(long, default_value = "60000")]
        limit_ms: u64,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check { file } => cmd_check(&file),
        Commands::Play {
            file,
            realtime,
            speed,
            limit_ms,
        } => cmd_play(&file, realtime, speed, limit_ms),
    }
}

fn load(path: &Path) -> Result<TypewriterConfig> {
    TypewriterConfig::load(path)
        .with_context(|| format!("Failed to load scenario {}", path.display()))
}

fn cmd_check(path: &Path) -> Result<()> {
    let config = load(path)?;
    let validated = config
        .validate()
        .with_context(|| format!("Invalid scenario {}", path.display()))?;

    println!("{}: ok", path.display());
    println!("{}", report::summary(&validated));
    Ok(())
}

fn cmd_play(path: &Path, realtime: bool, speed: f64, limit_ms: u64) -> Result<()> {
    let mut config = load(path)?;
    // subscribe before anything is emitted, then start explicitly
    config.auto_play = false;

    let mut typewriter = Typewriter::new(config)
        .with_context(|| format!("Invalid scenario {}", path.display()))?;
    typewriter.subscribe(|event, typewriter| {
        println!(
            "{}",
            report::event_line(typewriter.now(), event, typewriter.text())
        );
    });

    if typewriter.actions().is_empty() {
        println!("nothing to play");
        return Ok(());
    }

    tracing::info!(file = %path.display(), realtime, speed, limit_ms, "playing scenario");
    typewriter.play();

    if realtime {
        play_realtime(&mut typewriter, speed, limit_ms);
    } else {
        typewriter.run_to_completion(limit_ms);
    }

    if typewriter.is_playing() {
        println!("stopped at the {}ms limit", limit_ms);
        typewriter.stop();
    }
    Ok(())
}

/// Drive the engine from a frame clock at roughly 60 frames per second.
fn play_realtime(typewriter: &mut Typewriter, speed: f64, limit_ms: u64) {
    const FRAME: Duration = Duration::from_millis(16);

    let mut clock = FrameClock::new();
    clock.set_speed(speed);
    clock.play();

    let start = typewriter.now();
    while typewriter.is_playing() {
        let elapsed = typewriter.now() - start;
        if elapsed >= limit_ms {
            break;
        }
        thread::sleep(FRAME);
        let delta = clock.tick().min(limit_ms - elapsed);
        typewriter.advance(delta);
    }
}
