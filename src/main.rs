//! roomctl-sim — host simulator for the room controller.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Adapters (outer ring)                    │
//! │                                                              │
//! │  SimulatedBoard      LogEventSink     MonotonicClock         │
//! │  (Sensor+Actuator)   (EventSink)      (cycle time)           │
//! │  stdin thread ──▶ Inbox                                      │
//! │                                                              │
//! │  ──────────────── Port Trait Boundary ─────────────────      │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │            AutomationEngine (pure logic)               │  │
//! │  │  Presence · HoldOff ×3 · Auto/Manual                   │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The board follows a short repeating script: someone walks in, the room
//! heats up and gets dark, the light sensor drops out for a few cycles,
//! then the room empties again.  Lines typed on stdin are parsed like the
//! status page's query strings (`fan=on`, `auto=off`) and applied between
//! cycles.
#![deny(unused_must_use)]

use std::io::BufRead;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::{info, warn};

use roomctl::adapters::log_sink::LogEventSink;
use roomctl::adapters::sim::SimulatedBoard;
use roomctl::adapters::time::MonotonicClock;
use roomctl::app::commands::parse_query;
use roomctl::app::engine::AutomationEngine;
use roomctl::app::inbox::Inbox;
use roomctl::config::ControllerConfig;
use roomctl::error::SensorError;
use roomctl::sensors::{Sensor, Vector3};
use roomctl::web::render_status_page;

/// Commands posted by the stdin thread, drained by the control loop.
static INBOX: Inbox = Inbox::new();

/// Length of one pass through the scripted scenario.
const SCRIPT_CYCLES: u64 = 24;

#[derive(Parser)]
#[command(name = "roomctl-sim")]
#[command(version)]
#[command(about = "Run the room controller against a simulated board")]
struct Cli {
    /// Threshold preset: standalone or web
    #[arg(long, default_value = "standalone")]
    preset: String,

    /// JSON configuration file (overrides the preset)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the rendered status page here after every cycle
    #[arg(long)]
    page: Option<PathBuf>,

    /// Stop after this many cycles (runs forever when omitted)
    #[arg(long)]
    cycles: Option<u64>,

    /// Ignore stdin commands
    #[arg(long)]
    no_input: bool,
}

fn load_config(cli: &Cli) -> Result<ControllerConfig> {
    if let Some(path) = &cli.config {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config = ControllerConfig::from_json(&text)
            .with_context(|| format!("loading {}", path.display()))?;
        info!("Config loaded from {}", path.display());
        return Ok(config);
    }
    match ControllerConfig::preset(&cli.preset) {
        Some(config) => Ok(config),
        None => bail!("unknown preset '{}' (expected standalone or web)", cli.preset),
    }
}

/// Spawn the console reader.  Each line is one query string.
fn spawn_console() -> Result<()> {
    std::thread::Builder::new()
        .name("console".into())
        .spawn(|| {
            for line in std::io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                match parse_query(line) {
                    Ok(cmds) => {
                        for cmd in cmds {
                            INBOX.try_post(cmd);
                        }
                    }
                    Err(e) => warn!("console: '{}': {}", line, e),
                }
            }
        })
        .context("spawning console thread")?;
    Ok(())
}

/// Move the simulated room to where the script says it is at `cycle`.
fn script(board: &mut SimulatedBoard, cycle: u64) {
    match cycle % SCRIPT_CYCLES {
        0 => {
            info!("SCRIPT | room is empty and quiet");
            let quiet = SimulatedBoard::quiet_room();
            board.temperature_c = quiet.temperature_c;
            board.humidity_pct = quiet.humidity_pct;
            board.lux = quiet.lux;
            board.proximity = quiet.proximity;
            board.accel = quiet.accel;
            board.gyro = quiet.gyro;
            board.mic_level = quiet.mic_level;
            for sensor in Sensor::ALL {
                board.heal(sensor);
            }
        }
        3 => {
            info!("SCRIPT | someone walks in");
            board.proximity = 40;
            board.gyro = Vector3::new(35.0, -4.0, 2.0);
            board.mic_level = 16_500;
        }
        5 => {
            info!("SCRIPT | they sit down");
            board.gyro = Vector3::default();
            board.mic_level = 900;
        }
        7 => {
            info!("SCRIPT | room heats up");
            board.temperature_c = 31.5;
            board.humidity_pct = 72.0;
        }
        9 => {
            info!("SCRIPT | sun sets");
            board.lux = 18.0;
        }
        11 => {
            info!("SCRIPT | light sensor drops out");
            board.fail(Sensor::Lux, SensorError::Timeout);
        }
        14 => {
            info!("SCRIPT | light sensor back");
            board.heal(Sensor::Lux);
        }
        16 => {
            info!("SCRIPT | they leave");
            board.proximity = 0;
            board.accel = Vector3::new(0.0, 0.0, 1.0);
        }
        20 => {
            info!("SCRIPT | room cools down");
            board.temperature_c = 21.0;
            board.humidity_pct = 45.0;
        }
        _ => {}
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("roomctl-sim v{}", env!("CARGO_PKG_VERSION"));

    // ── 1. Configuration ──────────────────────────────────────
    let config = load_config(&cli)?;
    let period = config.cycle_period();
    let refresh_secs = period.as_secs().max(1) as u32;

    // ── 2. Adapters ───────────────────────────────────────────
    let mut board = SimulatedBoard::quiet_room();
    let mut sink = LogEventSink::new();
    let clock = MonotonicClock::new();

    // ── 3. Engine ─────────────────────────────────────────────
    let mut engine = AutomationEngine::new(config)?;
    engine.start(&mut sink);

    if !cli.no_input {
        spawn_console()?;
        info!("Console ready: type fan=on, light=off, presence=on, auto=off ...");
    }

    // ── 4. Control loop ───────────────────────────────────────
    let mut cycle: u64 = 0;
    loop {
        if cli.cycles.is_some_and(|limit| cycle >= limit) {
            break;
        }

        engine.drain_inbox(&INBOX, &mut board, &mut sink);
        script(&mut board, cycle);
        engine.run_cycle(clock.uptime(), &mut board, &mut sink);

        if let (Some(path), Some(report)) = (&cli.page, engine.status()) {
            std::fs::write(path, render_status_page(&report, refresh_secs))
                .with_context(|| format!("writing {}", path.display()))?;
        }

        cycle += 1;
        std::thread::sleep(period);
    }

    info!(
        "Stopped after {} cycles ({} output writes)",
        engine.cycle_count(),
        board.writes()
    );
    Ok(())
}
