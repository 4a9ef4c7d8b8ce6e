//! Flappy Sim headless runner
//!
//! Drives a session at a fixed 60 Hz clock with the demo autopilot on input,
//! then prints the final frame as JSON.
//!
//! Usage: `flappy-sim [TUNING.json|-] [FRAMES]`
//!        `flappy-sim --print-tuning`
//!
//! `FLAPPY_SEED` picks the obstacle seed, `RUST_LOG` the log level.

use anyhow::Context as _;

use flappy_sim::Tuning;
use flappy_sim::consts::SIM_DT;
use flappy_sim::sim::{Flow, GameEvent, InputEvent, Session, autopilot};

const DEFAULT_FRAMES: u64 = 3600;
const DEFAULT_SEED: u64 = 0x5EED;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let tuning = match args.next().as_deref() {
        Some("--print-tuning") => {
            let json = Tuning::default().to_json().context("serializing default tuning")?;
            println!("{json}");
            return Ok(());
        }
        Some("-") | None => Tuning::default(),
        Some(path) => load_tuning(path)?,
    };
    let frames = match args.next() {
        Some(n) => n
            .parse::<u64>()
            .with_context(|| format!("invalid frame count {n:?}"))?,
        None => DEFAULT_FRAMES,
    };
    let seed = match std::env::var("FLAPPY_SEED") {
        Ok(s) => s.parse::<u64>().context("FLAPPY_SEED must be an unsigned integer")?,
        Err(_) => DEFAULT_SEED,
    };

    log::info!("Running {} frames with seed {}", frames, seed);
    let mut session = Session::with_tuning(tuning, seed);

    let mut runs = 0u32;
    let mut best = 0u32;
    for _ in 0..frames {
        let input: Vec<InputEvent> = autopilot::decide(&session).into_iter().collect();
        if session.step(SIM_DT, &input) == Flow::Exit {
            break;
        }
        for event in session.events() {
            if let GameEvent::Crashed { score, .. } = event {
                runs += 1;
                best = best.max(*score);
            }
        }
    }

    let snapshot = session.snapshot();
    session.step(SIM_DT, &[InputEvent::Quit]);
    log::info!(
        "Finished: {} crash(es), best score {}, current score {}",
        runs,
        best.max(snapshot.score),
        snapshot.score
    );

    let json = serde_json::to_string_pretty(&snapshot).context("serializing final snapshot")?;
    println!("{json}");
    Ok(())
}

fn load_tuning(path: &str) -> anyhow::Result<Tuning> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading tuning file {path}"))?;
    let tuning = Tuning::from_json(&text).with_context(|| format!("loading tuning file {path}"))?;
    log::info!("Using tuning from {}", path);
    Ok(tuning)
}
