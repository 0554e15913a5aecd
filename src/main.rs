//! Endless Runner entry point
//!
//! Runs a seeded headless session driven by the autopilot, retrying on death,
//! and prints a JSON summary of the run.

use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;

use endless_runner::consts::REFERENCE_FPS;
use endless_runner::sim::{HeadlessHud, HeadlessScene, LifecycleEvent, RunSummary};
use endless_runner::{Session, Settings, frame_time_ratio_from_delta};
use serde::Serialize;

/// Two minutes at the reference frame rate
const DEMO_FRAMES: u64 = 2 * 60 * REFERENCE_FPS as u64;

#[derive(Debug, Serialize)]
struct DemoReport {
    frames: u64,
    deaths: u32,
    best_meters: u64,
    batches_generated: u32,
    reclaims: u32,
    meshes_disposed: u64,
    last_run: RunSummary,
}

fn main() {
    env_logger::init();
    log::info!("Endless Runner (headless) starting...");

    let path = std::env::args_os().nth(1).map(PathBuf::from);
    let settings = Settings::load(path.as_deref());

    let mut session: Session<HeadlessScene, HeadlessHud> = Session::new(vec![settings]);
    session.set_autopilot(true);

    let deaths = Rc::new(Cell::new(0u32));
    {
        let level = session.start(HeadlessScene::new(), HeadlessHud::default());
        let counter = deaths.clone();
        level
            .player_mut()
            .set_on_death(move || counter.set(counter.get() + 1));
    }

    let ratio = frame_time_ratio_from_delta(1.0 / REFERENCE_FPS);
    let mut best_meters = 0;
    let mut batches_generated = 0;
    let mut reclaims = 0;

    for _ in 0..DEMO_FRAMES {
        match session.frame(ratio) {
            Some(LifecycleEvent::Generated { first, last }) => {
                batches_generated += 1;
                log::debug!("Generated tiles {first}..={last}");
            }
            Some(LifecycleEvent::Reclaimed { .. }) => reclaims += 1,
            Some(LifecycleEvent::Idle) | None => {}
        }

        let Some(level) = session.level_mut() else {
            break;
        };
        if level.player().is_dead() {
            let summary = level.summary();
            best_meters = best_meters.max(summary.meters);
            log::info!("Run over at {} meters, retrying", summary.meters);
            level.retry();
        }
    }

    let Some(level) = session.level() else {
        log::error!("No level was running");
        return;
    };
    let last_run = level.summary();
    let report = DemoReport {
        frames: DEMO_FRAMES,
        deaths: deaths.get(),
        best_meters: best_meters.max(last_run.meters),
        batches_generated,
        reclaims,
        meshes_disposed: level.scene().disposed_count(),
        last_run,
    };

    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize report: {e}"),
    }
}
