//! Game Loop
//!
//! This example drives a state machine from a fixed-step host loop.
//!
//! Key concepts:
//! - The host owns the loop and the time step; the machine never reads a clock
//! - States switch by name, with a typed payload handed to `enter`
//! - Diagnostics go through `tracing`
//!
//! Run with: RUST_LOG=debug cargo run --example game_loop

use smile_fsm::{Callbacks, MachineConfig, StateMachine};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const FRAME_TIME: f32 = 1.0 / 60.0;

/// Payload handed to the level's enter callback.
struct LevelArgs {
    level: u32,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== Game Loop Example ===\n");

    let mut machine = StateMachine::with_config(MachineConfig::default().warnings_enabled(true));
    machine.init().unwrap();

    let frames_in_level = Arc::new(AtomicU32::new(0));
    let counter = Arc::clone(&frames_in_level);

    machine
        .register_state(
            "Menu",
            Callbacks::new()
                .on_enter(|_| println!("[Menu] enter"))
                .on_draw(|| println!("[Menu] draw"))
                .on_exit(|| println!("[Menu] exit")),
        )
        .unwrap();

    machine
        .register_state(
            "Level",
            Callbacks::new()
                .on_enter(|args| {
                    let level = args
                        .and_then(|a| a.downcast_ref::<LevelArgs>())
                        .map_or(1, |a| a.level);
                    println!("[Level] enter level {level}");
                })
                .on_update(move |dt| {
                    counter.fetch_add(1, Ordering::Relaxed);
                    if dt > FRAME_TIME {
                        println!("[Level] slow frame: {dt}");
                    }
                })
                .on_draw(|| {})
                .on_exit(|| println!("[Level] exit")),
        )
        .unwrap();

    machine.change_state("Menu").unwrap();

    for frame in 0..180u32 {
        if frame == 2 {
            machine
                .change_state_to("Level", Some(&LevelArgs { level: 3 }))
                .unwrap();
        }

        // The menu has no update callback; the machine reports it and moves on.
        let _ = machine.update(FRAME_TIME);
        machine.draw().unwrap();
    }

    println!(
        "\nFrames spent in level: {}",
        frames_in_level.load(Ordering::Relaxed)
    );
    println!("Status: {}", machine.status().to_json().unwrap());

    machine.shutdown().unwrap();
    println!("\n=== Example Complete ===");
}
