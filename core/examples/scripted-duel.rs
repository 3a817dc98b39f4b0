//! Plays a scripted duel headless and prints the final snapshot as JSON.
//!
//! Usage:
//!   RUST_LOG=info cargo run -p duel-core --example scripted-duel -- [duel|chase|idle] > snapshot.json

use duel_core::*;

/// Host frame period at the browser cadence.
const FRAME_MS: f64 = 1000.0 / FRAME_RATE as f64;
const MAX_FRAMES: u64 = 3600;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mode = std::env::args().nth(1).unwrap_or_else(|| "duel".to_string());
    let mut session = Session::new(default_config(42));

    for frame in 0..MAX_FRAMES {
        let now = frame as f64 * FRAME_MS;
        match mode.as_str() {
            "duel" => {
                // P1 walks into range, then both trade shots every seventh frame
                if frame == 0 {
                    session.push_input(InputEvent::KeyDown(Key::D));
                }
                if frame == 40 {
                    session.push_input(InputEvent::KeyUp(Key::D));
                    session.push_input(InputEvent::KeyDown(Key::ArrowLeft));
                }
                if frame == 41 {
                    // P2 takes one step so it faces P1
                    session.push_input(InputEvent::KeyUp(Key::ArrowLeft));
                }
                if frame > 40 && frame % 7 == 0 {
                    for key in [Key::Space, Key::Enter] {
                        session.push_input(InputEvent::KeyDown(key));
                        session.push_input(InputEvent::KeyUp(key));
                    }
                }
            }
            "chase" => {
                // P2 hops right while P1 fires from range
                if frame % 20 == 0 {
                    session.push_input(InputEvent::KeyDown(Key::ArrowUp));
                    session.push_input(InputEvent::KeyDown(Key::ArrowRight));
                }
                if frame % 20 == 1 {
                    session.push_input(InputEvent::KeyUp(Key::ArrowUp));
                }
                if frame % 6 == 0 {
                    session.push_input(InputEvent::KeyDown(Key::Space));
                    session.push_input(InputEvent::KeyUp(Key::Space));
                }
            }
            "idle" => {}
            _ => anyhow::bail!("Unknown mode: {}. Use 'duel', 'chase', or 'idle'", mode),
        }

        session.frame(now, &mut NullSurface);
        if session.is_over() {
            break;
        }
    }

    let p1 = session.player(PlayerId::One);
    let p2 = session.player(PlayerId::Two);
    eprintln!("=== Sim result ({} mode) ===", mode);
    eprintln!("Frames: {}", session.frame_count());
    eprintln!("Phase: {:?}", session.phase());
    eprintln!("Health: P1={}, P2={}", p1.health, p2.health);

    println!("{}", serde_json::to_string(&session.snapshot())?);
    Ok(())
}
