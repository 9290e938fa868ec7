//! AR Golf headless driver
//!
//! Stands in for the camera loop: feeds one snapshot, swings at the cup
//! whenever the ball comes to rest, and prints the final scorecard.
//!
//! Usage: `ar-golf [snapshot.json] [settings.json]`

use std::error::Error;

use ar_golf::sim::{GameSession, TickStatus};
use ar_golf::{BoundingBox, Detection, FrameBounds, GolfSettings, Snapshot};

/// Frame size of the built-in sample snapshot
const SAMPLE_FRAME: (f32, f32) = (640.0, 480.0);
/// Hard cap so a course that cannot be finished still terminates
const MAX_TICKS: u64 = 200_000;

fn sample_snapshot() -> Snapshot {
    Snapshot::new(vec![
        Detection::new("person", BoundingBox::new(20.0, 40.0, 120.0, 400.0), 0.91),
        Detection::new("person", BoundingBox::new(520.0, 60.0, 610.0, 420.0), 0.87),
        Detection::new("cup", BoundingBox::new(400.0, 330.0, 440.0, 380.0), 0.64),
        Detection::new("book", BoundingBox::new(560.0, 380.0, 620.0, 420.0), 0.58),
    ])
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    log::info!("AR Golf (headless) starting...");

    let mut args = std::env::args().skip(1);
    let snapshot = match args.next() {
        Some(path) => Snapshot::load(&path)?,
        None => sample_snapshot(),
    };
    let settings = match args.next() {
        Some(path) => GolfSettings::load(&path)?,
        None => GolfSettings::default(),
    };

    let mut session = GameSession::new(settings);
    session.start(&snapshot, FrameBounds::new(SAMPLE_FRAME.0, SAMPLE_FRAME.1));

    for _ in 0..MAX_TICKS {
        if session.ball_at_rest() {
            if let Err(e) = session.swing_toward_hole() {
                log::debug!("Swing skipped: {}", e);
            }
        }
        match session.tick() {
            TickStatus::HoledOut { player, hole, .. } => {
                log::info!("Player {} holed out on hole {}", player + 1, hole);
                for line in session.hud_lines() {
                    log::debug!("{}", line);
                }
            }
            TickStatus::RoundAlreadyComplete | TickStatus::NotStarted => break,
            TickStatus::Rolling { .. } => {}
        }
        if !session.is_round_active() {
            break;
        }
    }

    let card = session.scorecard();
    if !card.final_card {
        log::warn!(
            "Stopped after {} ticks before the round finished",
            session.time_ticks()
        );
    }
    println!("Game over!");
    for line in card.summary_lines() {
        println!("{}", line);
    }
    println!("{}", card.to_json()?);
    Ok(())
}
