//! Turn and round progression
//!
//! Players share one ball and take turns in detection order. A hole-out
//! credits the current player with exactly one stroke (strokes count holes
//! completed, not swings taken) and passes the ball, where it lies, to the
//! next player. When the last player holes out the course moves to the next
//! hole, and after the last hole the round is over.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::course::regenerate_layout;
use super::session::GameSession;
use super::state::{Ball, Hole, RoundPhase};
use crate::normalize_direction;
use crate::settings::{ObstaclePolicy, StrokePolicy};

/// Strokes credited per hole-out
pub const STROKES_PER_HOLE_OUT: u32 = 1;

/// Why a swing was refused. None of these are fatal; the session is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SwingError {
    #[error("no course has been built yet")]
    NotStarted,
    #[error("round already complete")]
    RoundComplete,
    #[error("swing direction has zero length")]
    DegenerateDirection,
    #[error("swing power must be finite and non-negative, got {0}")]
    InvalidPower(f32),
    #[error("ball is still rolling at speed {speed:.3}")]
    BallInMotion { speed: f32 },
}

/// An accepted swing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeOutcome {
    /// Index of the player who swung
    pub player: usize,
    /// New ball velocity
    pub velocity: Vec3,
    /// Swings this player has attempted so far
    pub swings: u32,
}

/// How the round moved on after a hole-out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Advance {
    /// Same hole, next player, ball left where it dropped
    NextPlayer { player: usize },
    /// First player on a freshly generated hole
    NextHole { hole: u32 },
    /// Last player finished the last hole
    RoundComplete,
}

/// Set the ball moving along `direction` at `power`
pub fn apply_stroke(
    session: &mut GameSession,
    direction: Vec3,
    power: f32,
) -> Result<StrokeOutcome, SwingError> {
    match session.phase {
        RoundPhase::Idle => return Err(SwingError::NotStarted),
        RoundPhase::RoundComplete => return Err(SwingError::RoundComplete),
        RoundPhase::RoundActive => {}
    }

    let dir = normalize_direction(direction).ok_or(SwingError::DegenerateDirection)?;
    if !(power.is_finite() && power >= 0.0) {
        return Err(SwingError::InvalidPower(power));
    }

    let rest_speed = session.settings.rest_speed;
    let policy = session.settings.stroke_policy;
    let ball = session.ball.as_mut().ok_or(SwingError::NotStarted)?;
    if policy == StrokePolicy::AtRest && !ball.is_at_rest(rest_speed) {
        return Err(SwingError::BallInMotion { speed: ball.speed() });
    }
    ball.vel = dir * power;
    let velocity = ball.vel;

    let player_idx = session.current_player;
    let player = session
        .players
        .get_mut(player_idx)
        .ok_or(SwingError::NotStarted)?;
    player.swings += 1;

    log::debug!(
        "{} swings (#{}) with power {:.1} on hole {}",
        player.name,
        player.swings,
        power,
        session.current_hole
    );

    Ok(StrokeOutcome {
        player: player_idx,
        velocity,
        swings: player.swings,
    })
}

/// Credit the hole-out and move the round along. `None` when no round is active.
pub fn on_holed(session: &mut GameSession) -> Option<Advance> {
    if session.phase != RoundPhase::RoundActive {
        return None;
    }

    let hole_number = session.current_hole;
    let player = session.players.get_mut(session.current_player)?;
    player.record_hole(STROKES_PER_HOLE_OUT);
    log::debug!(
        "{} holed out on hole {} (total {})",
        player.name,
        hole_number,
        player.total
    );

    let advance = if session.current_player + 1 < session.players.len() {
        session.current_player += 1;
        Advance::NextPlayer {
            player: session.current_player,
        }
    } else if session.current_hole < session.settings.max_holes {
        next_hole(session);
        Advance::NextHole {
            hole: session.current_hole,
        }
    } else {
        session.phase = RoundPhase::RoundComplete;
        log::info!("Round complete after {} holes", session.current_hole);
        for p in &session.players {
            log::info!("{}: {} strokes", p.name, p.total);
        }
        Advance::RoundComplete
    };

    Some(advance)
}

/// Regenerate tee and hole, apply the obstacle policy, put the ball on the tee
fn next_hole(session: &mut GameSession) {
    session.current_hole += 1;
    session.current_player = 0;

    let settings = &session.settings;
    let (tee, hole_pos) = regenerate_layout(&mut session.rng, settings);
    session.tee = Some(tee);
    session.hole = Some(
        Hole::new(hole_pos, settings.hole_radius).with_par(settings.par_for(session.current_hole)),
    );
    session.ball = Some(Ball::at(tee).with_radius(settings.ball_radius));

    if settings.obstacle_policy == ObstaclePolicy::Clear {
        session.obstacles.clear();
    }

    log::info!(
        "Hole {} (par {}): tee {:?}, cup {:?}, {} obstacles",
        session.current_hole,
        settings.par_for(session.current_hole),
        tee,
        hole_pos,
        session.obstacles.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::perception::{BoundingBox, Detection, FrameBounds, Snapshot};
    use crate::settings::GolfSettings;

    fn snapshot_with_players(n: usize) -> Snapshot {
        let mut detections: Vec<Detection> = (0..n)
            .map(|i| {
                let x = i as f32 * 50.0;
                Detection::new("person", BoundingBox::new(x, 0.0, x + 40.0, 120.0), 0.9)
            })
            .collect();
        detections.push(Detection::new(
            "bottle",
            BoundingBox::new(300.0, 300.0, 320.0, 360.0),
            0.7,
        ));
        Snapshot::new(detections)
    }

    fn started(n: usize, settings: GolfSettings) -> GameSession {
        let mut session = GameSession::new(settings);
        session.start(&snapshot_with_players(n), FrameBounds::new(640.0, 480.0));
        session
    }

    #[test]
    fn test_stroke_sets_velocity_and_counts_swing() {
        let mut session = started(1, GolfSettings::default());
        let outcome = apply_stroke(&mut session, Vec3::new(3.0, 4.0, 0.0), 10.0).unwrap();
        assert_eq!(outcome.player, 0);
        assert_eq!(outcome.swings, 1);
        assert!((outcome.velocity - Vec3::new(6.0, 8.0, 0.0)).length() < 1e-5);
        assert_eq!(session.ball.unwrap().vel, outcome.velocity);
        // Swings do not score
        assert_eq!(session.players[0].total, 0);
    }

    #[test]
    fn test_degenerate_direction_refused() {
        let mut session = started(1, GolfSettings::default());
        session.ball.as_mut().unwrap().vel = Vec3::new(1.0, 2.0, 0.0);
        let err = apply_stroke(&mut session, Vec3::ZERO, 20.0).unwrap_err();
        assert_eq!(err, SwingError::DegenerateDirection);
        assert_eq!(session.ball.unwrap().vel, Vec3::new(1.0, 2.0, 0.0));
        assert_eq!(session.players[0].swings, 0);
    }

    #[test]
    fn test_invalid_power_refused() {
        let mut session = started(1, GolfSettings::default());
        assert_eq!(
            apply_stroke(&mut session, Vec3::X, -1.0),
            Err(SwingError::InvalidPower(-1.0))
        );
        assert!(matches!(
            apply_stroke(&mut session, Vec3::X, f32::NAN),
            Err(SwingError::InvalidPower(_))
        ));
        assert_eq!(session.ball.unwrap().vel, Vec3::ZERO);
    }

    #[test]
    fn test_stroke_before_start() {
        let mut session = GameSession::new(GolfSettings::default());
        assert_eq!(
            apply_stroke(&mut session, Vec3::X, 5.0),
            Err(SwingError::NotStarted)
        );
    }

    #[test]
    fn test_at_rest_policy() {
        let settings = GolfSettings {
            stroke_policy: StrokePolicy::AtRest,
            ..Default::default()
        };
        let mut session = started(1, settings);
        apply_stroke(&mut session, Vec3::X, 10.0).unwrap();
        let err = apply_stroke(&mut session, Vec3::Y, 10.0).unwrap_err();
        assert!(matches!(err, SwingError::BallInMotion { .. }));
        assert_eq!(session.ball.unwrap().vel, Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(session.players[0].swings, 1);
    }

    #[test]
    fn test_any_time_policy_overrides_rolling_ball() {
        let mut session = started(1, GolfSettings::default());
        apply_stroke(&mut session, Vec3::X, 10.0).unwrap();
        apply_stroke(&mut session, Vec3::Y, 5.0).unwrap();
        assert_eq!(session.ball.unwrap().vel, Vec3::new(0.0, 5.0, 0.0));
        assert_eq!(session.players[0].swings, 2);
    }

    #[test]
    fn test_round_robin_before_hole_advances() {
        let mut session = started(3, GolfSettings::default());
        let ball_before = session.ball.unwrap();

        assert_eq!(on_holed(&mut session), Some(Advance::NextPlayer { player: 1 }));
        assert_eq!(on_holed(&mut session), Some(Advance::NextPlayer { player: 2 }));
        assert_eq!(session.current_hole, 1);
        // Ball is shared and not reset between players
        assert_eq!(session.ball.unwrap(), ball_before);

        assert_eq!(on_holed(&mut session), Some(Advance::NextHole { hole: 2 }));
        assert_eq!(session.current_player, 0);
        for p in &session.players {
            assert_eq!(p.strokes, vec![1]);
        }
    }

    #[test]
    fn test_next_hole_resets_ball_to_new_tee() {
        let mut session = started(1, GolfSettings::default());
        session.ball.as_mut().unwrap().vel = Vec3::new(3.0, 3.0, 0.0);
        on_holed(&mut session);

        let tee = session.tee.unwrap();
        let ball = session.ball.unwrap();
        assert_eq!(ball.pos, tee);
        assert_eq!(ball.vel, Vec3::ZERO);
        assert!(session.settings.tee_jitter.min().x <= tee.x);
        assert!(tee.x <= session.settings.tee_jitter.max().x);
        assert_eq!(session.hole.unwrap().par, 4);
    }

    #[test]
    fn test_obstacle_policy_persist_and_clear() {
        let mut session = started(1, GolfSettings::default());
        on_holed(&mut session);
        assert_eq!(session.obstacles.len(), 1);

        let settings = GolfSettings {
            obstacle_policy: ObstaclePolicy::Clear,
            ..Default::default()
        };
        let mut session = started(1, settings);
        assert_eq!(session.obstacles.len(), 1);
        on_holed(&mut session);
        assert!(session.obstacles.is_empty());
    }

    #[test]
    fn test_last_hole_completes_round() {
        let settings = GolfSettings {
            max_holes: 2,
            ..Default::default()
        };
        let mut session = started(2, settings);
        let advances: Vec<_> = (0..4).map(|_| on_holed(&mut session)).collect();
        assert_eq!(
            advances,
            vec![
                Some(Advance::NextPlayer { player: 1 }),
                Some(Advance::NextHole { hole: 2 }),
                Some(Advance::NextPlayer { player: 1 }),
                Some(Advance::RoundComplete),
            ]
        );
        assert_eq!(session.phase, RoundPhase::RoundComplete);
        assert_eq!(session.current_hole, 2);

        // Terminal: nothing else is credited
        assert_eq!(on_holed(&mut session), None);
        assert!(session.players.iter().all(|p| p.total == 2));
        assert_eq!(
            apply_stroke(&mut session, Vec3::X, 1.0),
            Err(SwingError::RoundComplete)
        );
    }
}
