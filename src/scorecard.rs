//! Scorecard and HUD text
//!
//! Built from the player list on demand; the session never stores it.

use serde::{Deserialize, Serialize};

use crate::settings::GolfSettings;
use crate::sim::Player;

/// One player's line on the card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScorecardEntry {
    pub name: String,
    /// Strokes per completed hole
    pub strokes: Vec<u32>,
    pub total: u32,
    /// Par summed over the holes this player completed
    pub par: u64,
    /// `total - par`; negative is under par
    pub to_par: i64,
    /// Swings attempted (not scored)
    pub swings: u32,
}

/// Standings for every player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Scorecard {
    pub entries: Vec<ScorecardEntry>,
    /// Whether the round has finished
    pub final_card: bool,
}

impl Scorecard {
    pub fn new(players: &[Player], settings: &GolfSettings, final_card: bool) -> Self {
        let entries = players
            .iter()
            .map(|p| {
                let par = (1..=p.holes_completed() as u32)
                    .map(|hole| u64::from(settings.par_for(hole)))
                    .fold(0u64, u64::saturating_add);
                let to_par = i64::try_from(par)
                    .map_or(i64::MIN, |par| i64::from(p.total).saturating_sub(par));
                ScorecardEntry {
                    name: p.name.clone(),
                    strokes: p.strokes.clone(),
                    total: p.total,
                    par,
                    to_par,
                    swings: p.swings,
                }
            })
            .collect();
        Self {
            entries,
            final_card,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lowest total wins; ties share the lead
    pub fn leaders(&self) -> Vec<&ScorecardEntry> {
        let Some(best) = self.entries.iter().map(|e| e.total).min() else {
            return Vec::new();
        };
        self.entries.iter().filter(|e| e.total == best).collect()
    }

    /// "Name: N strokes" per player
    pub fn summary_lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|e| format!("{}: {} strokes ({})", e.name, e.total, format_to_par(e.to_par)))
            .collect()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Golf notation: "E", "+3", "-2"
pub fn format_to_par(to_par: i64) -> String {
    match to_par {
        0 => "E".to_string(),
        n if n > 0 => format!("+{}", n),
        n => n.to_string(),
    }
}

/// Overlay status lines, current player prefixed with "-> "
pub fn hud_lines(players: &[Player], current_player: usize, current_hole: u32) -> Vec<String> {
    players
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let text = format!(
                "{}: Total {} | Hole {} Strokes {}",
                p.name,
                p.total,
                current_hole,
                p.strokes.len()
            );
            if i == current_player {
                format!("-> {}", text)
            } else {
                text
            }
        })
        .collect()
}
