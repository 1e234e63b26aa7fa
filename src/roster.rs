// Team, player, and matchup model.

use serde::{Deserialize, Serialize};

use crate::slot::Slot;

/// A fantasy team identity. Used as an aggregation key and as the
/// deterministic tie-breaker in standings; the allocator never looks at it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub owner: String,
}

impl Team {
    pub fn new(name: impl Into<String>, owner: impl Into<String>) -> Self {
        Team {
            name: name.into(),
            owner: owner.into(),
        }
    }
}

/// One scored player in a weekly lineup.
///
/// `position` is the player's primary slot; `lineup_slot` is where the manager
/// actually started them that week (Bench/IR when they sat). `eligible_slots`
/// is the ordered list of slots the player may legally occupy, searched in
/// order during cascading re-placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub position: Slot,
    pub lineup_slot: Slot,
    pub points: f64,
    pub eligible_slots: Vec<Slot>,
}

impl Player {
    /// Build a player started at their primary position, eligible only there.
    pub fn new(name: impl Into<String>, position: Slot, points: f64) -> Self {
        Player {
            name: name.into(),
            position,
            lineup_slot: position,
            points,
            eligible_slots: vec![position],
        }
    }

    pub fn with_lineup_slot(mut self, slot: Slot) -> Self {
        self.lineup_slot = slot;
        self
    }

    pub fn with_eligible_slots(mut self, slots: Vec<Slot>) -> Self {
        self.eligible_slots = slots;
        self
    }
}

/// A pair of opposing rosters for one week, with each side's reported score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matchup {
    pub home_team: Team,
    pub away_team: Team,
    pub home_lineup: Vec<Player>,
    pub away_lineup: Vec<Player>,
    pub home_score: f64,
    pub away_score: f64,
}

/// Sum of points scored by players who were actually started.
pub fn starters_score(lineup: &[Player]) -> f64 {
    lineup
        .iter()
        .filter(|p| !p.lineup_slot.is_bench_or_reserve())
        .map(|p| p.points)
        .sum()
}
