// Slot capacity derivation from a sample roster.

use std::collections::BTreeMap;

use crate::roster::Player;
use crate::slot::Slot;

/// How many starters the league allows in each slot.
///
/// Slots absent from the map have capacity 0; `count()` is the only way to
/// read a capacity, so the zero default is explicit rather than an accident
/// of map semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotCapacities {
    counts: BTreeMap<Slot, usize>,
}

impl SlotCapacities {
    pub fn new() -> Self {
        SlotCapacities::default()
    }

    /// Capacity of a slot; 0 for any slot the league does not start.
    pub fn count(&self, slot: Slot) -> usize {
        self.counts.get(&slot).copied().unwrap_or(0)
    }

    /// Total number of starting slots across all positions.
    pub fn total_slots(&self) -> usize {
        self.counts.values().sum()
    }

    fn increment(&mut self, slot: Slot) {
        *self.counts.entry(slot).or_insert(0) += 1;
    }
}

impl FromIterator<(Slot, usize)> for SlotCapacities {
    fn from_iter<I: IntoIterator<Item = (Slot, usize)>>(iter: I) -> Self {
        SlotCapacities {
            counts: iter.into_iter().filter(|&(_, n)| n > 0).collect(),
        }
    }
}

/// Derive the league's slot capacities from one team's roster.
///
/// Each player started in a non-bench, non-reserve slot contributes one unit
/// of capacity to that slot. The sample roster is assumed representative of
/// every week; settings are derived once per season. An empty roster yields
/// all-zero capacities, which makes every subsequent allocation place no one
/// -- a degenerate input the caller should validate, not an error.
pub fn derive_settings(sample_roster: &[Player]) -> SlotCapacities {
    let mut capacities = SlotCapacities::new();
    for player in sample_roster {
        if !player.lineup_slot.is_bench_or_reserve() {
            capacities.increment(player.lineup_slot);
        }
    }
    capacities
}
