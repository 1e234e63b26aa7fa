// Greedy lineup allocation with cascading re-placement.
//
// `add_to_optimal` places one scored player into the best-effort optimal
// assignment built so far. A player whose primary slot is full may evict that
// slot's lowest scorer; whichever of the two loses out goes onto a FIFO
// worklist and searches its own eligibility list for another home, possibly
// evicting again. Termination is bounded by total slot capacity: every swap
// strictly raises a slot's minimum score, so no item can cycle.
//
// This is a deterministic greedy approximation, not a max-weight bipartite
// matching; see DESIGN.md for the trade-off.

use std::collections::{BTreeMap, VecDeque};

use crate::roster::Player;
use crate::slot::Slot;

use super::settings::SlotCapacities;

/// Players assigned to starting slots, keyed by slot.
///
/// Invariants, maintained at every step of construction:
/// - `players(slot).len() <= capacities.count(slot)` for every slot
/// - no player with negative points is ever present
///
/// BTreeMap keying keeps iteration order (and therefore float summation
/// order) deterministic across runs.
#[derive(Debug, Clone, Default)]
pub struct Assignment {
    slots: BTreeMap<Slot, Vec<Player>>,
}

impl Assignment {
    pub fn new() -> Self {
        Assignment::default()
    }

    /// Players currently assigned to a slot, in insertion order.
    pub fn players(&self, slot: Slot) -> &[Player] {
        self.slots.get(&slot).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All (slot, players) pairs in deterministic slot order.
    pub fn iter(&self) -> impl Iterator<Item = (Slot, &[Player])> + '_ {
        self.slots.iter().map(|(&slot, players)| (slot, players.as_slice()))
    }

    /// Sum of points over every assigned player across every slot.
    pub fn total_points(&self) -> f64 {
        self.slots
            .values()
            .flat_map(|players| players.iter())
            .map(|p| p.points)
            .sum()
    }

    fn count(&self, slot: Slot) -> usize {
        self.slots.get(&slot).map(Vec::len).unwrap_or(0)
    }

    fn push(&mut self, slot: Slot, player: Player) {
        self.slots.entry(slot).or_default().push(player);
    }
}

/// Outcome of one fill-or-displace attempt against a single slot.
enum Placement {
    /// The slot had spare capacity; the item was appended.
    Placed,
    /// The item beat the slot's lowest scorer and took its place.
    Swapped(Player),
    /// The slot is full (or has zero capacity) and the item beat no one.
    Rejected(Player),
}

/// Index of the lowest scorer, first-encountered on ties.
fn lowest_scorer(players: &[Player]) -> Option<usize> {
    if players.is_empty() {
        return None;
    }
    let mut min_idx = 0;
    for i in 1..players.len() {
        if players[i].points < players[min_idx].points {
            min_idx = i;
        }
    }
    Some(min_idx)
}

fn fill_or_displace(
    assignment: &mut Assignment,
    capacities: &SlotCapacities,
    slot: Slot,
    item: Player,
) -> Placement {
    if assignment.count(slot) < capacities.count(slot) {
        assignment.push(slot, item);
        return Placement::Placed;
    }

    let incumbents = match assignment.slots.get_mut(&slot) {
        Some(players) if !players.is_empty() => players,
        // Zero-capacity slot: nothing to evict, the item must look elsewhere.
        _ => return Placement::Rejected(item),
    };

    match lowest_scorer(incumbents) {
        Some(min_idx) if item.points > incumbents[min_idx].points => {
            let evicted = std::mem::replace(&mut incumbents[min_idx], item);
            Placement::Swapped(evicted)
        }
        _ => Placement::Rejected(item),
    }
}

/// Fold one player into the optimal assignment built so far.
///
/// Contract:
/// 1. Negative scorers can never be optimal and are skipped outright.
/// 2. Spare capacity in the player's primary slot is filled unconditionally.
/// 3. A full primary slot evicts its lowest scorer if the player beats it
///    (first-encountered on ties); otherwise the player itself is displaced.
/// 4. Displaced items search their own eligibility list in caller-supplied
///    order, skipping bench/reserve slots and slots the league does not
///    start. First fit wins; a swap pushes the new evictee onto the worklist;
///    an item that beats nothing anywhere is simply left out of the lineup.
pub fn add_to_optimal(assignment: &mut Assignment, capacities: &SlotCapacities, player: Player) {
    if player.points < 0.0 {
        return;
    }

    let mut worklist: VecDeque<Player> = VecDeque::new();
    match fill_or_displace(assignment, capacities, player.position, player) {
        Placement::Placed => return,
        Placement::Swapped(evicted) => worklist.push_back(evicted),
        Placement::Rejected(player) => worklist.push_back(player),
    }

    while let Some(mut item) = worklist.pop_front() {
        let eligible = item.eligible_slots.clone();
        for slot in eligible {
            if slot.is_bench_or_reserve() || capacities.count(slot) == 0 {
                continue;
            }
            match fill_or_displace(assignment, capacities, slot, item) {
                Placement::Placed => break,
                Placement::Swapped(evicted) => {
                    worklist.push_back(evicted);
                    break;
                }
                Placement::Rejected(back) => item = back,
            }
        }
    }
}

/// Best-effort optimal score for a full lineup under the given capacities.
///
/// Folds `add_to_optimal` over every player starting from an empty
/// assignment, then sums the assigned points. Pure and stateless: identical
/// lineups and capacities always produce identical results.
pub fn optimal_score(lineup: &[Player], capacities: &SlotCapacities) -> f64 {
    let mut assignment = Assignment::new();
    for player in lineup {
        add_to_optimal(&mut assignment, capacities, player.clone());
    }
    assignment.total_points()
}
