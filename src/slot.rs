// Lineup slot codes and parsing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Football lineup slots used for capacity derivation and assignment.
///
/// Covers the starting slots a league exposes plus the bench/reserve slots a
/// player can be parked in. Composite slots (`RB/WR/TE`, `WR/TE`, `OP`) accept
/// players from more than one primary position; eligibility is carried on the
/// player, not encoded here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Slot {
    Quarterback,
    RunningBack,
    WideReceiver,
    TightEnd,
    Flex,
    ReceiverFlex,
    OffensivePlayer,
    Defense,
    Kicker,
    Bench,
    InjuredReserve,
}

impl Slot {
    /// Parse a slot code string into a Slot.
    ///
    /// Handles ESPN-style codes:
    /// - "RB/WR/TE" or "FLEX" -> Flex, "WR/TE" -> ReceiverFlex, "OP" -> OffensivePlayer
    /// - "D/ST" or "DST" -> Defense
    /// - "BE"/"BN" -> Bench, "IR" -> InjuredReserve
    pub fn from_code(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "QB" => Some(Slot::Quarterback),
            "RB" => Some(Slot::RunningBack),
            "WR" => Some(Slot::WideReceiver),
            "TE" => Some(Slot::TightEnd),
            "RB/WR/TE" | "FLEX" => Some(Slot::Flex),
            "WR/TE" => Some(Slot::ReceiverFlex),
            "OP" => Some(Slot::OffensivePlayer),
            "D/ST" | "DST" => Some(Slot::Defense),
            "K" => Some(Slot::Kicker),
            "BE" | "BN" => Some(Slot::Bench),
            "IR" => Some(Slot::InjuredReserve),
            _ => None,
        }
    }

    /// Return the display code for this slot.
    pub fn code(&self) -> &'static str {
        match self {
            Slot::Quarterback => "QB",
            Slot::RunningBack => "RB",
            Slot::WideReceiver => "WR",
            Slot::TightEnd => "TE",
            Slot::Flex => "RB/WR/TE",
            Slot::ReceiverFlex => "WR/TE",
            Slot::OffensivePlayer => "OP",
            Slot::Defense => "D/ST",
            Slot::Kicker => "K",
            Slot::Bench => "BE",
            Slot::InjuredReserve => "IR",
        }
    }

    /// Whether this slot holds players who are not in the starting lineup.
    /// Bench and reserve slots never count toward capacities and are never
    /// placement candidates.
    pub fn is_bench_or_reserve(&self) -> bool {
        matches!(self, Slot::Bench | Slot::InjuredReserve)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_code_standard_slots() {
        assert_eq!(Slot::from_code("QB"), Some(Slot::Quarterback));
        assert_eq!(Slot::from_code("RB"), Some(Slot::RunningBack));
        assert_eq!(Slot::from_code("WR"), Some(Slot::WideReceiver));
        assert_eq!(Slot::from_code("TE"), Some(Slot::TightEnd));
        assert_eq!(Slot::from_code("K"), Some(Slot::Kicker));
    }

    #[test]
    fn from_code_composite_slots() {
        assert_eq!(Slot::from_code("RB/WR/TE"), Some(Slot::Flex));
        assert_eq!(Slot::from_code("FLEX"), Some(Slot::Flex));
        assert_eq!(Slot::from_code("WR/TE"), Some(Slot::ReceiverFlex));
        assert_eq!(Slot::from_code("OP"), Some(Slot::OffensivePlayer));
    }

    #[test]
    fn from_code_defense_aliases() {
        assert_eq!(Slot::from_code("D/ST"), Some(Slot::Defense));
        assert_eq!(Slot::from_code("DST"), Some(Slot::Defense));
    }

    #[test]
    fn from_code_bench_and_reserve() {
        assert_eq!(Slot::from_code("BE"), Some(Slot::Bench));
        assert_eq!(Slot::from_code("BN"), Some(Slot::Bench));
        assert_eq!(Slot::from_code("IR"), Some(Slot::InjuredReserve));
    }

    #[test]
    fn from_code_case_insensitive() {
        assert_eq!(Slot::from_code("qb"), Some(Slot::Quarterback));
        assert_eq!(Slot::from_code("rb/wr/te"), Some(Slot::Flex));
        assert_eq!(Slot::from_code("d/st"), Some(Slot::Defense));
    }

    #[test]
    fn from_code_unknown() {
        assert_eq!(Slot::from_code("XX"), None);
        assert_eq!(Slot::from_code(""), None);
        assert_eq!(Slot::from_code("C"), None);
    }

    #[test]
    fn code_roundtrip() {
        let slots = [
            Slot::Quarterback,
            Slot::RunningBack,
            Slot::WideReceiver,
            Slot::TightEnd,
            Slot::Flex,
            Slot::ReceiverFlex,
            Slot::OffensivePlayer,
            Slot::Defense,
            Slot::Kicker,
            Slot::Bench,
            Slot::InjuredReserve,
        ];
        for slot in slots {
            assert_eq!(Slot::from_code(slot.code()), Some(slot), "roundtrip failed for {}", slot);
        }
    }

    #[test]
    fn is_bench_or_reserve_correct() {
        assert!(Slot::Bench.is_bench_or_reserve());
        assert!(Slot::InjuredReserve.is_bench_or_reserve());
        assert!(!Slot::Quarterback.is_bench_or_reserve());
        assert!(!Slot::Flex.is_bench_or_reserve());
        assert!(!Slot::Defense.is_bench_or_reserve());
    }

    #[test]
    fn display_trait_works() {
        assert_eq!(format!("{}", Slot::Flex), "RB/WR/TE");
        assert_eq!(format!("{}", Slot::Defense), "D/ST");
        assert_eq!(format!("{}", Slot::Quarterback), "QB");
    }
}
