// Coach-of-the-Year and GM-of-the-Year rankings.
//
// Both standings are pure reductions over a completed SeasonRecord; they can
// be recomputed freely and always produce the same ordering for the same
// input. Ties are broken by team identity so that standings are stable even
// when totals collide.

use std::cmp::Ordering;

use serde::Serialize;

use crate::roster::Team;
use crate::season::SeasonRecord;

/// One ranked team with its award-relevant total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AwardEntry {
    pub team: Team,
    pub total: f64,
}

/// The two award winners, totals rounded to two decimals for presentation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AwardsSummary {
    /// Smallest season suboptimality: fewest points left on the bench.
    pub coach_of_the_year: AwardEntry,
    /// Largest optimal season total: most roster potential, however started.
    pub gm_of_the_year: AwardEntry,
}

/// Teams ranked by season suboptimality, ascending.
///
/// Suboptimality is the sum over all weeks of (optimal - actual): the points
/// a better start/sit record would have added. It is never negative when the
/// capacity map matches the number of starters actually used, because the
/// real lineup is itself a feasible assignment.
pub fn suboptimality_standings(record: &SeasonRecord) -> Vec<(Team, f64)> {
    let mut standings: Vec<(Team, f64)> = record
        .iter()
        .map(|(team, scores)| {
            let total = scores.iter().map(|w| w.optimal - w.actual).sum();
            (team.clone(), total)
        })
        .collect();
    standings.sort_by(|a, b| {
        a.1.partial_cmp(&b.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    standings
}

/// Teams ranked by total optimal score across the season, descending.
pub fn optimal_total_standings(record: &SeasonRecord) -> Vec<(Team, f64)> {
    let mut standings: Vec<(Team, f64)> = record
        .iter()
        .map(|(team, scores)| {
            let total = scores.iter().map(|w| w.optimal).sum();
            (team.clone(), total)
        })
        .collect();
    standings.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    standings
}

/// Pick both award winners from a completed season. Returns `None` when the
/// record holds no teams at all.
pub fn rank_awards(record: &SeasonRecord) -> Option<AwardsSummary> {
    let (coach_team, coach_total) = suboptimality_standings(record).into_iter().next()?;
    let (gm_team, gm_total) = optimal_total_standings(record).into_iter().next()?;
    Some(AwardsSummary {
        coach_of_the_year: AwardEntry {
            team: coach_team,
            total: round2(coach_total),
        },
        gm_of_the_year: AwardEntry {
            team: gm_team,
            total: round2(gm_total),
        },
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
