// Season aggregation: fold the allocator over every matchup of every week.

use std::collections::BTreeMap;

use anyhow::Context;
use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::info;

use crate::optimal::{optimal_score, SlotCapacities};
use crate::roster::{Matchup, Team};

/// One team-week: the score the starters actually put up, and the score the
/// best-effort optimal lineup would have.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WeeklyScore {
    pub actual: f64,
    pub optimal: f64,
}

/// Per-team series of weekly (actual, optimal) pairs, one entry per week the
/// team played. Read-only once the season is fully processed.
pub type SeasonRecord = BTreeMap<Team, Vec<WeeklyScore>>;

/// Source of matchup data for one season.
///
/// Retrieval failures are fatal to the season computation; `run_season`
/// propagates them without retrying.
#[async_trait]
pub trait SeasonDataSource {
    /// Number of weeks in the season.
    fn total_weeks(&self) -> usize;

    /// All matchups played in the given week (1-indexed).
    async fn matchups(&mut self, week: usize) -> anyhow::Result<Vec<Matchup>>;
}

/// Observer for per-week progress. Purely observational; the season loop is
/// correct whether or not anyone consumes the updates.
pub trait ProgressSink: Send + Sync {
    fn week_complete(&self, weeks_done: usize, weeks_total: usize);
}

/// Sink that drops every update.
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn week_complete(&self, _weeks_done: usize, _weeks_total: usize) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub weeks_done: usize,
    pub weeks_total: usize,
}

/// Sink that forwards updates over an mpsc channel. Sends are non-blocking;
/// an update is dropped rather than stalling the season loop on a full or
/// closed channel.
pub struct ChannelProgress {
    tx: mpsc::Sender<ProgressUpdate>,
}

impl ChannelProgress {
    pub fn new(tx: mpsc::Sender<ProgressUpdate>) -> Self {
        ChannelProgress { tx }
    }
}

impl ProgressSink for ChannelProgress {
    fn week_complete(&self, weeks_done: usize, weeks_total: usize) {
        let _ = self.tx.try_send(ProgressUpdate {
            weeks_done,
            weeks_total,
        });
    }
}

/// Compute actual and optimal scores for every team across a season.
///
/// Weeks are processed strictly in order; the progress sink is notified after
/// each completed week with (weeks done so far, total weeks). An empty season
/// yields an empty record. Weeks are independent of each other: slot
/// capacities are derived once and each week's lineups are allocated from
/// scratch.
pub async fn run_season<S, P>(
    source: &mut S,
    capacities: &SlotCapacities,
    progress: &P,
) -> anyhow::Result<SeasonRecord>
where
    S: SeasonDataSource + ?Sized,
    P: ProgressSink + ?Sized,
{
    let total = source.total_weeks();
    let mut record = SeasonRecord::new();

    for week in 1..=total {
        let matchups = source
            .matchups(week)
            .await
            .with_context(|| format!("failed to load matchups for week {week}"))?;

        for matchup in &matchups {
            record
                .entry(matchup.home_team.clone())
                .or_default()
                .push(WeeklyScore {
                    actual: matchup.home_score,
                    optimal: optimal_score(&matchup.home_lineup, capacities),
                });
            record
                .entry(matchup.away_team.clone())
                .or_default()
                .push(WeeklyScore {
                    actual: matchup.away_score,
                    optimal: optimal_score(&matchup.away_lineup, capacities),
                });
        }

        info!(week, total, matchups = matchups.len(), "week processed");
        progress.week_complete(week, total);
    }

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimal::derive_settings;
    use crate::roster::{starters_score, Player};
    use crate::slot::Slot;

    struct VecSource {
        weeks: Vec<Vec<Matchup>>,
    }

    #[async_trait]
    impl SeasonDataSource for VecSource {
        fn total_weeks(&self) -> usize {
            self.weeks.len()
        }

        async fn matchups(&mut self, week: usize) -> anyhow::Result<Vec<Matchup>> {
            Ok(self.weeks[week - 1].clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl SeasonDataSource for FailingSource {
        fn total_weeks(&self) -> usize {
            3
        }

        async fn matchups(&mut self, week: usize) -> anyhow::Result<Vec<Matchup>> {
            anyhow::bail!("provider returned 503 for week {week}")
        }
    }

    fn lineup(points: &[f64]) -> Vec<Player> {
        // One QB plus RBs; enough to exercise the allocator without a full roster.
        let mut players = vec![Player::new("QB", Slot::Quarterback, points[0])];
        for (i, &p) in points[1..].iter().enumerate() {
            players.push(
                Player::new(format!("RB{i}"), Slot::RunningBack, p).with_eligible_slots(vec![
                    Slot::RunningBack,
                    Slot::Flex,
                    Slot::Bench,
                ]),
            );
        }
        players
    }

    fn matchup(week_seed: f64) -> Matchup {
        let home_lineup = lineup(&[20.0 + week_seed, 12.0, 10.0]);
        let away_lineup = lineup(&[18.0, 9.0 + week_seed, 8.0]);
        Matchup {
            home_team: Team::new("Home", "H"),
            away_team: Team::new("Away", "A"),
            home_score: starters_score(&home_lineup),
            away_score: starters_score(&away_lineup),
            home_lineup,
            away_lineup,
        }
    }

    fn caps() -> SlotCapacities {
        [(Slot::Quarterback, 1), (Slot::RunningBack, 2)]
            .into_iter()
            .collect()
    }

    #[tokio::test]
    async fn both_sides_recorded_each_week() {
        let mut source = VecSource {
            weeks: vec![vec![matchup(0.0)], vec![matchup(1.0)]],
        };
        let record = run_season(&mut source, &caps(), &NullProgress).await.unwrap();
        assert_eq!(record.len(), 2);
        assert_eq!(record[&Team::new("Home", "H")].len(), 2);
        assert_eq!(record[&Team::new("Away", "A")].len(), 2);
    }

    #[tokio::test]
    async fn optimal_matches_actual_when_all_starters_kept() {
        // Every player fits a slot, so the optimal lineup is the actual one.
        let mut source = VecSource {
            weeks: vec![vec![matchup(0.0)]],
        };
        let record = run_season(&mut source, &caps(), &NullProgress).await.unwrap();
        for scores in record.values() {
            for week in scores {
                assert_eq!(week.optimal, week.actual);
            }
        }
    }

    #[tokio::test]
    async fn empty_season_yields_empty_record() {
        let mut source = VecSource { weeks: vec![] };
        let record = run_season(&mut source, &caps(), &NullProgress).await.unwrap();
        assert!(record.is_empty());
    }

    #[tokio::test]
    async fn week_with_no_matchups_is_skipped_not_fatal() {
        let mut source = VecSource {
            weeks: vec![vec![], vec![matchup(0.0)]],
        };
        let record = run_season(&mut source, &caps(), &NullProgress).await.unwrap();
        assert_eq!(record[&Team::new("Home", "H")].len(), 1);
    }

    #[tokio::test]
    async fn source_failure_propagates() {
        let mut source = FailingSource;
        let err = run_season(&mut source, &caps(), &NullProgress)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("week 1"));
    }

    #[tokio::test]
    async fn progress_reported_once_per_week_in_order() {
        let mut source = VecSource {
            weeks: vec![vec![matchup(0.0)], vec![matchup(1.0)], vec![matchup(2.0)]],
        };
        let (tx, mut rx) = mpsc::channel(8);
        let progress = ChannelProgress::new(tx);
        run_season(&mut source, &caps(), &progress).await.unwrap();
        drop(progress);

        let mut seen = Vec::new();
        while let Some(update) = rx.recv().await {
            seen.push(update);
        }
        assert_eq!(
            seen,
            vec![
                ProgressUpdate { weeks_done: 1, weeks_total: 3 },
                ProgressUpdate { weeks_done: 2, weeks_total: 3 },
                ProgressUpdate { weeks_done: 3, weeks_total: 3 },
            ]
        );
    }

    #[tokio::test]
    async fn channel_progress_drops_updates_when_full() {
        let (tx, mut rx) = mpsc::channel(1);
        let progress = ChannelProgress::new(tx);
        progress.week_complete(1, 2);
        progress.week_complete(2, 2);
        assert_eq!(
            rx.recv().await,
            Some(ProgressUpdate { weeks_done: 1, weeks_total: 2 })
        );
        assert!(rx.try_recv().is_err(), "second update should have been dropped");
    }

    #[tokio::test]
    async fn bench_stars_raise_optimal_above_actual() {
        let home_lineup = vec![
            Player::new("QB", Slot::Quarterback, 15.0),
            Player::new("RB A", Slot::RunningBack, 10.0),
            Player::new("RB B", Slot::RunningBack, 8.0),
            Player::new("Bench Star", Slot::RunningBack, 22.0).with_lineup_slot(Slot::Bench),
        ];
        let away_lineup = lineup(&[18.0, 9.0, 8.0]);
        let m = Matchup {
            home_team: Team::new("Home", "H"),
            away_team: Team::new("Away", "A"),
            home_score: starters_score(&home_lineup),
            away_score: starters_score(&away_lineup),
            home_lineup,
            away_lineup,
        };
        let capacities = derive_settings(&m.home_lineup);
        let mut source = VecSource { weeks: vec![vec![m]] };
        let record = run_season(&mut source, &capacities, &NullProgress).await.unwrap();

        let home = &record[&Team::new("Home", "H")][0];
        assert_eq!(home.actual, 33.0);
        assert_eq!(home.optimal, 47.0, "bench star replaces the weakest back");
    }
}
