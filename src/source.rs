// CSV-backed season data source.
//
// One file per week (`week_1.csv`, `week_2.csv`, ...), one row per rostered
// player, grouped into matchups by a matchup id. Actual scores are the sums
// of each side's started players, the same totals a league report shows.

use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::roster::{starters_score, Matchup, Player, Team};
use crate::season::SeasonDataSource;
use crate::slot::Slot;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("week file not found: {}", path.display())]
    WeekFileNotFound { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("week {week}: unknown position code `{code}` for player {player}")]
    UnknownPosition {
        week: usize,
        code: String,
        player: String,
    },

    #[error("week {week}: unknown lineup slot `{code}` for player {player}")]
    UnknownLineupSlot {
        week: usize,
        code: String,
        player: String,
    },

    #[error("week {week}: matchup {matchup} has side `{side}` (expected `home` or `away`)")]
    UnknownSide {
        week: usize,
        matchup: u32,
        side: String,
    },

    #[error("week {week}: matchup {matchup} is missing its {side} roster")]
    MissingSide {
        week: usize,
        matchup: u32,
        side: &'static str,
    },
}

/// Raw row shape of the week files.
#[derive(Debug, Deserialize)]
struct LineupRow {
    matchup: u32,
    side: String,
    team: String,
    owner: String,
    player: String,
    position: String,
    lineup_slot: String,
    /// Pipe-separated slot codes in eligibility order, e.g. "RB|RB/WR/TE|BE|IR".
    eligible: String,
    points: f64,
}

#[derive(Default)]
struct SideRoster {
    team: Option<Team>,
    players: Vec<Player>,
}

/// Season source reading week CSV files from a directory.
pub struct CsvSeasonSource {
    data_dir: PathBuf,
    weeks: usize,
}

impl CsvSeasonSource {
    pub fn new(data_dir: impl Into<PathBuf>, weeks: usize) -> Self {
        CsvSeasonSource {
            data_dir: data_dir.into(),
            weeks,
        }
    }

    fn week_path(&self, week: usize) -> PathBuf {
        self.data_dir.join(format!("week_{week}.csv"))
    }

    fn load_week(&self, week: usize) -> Result<Vec<Matchup>, SourceError> {
        let path = self.week_path(week);
        if !path.exists() {
            return Err(SourceError::WeekFileNotFound { path });
        }

        let mut reader =
            csv::Reader::from_path(&path).map_err(|e| SourceError::Csv {
                path: path.clone(),
                source: e,
            })?;

        // Matchup id -> (home, away) rosters, ordered by id.
        let mut matchups: BTreeMap<u32, (SideRoster, SideRoster)> = BTreeMap::new();

        for result in reader.deserialize() {
            let row: LineupRow = result.map_err(|e| SourceError::Csv {
                path: path.clone(),
                source: e,
            })?;
            let player = row_to_player(&row, week)?;

            let entry = matchups.entry(row.matchup).or_default();
            let side = match row.side.as_str() {
                "home" => &mut entry.0,
                "away" => &mut entry.1,
                other => {
                    return Err(SourceError::UnknownSide {
                        week,
                        matchup: row.matchup,
                        side: other.to_string(),
                    })
                }
            };
            side.team.get_or_insert_with(|| Team::new(row.team.clone(), row.owner.clone()));
            side.players.push(player);
        }

        matchups
            .into_iter()
            .map(|(id, (home, away))| {
                let home_team = home.team.ok_or(SourceError::MissingSide {
                    week,
                    matchup: id,
                    side: "home",
                })?;
                let away_team = away.team.ok_or(SourceError::MissingSide {
                    week,
                    matchup: id,
                    side: "away",
                })?;
                Ok(Matchup {
                    home_team,
                    away_team,
                    home_score: starters_score(&home.players),
                    away_score: starters_score(&away.players),
                    home_lineup: home.players,
                    away_lineup: away.players,
                })
            })
            .collect()
    }
}

fn row_to_player(row: &LineupRow, week: usize) -> Result<Player, SourceError> {
    let position =
        Slot::from_code(&row.position).ok_or_else(|| SourceError::UnknownPosition {
            week,
            code: row.position.clone(),
            player: row.player.clone(),
        })?;
    let lineup_slot =
        Slot::from_code(&row.lineup_slot).ok_or_else(|| SourceError::UnknownLineupSlot {
            week,
            code: row.lineup_slot.clone(),
            player: row.player.clone(),
        })?;

    Ok(Player {
        name: row.player.clone(),
        position,
        lineup_slot,
        points: row.points,
        eligible_slots: parse_eligible(&row.eligible),
    })
}

/// Parse a pipe-separated eligibility list, preserving order. Codes we do not
/// recognize are dropped: an unknown slot can never have capacity, so it
/// would be skipped during placement anyway.
fn parse_eligible(eligible: &str) -> Vec<Slot> {
    eligible
        .split('|')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .filter_map(Slot::from_code)
        .collect()
}

#[async_trait]
impl SeasonDataSource for CsvSeasonSource {
    fn total_weeks(&self) -> usize {
        self.weeks
    }

    async fn matchups(&mut self, week: usize) -> anyhow::Result<Vec<Matchup>> {
        Ok(self.load_week(week)?)
    }
}
