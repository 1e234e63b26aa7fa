// hindsight entry point.
//
// Startup sequence:
// 1. Initialize tracing
// 2. Load config
// 3. Open the CSV season source
// 4. Derive slot capacities from the first matchup
// 5. Run the season with a progress channel
// 6. Print standings and award winners

use hindsight::awards;
use hindsight::config;
use hindsight::optimal;
use hindsight::season::{self, SeasonDataSource};
use hindsight::source::CsvSeasonSource;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;
    info!("hindsight starting up");

    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: league={}, season={}, {} weeks",
        config.league.name, config.league.season, config.league.weeks
    );

    let mut source = CsvSeasonSource::new(&config.league.data_dir, config.league.weeks);

    // Slot capacities are derived once, from the first matchup's home roster,
    // and assumed stable for the whole season.
    let sample_week = source
        .matchups(1)
        .await
        .context("failed to load the sample week for settings derivation")?;
    let sample_roster = sample_week
        .first()
        .map(|m| m.home_lineup.clone())
        .unwrap_or_default();
    let capacities = optimal::derive_settings(&sample_roster);
    if capacities.total_slots() == 0 {
        warn!("derived slot capacities are empty; every optimal score will be zero");
    }
    info!("Derived {} starting slots from the sample roster", capacities.total_slots());

    // Progress updates arrive on a channel and are logged as they come in.
    let (tx, mut rx) = mpsc::channel::<season::ProgressUpdate>(16);
    let progress_task = tokio::spawn(async move {
        while let Some(update) = rx.recv().await {
            info!("Processed week {}/{}", update.weeks_done, update.weeks_total);
        }
    });

    let progress = season::ChannelProgress::new(tx);
    let record = season::run_season(&mut source, &capacities, &progress)
        .await
        .context("season processing failed")?;
    drop(progress);
    let _ = progress_task.await;

    println!("\nTotal suboptimality over the course of a season:");
    for (i, (team, total)) in awards::suboptimality_standings(&record).iter().enumerate() {
        println!("{}. {} points left on the bench: {:.2}", i + 1, team.name, total);
    }

    println!("\nOptimal points for over the course of a season:");
    for (i, (team, total)) in awards::optimal_total_standings(&record).iter().enumerate() {
        println!("{}. {} optimal total score: {:.2}", i + 1, team.name, total);
    }

    if let Some(summary) = awards::rank_awards(&record) {
        let coach = &summary.coach_of_the_year;
        let gm = &summary.gm_of_the_year;
        println!("\nAWARDS");
        println!("------");
        println!(
            "Coach of the year: {}'s coach ({}), whose starters scored just {:.2} less than optimal lineups.",
            coach.team.name, coach.team.owner, coach.total
        );
        println!(
            "GM of the year: {}'s GM ({}), whose best lineups would have scored {:.2} points in the {} season.",
            gm.team.name, gm.team.owner, gm.total, config.league.season
        );
    }

    Ok(())
}

/// Initialize tracing to stderr, keeping stdout clean for the standings.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hindsight=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
