use std::{error::Error as StdError, io};

use clap::Parser as _;
use glicko2_duel::{OpponentModel, RatingSystem};
use glicko2_duel_research::{encounter::RawEncounter, player::PlayerIds, replay::Replay};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Copy, Clone, clap::ValueEnum)]
enum Model {
    Paired,
    Reference,
}

impl From<Model> for OpponentModel {
    fn from(model: Model) -> OpponentModel {
        match model {
            Model::Paired => OpponentModel::Paired,
            Model::Reference => OpponentModel::Reference,
        }
    }
}

/// Replays matches from a CSV stream (`first,second,result`) on stdin and
/// writes the final leaderboard as CSV to stdout.
#[derive(clap::Parser)]
struct Opt {
    #[clap(long, default_value = "0.5")]
    tau: f64,
    #[clap(long, default_value = "0.000001")]
    epsilon: f64,
    #[clap(long, default_value = "100")]
    max_iterations: u32,
    #[clap(long, value_enum, default_value = "paired")]
    opponent_model: Model,
    #[clap(long, default_value = "350")]
    initial_deviation: f64,
    /// Never update deviations, only ratings.
    #[clap(long)]
    rating_only: bool,
}

#[derive(Serialize)]
struct Row<'a> {
    player: &'a str,
    rating: f64,
    deviation: f64,
    games: u64,
}

fn main() -> Result<(), Box<dyn StdError>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(io::stderr)
        .init();

    let opt = Opt::parse();

    let rating_system = RatingSystem::builder()
        .tau(opt.tau)
        .epsilon(opt.epsilon)
        .max_iterations(opt.max_iterations)
        .opponent_model(opt.opponent_model.into())
        .default_deviation(opt.initial_deviation)
        .build();
    info!(?rating_system, rating_only = opt.rating_only, "replaying encounters");

    let mut replay = Replay::new(rating_system, opt.rating_only);
    let mut players = PlayerIds::default();
    let mut skipped: u64 = 0;

    let mut reader = csv::Reader::from_reader(io::stdin().lock());
    for encounter in reader.deserialize() {
        let encounter: RawEncounter = encounter?;
        let Some(first_score) = encounter.result.first_score() else {
            skipped += 1;
            continue;
        };
        let first = players.get_or_insert(encounter.first);
        let second = players.get_or_insert(encounter.second);
        replay.encounter(first, second, first_score);
    }

    let mut writer = csv::Writer::from_writer(io::stdout().lock());
    for (player, standing) in replay.table(&players) {
        writer.serialize(Row {
            player,
            rating: standing.rating.rating.into(),
            deviation: standing.rating.deviation.into(),
            games: standing.games,
        })?;
    }
    writer.flush()?;

    info!(
        players = players.len(),
        encounters = replay.total_games(),
        skipped,
        errors = replay.errors(),
        avg_deviance = replay.avg_deviance(),
        "done"
    );

    Ok(())
}
