use glicko2_duel::{deviance, Rating, RatingSystem, Score};
use ordered_float::OrderedFloat;
use tracing::warn;

use crate::player::{ByPlayerId, PlayerId, PlayerIds};

#[derive(Debug, Clone)]
pub struct Standing {
    pub rating: Rating,
    pub games: u64,
}

/// Sequentially applies encounters to an in-memory leaderboard.
pub struct Replay {
    rating_system: RatingSystem,
    rating_only: bool,
    leaderboard: ByPlayerId<Standing>,
    total_deviance: f64,
    total_games: u64,
    errors: u64,
}

impl Replay {
    /// With `rating_only`, deviations never change from their initial value,
    /// like a caller that persists only the new ratings.
    pub fn new(rating_system: RatingSystem, rating_only: bool) -> Replay {
        Replay {
            rating_system,
            rating_only,
            leaderboard: ByPlayerId::default(),
            total_deviance: 0.0,
            total_games: 0,
            errors: 0,
        }
    }

    fn rating(&self, player: PlayerId) -> Rating {
        self.leaderboard
            .get(player)
            .map(|standing| standing.rating.clone())
            .unwrap_or_else(|| self.rating_system.default_rating())
    }

    fn games(&self, player: PlayerId) -> u64 {
        self.leaderboard.get(player).map_or(0, |standing| standing.games)
    }

    pub fn encounter(&mut self, first: PlayerId, second: PlayerId, first_score: Score) {
        let first_rating = self.rating(first);
        let second_rating = self.rating(second);

        self.total_deviance += deviance(
            self.rating_system
                .expected_score(&first_rating, &second_rating),
            first_score,
        );
        self.total_games += 1;

        let update = match self
            .rating_system
            .update_ratings(&first_rating, &second_rating, first_score)
        {
            Ok(update) => update,
            Err(err) => {
                warn!(?first, ?second, %err, "rating update failed, keeping ratings");
                self.errors += 1;
                return;
            }
        };

        let (mut first_new, mut second_new) = (update.first, update.second);
        if self.rating_only {
            first_new.deviation = first_rating.deviation;
            second_new.deviation = second_rating.deviation;
        }

        let first_games = self.games(first) + 1;
        let second_games = self.games(second) + 1;
        self.leaderboard.set(
            first,
            Standing {
                rating: first_new,
                games: first_games,
            },
        );
        self.leaderboard.set(
            second,
            Standing {
                rating: second_new,
                games: second_games,
            },
        );
    }

    pub fn avg_deviance(&self) -> f64 {
        self.total_deviance / self.total_games as f64
    }

    pub fn total_games(&self) -> u64 {
        self.total_games
    }

    pub fn errors(&self) -> u64 {
        self.errors
    }

    pub fn standing(&self, player: PlayerId) -> Option<&Standing> {
        self.leaderboard.get(player)
    }

    /// Standings sorted by rating, best first.
    pub fn table<'a>(&'a self, players: &'a PlayerIds) -> Vec<(&'a str, &'a Standing)> {
        let mut table: Vec<_> = self
            .leaderboard
            .iter()
            .map(|(player, standing)| (players.name(player), standing))
            .collect();
        table.sort_by_key(|(_, standing)| OrderedFloat(-f64::from(standing.rating.rating)));
        table
    }
}
