use glicko2_duel::{OpponentModel, Rating, RatingSystem, Score};
use proptest::prelude::*;

fn rating_system(model: OpponentModel) -> RatingSystem {
    RatingSystem::builder().opponent_model(model).build()
}

fn opponent_model() -> impl Strategy<Value = OpponentModel> {
    prop_oneof![Just(OpponentModel::Paired), Just(OpponentModel::Reference)]
}

fn outcome() -> impl Strategy<Value = Score> {
    prop_oneof![Just(Score::LOSS), Just(Score::DRAW), Just(Score::WIN)]
}

fn change(before: &Rating, after: &Rating) -> f64 {
    f64::from(after.rating - before.rating)
}

proptest! {
    #[test]
    fn draw_between_equals_changes_nothing(
        rating in 0.0..3000.0f64,
        deviation in 30.0..350.0f64,
        model in opponent_model(),
    ) {
        let competitor = Rating::new(rating, deviation);
        let update = rating_system(model)
            .update_ratings(&competitor, &competitor, Score::DRAW)
            .unwrap();
        prop_assert!(change(&competitor, &update.first).abs() < 1e-9);
        prop_assert!(change(&competitor, &update.second).abs() < 1e-9);
    }

    #[test]
    fn bigger_favorite_gains_less(
        rating in 0.0..3000.0f64,
        deviation in 30.0..350.0f64,
        model in opponent_model(),
    ) {
        let rating_system = rating_system(model);
        let winner = Rating::new(rating, deviation);

        let mut previous_gain = f64::INFINITY;
        for gap in (-4..=8).map(|step| f64::from(step) * 100.0) {
            let loser = Rating::new(rating - gap, deviation);
            let update = rating_system.update_ratings(&winner, &loser, Score::WIN).unwrap();
            let gain = change(&winner, &update.first);
            prop_assert!(gain > 0.0);
            prop_assert!(gain < previous_gain, "gap {}: {} >= {}", gap, gain, previous_gain);
            previous_gain = gain;
        }
    }

    #[test]
    fn larger_deviation_moves_rating_further(
        gap in -400.0..400.0f64,
        opponent_deviation in 30.0..350.0f64,
        score in outcome(),
    ) {
        prop_assume!(score != Score::DRAW || gap.abs() > 1.0);

        let rating_system = RatingSystem::new();
        let opponent = Rating::new(1500.0 - gap, opponent_deviation);

        let mut previous = 0.0;
        for deviation in [30.0, 60.0, 100.0, 150.0, 200.0, 250.0, 300.0, 350.0] {
            let subject = Rating::new(1500.0, deviation);
            let update = rating_system.update_ratings(&subject, &opponent, score).unwrap();
            let magnitude = change(&subject, &update.first).abs();
            prop_assert!(magnitude > previous);
            previous = magnitude;
        }
    }

    #[test]
    fn single_match_change_is_bounded(
        rating in 400.0..2600.0f64,
        gap in -400.0..400.0f64,
        deviation in 30.0..100.0f64,
        opponent_deviation in 30.0..350.0f64,
        score in outcome(),
        model in opponent_model(),
    ) {
        let subject = Rating::new(rating, deviation);
        let opponent = Rating::new(rating - gap, opponent_deviation);
        let update = rating_system(model)
            .update_ratings(&subject, &opponent, score)
            .unwrap();
        prop_assert!(change(&subject, &update.first).abs() < 100.0);
    }

    #[test]
    fn deviation_stays_positive(
        rating in 0.0..3000.0f64,
        opponent_rating in 0.0..3000.0f64,
        deviation in 30.0..350.0f64,
        opponent_deviation in 30.0..350.0f64,
        score in outcome(),
        model in opponent_model(),
    ) {
        let update = rating_system(model)
            .update_ratings(
                &Rating::new(rating, deviation),
                &Rating::new(opponent_rating, opponent_deviation),
                score,
            )
            .unwrap();
        prop_assert!(f64::from(update.first.deviation) > 0.0);
        prop_assert!(f64::from(update.second.deviation) > 0.0);
        prop_assert!(update.first.rating.is_finite());
        prop_assert!(update.second.rating.is_finite());
    }
}
