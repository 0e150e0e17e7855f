//! Performance benchmarks for rating calculations

use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::sync::Arc;
use tsrate::rating::{
    ExtendedTrueSkillConfig, ExtendedWengLinConfig, PlayerRegistry, RatingCalculator,
    TrueSkillRatingCalculator, WengLinRatingCalculator,
};
use tsrate::types::{MatchRecord, PlayerRating, SetOutcome, SetScore};
use tsrate::RatingEngine;

/// A season of matches between 40 players in 10 clubs
fn create_season(matches: usize) -> Vec<MatchRecord> {
    let start = NaiveDate::from_ymd_opt(2016, 10, 1)
        .and_then(|d| d.and_hms_opt(19, 0, 0))
        .unwrap();
    let player = |i: usize| format!("player_{}", i % 40);
    let club = |i: usize| format!("club_{}", (i % 40) / 4);

    (0..matches)
        .map(|i| {
            let base = (i * 7) % 40;
            let sets = match i % 4 {
                0 => [(6, 0), (6, 0), (0, 0)],
                1 => [(6, 0), (0, 6), (6, 0)],
                2 => [(0, 6), (6, 4), (7, 6)],
                _ => [(4, 6), (3, 6), (0, 0)],
            };
            MatchRecord {
                home_players: [player(base), player(base + 1)],
                away_players: [player(base + 20), player(base + 21)],
                sets: sets.map(|(h, a)| SetScore::new(h, a)),
                played_at: start + Duration::days(i as i64),
                home_club: club(base),
                away_club: club(base + 20),
            }
        })
        .collect()
}

fn seeded_registry(matches: &[MatchRecord], prior: PlayerRating) -> PlayerRegistry {
    let mut registry = PlayerRegistry::new();
    for record in matches {
        for (player, club) in record.participants() {
            registry.discover(player, club, prior);
        }
    }
    registry
}

fn bench_rating_calculations(c: &mut Criterion) {
    let trueskill = TrueSkillRatingCalculator::new(ExtendedTrueSkillConfig::default()).unwrap();
    let weng_lin = WengLinRatingCalculator::new(ExtendedWengLinConfig::default()).unwrap();

    let home = [
        PlayerRating {
            rating: 27.0,
            uncertainty: 6.0,
        },
        PlayerRating {
            rating: 24.0,
            uncertainty: 7.5,
        },
    ];
    let away = [
        PlayerRating {
            rating: 25.0,
            uncertainty: 8.0,
        },
        PlayerRating {
            rating: 22.5,
            uncertainty: 5.0,
        },
    ];

    c.bench_function("trueskill_two_pairs", |b| {
        b.iter(|| black_box(trueskill.rate_teams(&home, &away, SetOutcome::HomeWin)))
    });

    c.bench_function("weng_lin_two_pairs", |b| {
        b.iter(|| black_box(weng_lin.rate_teams(&home, &away, SetOutcome::Draw)))
    });
}

fn bench_season_replay(c: &mut Criterion) {
    let calculator: Arc<dyn RatingCalculator> =
        Arc::new(TrueSkillRatingCalculator::new(ExtendedTrueSkillConfig::default()).unwrap());
    let prior = calculator.get_initial_rating();
    let engine = RatingEngine::new(calculator);
    let season = create_season(500);

    c.bench_function("season_replay_500_matches", |b| {
        b.iter(|| {
            let mut registry = seeded_registry(&season, prior);
            black_box(engine.replay(&season, &mut registry))
        })
    });
}

criterion_group!(benches, bench_rating_calculations, bench_season_replay);
criterion_main!(benches);
