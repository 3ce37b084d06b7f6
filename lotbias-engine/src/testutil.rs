use chrono::{Days, NaiveDate};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use lotbias_data::history::History;
use lotbias_data::models::{Draw, LotteryProfile, PoolSpec};

fn day(i: usize) -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1)
        .unwrap()
        .checked_add_days(Days::new(i as u64))
        .unwrap()
}

pub fn draw_of(numbers: &[u8]) -> Draw {
    Draw {
        date: day(0),
        lottery: "test".to_string(),
        numbers: numbers.to_vec(),
        bonus: Vec::new(),
    }
}

fn pick(spec: &PoolSpec, rng: &mut StdRng) -> Vec<u8> {
    let mut pool: Vec<u8> = spec.numbers().collect();
    pool.shuffle(rng);
    pool.truncate(spec.pick_count);
    pool
}

/// Historique synthétique valide pour `profile`.
pub fn make_history(profile: &LotteryProfile, n: usize, with_bonus: bool, seed: u64) -> History {
    let mut rng = StdRng::seed_from_u64(seed);
    let draws = (0..n)
        .map(|i| {
            let numbers = pick(&profile.main_pool(), &mut rng);
            let bonus = match profile.bonus_pool() {
                Some(spec) if with_bonus => pick(&spec, &mut rng),
                _ => Vec::new(),
            };
            Draw {
                date: day(i),
                lottery: profile.id.to_string(),
                numbers,
                bonus,
            }
        })
        .collect();
    History::new(draws)
}
