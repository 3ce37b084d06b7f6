use std::collections::BTreeMap;

use lotbias_data::models::{Draw, Pool, PoolSpec};

use crate::config::EngineConfig;

/// Score brut par numéro, domaine = tout le pool.
pub type SignalMap = BTreeMap<u8, f64>;

/// Les trois signaux d'un pool, calculés une fois par invocation.
#[derive(Debug, Clone, Default)]
pub struct PoolSignals {
    pub short_term: SignalMap,
    pub long_term: SignalMap,
    pub hot_cold: SignalMap,
}

pub fn compute_signals(draws: &[Draw], pool: Pool, spec: &PoolSpec, config: &EngineConfig) -> PoolSignals {
    PoolSignals {
        short_term: short_term_signal(draws, pool, spec, config.short_term_window),
        long_term: long_term_signal(draws, pool, spec, config.long_term_window),
        hot_cold: hot_cold_gap_signal(draws, pool, spec),
    }
}

/// Écart de fréquence relatif sur les `window` derniers tirages.
pub fn short_term_signal(draws: &[Draw], pool: Pool, spec: &PoolSpec, window: usize) -> SignalMap {
    let start = draws.len().saturating_sub(window);
    frequency_deviation(&draws[start..], pool, spec)
}

pub fn long_term_signal(draws: &[Draw], pool: Pool, spec: &PoolSpec, window: Option<usize>) -> SignalMap {
    let start = match window {
        Some(w) => draws.len().saturating_sub(w),
        None => 0,
    };
    frequency_deviation(&draws[start..], pool, spec)
}

fn frequency_deviation(draws: &[Draw], pool: Pool, spec: &PoolSpec) -> SignalMap {
    let mut counts = vec![0u32; spec.size()];
    let mut total = 0u32;

    for draw in draws {
        for &n in pool.numbers_from(draw) {
            if spec.contains(n) {
                counts[spec.index_of(n)] += 1;
                total += 1;
            }
        }
    }

    // Fréquence attendue sous tirage uniforme
    let expected = total as f64 / spec.size() as f64;

    spec.numbers()
        .map(|n| {
            let observed = counts[spec.index_of(n)] as f64;
            let score = if expected > 0.0 {
                (observed - expected) / expected
            } else {
                0.0
            };
            (n, score)
        })
        .collect()
}

/// Positif = sorti récemment (chaud), négatif = en retard (froid).
pub fn hot_cold_gap_signal(draws: &[Draw], pool: Pool, spec: &PoolSpec) -> SignalMap {
    if draws.is_empty() {
        return spec.numbers().map(|n| (n, 0.0)).collect();
    }

    let expected_gap = spec.size() as f64 / spec.pick_count.max(1) as f64;
    let mut gaps: Vec<Option<usize>> = vec![None; spec.size()];

    // draws.last() = tirage le plus récent, écart 0
    for (age, draw) in draws.iter().rev().enumerate() {
        for &n in pool.numbers_from(draw) {
            if spec.contains(n) && gaps[spec.index_of(n)].is_none() {
                gaps[spec.index_of(n)] = Some(age);
            }
        }
    }

    spec.numbers()
        .map(|n| {
            let gap = gaps[spec.index_of(n)].unwrap_or(draws.len()) as f64;
            (n, (expected_gap - gap) / expected_gap)
        })
        .collect()
}
