use std::collections::BTreeMap;

use lotbias_data::models::{Draw, Pool, PoolSpec};

use crate::config::{EngineConfig, SignalWeights};
use crate::preset::Preset;
use crate::signals::{compute_signals, SignalMap};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombinedScore {
    pub score: f64,
    pub confidence: f64,
}

/// Table lue seule pendant l'échantillonnage, ordonnée par numéro.
pub type ScoreTable = BTreeMap<u8, CombinedScore>;

/// Ramène les scores dans `[-1, 1]` en divisant par la plus grande valeur absolue.
pub fn normalize(scores: &SignalMap) -> SignalMap {
    let max_abs = scores.values().fold(0.0f64, |acc, v| acc.max(v.abs()));
    let max_abs = if max_abs == 0.0 { 1.0 } else { max_abs };
    scores.iter().map(|(&n, &v)| (n, v / max_abs)).collect()
}

pub struct SignalCombiner {
    pub weights: SignalWeights,
}

impl SignalCombiner {
    pub fn new() -> Self {
        Self {
            weights: SignalWeights::default(),
        }
    }

    pub fn with_weights(weights: SignalWeights) -> Self {
        Self { weights }
    }

    pub fn combine(
        &self,
        short_term: &SignalMap,
        long_term: &SignalMap,
        hot_cold: &SignalMap,
        preset: Preset,
    ) -> ScoreTable {
        if short_term.is_empty() || long_term.is_empty() || hot_cold.is_empty() {
            return ScoreTable::new();
        }

        let short_term = normalize(short_term);
        let long_term = normalize(long_term);
        let hot_cold = normalize(hot_cold);
        let params = preset.params();

        short_term
            .iter()
            .map(|(&n, &st)| {
                let raw = self.weights.short_term * st
                    + self.weights.long_term * long_term.get(&n).copied().unwrap_or(0.0)
                    + self.weights.hotness * hot_cold.get(&n).copied().unwrap_or(0.0);

                // aggressive n'est pas borné, la confiance l'est toujours
                let score = params.dominance.apply(raw);
                let confidence = (score.abs() * params.confidence_damp).min(1.0);

                (n, CombinedScore { score, confidence })
            })
            .collect()
    }
}

impl Default for SignalCombiner {
    fn default() -> Self {
        Self::new()
    }
}

/// Signaux + combinaison pour un pool (principal ou bonus).
pub fn build_score_table(
    draws: &[Draw],
    pool: Pool,
    spec: &PoolSpec,
    preset: Preset,
    config: &EngineConfig,
) -> ScoreTable {
    let signals = compute_signals(draws, pool, spec, config);
    SignalCombiner::with_weights(config.weights).combine(
        &signals.short_term,
        &signals.long_term,
        &signals.hot_cold,
        preset,
    )
}
