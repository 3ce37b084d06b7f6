use rand::Rng;
use rand::seq::SliceRandom;

use lotbias_data::models::{Draw, Pool, PoolSpec};

use crate::combiner::{build_score_table, ScoreTable};
use crate::config::EngineConfig;
use crate::preset::Preset;
use crate::sampler::fill_without_replacement;

pub fn has_bonus_history(draws: &[Draw]) -> bool {
    draws.iter().any(|d| !d.bonus.is_empty())
}

/// Mélange puis garde les `pick_count` premiers.
pub fn uniform_sample(spec: &PoolSpec, rng: &mut impl Rng) -> Vec<u8> {
    let mut pool: Vec<u8> = spec.numbers().collect();
    pool.shuffle(rng);
    pool.truncate(spec.pick_count);
    pool
}

/// Échantillonneur du pool bonus. La table de scores ne dépend que de l'historique
/// et du preset : elle est construite une fois puis réutilisée pour chaque grille.
pub struct BonusSampler {
    spec: PoolSpec,
    preset: Preset,
    table: Option<ScoreTable>,
}

impl BonusSampler {
    pub fn new(draws: &[Draw], spec: PoolSpec, preset: Preset, config: &EngineConfig) -> Self {
        let table = has_bonus_history(draws)
            .then(|| build_score_table(draws, Pool::Bonus, &spec, preset, config));
        if table.is_none() {
            log::debug!("pas d'historique bonus, tirage uniforme sur {}-{}", spec.min, spec.max);
        }
        Self { spec, preset, table }
    }

    pub fn is_uniform(&self) -> bool {
        self.table.is_none()
    }

    /// Pas de bonus de paires, pas d'équilibre, pas de reprise.
    pub fn sample(&self, rng: &mut impl Rng) -> Vec<u8> {
        match &self.table {
            None => uniform_sample(&self.spec, rng),
            Some(table) => {
                let mut selected = Vec::with_capacity(self.spec.pick_count);
                let mut remaining: Vec<u8> = self.spec.numbers().collect();
                fill_without_replacement(
                    &mut selected,
                    &mut remaining,
                    self.spec.pick_count,
                    table,
                    self.preset,
                    None,
                    rng,
                );
                selected
            }
        }
    }
}
