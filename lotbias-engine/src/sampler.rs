use rand::distr::weighted::WeightedIndex;
use rand::prelude::Distribution;
use rand::{Rng, RngExt};

use lotbias_data::models::PoolSpec;

use crate::combiner::ScoreTable;
use crate::pairs::PairLifts;
use crate::preset::Preset;
use crate::weights::shape_weights;

/// En dessous de cette taille de grille, pas de contrainte d'équilibre.
pub const BALANCE_MIN_SIZE: usize = 6;

/// Tirage pondéré d'un indice. Total nul, négatif ou non fini : choix uniforme.
pub fn weighted_pick(weights: &[f64], rng: &mut impl Rng) -> usize {
    let dist = if weights.iter().all(|w| w.is_finite()) {
        WeightedIndex::new(weights).ok()
    } else {
        None
    };
    match dist {
        Some(dist) => dist.sample(rng),
        None => rng.random_range(0..weights.len()),
    }
}

/// Complète `selected` jusqu'à `count` en retirant les tirés de `remaining`.
/// Les poids sont recalculés à chaque tirage : les bonus de paires dépendent de la sélection courante.
pub fn fill_without_replacement(
    selected: &mut Vec<u8>,
    remaining: &mut Vec<u8>,
    count: usize,
    table: &ScoreTable,
    preset: Preset,
    pairs: Option<&PairLifts>,
    rng: &mut impl Rng,
) {
    let strength = preset.params().pair_strength;

    while selected.len() < count && !remaining.is_empty() {
        let boosts = match pairs {
            Some(lifts) if !selected.is_empty() => Some(lifts.boosts_for(selected, remaining, strength)),
            _ => None,
        };
        let weights = shape_weights(table, remaining, preset, boosts.as_ref());
        let idx = weighted_pick(&weights, rng);
        selected.push(remaining.remove(idx));
    }
}

/// Nombre d'impairs dans `[2, 4]`.
pub fn parity_balanced(numbers: &[u8]) -> bool {
    let odds = numbers.iter().filter(|&&n| n % 2 == 1).count();
    (2..=4).contains(&odds)
}

/// Nombre de numéros `<= (min + max) / 2` dans `[2, 4]`.
pub fn range_balanced(numbers: &[u8], spec: &PoolSpec) -> bool {
    let midpoint = spec.midpoint();
    let low = numbers.iter().filter(|&&n| n as f64 <= midpoint).count();
    (2..=4).contains(&low)
}

pub fn passes_balance(numbers: &[u8], spec: &PoolSpec) -> bool {
    if numbers.len() < BALANCE_MIN_SIZE {
        return true;
    }
    parity_balanced(numbers) && range_balanced(numbers, spec)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleOutcome {
    Accepted,
    /// Budget de tentatives épuisé, la dernière grille est gardée telle quelle.
    ExhaustedFallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SampledLine {
    pub numbers: Vec<u8>,
    pub attempts: usize,
    pub outcome: SampleOutcome,
}

/// Tirage séquentiel d'une grille principale, avec reprises si l'équilibre échoue.
pub struct LineSampler<'a> {
    pub table: &'a ScoreTable,
    pub pairs: Option<&'a PairLifts>,
    pub spec: PoolSpec,
    pub preset: Preset,
    pub locked: &'a [u8],
    pub enforce_balance: bool,
    pub max_attempts: usize,
}

impl LineSampler<'_> {
    pub fn sample(&self, rng: &mut impl Rng) -> SampledLine {
        let max_attempts = self.max_attempts.max(1);
        let mut numbers = Vec::new();

        for attempt in 1..=max_attempts {
            numbers = self.attempt(rng);
            if !self.enforce_balance || passes_balance(&numbers, &self.spec) {
                return SampledLine {
                    numbers,
                    attempts: attempt,
                    outcome: SampleOutcome::Accepted,
                };
            }
        }

        log::warn!(
            "équilibre non atteint après {} tentatives, dernière grille conservée : {:?}",
            max_attempts,
            numbers
        );
        SampledLine {
            numbers,
            attempts: max_attempts,
            outcome: SampleOutcome::ExhaustedFallback,
        }
    }

    fn attempt(&self, rng: &mut impl Rng) -> Vec<u8> {
        let mut selected: Vec<u8> = Vec::with_capacity(self.spec.pick_count);
        for &n in self.locked {
            if !selected.contains(&n) {
                selected.push(n);
            }
        }
        let mut remaining: Vec<u8> = self
            .spec
            .numbers()
            .filter(|n| !selected.contains(n))
            .collect();

        fill_without_replacement(
            &mut selected,
            &mut remaining,
            self.spec.pick_count,
            self.table,
            self.preset,
            self.pairs,
            rng,
        );
        selected
    }
}
