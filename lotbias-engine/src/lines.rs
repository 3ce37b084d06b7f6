use rand::Rng;
use serde::Serialize;

use lotbias_data::models::LotteryProfile;

use crate::bonus::BonusSampler;
use crate::error::LockError;
use crate::sampler::{LineSampler, SampleOutcome};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedLine {
    pub numbers: Vec<u8>,
    /// Vide pour les loteries sans bonus.
    pub bonus: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineRequest {
    pub line_count: usize,
    pub locked: Vec<u8>,
    pub enforce_balance: bool,
    pub use_pairs: bool,
}

impl Default for LineRequest {
    fn default() -> Self {
        Self {
            line_count: 5,
            locked: Vec::new(),
            enforce_balance: true,
            use_pairs: true,
        }
    }
}

/// Pas de doublon, au plus `numbers_per_draw` numéros, tous dans la plage principale.
pub fn validate_locks(locked: &[u8], profile: &LotteryProfile) -> Result<(), LockError> {
    let spec = profile.main_pool();
    if locked.len() > spec.pick_count {
        return Err(LockError::TooMany {
            count: locked.len(),
            max: spec.pick_count,
        });
    }
    for (i, &n) in locked.iter().enumerate() {
        if !spec.contains(n) {
            return Err(LockError::OutOfRange {
                number: n,
                min: spec.min,
                max: spec.max,
            });
        }
        if locked[..i].contains(&n) {
            return Err(LockError::Duplicate(n));
        }
    }
    Ok(())
}

/// Une grille principale puis, le cas échéant, la grille bonus, pour chaque ligne demandée.
pub fn sample_batch(
    main: &LineSampler<'_>,
    bonus: Option<&BonusSampler>,
    line_count: usize,
    rng: &mut impl Rng,
) -> Vec<GeneratedLine> {
    let mut lines = Vec::with_capacity(line_count);
    let mut fallbacks = 0;

    for i in 0..line_count {
        let sampled = main.sample(rng);
        if sampled.outcome == SampleOutcome::ExhaustedFallback {
            fallbacks += 1;
        }
        log::debug!("ligne {} : {:?} en {} tentative(s)", i + 1, sampled.numbers, sampled.attempts);

        let mut numbers = sampled.numbers;
        numbers.sort_unstable();
        let mut bonus_numbers = bonus.map(|b| b.sample(rng)).unwrap_or_default();
        bonus_numbers.sort_unstable();

        lines.push(GeneratedLine {
            numbers,
            bonus: bonus_numbers,
        });
    }

    if fallbacks > 0 {
        log::info!("{} grille(s) sur {} sans équilibre", fallbacks, line_count);
    }
    lines
}
