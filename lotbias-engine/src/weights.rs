use std::collections::BTreeMap;

use crate::combiner::ScoreTable;
use crate::preset::Preset;

/// Poids d'échantillonnage alignés sur `candidates`.
///
/// `w = exp(score * température)`, multiplié par `1 + bonus` si le candidat a un
/// bonus de paire, puis mélangé avec le poids uniforme 1.0. Tant que le mélange est
/// positif, aucun candidat ne tombe à un poids nul.
pub fn shape_weights(
    table: &ScoreTable,
    candidates: &[u8],
    preset: Preset,
    boosts: Option<&BTreeMap<u8, f64>>,
) -> Vec<f64> {
    let params = preset.params();
    let blend = params.randomness_blend;

    candidates
        .iter()
        .map(|n| {
            let score = table.get(n).map(|s| s.score).unwrap_or(0.0);
            let mut w = (score * params.temperature).exp();
            if let Some(boost) = boosts.and_then(|b| b.get(n)) {
                w *= 1.0 + boost;
            }
            (1.0 - blend) * w + blend
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combiner::CombinedScore;

    fn table(values: &[(u8, f64)]) -> ScoreTable {
        values
            .iter()
            .map(|&(n, score)| (n, CombinedScore { score, confidence: score.abs().min(1.0) }))
            .collect()
    }

    #[test]
    fn test_neutral_score_gives_unit_weight() {
        let t = table(&[(1, 0.0), (2, 0.0)]);
        for preset in Preset::ALL {
            let w = shape_weights(&t, &[1, 2], preset, None);
            assert!(w.iter().all(|&x| (x - 1.0).abs() < 1e-12));
        }
    }

    #[test]
    fn test_balanced_formula() {
        let t = table(&[(1, 0.5), (2, -0.5)]);
        let w = shape_weights(&t, &[2, 1], Preset::Balanced, None);
        let expected_1 = 0.75 * (0.5f64 * 1.2).exp() + 0.25;
        let expected_2 = 0.75 * (-0.5f64 * 1.2).exp() + 0.25;
        assert!((w[0] - expected_2).abs() < 1e-12, "poids alignés sur les candidats");
        assert!((w[1] - expected_1).abs() < 1e-12);
    }

    #[test]
    fn test_boost_multiplies_biased_part() {
        let t = table(&[(1, 0.0), (2, 0.0)]);
        let boosts: BTreeMap<u8, f64> = [(2, 0.5)].into_iter().collect();
        let w = shape_weights(&t, &[1, 2], Preset::Aggressive, Some(&boosts));
        assert!((w[0] - 1.0).abs() < 1e-12);
        assert!((w[1] - (0.9 * 1.5 + 0.1)).abs() < 1e-12);
    }

    #[test]
    fn test_weights_stay_positive_on_underflow() {
        let t = table(&[(1, -1e6)]);
        for preset in Preset::ALL {
            let w = shape_weights(&t, &[1], preset, None);
            assert!(w[0] >= preset.params().randomness_blend);
            assert!(w[0] > 0.0);
        }
    }

    #[test]
    fn test_higher_score_higher_weight() {
        let t = table(&[(1, 0.8), (2, 0.1), (3, -0.4)]);
        for preset in Preset::ALL {
            let w = shape_weights(&t, &[1, 2, 3], preset, None);
            assert!(w[0] > w[1] && w[1] > w[2]);
        }
    }

    #[test]
    fn test_missing_candidate_is_neutral() {
        let t = table(&[(1, 0.8)]);
        let w = shape_weights(&t, &[9], Preset::Balanced, None);
        assert!((w[0] - 1.0).abs() < 1e-12);
    }
}
