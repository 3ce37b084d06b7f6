use std::collections::BTreeMap;

use lotbias_data::models::{Draw, Pool, PoolSpec};

/// Plafond de l'excès d'association, empêche une paire de dominer.
pub const PAIR_LIFT_CAP: f64 = 2.0;
const LIFT_EPSILON: f64 = 1e-9;

fn canonical(a: u8, b: u8) -> (u8, u8) {
    if a < b { (a, b) } else { (b, a) }
}

/// Excès de co-occurrence `max(0, lift - 1)` par paire observée, clé `(a, b)` avec `a < b`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PairLifts {
    lifts: BTreeMap<(u8, u8), f64>,
}

impl PairLifts {
    pub fn estimate(draws: &[Draw], pool: Pool, spec: &PoolSpec) -> Self {
        let total_draws = draws.len();
        if total_draws == 0 {
            return Self::default();
        }

        // Apparitions par tirage (et non par occurrence)
        let mut indiv = vec![0u32; spec.size()];
        let mut pair_counts: BTreeMap<(u8, u8), u32> = BTreeMap::new();

        for draw in draws {
            let mut unique: Vec<u8> = pool
                .numbers_from(draw)
                .iter()
                .copied()
                .filter(|&n| spec.contains(n))
                .collect();
            unique.sort_unstable();
            unique.dedup();

            for &n in &unique {
                indiv[spec.index_of(n)] += 1;
            }
            for (i, &a) in unique.iter().enumerate() {
                for &b in &unique[i + 1..] {
                    *pair_counts.entry((a, b)).or_insert(0) += 1;
                }
            }
        }

        let t = total_draws as f64;
        let lifts = pair_counts
            .into_iter()
            .map(|((a, b), observed)| {
                let pa = indiv[spec.index_of(a)] as f64 / t;
                let pb = indiv[spec.index_of(b)] as f64 / t;
                let expected = t * pa * pb;
                let lift = observed as f64 / (expected + LIFT_EPSILON);
                let excess = (lift - 1.0).clamp(0.0, PAIR_LIFT_CAP);
                ((a, b), excess)
            })
            .collect();

        Self { lifts }
    }

    /// Paire jamais observée : 0.
    pub fn get(&self, a: u8, b: u8) -> f64 {
        self.lifts.get(&canonical(a, b)).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.lifts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lifts.is_empty()
    }

    /// Bonus par candidat : somme des excès avec les numéros déjà choisis, pondérée par `strength`.
    pub fn boosts_for(&self, selected: &[u8], candidates: &[u8], strength: f64) -> BTreeMap<u8, f64> {
        candidates
            .iter()
            .filter_map(|&c| {
                let total: f64 = selected.iter().map(|&s| self.get(s, c)).sum();
                (total > 0.0).then_some((c, total * strength))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{draw_of, make_history};
    use lotbias_data::models::profile;

    fn spec() -> PoolSpec {
        PoolSpec { min: 1, max: 10, pick_count: 3 }
    }

    #[test]
    fn test_empty_history() {
        assert!(PairLifts::estimate(&[], Pool::Main, &spec()).is_empty());
    }

    #[test]
    fn test_lift_values() {
        // 1 et 2 toujours ensemble sur 2 tirages sur 4
        let draws = vec![
            draw_of(&[1, 2, 3]),
            draw_of(&[1, 2, 4]),
            draw_of(&[5, 6, 7]),
            draw_of(&[8, 9, 10]),
        ];
        let lifts = PairLifts::estimate(&draws, Pool::Main, &spec());
        // p(1) = p(2) = 0.5, attendu = 4 * 0.25 = 1, observé = 2, lift = 2
        assert!((lifts.get(1, 2) - 1.0).abs() < 1e-6);
        // p(1) = 0.5, p(3) = 0.25, attendu = 0.5, observé = 1, lift = 2
        assert!((lifts.get(1, 3) - 1.0).abs() < 1e-6);
        assert_eq!(lifts.get(1, 5), 0.0);
    }

    #[test]
    fn test_lift_capped() {
        // un seul tirage sur beaucoup : lift élevé mais plafonné
        let mut draws = vec![draw_of(&[1, 2, 3])];
        for _ in 0..9 {
            draws.push(draw_of(&[4, 5, 6]));
        }
        let lifts = PairLifts::estimate(&draws, Pool::Main, &spec());
        assert!((lifts.get(1, 2) - PAIR_LIFT_CAP).abs() < 1e-12);
        // p(4) = p(5) = 0.9 : attendu 8.1, observé 9
        assert!((lifts.get(4, 5) - (9.0 / 8.1 - 1.0)).abs() < 1e-6);
    }

    #[test]
    fn test_symmetry_and_bounds() {
        let p = profile("lotto_6_49").unwrap();
        let history = make_history(p, 150, false, 7);
        let lifts = PairLifts::estimate(history.draws(), Pool::Main, &p.main_pool());
        assert!(!lifts.is_empty());
        for (&(a, b), &v) in &lifts.lifts {
            assert!(a < b, "clé non canonique ({}, {})", a, b);
            assert!((0.0..=PAIR_LIFT_CAP).contains(&v), "excès {} hors bornes", v);
            assert_eq!(lifts.get(a, b), lifts.get(b, a));
        }
    }

    #[test]
    fn test_out_of_range_ignored() {
        let draws = vec![draw_of(&[1, 2, 42])];
        let lifts = PairLifts::estimate(&draws, Pool::Main, &spec());
        assert_eq!(lifts.len(), 1);
        assert_eq!(lifts.get(2, 42), 0.0);
    }

    #[test]
    fn test_boosts_for_selected() {
        let draws = vec![
            draw_of(&[1, 2, 3]),
            draw_of(&[1, 2, 4]),
            draw_of(&[5, 6, 7]),
            draw_of(&[8, 9, 10]),
        ];
        let lifts = PairLifts::estimate(&draws, Pool::Main, &spec());
        let boosts = lifts.boosts_for(&[1], &[2, 3, 5], 0.5);
        assert!((boosts[&2] - 0.5).abs() < 1e-6);
        assert!((boosts[&3] - 0.5).abs() < 1e-6);
        assert!(!boosts.contains_key(&5));

        let summed = lifts.boosts_for(&[1, 2], &[3], 1.0);
        assert!((summed[&3] - (lifts.get(1, 3) + lifts.get(2, 3))).abs() < 1e-12);
        assert!(lifts.boosts_for(&[], &[2, 3], 1.0).is_empty());
    }
}
