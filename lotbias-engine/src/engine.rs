use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use lotbias_data::history::History;
use lotbias_data::models::{profile, Draw, LotteryProfile, Pool};

use crate::bonus::BonusSampler;
use crate::combiner::{build_score_table, ScoreTable};
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::lines::{sample_batch, validate_locks, GeneratedLine, LineRequest};
use crate::pairs::PairLifts;
use crate::preset::Preset;
use crate::ranking::{rank_numbers, NumberPick};
use crate::sampler::LineSampler;

#[derive(Debug, Clone, Default)]
pub struct BiasEngine {
    pub config: EngineConfig,
}

impl BiasEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Sans graine, le générateur est initialisé depuis l'entropie du système.
    pub fn generate_lines(
        &self,
        history: &History,
        lottery: &str,
        preset: &str,
        request: &LineRequest,
        seed: Option<u64>,
    ) -> EngineResult<Vec<GeneratedLine>> {
        let preset: Preset = preset.parse()?;
        let mut rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        self.generate_lines_with_rng(history, lottery, preset, request, &mut rng)
    }

    pub fn generate_lines_with_rng(
        &self,
        history: &History,
        lottery: &str,
        preset: Preset,
        request: &LineRequest,
        rng: &mut impl Rng,
    ) -> EngineResult<Vec<GeneratedLine>> {
        let (profile, draws) = resolve(history, lottery)?;
        validate_locks(&request.locked, profile)?;

        let spec = profile.main_pool();
        let table = build_score_table(&draws, Pool::Main, &spec, preset, &self.config);
        let pairs = request
            .use_pairs
            .then(|| PairLifts::estimate(&draws, Pool::Main, &spec));
        let bonus = profile
            .bonus_pool()
            .map(|bonus_spec| BonusSampler::new(&draws, bonus_spec, preset, &self.config));
        log::debug!(
            "{} : {} tirages, {} paires, preset {}",
            lottery,
            draws.len(),
            pairs.as_ref().map(|p| p.len()).unwrap_or(0),
            preset
        );
        if bonus.as_ref().is_some_and(BonusSampler::is_uniform) {
            log::info!("{} : pas d'historique bonus, bonus tirés uniformément", profile.name);
        }

        let sampler = LineSampler {
            table: &table,
            pairs: pairs.as_ref(),
            spec,
            preset,
            locked: &request.locked,
            enforce_balance: request.enforce_balance,
            max_attempts: self.config.balance_attempts,
        };
        let lines = sample_batch(&sampler, bonus.as_ref(), request.line_count, rng);
        log::info!("{} grille(s) générée(s) pour {}", lines.len(), profile.name);
        Ok(lines)
    }

    /// Table de scores du pool principal, pour le mode numéros.
    pub fn score_numbers(&self, history: &History, lottery: &str, preset: Preset) -> EngineResult<ScoreTable> {
        let (profile, draws) = resolve(history, lottery)?;
        Ok(build_score_table(&draws, Pool::Main, &profile.main_pool(), preset, &self.config))
    }

    pub fn predict_numbers(
        &self,
        history: &History,
        lottery: &str,
        preset: Preset,
        count: usize,
        min_confidence: f64,
    ) -> EngineResult<Vec<NumberPick>> {
        let table = self.score_numbers(history, lottery, preset)?;
        Ok(rank_numbers(&table, count, min_confidence))
    }
}

fn resolve(history: &History, lottery: &str) -> EngineResult<(&'static LotteryProfile, Vec<Draw>)> {
    let profile = profile(lottery).ok_or_else(|| EngineError::UnknownLottery(lottery.to_string()))?;
    let draws = history.for_lottery(lottery);
    if draws.is_empty() {
        return Err(EngineError::EmptyHistory(lottery.to_string()));
    }
    Ok((profile, draws))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LockError;
    use crate::sampler::passes_balance;
    use crate::testutil::make_history;

    fn engine() -> BiasEngine {
        BiasEngine::default()
    }

    fn request(line_count: usize, locked: &[u8]) -> LineRequest {
        LineRequest {
            line_count,
            locked: locked.to_vec(),
            ..LineRequest::default()
        }
    }

    fn lotto_history() -> History {
        make_history(profile("lotto_6_49").unwrap(), 120, false, 1)
    }

    #[test]
    fn test_same_seed_same_batch() {
        let history = lotto_history();
        let req = request(8, &[]);
        let a = engine().generate_lines(&history, "lotto_6_49", "balanced", &req, Some(2024)).unwrap();
        let b = engine().generate_lines(&history, "lotto_6_49", "balanced", &req, Some(2024)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 8);
    }

    #[test]
    fn test_same_seed_same_batch_with_bonus() {
        let history = make_history(profile("euromillions").unwrap(), 80, true, 21);
        let req = request(10, &[]);
        let a = engine().generate_lines(&history, "euromillions", "aggressive", &req, Some(99)).unwrap();
        let b = engine().generate_lines(&history, "euromillions", "aggressive", &req, Some(99)).unwrap();
        assert_eq!(a, b, "même graine, mêmes grilles et mêmes bonus");
        assert!(a.iter().all(|l| l.bonus.len() == 2));

        let c = engine().generate_lines(&history, "euromillions", "aggressive", &req, Some(100)).unwrap();
        assert_ne!(a, c, "une autre graine doit changer le lot");
    }

    #[test]
    fn test_lines_shape_and_range() {
        let history = lotto_history();
        for preset in ["conservative", "balanced", "aggressive"] {
            let lines = engine()
                .generate_lines(&history, "lotto_6_49", preset, &request(10, &[]), Some(3))
                .unwrap();
            for line in &lines {
                assert_eq!(line.numbers.len(), 6);
                assert!(line.numbers.windows(2).all(|w| w[0] < w[1]), "non trié ou doublon : {:?}", line.numbers);
                assert!(line.numbers.iter().all(|&n| (1..=49).contains(&n)));
                assert!(line.bonus.is_empty());
            }
        }
    }

    #[test]
    fn test_balance_enforced_on_lotto() {
        let history = lotto_history();
        let spec = profile("lotto_6_49").unwrap().main_pool();
        let lines = engine()
            .generate_lines(&history, "lotto_6_49", "aggressive", &request(20, &[]), Some(11))
            .unwrap();
        assert!(lines.iter().all(|l| passes_balance(&l.numbers, &spec)));
    }

    #[test]
    fn test_locked_numbers_kept() {
        let history = lotto_history();
        let lines = engine()
            .generate_lines(&history, "lotto_6_49", "balanced", &request(10, &[7, 33]), Some(5))
            .unwrap();
        for line in &lines {
            assert!(line.numbers.contains(&7) && line.numbers.contains(&33), "{:?}", line.numbers);
        }
    }

    #[test]
    fn test_fully_locked_line() {
        let history = lotto_history();
        let mut req = request(2, &[40, 2, 17, 9, 28, 33]);
        req.use_pairs = false;
        let lines = engine().generate_lines(&history, "lotto_6_49", "balanced", &req, Some(5)).unwrap();
        assert!(lines.iter().all(|l| l.numbers == vec![2, 9, 17, 28, 33, 40]));
    }

    #[test]
    fn test_bonus_lottery_with_history() {
        let p = profile("euromillions").unwrap();
        let history = make_history(p, 80, true, 9);
        let lines = engine()
            .generate_lines(&history, "euromillions", "balanced", &request(10, &[]), Some(1))
            .unwrap();
        for line in &lines {
            assert_eq!(line.numbers.len(), 5);
            assert_eq!(line.bonus.len(), 2);
            assert!(line.bonus[0] < line.bonus[1]);
            assert!(line.bonus.iter().all(|&b| (1..=12).contains(&b)));
        }
    }

    #[test]
    fn test_bonus_lottery_without_bonus_history() {
        let p = profile("powerball").unwrap();
        let history = make_history(p, 40, false, 9);
        let lines = engine()
            .generate_lines(&history, "powerball", "aggressive", &request(10, &[]), Some(1))
            .unwrap();
        for line in &lines {
            assert_eq!(line.numbers.len(), 5);
            assert_eq!(line.bonus.len(), 1);
            assert!((1..=26).contains(&line.bonus[0]));
        }
    }

    #[test]
    fn test_errors_in_order() {
        let history = lotto_history();
        let req = request(1, &[60]);

        let err = engine().generate_lines(&history, "keno", "wild", &req, Some(1)).unwrap_err();
        assert_eq!(err, EngineError::UnknownPreset("wild".into()));

        let err = engine().generate_lines(&history, "keno", "balanced", &req, Some(1)).unwrap_err();
        assert_eq!(err, EngineError::UnknownLottery("keno".into()));

        let err = engine().generate_lines(&history, "uk_lotto", "balanced", &req, Some(1)).unwrap_err();
        assert_eq!(err, EngineError::EmptyHistory("uk_lotto".into()));

        let err = engine().generate_lines(&history, "lotto_6_49", "balanced", &req, Some(1)).unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidLocks(LockError::OutOfRange { number: 60, min: 1, max: 49 })
        );
    }

    #[test]
    fn test_zero_lines() {
        let history = lotto_history();
        let lines = engine()
            .generate_lines(&history, "lotto_6_49", "balanced", &request(0, &[]), Some(1))
            .unwrap();
        assert!(lines.is_empty());
    }

    #[test]
    fn test_predict_numbers() {
        let history = lotto_history();
        let picks = engine()
            .predict_numbers(&history, "lotto_6_49", Preset::Balanced, 10, 0.0)
            .unwrap();
        assert_eq!(picks.len(), 10);
        assert!(picks.windows(2).all(|w| w[0].score >= w[1].score));
        assert!(picks.iter().all(|p| (0.0..=100.0).contains(&p.confidence)));

        let table = engine().score_numbers(&history, "lotto_6_49", Preset::Balanced).unwrap();
        assert_eq!(table.len(), 49);
    }

    #[test]
    fn test_custom_config_attempts() {
        let config = EngineConfig {
            balance_attempts: 1,
            ..EngineConfig::default()
        };
        let history = lotto_history();
        let lines = BiasEngine::new(config)
            .generate_lines(&history, "lotto_6_49", "balanced", &request(5, &[]), Some(8))
            .unwrap();
        assert_eq!(lines.len(), 5);
    }
}
