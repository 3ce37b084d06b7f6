use std::ops::RangeInclusive;

use anyhow::{bail, Result};
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct Draw {
    pub date: NaiveDate,
    pub lottery: String,
    pub numbers: Vec<u8>,
    pub bonus: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pool {
    Main,
    Bonus,
}

impl Pool {
    pub fn numbers_from<'a>(&self, draw: &'a Draw) -> &'a [u8] {
        match self {
            Pool::Main => &draw.numbers,
            Pool::Bonus => &draw.bonus,
        }
    }
}

/// Plage fermée `[min, max]` d'un pool et nombre de numéros tirés.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSpec {
    pub min: u8,
    pub max: u8,
    pub pick_count: usize,
}

impl PoolSpec {
    pub fn size(&self) -> usize {
        (self.max - self.min) as usize + 1
    }

    pub fn contains(&self, n: u8) -> bool {
        self.min <= n && n <= self.max
    }

    pub fn numbers(&self) -> RangeInclusive<u8> {
        self.min..=self.max
    }

    pub fn index_of(&self, n: u8) -> usize {
        (n - self.min) as usize
    }

    pub fn midpoint(&self) -> f64 {
        (self.min as f64 + self.max as f64) / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LotteryProfile {
    pub id: &'static str,
    pub name: &'static str,
    pub min: u8,
    pub max: u8,
    pub numbers_per_draw: usize,
    pub has_bonus: bool,
    pub bonus_min: u8,
    pub bonus_max: u8,
    pub bonus_count: usize,
}

impl LotteryProfile {
    pub fn main_pool(&self) -> PoolSpec {
        PoolSpec {
            min: self.min,
            max: self.max,
            pick_count: self.numbers_per_draw,
        }
    }

    pub fn bonus_pool(&self) -> Option<PoolSpec> {
        self.has_bonus.then(|| PoolSpec {
            min: self.bonus_min,
            max: self.bonus_max,
            pick_count: self.bonus_count,
        })
    }

    pub fn check(&self) -> Result<()> {
        check_pool(self.id, self.min, self.max, self.numbers_per_draw)?;
        if self.has_bonus {
            check_pool(self.id, self.bonus_min, self.bonus_max, self.bonus_count)?;
        }
        Ok(())
    }
}

fn check_pool(id: &str, min: u8, max: u8, count: usize) -> Result<()> {
    if min > max {
        bail!("{id} : plage invalide {min}-{max}");
    }
    if count == 0 {
        bail!("{id} : au moins un numéro par tirage requis");
    }
    if count > (max - min) as usize + 1 {
        bail!("{id} : {count} numéros demandés dans une plage de {}", (max - min) as usize + 1);
    }
    Ok(())
}

const fn main_only(id: &'static str, name: &'static str, min: u8, max: u8, count: usize) -> LotteryProfile {
    LotteryProfile {
        id,
        name,
        min,
        max,
        numbers_per_draw: count,
        has_bonus: false,
        bonus_min: 0,
        bonus_max: 0,
        bonus_count: 0,
    }
}

#[allow(clippy::too_many_arguments)]
const fn with_bonus(
    id: &'static str,
    name: &'static str,
    min: u8,
    max: u8,
    count: usize,
    bonus_min: u8,
    bonus_max: u8,
    bonus_count: usize,
) -> LotteryProfile {
    LotteryProfile {
        id,
        name,
        min,
        max,
        numbers_per_draw: count,
        has_bonus: true,
        bonus_min,
        bonus_max,
        bonus_count,
    }
}

pub const PROFILES: &[LotteryProfile] = &[
    main_only("lotto_6_49", "Lotto 6/49", 1, 49, 6),
    main_only("irish_lotto", "Irish Lotto", 1, 47, 6),
    main_only("uk_lotto", "UK Lotto", 1, 59, 6),
    with_bonus("euromillions", "EuroMillions", 1, 50, 5, 1, 12, 2),
    with_bonus("eurojackpot", "Eurojackpot", 1, 50, 5, 1, 12, 2),
    with_bonus("powerball", "Powerball", 1, 69, 5, 1, 26, 1),
    with_bonus("mega_millions", "Mega Millions", 1, 70, 5, 1, 25, 1),
];

pub fn profile(id: &str) -> Option<&'static LotteryProfile> {
    PROFILES.iter().find(|p| p.id == id)
}

pub fn validate_draw(profile: &LotteryProfile, numbers: &[u8], bonus: &[u8]) -> Result<()> {
    if numbers.len() != profile.numbers_per_draw {
        bail!(
            "{} numéros attendus, {} reçus",
            profile.numbers_per_draw,
            numbers.len()
        );
    }
    check_numbers(numbers, &profile.main_pool(), "Numéro")?;

    match profile.bonus_pool() {
        None => {
            if !bonus.is_empty() {
                bail!("Numéros bonus inattendus pour {}", profile.id);
            }
        }
        Some(spec) => {
            // Une colonne bonus vide reste acceptée : l'historique bonus est alors absent.
            if !bonus.is_empty() {
                if bonus.len() != spec.pick_count {
                    bail!(
                        "{} numéros bonus attendus, {} reçus",
                        spec.pick_count,
                        bonus.len()
                    );
                }
                check_numbers(bonus, &spec, "Bonus")?;
            }
        }
    }
    Ok(())
}

fn check_numbers(numbers: &[u8], spec: &PoolSpec, label: &str) -> Result<()> {
    for &n in numbers {
        if !spec.contains(n) {
            bail!("{} {} hors limites ({}-{})", label, n, spec.min, spec.max);
        }
    }
    for i in 0..numbers.len() {
        for j in (i + 1)..numbers.len() {
            if numbers[i] == numbers[j] {
                bail!("{} en double : {}", label, numbers[i]);
            }
        }
    }
    Ok(())
}
