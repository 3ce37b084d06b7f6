use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;

/// Mise en forme du score combiné selon le preset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dominance {
    /// Borne le score dans `[-cap, cap]`.
    Clamp(f64),
    /// Multiplie le score sans borne, un numéro peut alors dominer.
    Amplify(f64),
}

impl Dominance {
    pub fn apply(&self, raw: f64) -> f64 {
        match *self {
            Dominance::Clamp(cap) => raw.clamp(-cap, cap),
            Dominance::Amplify(factor) => raw * factor,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresetParams {
    pub dominance: Dominance,
    pub confidence_damp: f64,
    pub temperature: f64,
    pub randomness_blend: f64,
    pub pair_strength: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Preset {
    Conservative,
    #[default]
    Balanced,
    Aggressive,
}

const CONSERVATIVE: PresetParams = PresetParams {
    dominance: Dominance::Clamp(0.7),
    confidence_damp: 0.5,
    temperature: 0.9,
    randomness_blend: 0.45,
    pair_strength: 0.20,
};

const BALANCED: PresetParams = PresetParams {
    dominance: Dominance::Clamp(1.0),
    confidence_damp: 1.0,
    temperature: 1.2,
    randomness_blend: 0.25,
    pair_strength: 0.35,
};

const AGGRESSIVE: PresetParams = PresetParams {
    dominance: Dominance::Amplify(1.4),
    confidence_damp: 1.2,
    temperature: 1.7,
    randomness_blend: 0.10,
    pair_strength: 0.60,
};

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Conservative, Preset::Balanced, Preset::Aggressive];

    pub fn name(&self) -> &'static str {
        match self {
            Preset::Conservative => "conservative",
            Preset::Balanced => "balanced",
            Preset::Aggressive => "aggressive",
        }
    }

    pub fn params(&self) -> &'static PresetParams {
        match self {
            Preset::Conservative => &CONSERVATIVE,
            Preset::Balanced => &BALANCED,
            Preset::Aggressive => &AGGRESSIVE,
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Preset::ALL
            .into_iter()
            .find(|p| p.name() == wanted)
            .ok_or_else(|| EngineError::UnknownPreset(s.to_string()))
    }
}
