use std::fmt;

use crate::combiner::ScoreTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Explanation {
    StrongPositive,
    ModeratePositive,
    SlightPositive,
    Neutral,
    ModerateNegative,
    StrongNegative,
}

impl Explanation {
    pub fn from_score(score: f64) -> Self {
        if score > 0.5 {
            Explanation::StrongPositive
        } else if score > 0.2 {
            Explanation::ModeratePositive
        } else if score > 0.0 {
            Explanation::SlightPositive
        } else if score < -0.5 {
            Explanation::StrongNegative
        } else if score < -0.2 {
            Explanation::ModerateNegative
        } else {
            Explanation::Neutral
        }
    }
}

impl fmt::Display for Explanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Explanation::StrongPositive => write!(f, "Biais positif fort sur l'ensemble des signaux"),
            Explanation::ModeratePositive => write!(f, "Tendance positive modérée"),
            Explanation::SlightPositive => write!(f, "Léger biais positif"),
            Explanation::Neutral => write!(f, "Signaux neutres ou contradictoires"),
            Explanation::ModerateNegative => write!(f, "Tendance négative modérée"),
            Explanation::StrongNegative => write!(f, "Biais négatif fort récemment"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumberPick {
    pub number: u8,
    pub score: f64,
    /// Pourcentage arrondi à 2 décimales.
    pub confidence: f64,
    pub explanation: Explanation,
}

/// Numéros classés par score décroissant, à égalité l'ordre croissant des numéros est gardé.
pub fn rank_numbers(table: &ScoreTable, count: usize, min_confidence: f64) -> Vec<NumberPick> {
    let mut ranked: Vec<(u8, f64, f64)> = table
        .iter()
        .filter(|(_, s)| s.confidence >= min_confidence)
        .map(|(&n, s)| (n, s.score, s.confidence))
        .collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    ranked
        .into_iter()
        .take(count)
        .map(|(number, score, confidence)| NumberPick {
            number,
            score,
            confidence: (confidence * 10_000.0).round() / 100.0,
            explanation: Explanation::from_score(score),
        })
        .collect()
}
