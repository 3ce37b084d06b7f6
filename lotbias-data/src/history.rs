use crate::models::Draw;

/// Historique en mémoire, dans l'ordre des lignes du fichier (du plus ancien au plus récent).
#[derive(Debug, Clone, Default)]
pub struct History {
    draws: Vec<Draw>,
}

impl History {
    pub fn new(draws: Vec<Draw>) -> Self {
        Self { draws }
    }

    pub fn len(&self) -> usize {
        self.draws.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }

    pub fn draws(&self) -> &[Draw] {
        &self.draws
    }

    /// Tirages d'une seule loterie, ordre chronologique conservé.
    pub fn for_lottery(&self, lottery: &str) -> Vec<Draw> {
        self.draws
            .iter()
            .filter(|d| d.lottery == lottery)
            .cloned()
            .collect()
    }

    /// Derniers tirages d'une loterie, le plus récent en premier.
    pub fn last_draws(&self, lottery: &str, limit: usize) -> Vec<&Draw> {
        self.draws
            .iter()
            .rev()
            .filter(|d| d.lottery == lottery)
            .take(limit)
            .collect()
    }

    pub fn count_draws(&self, lottery: &str) -> usize {
        self.draws.iter().filter(|d| d.lottery == lottery).count()
    }
}
