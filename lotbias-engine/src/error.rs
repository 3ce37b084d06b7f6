use thiserror::Error;

/// Échecs de précondition, signalés avant tout échantillonnage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("preset inconnu '{0}' (attendu : conservative, balanced, aggressive)")]
    UnknownPreset(String),

    #[error("loterie inconnue '{0}'")]
    UnknownLottery(String),

    #[error("aucun tirage pour la loterie '{0}'")]
    EmptyHistory(String),

    #[error("numéros verrouillés invalides : {0}")]
    InvalidLocks(#[from] LockError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LockError {
    #[error("{0} verrouillé deux fois")]
    Duplicate(u8),

    #[error("{count} numéros verrouillés pour {max} places")]
    TooMany { count: usize, max: usize },

    #[error("{number} hors limites ({min}-{max})")]
    OutOfRange { number: u8, min: u8, max: u8 },
}

pub type EngineResult<T> = Result<T, EngineError>;
