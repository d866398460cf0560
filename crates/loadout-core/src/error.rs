use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadoutError {
    #[error("not initialized: run 'loadout init'")]
    NotInitialized,

    #[error("skill document not found: {0}")]
    SkillNotFound(String),

    #[error("invalid skill id '{0}': must be lowercase alphanumeric segments separated by '/'")]
    InvalidSkillId(String),

    #[error("invalid match mode '{0}': expected 'substring' or 'word_boundary'")]
    InvalidMatchMode(String),

    #[error(transparent)]
    Pattern(#[from] regex::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, LoadoutError>;
