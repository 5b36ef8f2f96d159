use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("reference data unavailable: {0}")]
    ReferenceLoad(String),

    #[error("invalid factor table: {0}")]
    InvalidFactorSpec(String),

    #[error("unknown location: {0}")]
    UnknownLocation(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AdvisorError>;
