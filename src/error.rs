use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Config Error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Output Error: {0}")]
    Output(#[source] serde_json::Error),
}
