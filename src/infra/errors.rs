// src/infra/errors.rs - Error types for reflect-agent

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReflectError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse config file {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to render config: {0}")]
    ConfigRender(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReflectError {
    pub fn config(message: impl Into<String>) -> Self {
        ReflectError::Config(message.into())
    }
}
