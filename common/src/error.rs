/// Rejected user-facing strings (button actions, game ids)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("Unknown game: {0}")]
    UnknownGame(String),
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Malformed configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}
