//! Error types for the homework bot.
//!
//! Everything that can go wrong inside one poll iteration is a
//! [`BotError`]; the poller catches all of them. Only [`ConfigError`]
//! is fatal, and only at startup.

use thiserror::Error;

/// Errors raised while polling, validating or notifying.
#[derive(Debug, Error)]
pub enum BotError {
    /// The request never completed (connection refused, DNS, timeout).
    #[error("request to the review API failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The review API answered with something other than 200 OK.
    #[error("review API is unavailable: HTTP {status}")]
    Service { status: u16 },

    /// The body was not valid JSON.
    #[error("could not decode review API response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The JSON did not have the expected shape.
    #[error("unexpected response shape: {0}")]
    Schema(String),

    /// A homework status outside the verdict table.
    #[error("unknown homework status: {0:?}")]
    UnknownStatus(String),

    /// A homework record without one of its required keys.
    #[error("homework record has no {0:?} key")]
    MissingField(&'static str),

    /// Telegram refused or failed to deliver the message.
    #[error("failed to deliver message to Telegram: {0}")]
    Delivery(String),
}

/// Startup configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variables: {}", .0.join(", "))]
    MissingTokens(Vec<&'static str>),
}

pub type Result<T, E = BotError> = std::result::Result<T, E>;
