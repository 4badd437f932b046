//! Homework Bot — watches the Practicum review API for status changes of
//! the latest submission and reports them to a Telegram chat.
//!
//! The pieces:
//! - [`api`]: authenticated GET against the review API
//! - [`response`]: shape validation of the JSON body
//! - [`status`]: verdict table and message text
//! - [`notifier`]: Telegram delivery
//! - [`poller`]: the fixed-interval loop with duplicate suppression

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod notifier;
pub mod poller;
pub mod response;
pub mod status;

pub use api::{HomeworkSource, PracticumClient};
pub use config::{Config, RetryPolicy};
pub use error::{BotError, ConfigError};
pub use notifier::{Notifier, TelegramNotifier};
pub use poller::{Iteration, Poller};
