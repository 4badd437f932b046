//! Verdict table and notification text.

use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use crate::error::{BotError, Result};

pub const HOMEWORK_NAME_KEY: &str = "homework_name";
pub const STATUS_KEY: &str = "status";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    pub const ALL: [HomeworkStatus; 3] = [Self::Approved, Self::Reviewing, Self::Rejected];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Reviewing => "reviewing",
            Self::Rejected => "rejected",
        }
    }

    /// Localized review outcome.
    pub fn verdict(&self) -> &'static str {
        match self {
            Self::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Self::Reviewing => "Работа взята на проверку ревьюером.",
            Self::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl FromStr for HomeworkStatus {
    type Err = BotError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| BotError::UnknownStatus(s.to_string()))
    }
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Notification text for a homework and its raw status code.
pub fn format_status(homework_name: &str, status: &str) -> Result<String> {
    let verdict = status.parse::<HomeworkStatus>()?.verdict();
    Ok(format!("Изменился статус проверки работы \"{homework_name}\". {verdict}"))
}

/// Build the notification for one homework record from the API.
///
/// Both `homework_name` and `status` must be present strings; a record
/// missing either is logged and rejected before any formatting happens.
pub fn parse_status(homework: &Value) -> Result<String> {
    let homework_name = required_str(homework, HOMEWORK_NAME_KEY)?;
    let status = required_str(homework, STATUS_KEY)?;
    format_status(homework_name, status)
}

fn required_str<'a>(homework: &'a Value, key: &'static str) -> Result<&'a str> {
    match homework.get(key).and_then(Value::as_str) {
        Some(value) => Ok(value),
        None => {
            warn!(key, "Homework record is missing a required key");
            Err(BotError::MissingField(key))
        }
    }
}
