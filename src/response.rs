//! Shape validation for review API responses.

use serde_json::Value;

use crate::error::{BotError, Result};

pub const HOMEWORKS_KEY: &str = "homeworks";
pub const CURRENT_DATE_KEY: &str = "current_date";

/// A validated response. Borrows from the decoded body.
#[derive(Debug, Clone, Copy)]
pub struct PollResponse<'a> {
    pub homeworks: &'a [Value],
    pub current_date: i64,
}

impl<'a> PollResponse<'a> {
    /// The most recent submission; the API lists newest first.
    pub fn latest(&self) -> Option<&'a Value> {
        self.homeworks.first()
    }
}

/// Check the response shape, failing on the first violated rule:
/// object, has `homeworks`, has `current_date`, `homeworks` is an array,
/// `current_date` is an integer.
pub fn check_response(response: &Value) -> Result<PollResponse<'_>> {
    let map = response
        .as_object()
        .ok_or_else(|| BotError::Schema(format!("expected a JSON object, got {}", kind(response))))?;

    let homeworks = map
        .get(HOMEWORKS_KEY)
        .ok_or_else(|| BotError::Schema(format!("no {HOMEWORKS_KEY:?} key")))?;
    let current_date = map
        .get(CURRENT_DATE_KEY)
        .ok_or_else(|| BotError::Schema(format!("no {CURRENT_DATE_KEY:?} key")))?;

    let homeworks = homeworks
        .as_array()
        .ok_or_else(|| BotError::Schema(format!("{HOMEWORKS_KEY:?} is {}, expected an array", kind(homeworks))))?;
    let current_date = current_date
        .as_i64()
        .ok_or_else(|| BotError::Schema(format!("{CURRENT_DATE_KEY:?} is {}, expected an integer", kind(current_date))))?;

    Ok(PollResponse { homeworks, current_date })
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema_message(value: Value) -> String {
        match check_response(&value) {
            Err(BotError::Schema(msg)) => msg,
            other => panic!("expected Schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_accepts_well_formed_response() {
        let body = json!({
            "homeworks": [{"homework_name": "hw1", "status": "approved"}],
            "current_date": 1000
        });
        let parsed = check_response(&body).unwrap();
        assert_eq!(parsed.current_date, 1000);
        assert_eq!(parsed.homeworks.len(), 1);
        assert_eq!(parsed.latest().unwrap()["homework_name"], "hw1");
        // Borrowed, not copied.
        assert!(std::ptr::eq(parsed.homeworks, body["homeworks"].as_array().unwrap().as_slice()));
    }

    #[test]
    fn test_accepts_empty_homework_list() {
        let body = json!({"homeworks": [], "current_date": 2000});
        let parsed = check_response(&body).unwrap();
        assert!(parsed.latest().is_none());
        assert_eq!(parsed.current_date, 2000);
    }

    #[test]
    fn test_rejects_non_object() {
        assert!(schema_message(json!([1, 2])).contains("object"));
        assert!(schema_message(json!("homeworks")).contains("object"));
        assert!(schema_message(Value::Null).contains("object"));
    }

    #[test]
    fn test_rejects_missing_homeworks() {
        assert!(schema_message(json!({"current_date": 1})).contains("homeworks"));
    }

    #[test]
    fn test_rejects_missing_current_date() {
        assert!(schema_message(json!({"homeworks": []})).contains("current_date"));
    }

    #[test]
    fn test_rejects_homeworks_not_a_list() {
        let msg = schema_message(json!({"homeworks": {"hw1": "approved"}, "current_date": 1}));
        assert!(msg.contains("expected an array"));
    }

    #[test]
    fn test_rejects_non_integer_current_date() {
        let msg = schema_message(json!({"homeworks": [], "current_date": "yesterday"}));
        assert!(msg.contains("expected an integer"));
    }

    #[test]
    fn test_key_checks_precede_type_checks() {
        // Both keys are checked for presence before any type is inspected.
        let msg = schema_message(json!({"homeworks": "oops"}));
        assert!(msg.contains("current_date"));
    }
}
