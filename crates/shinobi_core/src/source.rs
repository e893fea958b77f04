use serde_json::Value;
use tracing::warn;

use crate::core_api::{CoreError, CoreErrorCode};
use crate::locator::unwrap_jsonp;

/// Where raw sheets come from. `None` means "no data", whatever the cause.
pub trait SheetSource {
    fn fetch(&self, url: &str) -> Option<Value>;
}

impl<F> SheetSource for F
where
    F: Fn(&str) -> Option<Value>,
{
    fn fetch(&self, url: &str) -> Option<Value> {
        self(url)
    }
}

/// A source backed by an already-retrieved JSON or JSONP payload.
#[derive(Debug, Clone)]
pub struct PayloadSource {
    payload: String,
}

impl PayloadSource {
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
        }
    }
}

impl SheetSource for PayloadSource {
    fn fetch(&self, url: &str) -> Option<Value> {
        match parse_payload(&self.payload) {
            Ok(Value::Null) => None,
            Ok(value) => Some(value),
            Err(e) => {
                warn!(url, error = %e, "sheet payload is unreadable");
                None
            }
        }
    }
}

pub fn parse_payload(payload: &str) -> Result<Value, CoreError> {
    serde_json::from_str(unwrap_jsonp(payload)).map_err(|e| {
        CoreError::new(
            CoreErrorCode::Parse,
            format!("sheet payload is not valid JSON: {e}"),
        )
    })
}
