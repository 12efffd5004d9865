use tracing::{debug, warn};

use crate::error::{Result, StrategistError};
use crate::models::{ErrorResult, Strategy, StrategyOutcome, excerpt, RAW_EXCERPT_CHARS};

const FENCE_OPENER: &str = "```json";
const FENCE_CLOSER: &str = "```";

/// Strip a leading "```json" and a trailing "```", only at the very ends.
///
/// Fences anywhere else in the text are left alone.
pub fn strip_fences(raw: &str) -> &str {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix(FENCE_OPENER) {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix(FENCE_CLOSER) {
        text = rest;
    }
    text.trim()
}

/// Parse synthesis output into a strategy document
pub fn parse_strategy(raw: &str) -> Result<Strategy> {
    let cleaned = strip_fences(raw);
    serde_json::from_str(cleaned)
        .map(Strategy::new)
        .map_err(|e| StrategistError::Parse {
            message: e.to_string(),
            raw: raw.to_string(),
        })
}

/// Turn raw synthesis text into a strategy, or an ErrorResult carrying the
/// parse error and an excerpt of the text.
pub fn normalize(raw: &str) -> StrategyOutcome {
    match parse_strategy(raw) {
        Ok(strategy) => {
            debug!("Parsed strategy with {} missing keys", strategy.missing_keys().len());
            StrategyOutcome::Strategy(strategy)
        }
        Err(e) => {
            warn!("JSON parsing error: {}", e);
            debug!("Raw result: {}", excerpt(raw, RAW_EXCERPT_CHARS));
            StrategyOutcome::Error(into_error_result(e))
        }
    }
}

/// Convert any pipeline error into the returned error value.
///
/// Only parse failures carry a raw-text excerpt.
pub fn into_error_result(error: StrategistError) -> ErrorResult {
    match error {
        StrategistError::Parse { message, raw } => {
            ErrorResult::with_raw(format!("Failed to parse JSON response: {message}"), &raw)
        }
        other => ErrorResult::new(other.to_string()),
    }
}
