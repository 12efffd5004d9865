use std::path::Path;

use anyhow::{Context, Result};

use crate::models::{StrategyOutcome, StrategyRequest};

/// Load a StrategyRequest from a JSON file
pub fn load_request_file(path: &Path) -> Result<StrategyRequest> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    parse_request_json(&content)
}

/// Parse and validate a StrategyRequest JSON string
pub fn parse_request_json(json: &str) -> Result<StrategyRequest> {
    let request: StrategyRequest =
        serde_json::from_str(json).context("Failed to parse request JSON")?;
    request.validate()?;
    Ok(request)
}

/// Load a previously saved strategy (or error) document
pub fn load_outcome_file(path: &Path) -> Result<StrategyOutcome> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    let value: serde_json::Value =
        serde_json::from_str(&content).context("Failed to parse strategy JSON")?;
    Ok(StrategyOutcome::from_value(value))
}
