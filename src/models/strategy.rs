use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Maximum characters of raw model output kept on a parse failure
pub const RAW_EXCERPT_CHARS: usize = 500;

/// Top-level keys the synthesis prompt asks for. None of them is enforced.
pub const EXPECTED_KEYS: [&str; 13] = [
    "assumptions",
    "one_liner",
    "problem_statement",
    "target_personas",
    "market",
    "solution",
    "tech",
    "gtm",
    "ops",
    "metrics",
    "finance",
    "risks_and_mitigations",
    "execution_board",
];

/// The synthesized strategy document, kept exactly as parsed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Strategy(Value);

impl Strategy {
    pub fn new(document: Value) -> Self {
        Self(document)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// Read a top-level key; missing keys yield an empty section
    pub fn section(&self, key: &str) -> Section<'_> {
        Section(self.0.get(key))
    }

    /// Expected keys absent from the document
    pub fn missing_keys(&self) -> Vec<&'static str> {
        EXPECTED_KEYS
            .into_iter()
            .filter(|key| self.0.get(key).is_none())
            .collect()
    }
}

/// Optional view into part of a strategy document.
///
/// Every accessor tolerates missing keys, nulls and unexpected types.
#[derive(Debug, Clone, Copy)]
pub struct Section<'a>(Option<&'a Value>);

impl<'a> Section<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self(Some(value))
    }

    pub fn get(&self, key: &str) -> Section<'a> {
        Section(self.0.and_then(|v| v.get(key)))
    }

    pub fn is_present(&self) -> bool {
        matches!(self.0, Some(v) if !v.is_null())
    }

    /// Scalar rendered as text; objects and arrays as compact JSON
    pub fn text(&self) -> Option<String> {
        match self.0? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    pub fn text_or(&self, default: &str) -> String {
        self.text().unwrap_or_else(|| default.to_string())
    }

    /// Array items; anything that is not an array has none
    pub fn items(&self) -> Vec<Section<'a>> {
        match self.0 {
            Some(Value::Array(items)) => items.iter().map(Section::new).collect(),
            _ => Vec::new(),
        }
    }

    /// Array items rendered as text and joined
    pub fn joined(&self, separator: &str) -> String {
        self.items()
            .iter()
            .filter_map(Section::text)
            .collect::<Vec<_>>()
            .join(separator)
    }
}

/// Explicit failure value returned instead of a strategy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResult {
    pub error: String,
    /// Excerpt of the unparsed model output, only for parse failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl ErrorResult {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            raw: None,
        }
    }

    /// Parse failure with a truncated excerpt of the offending text
    pub fn with_raw(error: impl Into<String>, raw: &str) -> Self {
        Self {
            error: error.into(),
            raw: Some(excerpt(raw, RAW_EXCERPT_CHARS)),
        }
    }
}

/// First `max_chars` characters of `text`, with "..." appended when cut
pub fn excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}

/// What the strategist hands back: a document or an explicit error
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StrategyOutcome {
    Strategy(Strategy),
    Error(ErrorResult),
}

impl StrategyOutcome {
    /// Classify a saved document; an object with an "error" key is an ErrorResult
    pub fn from_value(value: Value) -> Self {
        if value.get("error").is_some() {
            if let Ok(error) = serde_json::from_value::<ErrorResult>(value.clone()) {
                return Self::Error(error);
            }
        }
        Self::Strategy(Strategy::new(value))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn strategy(&self) -> Option<&Strategy> {
        match self {
            Self::Strategy(strategy) => Some(strategy),
            Self::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorResult> {
        match self {
            Self::Strategy(_) => None,
            Self::Error(error) => Some(error),
        }
    }
}

impl From<Strategy> for StrategyOutcome {
    fn from(strategy: Strategy) -> Self {
        Self::Strategy(strategy)
    }
}

impl From<ErrorResult> for StrategyOutcome {
    fn from(error: ErrorResult) -> Self {
        Self::Error(error)
    }
}
