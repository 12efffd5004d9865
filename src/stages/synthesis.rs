use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::fan_out::FanOut;
use crate::error::{Result, StrategistError};
use crate::llm::template::{placeholders, render};
use crate::llm::{CompletionProvider, FALLBACK_SYNTHESIS_PROMPT};
use crate::models::{StageName, StageResults, StrategyRequest};

/// Default location of the editable synthesis template, relative to the working directory
pub const DEFAULT_TEMPLATE_PATH: &str = "strategist_master_prompt.txt";

/// The synthesis template resource. Read on every call so edits apply without a rebuild.
#[derive(Debug, Clone)]
pub struct SynthesisTemplate {
    path: PathBuf,
}

impl Default for SynthesisTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE_PATH)
    }
}

impl SynthesisTemplate {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Template text, or the built-in fallback when the file does not exist
    pub fn load(&self) -> Result<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => {
                debug!("Loaded synthesis template from {:?}", self.path);
                Ok(text)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(
                    "Synthesis template {:?} not found, using built-in template",
                    self.path
                );
                Ok(FALLBACK_SYNTHESIS_PROMPT.to_string())
            }
            Err(source) => Err(StrategistError::Template {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

/// Everything the synthesis template may reference
#[derive(Debug, Clone, Copy)]
pub struct SynthesisInput<'a> {
    pub original: &'a StrategyRequest,
    pub results: &'a StageResults,
}

impl<'a> SynthesisInput<'a> {
    pub fn new(fan_out: &'a FanOut) -> Self {
        Self {
            original: &fan_out.original,
            results: &fan_out.results,
        }
    }

    /// Request fields followed by the eight stage outputs
    pub fn vars(&self) -> Vec<(&'static str, &'a str)> {
        let mut vars = self.original.template_vars();
        vars.extend(self.results.iter().map(|(stage, text)| (stage.key(), text)));
        vars
    }
}

/// A rendered synthesis prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisPrompt {
    pub text: String,
    /// Stages the template never references; their output is not sent
    pub omitted: Vec<StageName>,
}

/// Render the synthesis prompt.
///
/// Stage outputs are spliced in verbatim. A stage the template does not
/// reference is dropped from the prompt and reported in `omitted`.
pub fn build_prompt(template: &str, input: &SynthesisInput<'_>) -> Result<SynthesisPrompt> {
    let referenced = placeholders(template);
    let omitted: Vec<StageName> = StageName::ALL
        .into_iter()
        .filter(|stage| !referenced.contains(&stage.key()))
        .collect();

    if !omitted.is_empty() {
        let keys: Vec<&str> = omitted.iter().map(|s| s.key()).collect();
        warn!(
            "Synthesis template does not reference {}; their output is dropped",
            keys.join(", ")
        );
    }

    let text = render(template, &input.vars())?;
    Ok(SynthesisPrompt { text, omitted })
}

/// Merge the fan-out output into one prompt and ask `provider` for the raw strategy text
pub async fn synthesize(
    provider: &dyn CompletionProvider,
    template: &SynthesisTemplate,
    fan_out: &FanOut,
) -> Result<String> {
    let template_text = template.load()?;
    let prompt = build_prompt(&template_text, &SynthesisInput::new(fan_out))?;

    info!(
        "Synthesis: sending {} chars to {}",
        prompt.text.len(),
        provider.name()
    );
    let raw = provider.complete(&prompt.text).await?;
    debug!("Synthesis returned {} chars", raw.len());

    Ok(raw)
}
