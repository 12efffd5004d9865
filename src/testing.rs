//! Scripted provider double shared by the unit tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Barrier;

use crate::llm::{CompletionProvider, ProviderError};

/// Answers each prompt with the first rule whose needle it contains
pub struct ScriptedProvider {
    name: String,
    rules: Vec<(String, Result<String, String>)>,
    fallback: Result<String, String>,
    barrier: Option<Arc<Barrier>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            rules: Vec::new(),
            fallback: Ok(format!("{name} output")),
            barrier: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn reply(mut self, needle: &str, text: &str) -> Self {
        self.rules.push((needle.to_string(), Ok(text.to_string())));
        self
    }

    pub fn fail(mut self, needle: &str, message: &str) -> Self {
        self.rules.push((needle.to_string(), Err(message.to_string())));
        self
    }

    /// Hold every call until all parties of `barrier` have arrived
    pub fn gated(mut self, barrier: Arc<Barrier>) -> Self {
        self.barrier = Some(barrier);
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.prompts().len()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        if let Some(barrier) = &self.barrier {
            barrier.wait().await;
        }

        let answer = self
            .rules
            .iter()
            .find(|(needle, _)| prompt.contains(needle.as_str()))
            .map(|(_, answer)| answer)
            .unwrap_or(&self.fallback);

        answer.clone().map_err(ProviderError::Other)
    }
}
