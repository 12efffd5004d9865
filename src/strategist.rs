use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, info_span, warn, Instrument};

use crate::error::Result;
use crate::llm::{CompletionProvider, GeminiClient, GeminiConfig, OpenAiClient, OpenAiConfig};
use crate::models::{StrategyOutcome, StrategyRequest};
use crate::stages::{
    into_error_result, normalize, run_all, synthesize, ProviderKind, ProviderSet, StageRouting,
    SynthesisTemplate, DEFAULT_TEMPLATE_PATH,
};

/// Orchestration settings that are independent of provider credentials
#[derive(Debug, Clone)]
pub struct StrategistConfig {
    /// Path of the editable synthesis template
    pub template_path: PathBuf,
    /// Provider assignment per stage
    pub routing: StageRouting,
}

impl Default for StrategistConfig {
    fn default() -> Self {
        Self {
            template_path: PathBuf::from(DEFAULT_TEMPLATE_PATH),
            routing: StageRouting::default(),
        }
    }
}

/// Generates startup strategies from a fixed fan-out of research stages
/// followed by one synthesis call on the fast provider.
///
/// Each instance owns its provider handles; instances share no state.
#[derive(Clone)]
pub struct Strategist {
    providers: ProviderSet,
    template: SynthesisTemplate,
    routing: StageRouting,
}

impl Strategist {
    pub fn new(
        fast: Arc<dyn CompletionProvider>,
        creative: Arc<dyn CompletionProvider>,
        config: StrategistConfig,
    ) -> Self {
        Self {
            providers: ProviderSet::new(fast, creative),
            template: SynthesisTemplate::new(config.template_path),
            routing: config.routing,
        }
    }

    /// OpenAI as the fast provider, Gemini as the creative one
    pub fn from_configs(
        openai: OpenAiConfig,
        gemini: GeminiConfig,
        config: StrategistConfig,
    ) -> Self {
        Self::new(
            Arc::new(OpenAiClient::new(openai)),
            Arc::new(GeminiClient::new(gemini)),
            config,
        )
    }

    /// Build from OPENAI_API_KEY and GEMINI_API_KEY / GOOGLE_API_KEY
    pub fn from_env(config: StrategistConfig) -> Result<Self> {
        Ok(Self::from_configs(
            OpenAiConfig::from_env()?,
            GeminiConfig::from_env()?,
            config,
        ))
    }

    pub fn template(&self) -> &SynthesisTemplate {
        &self.template
    }

    /// Generate a strategy. Never fails: every error comes back as an ErrorResult.
    pub async fn generate(&self, request: &StrategyRequest) -> StrategyOutcome {
        let run_id = uuid::Uuid::new_v4();
        let span = info_span!("generate", %run_id);

        async {
            info!("Starting strategy generation");
            info!("Niche: {}", request.niche());
            info!("Geography: {}", request.geo());
            info!("Stage: {}", request.stage());

            let outcome = match self.synthesize_raw(request).await {
                Ok(raw) => normalize(&raw),
                Err(e) => {
                    warn!("Error generating strategy: {}", e);
                    StrategyOutcome::Error(into_error_result(e))
                }
            };

            if !outcome.is_error() {
                info!("Strategy generated successfully");
            }
            outcome
        }
        .instrument(span)
        .await
    }

    /// Fan out, join, and synthesize; returns the unparsed model text
    pub async fn synthesize_raw(&self, request: &StrategyRequest) -> Result<String> {
        let fan_out = run_all(&self.providers, &self.routing, request).await?;
        synthesize(
            self.providers.get(ProviderKind::Fast),
            &self.template,
            &fan_out,
        )
        .await
    }
}
