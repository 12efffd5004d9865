use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::llm::template::{placeholders, render};
use crate::llm::{
    CompletionProvider, GTM_IDEAS_PROMPT, MARKET_SCAN_PROMPT, OPS_NOTES_PROMPT, PERSONAS_PROMPT,
    PROBLEM_MAP_PROMPT, RISKS_LIST_PROMPT, SOLUTION_SHAPES_PROMPT, TECH_NOTES_PROMPT,
};
use crate::models::{StageName, StrategyRequest};

/// Which of the two configured providers serves a call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Cheap, low-latency model; also runs synthesis
    Fast,
    /// Higher-temperature model used for idea expansion
    Creative,
}

/// The two provider handles an orchestrator owns
#[derive(Clone)]
pub struct ProviderSet {
    pub fast: Arc<dyn CompletionProvider>,
    pub creative: Arc<dyn CompletionProvider>,
}

impl ProviderSet {
    pub fn new(fast: Arc<dyn CompletionProvider>, creative: Arc<dyn CompletionProvider>) -> Self {
        Self { fast, creative }
    }

    pub fn get(&self, kind: ProviderKind) -> &dyn CompletionProvider {
        match kind {
            ProviderKind::Fast => self.fast.as_ref(),
            ProviderKind::Creative => self.creative.as_ref(),
        }
    }
}

/// One research stage: a fixed template bound to a default provider
#[derive(Debug, Clone, Copy)]
pub struct Stage {
    pub name: StageName,
    pub template: &'static str,
    pub default_provider: ProviderKind,
}

impl Stage {
    pub fn for_name(name: StageName) -> Self {
        let (template, default_provider) = match name {
            StageName::ProblemMap => (PROBLEM_MAP_PROMPT, ProviderKind::Fast),
            StageName::MarketScan => (MARKET_SCAN_PROMPT, ProviderKind::Creative),
            StageName::Personas => (PERSONAS_PROMPT, ProviderKind::Fast),
            StageName::SolutionShapes => (SOLUTION_SHAPES_PROMPT, ProviderKind::Creative),
            StageName::GtmIdeas => (GTM_IDEAS_PROMPT, ProviderKind::Fast),
            StageName::TechNotes => (TECH_NOTES_PROMPT, ProviderKind::Fast),
            StageName::OpsNotes => (OPS_NOTES_PROMPT, ProviderKind::Creative),
            StageName::RisksList => (RISKS_LIST_PROMPT, ProviderKind::Fast),
        };
        Self {
            name,
            template,
            default_provider,
        }
    }

    /// Request fields this stage's template references
    pub fn referenced_fields(&self) -> Vec<&'static str> {
        placeholders(self.template)
    }

    /// Fill the template from the request
    pub fn render_prompt(&self, request: &StrategyRequest) -> Result<String> {
        render(self.template, &request.template_vars())
    }

    /// Render the prompt and make one call to `provider`.
    ///
    /// Provider errors are returned as-is; there is no retry.
    pub async fn run(
        &self,
        provider: &dyn CompletionProvider,
        request: &StrategyRequest,
    ) -> Result<String> {
        let prompt = self.render_prompt(request)?;
        debug!(
            stage = %self.name,
            provider = provider.name(),
            chars = prompt.len(),
            "Running stage"
        );
        let text = provider.complete(&prompt).await?;
        debug!(stage = %self.name, chars = text.len(), "Stage complete");
        Ok(text)
    }
}

/// Provider assignment per stage. Any provider can serve any stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageRouting {
    #[serde(default)]
    overrides: BTreeMap<StageName, ProviderKind>,
}

impl StageRouting {
    /// Send every stage to one provider
    pub fn all(kind: ProviderKind) -> Self {
        Self {
            overrides: StageName::ALL.into_iter().map(|s| (s, kind)).collect(),
        }
    }

    pub fn with(mut self, stage: StageName, kind: ProviderKind) -> Self {
        self.overrides.insert(stage, kind);
        self
    }

    pub fn provider_for(&self, stage: StageName) -> ProviderKind {
        self.overrides
            .get(&stage)
            .copied()
            .unwrap_or_else(|| Stage::for_name(stage).default_provider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FounderStage;

    fn request(geo: &str) -> StrategyRequest {
        StrategyRequest::new(
            "AI agents for ecommerce",
            FounderStage::Mvp,
            geo,
            "AI graduate",
            "tight budget",
            "launch an MVP",
        )
        .unwrap()
    }

    #[test]
    fn test_referenced_fields_per_stage() {
        let fields = |name| Stage::for_name(name).referenced_fields();
        assert_eq!(
            fields(StageName::ProblemMap),
            vec!["niche", "geo", "stage", "founder_profile", "constraints"]
        );
        assert_eq!(fields(StageName::MarketScan), vec!["niche", "geo"]);
        assert_eq!(fields(StageName::Personas), vec!["niche", "geo"]);
        assert_eq!(fields(StageName::SolutionShapes), vec!["niche", "constraints"]);
        assert_eq!(fields(StageName::GtmIdeas), vec!["niche", "geo", "constraints", "stage"]);
        assert_eq!(fields(StageName::TechNotes), vec!["niche", "founder_profile"]);
        assert_eq!(fields(StageName::OpsNotes), vec!["niche", "geo", "stage"]);
        assert_eq!(fields(StageName::RisksList), vec!["niche"]);
    }

    #[test]
    fn test_no_stage_references_goals() {
        for name in StageName::ALL {
            assert!(!Stage::for_name(name).referenced_fields().contains(&"goals"));
        }
    }

    #[test]
    fn test_render_prompt_substitutes_request() {
        let prompt = Stage::for_name(StageName::GtmIdeas)
            .render_prompt(&request("Pakistan"))
            .unwrap();
        assert!(prompt.starts_with(
            "GTM for AI agents for ecommerce in Pakistan. Constraints: tight budget. Stage: MVP."
        ));
        assert!(prompt.contains(r#"{"positioning":"...""#));
    }

    #[test]
    fn test_geo_only_changes_stages_that_reference_it() {
        let a = request("Pakistan");
        let b = request("GCC");
        for name in StageName::ALL {
            let stage = Stage::for_name(name);
            let pa = stage.render_prompt(&a).unwrap();
            let pb = stage.render_prompt(&b).unwrap();
            if stage.referenced_fields().contains(&"geo") {
                assert!(pa.contains("Pakistan") && !pa.contains("GCC"), "{name}");
                assert!(pb.contains("GCC") && !pb.contains("Pakistan"), "{name}");
            } else {
                assert_eq!(pa, pb, "{name}");
                assert!(!pa.contains("Pakistan"), "{name}");
            }
        }
    }

    #[test]
    fn test_routing_defaults_and_overrides() {
        let routing = StageRouting::default();
        assert_eq!(routing.provider_for(StageName::MarketScan), ProviderKind::Creative);
        assert_eq!(routing.provider_for(StageName::RisksList), ProviderKind::Fast);

        let routing = routing.with(StageName::MarketScan, ProviderKind::Fast);
        assert_eq!(routing.provider_for(StageName::MarketScan), ProviderKind::Fast);

        let routing = StageRouting::all(ProviderKind::Creative);
        assert!(StageName::ALL
            .into_iter()
            .all(|s| routing.provider_for(s) == ProviderKind::Creative));
    }
}
