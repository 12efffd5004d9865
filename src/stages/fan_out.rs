use std::time::Instant;

use tracing::{info, warn};

use super::stage::{ProviderSet, Stage, StageRouting};
use crate::error::Result;
use crate::models::{StageName, StageResults, StrategyRequest};

/// Output of the fan-out: every stage's text plus the untouched request
#[derive(Debug, Clone)]
pub struct FanOut {
    pub results: StageResults,
    pub original: StrategyRequest,
}

/// Run all eight stages concurrently against the same request.
///
/// Completes only when every stage has answered. The first failure aborts
/// the run: in-flight stages are dropped and no partial results escape.
pub async fn run_all(
    providers: &ProviderSet,
    routing: &StageRouting,
    request: &StrategyRequest,
) -> Result<FanOut> {
    request.validate()?;

    let started = Instant::now();
    info!("Fan-out: dispatching {} stages", StageName::ALL.len());

    let run = move |name: StageName| run_stage(providers, routing, name, request);

    let joined = tokio::try_join!(
        run(StageName::ProblemMap),
        run(StageName::MarketScan),
        run(StageName::Personas),
        run(StageName::SolutionShapes),
        run(StageName::GtmIdeas),
        run(StageName::TechNotes),
        run(StageName::OpsNotes),
        run(StageName::RisksList),
    );

    let (
        problem_map,
        market_scan,
        personas,
        solution_shapes,
        gtm_ideas,
        tech_notes,
        ops_notes,
        risks_list,
    ) = match joined {
        Ok(outputs) => outputs,
        Err(e) => {
            warn!("Fan-out aborted: {}", e);
            return Err(e);
        }
    };

    let results = StageResults {
        problem_map,
        market_scan,
        personas,
        solution_shapes,
        gtm_ideas,
        tech_notes,
        ops_notes,
        risks_list,
    };

    info!(
        "Fan-out complete: {} chars across {} stages in {:.1}s",
        results.total_len(),
        StageName::ALL.len(),
        started.elapsed().as_secs_f64()
    );

    Ok(FanOut {
        results,
        original: request.clone(),
    })
}

async fn run_stage(
    providers: &ProviderSet,
    routing: &StageRouting,
    name: StageName,
    request: &StrategyRequest,
) -> Result<String> {
    let stage = Stage::for_name(name);
    let provider = providers.get(routing.provider_for(name));
    stage.run(provider, request).await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use tokio::sync::Barrier;

    use super::*;
    use crate::error::StrategistError;
    use crate::models::FounderStage;
    use crate::stages::ProviderKind;
    use crate::testing::ScriptedProvider;

    fn request() -> StrategyRequest {
        StrategyRequest::new(
            "AI career pathway builder",
            FounderStage::Idea,
            "Pakistan",
            "full-stack engineer",
            "budget <$1k/mo",
            "500 WAU",
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_each_stage_runs_once_on_its_provider() {
        let fast = Arc::new(
            ScriptedProvider::new("fast")
                .reply("ruthless product discovery", "PROBLEMS")
                .reply("personas", "PERSONAS")
                .reply("GTM for", "GTM")
                .reply("MVP-first architecture", "TECH")
                .reply("top 8 risks", "RISKS"),
        );
        let creative = Arc::new(
            ScriptedProvider::new("creative")
                .reply("market mapper", "MARKET")
                .reply("solution shapes", "SOLUTIONS")
                .reply("ops & compliance", "OPS"),
        );
        let providers = ProviderSet::new(fast.clone(), creative.clone());

        let out = run_all(&providers, &StageRouting::default(), &request())
            .await
            .unwrap();

        assert_eq!(fast.call_count(), 5);
        assert_eq!(creative.call_count(), 3);
        assert_eq!(out.results.problem_map, "PROBLEMS");
        assert_eq!(out.results.market_scan, "MARKET");
        assert_eq!(out.results.personas, "PERSONAS");
        assert_eq!(out.results.solution_shapes, "SOLUTIONS");
        assert_eq!(out.results.gtm_ideas, "GTM");
        assert_eq!(out.results.tech_notes, "TECH");
        assert_eq!(out.results.ops_notes, "OPS");
        assert_eq!(out.results.risks_list, "RISKS");
        assert_eq!(out.original, request());
    }

    #[tokio::test]
    async fn test_prompts_match_rendered_templates() {
        let fast = Arc::new(ScriptedProvider::new("fast"));
        let providers = ProviderSet::new(fast.clone(), fast.clone());
        let routing = StageRouting::all(ProviderKind::Fast);

        run_all(&providers, &routing, &request()).await.unwrap();

        let mut sent = fast.prompts();
        let mut expected: Vec<String> = StageName::ALL
            .into_iter()
            .map(|name| Stage::for_name(name).render_prompt(&request()).unwrap())
            .collect();
        sent.sort();
        expected.sort();
        assert_eq!(sent, expected);
    }

    #[tokio::test]
    async fn test_stages_run_concurrently() {
        // Every call waits for all eight; a sequential fan-out would never finish
        let barrier = Arc::new(Barrier::new(StageName::ALL.len()));
        let fast = Arc::new(ScriptedProvider::new("fast").gated(barrier.clone()));
        let creative = Arc::new(ScriptedProvider::new("creative").gated(barrier));
        let providers = ProviderSet::new(fast, creative);

        let out = tokio::time::timeout(
            Duration::from_secs(5),
            run_all(&providers, &StageRouting::default(), &request()),
        )
        .await
        .expect("stages did not run concurrently")
        .unwrap();

        assert_eq!(out.results.market_scan, "creative output");
        assert_eq!(out.results.problem_map, "fast output");
    }

    #[tokio::test]
    async fn test_single_stage_failure_aborts_run() {
        let fast = Arc::new(ScriptedProvider::new("fast"));
        let creative =
            Arc::new(ScriptedProvider::new("creative").fail("market mapper", "quota exceeded"));
        let providers = ProviderSet::new(fast, creative);

        let err = run_all(&providers, &StageRouting::default(), &request())
            .await
            .unwrap_err();

        assert!(matches!(err, StrategistError::Provider(_)));
        assert!(err.to_string().contains("quota exceeded"));
    }

    #[tokio::test]
    async fn test_blank_request_fails_before_dispatch() {
        let fast = Arc::new(ScriptedProvider::new("fast"));
        let providers = ProviderSet::new(fast.clone(), fast.clone());
        let json = r#"{"niche":"x","stage":"idea","geo":"","founder_profile":"f","constraints":"c","goals":"g"}"#;
        let request: StrategyRequest = serde_json::from_str(json).unwrap();

        let err = run_all(&providers, &StageRouting::default(), &request)
            .await
            .unwrap_err();

        assert!(matches!(err, StrategistError::Configuration(_)));
        assert_eq!(fast.call_count(), 0);
    }
}
