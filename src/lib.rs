pub mod error;
pub mod io;
pub mod llm;
pub mod models;
pub mod stages;
pub mod strategist;

#[cfg(test)]
pub(crate) mod testing;

pub use error::StrategistError;
pub use io::{load_outcome_file, load_request_file, parse_request_json, render_summary, write_json};
pub use llm::{
    CompletionProvider, GeminiClient, GeminiConfig, OpenAiClient, OpenAiConfig, ProviderError,
};
pub use models::{
    ErrorResult, FounderStage, StageName, StageResults, Strategy, StrategyOutcome, StrategyRequest,
};
pub use stages::{
    normalize, run_all, strip_fences, synthesize, FanOut, ProviderKind, Stage, StageRouting,
    SynthesisTemplate,
};
pub use strategist::{Strategist, StrategistConfig};
