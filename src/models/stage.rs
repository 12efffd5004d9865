use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StrategistError};

/// The eight research stages that run before synthesis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageName {
    ProblemMap,
    MarketScan,
    Personas,
    SolutionShapes,
    GtmIdeas,
    TechNotes,
    OpsNotes,
    RisksList,
}

impl StageName {
    pub const ALL: [StageName; 8] = [
        StageName::ProblemMap,
        StageName::MarketScan,
        StageName::Personas,
        StageName::SolutionShapes,
        StageName::GtmIdeas,
        StageName::TechNotes,
        StageName::OpsNotes,
        StageName::RisksList,
    ];

    /// Key under which the stage output is bound in the synthesis template
    pub fn key(&self) -> &'static str {
        match self {
            Self::ProblemMap => "problem_map",
            Self::MarketScan => "market_scan",
            Self::Personas => "personas",
            Self::SolutionShapes => "solution_shapes",
            Self::GtmIdeas => "gtm_ideas",
            Self::TechNotes => "tech_notes",
            Self::OpsNotes => "ops_notes",
            Self::RisksList => "risks_list",
        }
    }
}

impl fmt::Display for StageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for StageName {
    type Err = StrategistError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|stage| stage.key() == s)
            .ok_or_else(|| StrategistError::configuration(format!("unknown stage name '{s}'")))
    }
}

/// Raw text produced by each stage. Contents are opaque and never parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageResults {
    pub problem_map: String,
    pub market_scan: String,
    pub personas: String,
    pub solution_shapes: String,
    pub gtm_ideas: String,
    pub tech_notes: String,
    pub ops_notes: String,
    pub risks_list: String,
}

impl StageResults {
    pub fn get(&self, stage: StageName) -> &str {
        match stage {
            StageName::ProblemMap => &self.problem_map,
            StageName::MarketScan => &self.market_scan,
            StageName::Personas => &self.personas,
            StageName::SolutionShapes => &self.solution_shapes,
            StageName::GtmIdeas => &self.gtm_ideas,
            StageName::TechNotes => &self.tech_notes,
            StageName::OpsNotes => &self.ops_notes,
            StageName::RisksList => &self.risks_list,
        }
    }

    /// (key, text) pairs in stage order
    pub fn iter(&self) -> impl Iterator<Item = (StageName, &str)> {
        StageName::ALL.into_iter().map(move |stage| (stage, self.get(stage)))
    }

    /// Combined size of all stage outputs in bytes
    pub fn total_len(&self) -> usize {
        self.iter().map(|(_, text)| text.len()).sum()
    }
}
