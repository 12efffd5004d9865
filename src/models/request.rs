use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StrategistError};

/// How far along the startup is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FounderStage {
    #[serde(rename = "idea")]
    Idea,
    #[serde(rename = "discovery")]
    Discovery,
    #[serde(rename = "MVP")]
    Mvp,
    #[serde(rename = "PMF")]
    Pmf,
    #[serde(rename = "scale")]
    Scale,
}

impl FounderStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idea => "idea",
            Self::Discovery => "discovery",
            Self::Mvp => "MVP",
            Self::Pmf => "PMF",
            Self::Scale => "scale",
        }
    }
}

impl fmt::Display for FounderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FounderStage {
    type Err = StrategistError;

    /// Case-insensitive, so "mvp" and "MVP" are the same stage
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "idea" => Ok(Self::Idea),
            "discovery" => Ok(Self::Discovery),
            "mvp" => Ok(Self::Mvp),
            "pmf" => Ok(Self::Pmf),
            "scale" => Ok(Self::Scale),
            other => Err(StrategistError::configuration(format!(
                "unknown stage '{other}' (expected idea | discovery | MVP | PMF | scale)"
            ))),
        }
    }
}

/// The founder's inputs. Every stage and the synthesis call see the same values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyRequest {
    /// The business niche or idea
    niche: String,
    stage: FounderStage,
    /// Target geography (e.g., "Pakistan", "GCC", "Global")
    geo: String,
    /// Skills, network, unfair advantages
    founder_profile: String,
    /// Budget, timeline, compliance, hiring limits
    constraints: String,
    /// 12-week goals
    goals: String,
}

impl StrategyRequest {
    /// Build a request, rejecting blank fields
    pub fn new(
        niche: impl Into<String>,
        stage: FounderStage,
        geo: impl Into<String>,
        founder_profile: impl Into<String>,
        constraints: impl Into<String>,
        goals: impl Into<String>,
    ) -> Result<Self> {
        let request = Self {
            niche: niche.into(),
            stage,
            geo: geo.into(),
            founder_profile: founder_profile.into(),
            constraints: constraints.into(),
            goals: goals.into(),
        };
        request.validate()?;
        Ok(request)
    }

    /// Check that no field is blank. Deserialized requests must pass through here.
    pub fn validate(&self) -> Result<()> {
        let blank: Vec<&str> = self
            .text_fields()
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(key, _)| key)
            .collect();

        if blank.is_empty() {
            Ok(())
        } else {
            Err(StrategistError::configuration(format!(
                "missing required request fields: {}",
                blank.join(", ")
            )))
        }
    }

    pub fn niche(&self) -> &str {
        &self.niche
    }

    pub fn stage(&self) -> FounderStage {
        self.stage
    }

    pub fn geo(&self) -> &str {
        &self.geo
    }

    pub fn founder_profile(&self) -> &str {
        &self.founder_profile
    }

    pub fn constraints(&self) -> &str {
        &self.constraints
    }

    pub fn goals(&self) -> &str {
        &self.goals
    }

    fn text_fields(&self) -> [(&'static str, &str); 5] {
        [
            ("niche", self.niche.as_str()),
            ("geo", self.geo.as_str()),
            ("founder_profile", self.founder_profile.as_str()),
            ("constraints", self.constraints.as_str()),
            ("goals", self.goals.as_str()),
        ]
    }

    /// Template bindings for every request field
    pub fn template_vars(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("niche", self.niche.as_str()),
            ("stage", self.stage.as_str()),
            ("geo", self.geo.as_str()),
            ("founder_profile", self.founder_profile.as_str()),
            ("constraints", self.constraints.as_str()),
            ("goals", self.goals.as_str()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Result<StrategyRequest> {
        StrategyRequest::new(
            "AI career pathway builder",
            FounderStage::Idea,
            "Pakistan",
            "full-stack engineer",
            "budget <$1k/mo",
            "ship MVP in 8 weeks",
        )
    }

    #[test]
    fn test_new_accepts_complete_request() {
        let request = sample().unwrap();
        assert_eq!(request.geo(), "Pakistan");
        assert_eq!(request.stage(), FounderStage::Idea);
    }

    #[test]
    fn test_new_rejects_blank_fields() {
        let err = StrategyRequest::new("niche", FounderStage::Mvp, "  ", "", "c", "g").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("geo"));
        assert!(message.contains("founder_profile"));
        assert!(!message.contains("niche"));
    }

    #[test]
    fn test_stage_parse_is_case_insensitive() {
        assert_eq!("mvp".parse::<FounderStage>().unwrap(), FounderStage::Mvp);
        assert_eq!("PMF".parse::<FounderStage>().unwrap(), FounderStage::Pmf);
        assert!("series-b".parse::<FounderStage>().is_err());
    }

    #[test]
    fn test_stage_serde_uses_canonical_names() {
        let json = serde_json::to_string(&FounderStage::Mvp).unwrap();
        assert_eq!(json, "\"MVP\"");
        let stage: FounderStage = serde_json::from_str("\"discovery\"").unwrap();
        assert_eq!(stage, FounderStage::Discovery);
    }

    #[test]
    fn test_deserialized_request_still_validates() {
        let json = r#"{"niche":"x","stage":"scale","geo":"","founder_profile":"f","constraints":"c","goals":"g"}"#;
        let request: StrategyRequest = serde_json::from_str(json).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_template_vars_cover_all_fields() {
        let request = sample().unwrap();
        let vars = request.template_vars();
        assert_eq!(vars.len(), 6);
        assert!(vars.contains(&("stage", "idea")));
    }
}
