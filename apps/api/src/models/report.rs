//! Report sections returned by the model, and their aggregate.
//!
//! Decoding is lenient: missing keys fall back to empty values and unknown
//! urgency labels are kept verbatim, so any well-formed JSON object the model
//! returns becomes a section.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Warning {
    pub title: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Suggestion {
    pub direction: String,
    pub reason: String,
}

/// What not to do (top 3) and two viable directions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RealityReport {
    pub warnings: Vec<Warning>,
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MonetizableRole {
    pub role: String,
    pub description: String,
    pub monetization_path: String,
}

/// `높음` / `중간` / `낮음`, or whatever label the model chose instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Urgency {
    High,
    Medium,
    Low,
    Other(String),
}

impl Urgency {
    pub fn label(&self) -> &str {
        match self {
            Urgency::High => "높음",
            Urgency::Medium => "중간",
            Urgency::Low => "낮음",
            Urgency::Other(label) => label,
        }
    }
}

impl From<String> for Urgency {
    fn from(label: String) -> Self {
        match label.as_str() {
            "높음" => Urgency::High,
            "중간" => Urgency::Medium,
            "낮음" => Urgency::Low,
            _ => Urgency::Other(label),
        }
    }
}

impl Serialize for Urgency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Urgency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Urgency::from)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningGap {
    pub area: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgency: Option<Urgency>,
}

/// Roles the user could earn from now, and what they still need to learn.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IncomeMap {
    pub roles: Vec<MonetizableRole>,
    pub learning_gaps: Vec<LearningGap>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Experiment {
    pub title: String,
    pub description: String,
}

/// Avoidance-breaking questions plus a one-week experiment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DecisionQuestions {
    pub questions: Vec<String>,
    pub dangerous_assumption: String,
    pub seven_day_experiment: Experiment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteReport {
    pub reality_report: RealityReport,
    pub income_map: IncomeMap,
    pub decision_questions: DecisionQuestions,
}
