//! Wizard input: the three steps the user fills in before a report is generated.

use serde::{Deserialize, Serialize};

/// Hours per week the user can put into the transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeeklyHours {
    #[serde(rename = "5시간 미만")]
    UnderFive,
    #[serde(rename = "5-10시간")]
    FiveToTen,
    #[serde(rename = "10-20시간")]
    TenToTwenty,
    #[serde(rename = "20시간 이상")]
    OverTwenty,
}

impl WeeklyHours {
    pub fn label(self) -> &'static str {
        match self {
            WeeklyHours::UnderFive => "5시간 미만",
            WeeklyHours::FiveToTen => "5-10시간",
            WeeklyHours::TenToTwenty => "10-20시간",
            WeeklyHours::OverTwenty => "20시간 이상",
        }
    }
}

/// Budget ceiling, in KRW buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BudgetLimit {
    #[serde(rename = "100만원 미만")]
    UnderOneMillion,
    #[serde(rename = "100-500만원")]
    OneToFiveMillion,
    #[serde(rename = "500-1000만원")]
    FiveToTenMillion,
    #[serde(rename = "1000만원 이상")]
    OverTenMillion,
}

impl BudgetLimit {
    pub fn label(self) -> &'static str {
        match self {
            BudgetLimit::UnderOneMillion => "100만원 미만",
            BudgetLimit::OneToFiveMillion => "100-500만원",
            BudgetLimit::FiveToTenMillion => "500-1000만원",
            BudgetLimit::OverTenMillion => "1000만원 이상",
        }
    }
}

/// Three-step scale shared by failure tolerance and learning-gap urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    #[serde(rename = "낮음")]
    Low,
    #[serde(rename = "중간")]
    Medium,
    #[serde(rename = "높음")]
    High,
}

impl Level {
    pub fn label(self) -> &'static str {
        match self {
            Level::Low => "낮음",
            Level::Medium => "중간",
            Level::High => "높음",
        }
    }
}

/// Step 1: the user's hard constraints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealityCheckInput {
    pub weekly_hours: WeeklyHours,
    pub budget_limit: BudgetLimit,
    pub failure_tolerance: Level,
    #[serde(default)]
    pub absolute_constraints: String,
}

/// Career summary extracted client-side from the resume.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedCareer {
    pub roles: Vec<String>,
    pub skills: Vec<String>,
    pub repeat_tasks: Vec<String>,
}

/// Step 2: resume text, optionally with a parsed summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerSnapshotInput {
    pub resume_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parsed_career: Option<ParsedCareer>,
}

/// Step 3: whether the user already has a transition idea.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaInput {
    pub has_idea: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idea_summary: Option<String>,
}

/// All three wizard steps, as posted to `/api/generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteInput {
    pub reality_check: RealityCheckInput,
    pub career_snapshot: CareerSnapshotInput,
    pub idea: IdeaInput,
}
