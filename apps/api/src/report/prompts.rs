//! Prompt builders for the three report sections.
//!
//! Templates use `{placeholder}` markers filled with `str::replace`.

use crate::llm_client::prompts::{KOREAN_JSON_ONLY_RULES, NONE_PLACEHOLDER};
use crate::models::input::{CareerSnapshotInput, CompleteInput, RealityCheckInput};

/// A system/user message pair for one upstream call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

const REALITY_REPORT_SYSTEM: &str = r#"당신은 10년 이상 경력의 커리어 전환 전문 상담사입니다.
현실적이고 직설적으로 답변합니다.
절대 희망적 메시지를 주지 마세요.

응답은 반드시 다음 JSON 스키마를 따라야 합니다:
{
  "warnings": [
    {
      "title": "경고 제목",
      "reason": "경고 이유"
    }
  ],
  "suggestions": [
    {
      "direction": "전환 방향",
      "reason": "제안 이유"
    }
  ]
}

주의사항:
- warnings는 정확히 3개의 항목을 포함해야 합니다
- suggestions는 정확히 2개의 항목을 포함해야 합니다"#;

const REALITY_REPORT_USER_TEMPLATE: &str = r#"다음 정보를 바탕으로 커리어 전환 현실 리포트를 작성해주세요.

{reality_section}

{career_section}

위 정보를 바탕으로:
1. TOP 3 하지 말아야 할 것들 (warnings)
2. 2가지 가능한 전환 방향 (suggestions)

을 JSON 형식으로 제공해주세요."#;

const INCOME_MAP_SYSTEM: &str = r#"당신은 커리어를 수익화로 전환하는 전문 컨설턴트입니다.
기존 경력을 분석하여 즉시 수익화 가능한 역할을 찾아냅니다.
이론이 아닌 실전 경험 기반으로 답변합니다.

응답은 반드시 다음 JSON 스키마를 따라야 합니다:
{
  "roles": [
    {
      "role": "역할명",
      "description": "역할 설명",
      "monetizationPath": "수익화 경로"
    }
  ],
  "learningGaps": [
    {
      "area": "학습 영역",
      "urgency": "높음" | "중간" | "낮음"
    }
  ]
}

주의사항:
- roles는 정확히 3개의 항목을 포함해야 합니다
- learningGaps는 최소 2개 이상의 항목을 포함해야 합니다
- urgency는 "높음", "중간", "낮음" 중 하나여야 합니다"#;

const INCOME_MAP_USER_TEMPLATE: &str = r#"다음 커리어 이력을 바탕으로 수익화 지도를 작성해주세요.

{career_section}

위 경력을 분석하여:
1. 즉시 수익화 가능한 3가지 역할 (roles)
   - 각 역할에 대해 구체적인 수익화 경로 제시
2. 수익화를 위해 필요한 학습 격차 (learningGaps)
   - 각 항목의 긴급도 표시

을 JSON 형식으로 제공해주세요."#;

const DECISION_QUESTIONS_SYSTEM: &str = r#"당신은 행동 변화를 이끄는 전문 커리어 코치입니다.
회피 패턴을 깨고 실행을 유도하는 질문을 던집니다.
불편하지만 정확한 질문으로 사고를 자극합니다.

응답은 반드시 다음 JSON 스키마를 따라야 합니다:
{
  "questions": [
    "질문1",
    "질문2",
    "질문3",
    "질문4",
    "질문5"
  ],
  "dangerousAssumption": "가장 위험한 가정",
  "sevenDayExperiment": {
    "title": "실험 제목",
    "description": "실험 설명"
  }
}

주의사항:
- questions는 정확히 5개의 질문을 포함해야 합니다
- 질문은 회피를 깨는 날카로운 질문이어야 합니다
- dangerousAssumption은 1개의 문장입니다
- sevenDayExperiment는 7일 안에 실행 가능한 구체적 실험입니다"#;

const DECISION_QUESTIONS_USER_TEMPLATE: &str = r#"다음 정보를 바탕으로 결정을 촉진하는 질문과 실험을 설계해주세요.

{reality_section}

{career_section}

{idea_section}

위 정보를 바탕으로:
1. 5가지 회피 깨기 질문 (questions)
   - 불편하지만 핵심을 찌르는 질문
2. 가장 위험한 가정 1가지 (dangerousAssumption)
   - 이 사람이 가진 가장 위험한 착각
3. 7일 실험 (sevenDayExperiment)
   - 7일 안에 실행 가능한 구체적 실험
   - title과 description으로 구분

을 JSON 형식으로 제공해주세요."#;

pub fn build_reality_report_prompt(
    reality_check: &RealityCheckInput,
    career_snapshot: &CareerSnapshotInput,
) -> PromptPair {
    PromptPair {
        system: with_rules(REALITY_REPORT_SYSTEM),
        user: REALITY_REPORT_USER_TEMPLATE
            .replace("{reality_section}", &reality_section(reality_check))
            .replace("{career_section}", &career_section(career_snapshot)),
    }
}

pub fn build_income_map_prompt(career_snapshot: &CareerSnapshotInput) -> PromptPair {
    PromptPair {
        system: with_rules(INCOME_MAP_SYSTEM),
        user: INCOME_MAP_USER_TEMPLATE
            .replace("{career_section}", &career_section(career_snapshot)),
    }
}

pub fn build_decision_questions_prompt(input: &CompleteInput) -> PromptPair {
    let mut idea_section = format!(
        "## 아이디어 여부\n- 아이디어 보유: {}",
        if input.idea.has_idea { "예" } else { "아니오" }
    );
    if let Some(summary) = non_blank(input.idea.idea_summary.as_deref()) {
        idea_section.push_str(&format!("\n- 아이디어 내용: {summary}"));
    }

    PromptPair {
        system: with_rules(DECISION_QUESTIONS_SYSTEM),
        user: DECISION_QUESTIONS_USER_TEMPLATE
            .replace("{reality_section}", &reality_section(&input.reality_check))
            .replace("{career_section}", &career_section(&input.career_snapshot))
            .replace("{idea_section}", &idea_section),
    }
}

fn with_rules(system: &str) -> String {
    format!("{system}\n{KOREAN_JSON_ONLY_RULES}")
}

fn reality_section(reality_check: &RealityCheckInput) -> String {
    let constraints = non_blank(Some(reality_check.absolute_constraints.as_str()))
        .unwrap_or(NONE_PLACEHOLDER);
    format!(
        "## 현실 점검 정보\n\
         - 주당 투입 가능 시간: {}\n\
         - 예산 한도: {}\n\
         - 실패 허용 정도: {}\n\
         - 절대적 제약 조건: {}",
        reality_check.weekly_hours.label(),
        reality_check.budget_limit.label(),
        reality_check.failure_tolerance.label(),
        constraints
    )
}

/// Resume text, followed by the parsed summary when the client supplied one.
fn career_section(career_snapshot: &CareerSnapshotInput) -> String {
    let mut section = format!("## 커리어 이력\n{}", career_snapshot.resume_text.trim());
    if let Some(parsed) = &career_snapshot.parsed_career {
        section.push_str(&format!(
            "\n\n## 파싱된 경력 요약\n\
             - 수행 역할: {}\n\
             - 보유 기술: {}\n\
             - 반복 업무: {}",
            parsed.roles.join(", "),
            parsed.skills.join(", "),
            parsed.repeat_tasks.join(", ")
        ));
    }
    section
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
