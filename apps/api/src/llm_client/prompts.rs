// Shared prompt fragments.
// Each feature that needs LLM calls defines its own prompts.rs alongside it.

/// Closing rules appended to every report system prompt.
pub const KOREAN_JSON_ONLY_RULES: &str = "\
- 모든 응답은 한국어로 작성합니다
- JSON 형식만 응답하고, 추가 설명은 하지 마세요";

/// Rendered in place of an empty free-text field.
pub const NONE_PLACEHOLDER: &str = "없음";
