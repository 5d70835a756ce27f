//! Report orchestration: fans out the three section prompts and assembles the result.
//!
//! Flow: build prompts → three concurrent `call_with_retry` → JSON extraction →
//!       `CompleteReport`.
//!
//! One `CancellationToken` is shared by all three calls and fired by a timer when
//! the wall-clock budget runs out. In-flight requests and pending backoffs both
//! observe it, so no retry starts after the deadline.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::{parse_json_response, LlmError, TextGenerator};
use crate::models::input::CompleteInput;
use crate::models::report::{CompleteReport, DecisionQuestions, IncomeMap, RealityReport};
use crate::report::prompts::{
    build_decision_questions_prompt, build_income_map_prompt, build_reality_report_prompt,
    PromptPair,
};

/// Fixed-delay retry: no jitter, no growth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 1,
            backoff: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationSettings {
    /// Covers all three calls together, not each one.
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(25),
            retry: RetryPolicy::default(),
        }
    }
}

/// Calls the generator up to `max_retries + 1` times, sleeping `backoff` between
/// attempts. Returns `LlmError::Cancelled` as soon as `cancel` fires.
pub async fn call_with_retry(
    generator: &dyn TextGenerator,
    prompt: &PromptPair,
    policy: RetryPolicy,
    cancel: &CancellationToken,
) -> Result<String, LlmError> {
    let mut attempt: u32 = 0;

    loop {
        let result = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(LlmError::Cancelled),
            result = generator.generate(&prompt.system, &prompt.user) => result,
        };

        let err = match result {
            Ok(text) => return Ok(text),
            Err(err) => err,
        };

        if attempt >= policy.max_retries {
            return Err(err);
        }
        attempt += 1;

        warn!(
            "LLM call attempt {}/{} failed, retrying after {}ms: {}",
            attempt,
            policy.max_retries.saturating_add(1),
            policy.backoff.as_millis(),
            err
        );

        tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(LlmError::Cancelled),
            () = tokio::time::sleep(policy.backoff) => {}
        }
    }
}

/// Generates the three report sections concurrently and combines them.
///
/// Any single failure fails the whole report. When the shared deadline has
/// passed the outcome is `AppError::Timeout`, whichever call noticed first.
pub async fn generate_report(
    generator: &dyn TextGenerator,
    input: &CompleteInput,
    settings: GenerationSettings,
) -> Result<CompleteReport, AppError> {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("generate_report", %request_id);

    async move {
        let reality_prompt =
            build_reality_report_prompt(&input.reality_check, &input.career_snapshot);
        let income_prompt = build_income_map_prompt(&input.career_snapshot);
        let decision_prompt = build_decision_questions_prompt(input);

        let cancel = CancellationToken::new();
        // Cancels on every exit path so the timer task below ends with the request.
        let _cancel_on_exit = cancel.clone().drop_guard();

        let timer = {
            let cancel = cancel.clone();
            let timeout = settings.timeout;
            tokio::spawn(async move {
                tokio::select! {
                    () = cancel.cancelled() => {}
                    () = tokio::time::sleep(timeout) => {
                        warn!("Report deadline of {}ms reached, cancelling upstream calls", timeout.as_millis());
                        cancel.cancel();
                    }
                }
            })
        };

        info!("Requesting 3 report sections");

        let joined = tokio::try_join!(
            call_with_retry(generator, &reality_prompt, settings.retry, &cancel),
            call_with_retry(generator, &income_prompt, settings.retry, &cancel),
            call_with_retry(generator, &decision_prompt, settings.retry, &cancel),
        );

        let timed_out = cancel.is_cancelled();
        timer.abort();

        let (reality_text, income_text, decision_text) = match joined {
            Ok(texts) => texts,
            Err(_) if timed_out => return Err(AppError::Timeout),
            Err(err) => return Err(err.into()),
        };

        let reality_report: RealityReport = parse_json_response(&reality_text)?;
        let income_map: IncomeMap = parse_json_response(&income_text)?;
        let decision_questions: DecisionQuestions = parse_json_response(&decision_text)?;

        info!("Report assembled");

        Ok(CompleteReport {
            reality_report,
            income_map,
            decision_questions,
        })
    }
    .instrument(span)
    .await
}
