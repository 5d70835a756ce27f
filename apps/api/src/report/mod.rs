// Report generation: validates wizard input, fans out three LLM calls,
// and assembles the combined report. All LLM calls go through llm_client.

pub mod handlers;
pub mod orchestrator;
pub mod prompts;
pub mod validation;
