// Resume grading: PDF intake, few-shot prompt construction, model call,
// schema validation and sanitization of the returned flags.
// All model calls go through llm_client — no direct Anthropic calls here.

pub mod conversation;
pub mod document;
pub mod grader;
pub mod handlers;
pub mod prompts;
pub mod sanitizer;
pub mod source;
pub mod training;
