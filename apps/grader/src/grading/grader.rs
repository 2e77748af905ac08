//! Grading backends and the per-request grading pipeline.
//!
//! `AppState` holds an `Arc<dyn ResumeGrader>`. Production uses `LlmGrader`;
//! tests swap in canned graders without touching the handlers.

use async_trait::async_trait;
use bytes::Bytes;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::grading::conversation::build_conversation;
use crate::grading::document::inspect_document;
use crate::grading::prompts::{GRADE_TOOL_DESCRIPTION, GRADE_TOOL_NAME};
use crate::grading::sanitizer::sanitize;
use crate::grading::training::GradingAssets;
use crate::llm_client::{LlmClient, LlmError, OutputSchema};
use crate::models::conversation::ConversationTurn;
use crate::models::grade::GradeResult;

/// Runs a prepared conversation against a model and returns its raw grade.
#[async_trait]
pub trait ResumeGrader: Send + Sync {
    async fn grade(&self, conversation: &[ConversationTurn]) -> Result<GradeResult, AppError>;
}

/// Grader backed by the hosted model. One attempt per request.
pub struct LlmGrader {
    llm: LlmClient,
    schema: OutputSchema,
}

impl LlmGrader {
    pub fn new(llm: LlmClient) -> Self {
        Self {
            llm,
            schema: OutputSchema {
                name: GRADE_TOOL_NAME,
                description: GRADE_TOOL_DESCRIPTION,
                schema: GradeResult::json_schema(),
            },
        }
    }
}

#[async_trait]
impl ResumeGrader for LlmGrader {
    async fn grade(&self, conversation: &[ConversationTurn]) -> Result<GradeResult, AppError> {
        self.llm
            .generate_object::<GradeResult>(conversation, &self.schema)
            .await
            .map_err(|e| match e {
                LlmError::Parse(e) => AppError::SchemaViolation(e.to_string()),
                other => AppError::Llm(other.to_string()),
            })
    }
}

/// Full request pipeline: inspect the PDF, build the conversation, call the
/// grader, reject schema violations, then sanitize.
pub async fn grade_resume(
    assets: &GradingAssets,
    grader: &dyn ResumeGrader,
    document: Bytes,
) -> Result<GradeResult, AppError> {
    let request_id = Uuid::new_v4();
    let span = info_span!("grade_resume", %request_id, bytes = document.len());

    async move {
        let document = inspect_document(document)?;
        let conversation =
            build_conversation(assets, document.bytes, document.author.as_deref());

        let raw = grader.grade(&conversation).await?;
        raw.validate().map_err(AppError::SchemaViolation)?;

        let flags_before = raw.red_flags.len() + raw.yellow_flags.len();
        let sanitized = sanitize(raw);
        info!(
            grade = ?sanitized.grade,
            red_flags = sanitized.red_flags.len(),
            yellow_flags = sanitized.yellow_flags.len(),
            removed = flags_before - sanitized.red_flags.len() - sanitized.yellow_flags.len(),
            "Resume graded"
        );

        Ok(sanitized)
    }
    .instrument(span)
    .await
}
