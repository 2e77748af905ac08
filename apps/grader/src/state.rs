use std::sync::Arc;

use crate::config::Config;
use crate::grading::grader::ResumeGrader;
use crate::grading::training::GradingAssets;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Rubric inputs and training examples, loaded once at startup.
    pub assets: Arc<GradingAssets>,
    /// Pluggable grader. Default: LlmGrader.
    pub grader: Arc<dyn ResumeGrader>,
    /// Client for `url=` resume downloads.
    pub http: reqwest::Client,
}
