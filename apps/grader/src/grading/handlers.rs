//! Axum route handlers for the Grading API.

use axum::{
    body::Bytes,
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::BytesRejection,
        Multipart, Query, State,
    },
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::warn;

use crate::errors::AppError;
use crate::grading::grader::grade_resume;
use crate::grading::source::fetch_resume;
use crate::state::AppState;

/// Multipart field carrying the uploaded resume.
const RESUME_FIELD: &str = "resume";
const PUBLIC_CACHE_CONTROL: &str = "public, max-age=604800, stale-while-revalidate=604800";

#[derive(Debug, Deserialize)]
pub struct ResumeUrlQuery {
    pub url: Option<String>,
}

fn body_error(status: StatusCode, text: String) -> AppError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(text)
    } else {
        AppError::Validation(text)
    }
}

fn multipart_error(e: MultipartError) -> AppError {
    body_error(e.status(), e.body_text())
}

/// POST /api/grade
///
/// Grades the PDF uploaded in the `resume` multipart field. Requests that are
/// not multipart fall through to the `?url=` source.
pub async fn handle_grade_upload(
    State(state): State<AppState>,
    Query(query): Query<ResumeUrlQuery>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, AppError> {
    let mut multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => {
            warn!("Grade upload is not multipart ({rejection}), using url source");
            return grade_from_url(&state, query.url.unwrap_or_default()).await;
        }
    };

    let mut document = None;
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() == Some(RESUME_FIELD) {
            document = Some(field.bytes().await.map_err(multipart_error)?);
            break;
        }
    }

    let document = document.ok_or_else(|| {
        warn!("Grade request without a resume field");
        AppError::Validation("No resume file uploaded".to_string())
    })?;

    let result = grade_resume(&state.assets, state.grader.as_ref(), document).await?;
    Ok(Json(result).into_response())
}

/// POST /api/feedback
///
/// Grades a PDF sent as the raw request body.
pub async fn handle_grade_body(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, AppError> {
    let body = body.map_err(|rejection| body_error(rejection.status(), rejection.body_text()))?;
    let result = grade_resume(&state.assets, state.grader.as_ref(), body).await?;
    Ok(Json(result).into_response())
}

/// GET /api/grade?url=... and GET /api/feedback?url=...
///
/// Grades a bundled public resume (`public/...`) or a remote PDF.
/// Bundled resumes never change, so their grades are cacheable.
pub async fn handle_grade_url(
    State(state): State<AppState>,
    Query(query): Query<ResumeUrlQuery>,
) -> Result<Response, AppError> {
    grade_from_url(&state, query.url.unwrap_or_default()).await
}

async fn grade_from_url(state: &AppState, url: String) -> Result<Response, AppError> {
    let fetched = fetch_resume(
        &state.http,
        &state.config.public_dir,
        &url,
        state.config.max_upload_bytes,
    )
    .await?;

    let location = fetched
        .public_path
        .as_deref()
        .map(HeaderValue::from_str)
        .transpose()
        .map_err(|_| AppError::Validation(format!("Invalid public resume path: {url:?}")))?;

    let result = grade_resume(&state.assets, state.grader.as_ref(), fetched.bytes).await?;

    match location {
        Some(location) => Ok((
            [
                (header::CONTENT_LOCATION, location),
                (
                    header::CACHE_CONTROL,
                    HeaderValue::from_static(PUBLIC_CACHE_CONTROL),
                ),
            ],
            Json(result),
        )
            .into_response()),
        None => Ok(Json(result).into_response()),
    }
}
