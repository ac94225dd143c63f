use std::sync::Arc;

use anyhow::Result;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use classroom_api::collect::collect_student_work;
use classroom_api::course_work::locate_instructions_document;
use classroom_api::extract::extract_document_text;
use classroom_api::publish::{publish_grades, GradedSubmission, PublishOutcome};
use classroom_api::services::{ClassroomService, DocExportService};
use classroom_api::student::{StudentId, StudentName};
use classroom_api::submission::SubmissionId;
use classroom_api::types::{AccessToken, CourseId, CourseWorkId};
use grader::completions::CompletionService;
use grader::engine::grade;
use grader::reply::GradeResult;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::{error, info};

/// Shared services behind the handlers. Generic over the platform and model
/// seams; tests substitute fakes, `main` plugs in the production clients.
pub struct AppState<C, M> {
    pub classroom: C,
    pub completions: M,
}

pub fn router<C, M>(state: Arc<AppState<C, M>>) -> Router
where
    C: ClassroomService + DocExportService + Send + Sync + 'static,
    M: CompletionService + Send + Sync + 'static,
{
    Router::new()
        .route("/new-assignment", post(process_assignment::<C, M>))
        .route("/post-grades", post(post_grades::<C, M>))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bearer token from the `Authorization` header. A missing or malformed
/// header maps to the endpoints' 400 contract, not an extractor rejection.
fn bearer_token(headers: &HeaderMap) -> Option<AccessToken> {
    let header = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?;
    if token.is_empty() {
        return None;
    }
    Some(AccessToken::new(token.to_owned()))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

fn bad_request() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorBody {
            error: "Missing required fields".to_owned(),
        }),
    )
        .into_response()
}

fn internal_error(err: anyhow::Error) -> Response {
    error!(?err, "error processing request");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            error: format!("{err}"),
        }),
    )
        .into_response()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProcessAssignmentRequest {
    #[serde(default)]
    course_id: Option<CourseId>,
    #[serde(default)]
    assignment_id: Option<CourseWorkId>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProcessAssignmentResponse {
    message: String,
    results: Vec<GradedStudent>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GradedStudent {
    student_name: StudentName,
    student_id: StudentId,
    submission_id: SubmissionId,
    grade_and_feedback: GradeResult,
}

async fn process_assignment<C, M>(
    State(state): State<Arc<AppState<C, M>>>,
    headers: HeaderMap,
    Json(request): Json<ProcessAssignmentRequest>,
) -> Response
where
    C: ClassroomService + DocExportService + Send + Sync + 'static,
    M: CompletionService + Send + Sync + 'static,
{
    let (Some(course), Some(course_work), Some(token)) = (
        request.course_id,
        request.assignment_id,
        bearer_token(&headers),
    ) else {
        return bad_request();
    };

    match try_process_assignment(&state, &course, &course_work, &token).await {
        Ok(results) => (
            StatusCode::OK,
            Json(ProcessAssignmentResponse {
                message: "Assignment processed successfully".to_owned(),
                results,
            }),
        )
            .into_response(),
        Err(err) => internal_error(err),
    }
}

async fn try_process_assignment<C, M>(
    state: &AppState<C, M>,
    course: &CourseId,
    course_work: &CourseWorkId,
    token: &AccessToken,
) -> Result<Vec<GradedStudent>>
where
    C: ClassroomService + DocExportService,
    M: CompletionService,
{
    let instructions_url =
        locate_instructions_document(&state.classroom, course, course_work, token).await?;
    info!(%instructions_url, "located assignment instructions");

    let instructions = extract_document_text(&state.classroom, &instructions_url, token).await;

    let student_work =
        collect_student_work(&state.classroom, &state.classroom, course, course_work, token).await;
    info!(submissions = student_work.len(), "collected student submissions");

    let mut results = Vec::with_capacity(student_work.len());
    for work in student_work {
        info!(student = %work.student_name, "grading submission");
        let grade_and_feedback = grade(&state.completions, &instructions, &work.text).await;
        results.push(GradedStudent {
            student_name: work.student_name,
            student_id: work.student_id,
            submission_id: work.submission_id,
            grade_and_feedback,
        });
    }

    Ok(results)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PostGradesRequest {
    #[serde(default)]
    course_id: Option<CourseId>,
    #[serde(default)]
    assignment_id: Option<CourseWorkId>,
    #[serde(default)]
    graded_submissions: Option<Vec<GradedSubmission>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PostGradesResponse {
    message: String,
    results: Vec<PublishOutcome>,
}

async fn post_grades<C, M>(
    State(state): State<Arc<AppState<C, M>>>,
    headers: HeaderMap,
    Json(request): Json<PostGradesRequest>,
) -> Response
where
    C: ClassroomService + DocExportService + Send + Sync + 'static,
    M: CompletionService + Send + Sync + 'static,
{
    let (Some(course), Some(course_work), Some(graded), Some(token)) = (
        request.course_id,
        request.assignment_id,
        request.graded_submissions,
        bearer_token(&headers),
    ) else {
        return bad_request();
    };

    info!(items = graded.len(), "received request to post grades");
    let results = publish_grades(&state.classroom, &course, &course_work, &token, graded).await;

    (
        StatusCode::OK,
        Json(PostGradesResponse {
            message: "Grades posting complete".to_owned(),
            results,
        }),
    )
        .into_response()
}
