use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client as HttpClient, RequestBuilder, Response};
use serde_json::json;
use tracing::debug;

use crate::course_work::CourseWork;
use crate::doc_link::DocumentId;
use crate::rate_limit::RateLimited;
use crate::services::{ClassroomService, DocExportService};
use crate::student::{StudentId, UserProfile};
use crate::submission::{StudentSubmission, StudentSubmissionList, SubmissionId};
use crate::types::{AccessToken, CourseId, CourseWorkId};
use crate::util::*;

/// HTTP client for the classroom platform and the document-hosting export
/// endpoint. Authentication is per-request: every call forwards the caller's
/// bearer token verbatim.
#[derive(Debug)]
pub struct Client {
    client: RateLimited<HttpClient>,
}

impl Client {
    pub fn new() -> Result<Self> {
        let client = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client: RateLimited::new(client, Duration::from_millis(200)),
        })
    }

    async fn http_client(&self) -> impl std::ops::DerefMut<Target = HttpClient> + '_ {
        self.client.get().await
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request
            .send()
            .await
            .context("classroom request failed")?
            .error_for_status()
            .context("classroom responded with an error")?;
        Ok(response)
    }

    async fn get(&self, url: String, token: &AccessToken) -> Result<Response> {
        debug!(%url, "GET");
        let request = self
            .http_client()
            .await
            .get(url)
            .bearer_auth(token.as_str());
        self.send(request).await
    }
}

impl ClassroomService for Client {
    async fn get_course_work(
        &self,
        course: &CourseId,
        course_work: &CourseWorkId,
        token: &AccessToken,
    ) -> Result<CourseWork> {
        let response = self.get(course_work_url(course, course_work), token).await?;
        response.json().await.context("could not parse course work")
    }

    async fn list_student_submissions(
        &self,
        course: &CourseId,
        course_work: &CourseWorkId,
        token: &AccessToken,
    ) -> Result<Vec<StudentSubmission>> {
        let response = self
            .get(student_submissions_url(course, course_work), token)
            .await?;
        let list: StudentSubmissionList = response
            .json()
            .await
            .context("could not parse student submissions")?;
        Ok(list.student_submissions)
    }

    async fn get_user_profile(
        &self,
        student: &StudentId,
        token: &AccessToken,
    ) -> Result<UserProfile> {
        let response = self.get(user_profile_url(student), token).await?;
        response.json().await.context("could not parse user profile")
    }

    async fn patch_assigned_grade(
        &self,
        course: &CourseId,
        course_work: &CourseWorkId,
        submission: &SubmissionId,
        grade: u32,
        token: &AccessToken,
    ) -> Result<()> {
        let url = format!(
            "{}?updateMask=assignedGrade",
            submission_url(course, course_work, submission)
        );
        debug!(%url, "PATCH");

        let request = self
            .http_client()
            .await
            .patch(url)
            .bearer_auth(token.as_str())
            .json(&json!({
                "assignedGrade": grade,
                "assignmentSubmission": {},
            }));
        self.send(request).await?;
        Ok(())
    }

    async fn return_submission(
        &self,
        course: &CourseId,
        course_work: &CourseWorkId,
        submission: &SubmissionId,
        token: &AccessToken,
    ) -> Result<()> {
        let url = format!("{}:return", submission_url(course, course_work, submission));
        debug!(%url, "POST");

        let request = self
            .http_client()
            .await
            .post(url)
            .bearer_auth(token.as_str())
            .json(&json!({}));
        self.send(request).await?;
        Ok(())
    }
}

impl DocExportService for Client {
    async fn export_document_text(
        &self,
        document: &DocumentId,
        token: &AccessToken,
    ) -> Result<String> {
        let url = document.export_url();
        debug!(%url, "GET");

        let request = self
            .http_client()
            .await
            .get(url)
            .bearer_auth(token.as_str());
        let response = self.send(request).await?;
        response.text().await.context("could not read document export")
    }
}
