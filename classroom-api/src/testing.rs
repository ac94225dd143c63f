//! Scriptable in-memory fakes standing in for the platform in unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{Result, anyhow, bail};
use serde_json::json;

use crate::course_work::CourseWork;
use crate::doc_link::DocumentId;
use crate::services::{ClassroomService, DocExportService};
use crate::student::{StudentId, UserProfile};
use crate::submission::{StudentSubmission, SubmissionId};
use crate::types::{AccessToken, CourseId, CourseWorkId};

pub(crate) fn course() -> CourseId {
    CourseId::new("course-1".to_owned())
}

pub(crate) fn course_work_id() -> CourseWorkId {
    CourseWorkId::new("work-1".to_owned())
}

pub(crate) fn token() -> AccessToken {
    AccessToken::new("test-token".to_owned())
}

pub(crate) fn submission(id: &str, user: &str, documents: &[&str]) -> StudentSubmission {
    let attachments: Vec<_> = documents
        .iter()
        .map(|document| json!({ "driveFile": { "id": document } }))
        .collect();
    serde_json::from_value(json!({
        "id": id,
        "userId": user,
        "assignmentSubmission": { "attachments": attachments },
    }))
    .unwrap()
}

/// Canned classroom responses plus a log of grade/return calls. A `None`
/// response means that call fails; a profile id absent from `profile_names`
/// fails the profile fetch, while a `None` name succeeds with a nameless
/// profile.
#[derive(Default)]
pub(crate) struct FakeClassroom {
    pub(crate) course_work: Option<CourseWork>,
    pub(crate) submissions: Option<Vec<StudentSubmission>>,
    pub(crate) profile_names: HashMap<&'static str, Option<&'static str>>,
    pub(crate) failing_patches: Vec<&'static str>,
    pub(crate) calls: Mutex<Vec<String>>,
}

impl ClassroomService for FakeClassroom {
    async fn get_course_work(
        &self,
        _: &CourseId,
        _: &CourseWorkId,
        _: &AccessToken,
    ) -> Result<CourseWork> {
        self.course_work
            .clone()
            .ok_or_else(|| anyhow!("connection reset"))
    }

    async fn list_student_submissions(
        &self,
        _: &CourseId,
        _: &CourseWorkId,
        _: &AccessToken,
    ) -> Result<Vec<StudentSubmission>> {
        self.submissions
            .clone()
            .ok_or_else(|| anyhow!("connection reset"))
    }

    async fn get_user_profile(&self, student: &StudentId, _: &AccessToken) -> Result<UserProfile> {
        match self.profile_names.get(student.as_str()) {
            Some(Some(name)) => {
                Ok(serde_json::from_value(json!({ "name": { "fullName": name } })).unwrap())
            }
            Some(None) => Ok(serde_json::from_value(json!({})).unwrap()),
            None => bail!("no such user profile"),
        }
    }

    async fn patch_assigned_grade(
        &self,
        _: &CourseId,
        _: &CourseWorkId,
        submission: &SubmissionId,
        grade: u32,
        _: &AccessToken,
    ) -> Result<()> {
        if self.failing_patches.iter().any(|id| *id == submission.as_str()) {
            bail!("insufficient permissions to grade submission");
        }
        self.calls
            .lock()
            .unwrap()
            .push(format!("patch {submission} {grade}"));
        Ok(())
    }

    async fn return_submission(
        &self,
        _: &CourseId,
        _: &CourseWorkId,
        submission: &SubmissionId,
        _: &AccessToken,
    ) -> Result<()> {
        self.calls.lock().unwrap().push(format!("return {submission}"));
        Ok(())
    }
}

pub(crate) struct FakeDocs {
    texts: HashMap<&'static str, Result<&'static str, &'static str>>,
}

impl FakeDocs {
    pub(crate) fn with_texts<const N: usize>(
        texts: [(&'static str, Result<&'static str, &'static str>); N],
    ) -> Self {
        Self {
            texts: texts.into(),
        }
    }
}

impl DocExportService for FakeDocs {
    async fn export_document_text(
        &self,
        document: &DocumentId,
        _: &AccessToken,
    ) -> Result<String> {
        match self.texts.get(document.as_str()) {
            Some(Ok(text)) => Ok((*text).to_owned()),
            Some(Err(message)) => Err(anyhow!("{message}")),
            None => bail!("document {document} not found"),
        }
    }
}
