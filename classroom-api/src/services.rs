use std::future::Future;

use anyhow::Result;

use crate::course_work::CourseWork;
use crate::doc_link::DocumentId;
use crate::student::{StudentId, UserProfile};
use crate::submission::{StudentSubmission, SubmissionId};
use crate::types::{AccessToken, CourseId, CourseWorkId};

/// Operations the relay needs from the classroom platform. `Client` is the
/// production implementation; tests substitute fakes.
pub trait ClassroomService {
    fn get_course_work(
        &self,
        course: &CourseId,
        course_work: &CourseWorkId,
        token: &AccessToken,
    ) -> impl Future<Output = Result<CourseWork>> + Send;

    fn list_student_submissions(
        &self,
        course: &CourseId,
        course_work: &CourseWorkId,
        token: &AccessToken,
    ) -> impl Future<Output = Result<Vec<StudentSubmission>>> + Send;

    fn get_user_profile(
        &self,
        student: &StudentId,
        token: &AccessToken,
    ) -> impl Future<Output = Result<UserProfile>> + Send;

    fn patch_assigned_grade(
        &self,
        course: &CourseId,
        course_work: &CourseWorkId,
        submission: &SubmissionId,
        grade: u32,
        token: &AccessToken,
    ) -> impl Future<Output = Result<()>> + Send;

    fn return_submission(
        &self,
        course: &CourseId,
        course_work: &CourseWorkId,
        submission: &SubmissionId,
        token: &AccessToken,
    ) -> impl Future<Output = Result<()>> + Send;
}

/// Plain-text export of hosted documents.
pub trait DocExportService {
    fn export_document_text(
        &self,
        document: &DocumentId,
        token: &AccessToken,
    ) -> impl Future<Output = Result<String>> + Send;
}
