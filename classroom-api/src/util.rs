use crate::student::StudentId;
use crate::submission::SubmissionId;
use crate::types::{CourseId, CourseWorkId};

pub const CLASSROOM_BASE_URL: &str = "https://classroom.googleapis.com/v1";
pub const DOCS_BASE_URL: &str = "https://docs.google.com";

pub fn course_work_url(course: &CourseId, course_work: &CourseWorkId) -> String {
    format!("{CLASSROOM_BASE_URL}/courses/{course}/courseWork/{course_work}")
}

pub fn student_submissions_url(course: &CourseId, course_work: &CourseWorkId) -> String {
    format!("{}/studentSubmissions", course_work_url(course, course_work))
}

pub fn submission_url(
    course: &CourseId,
    course_work: &CourseWorkId,
    submission: &SubmissionId,
) -> String {
    format!(
        "{}/{submission}",
        student_submissions_url(course, course_work)
    )
}

pub fn user_profile_url(student: &StudentId) -> String {
    format!("{CLASSROOM_BASE_URL}/userProfiles/{student}")
}
