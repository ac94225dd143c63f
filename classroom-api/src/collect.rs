use anyhow::Result;
use tracing::{debug, error};

use crate::extract::extract_document_text;
use crate::services::{ClassroomService, DocExportService};
use crate::submission::StudentWork;
use crate::types::{AccessToken, CourseId, CourseWorkId};

/// Lists an assignment's submissions and resolves each one, sequentially, to
/// the submitter's identity plus the newline-joined text of its attachments.
/// Failure of the overall pass degrades to an empty collection after
/// logging; availability wins over completeness here.
pub async fn collect_student_work(
    classroom: &impl ClassroomService,
    docs: &impl DocExportService,
    course: &CourseId,
    course_work: &CourseWorkId,
    token: &AccessToken,
) -> Vec<StudentWork> {
    match try_collect_student_work(classroom, docs, course, course_work, token).await {
        Ok(work) => work,
        Err(err) => {
            error!(?err, "error fetching student submissions");
            Vec::new()
        }
    }
}

async fn try_collect_student_work(
    classroom: &impl ClassroomService,
    docs: &impl DocExportService,
    course: &CourseId,
    course_work: &CourseWorkId,
    token: &AccessToken,
) -> Result<Vec<StudentWork>> {
    let submissions = classroom
        .list_student_submissions(course, course_work, token)
        .await?;

    let mut work = Vec::with_capacity(submissions.len());
    for submission in &submissions {
        let profile = classroom.get_user_profile(submission.user_id(), token).await?;
        let student_name = profile.display_name();

        let mut text = String::new();
        for document in submission.attached_documents() {
            let content = extract_document_text(docs, &document.document_url(), token).await;
            debug!(student = %student_name, %document, chars = content.len(), "extracted attachment");
            text.push_str(&content);
            text.push('\n');
        }

        work.push(StudentWork {
            student_id: submission.user_id().clone(),
            student_name,
            submission_id: submission.id().clone(),
            text: text.trim().to_owned(),
        });
    }

    Ok(work)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::student::UNKNOWN_STUDENT;
    use crate::testing::{FakeClassroom, FakeDocs, course, course_work_id, submission, token};

    #[tokio::test]
    async fn failed_attachment_does_not_drop_the_rest() {
        let classroom = FakeClassroom {
            submissions: Some(vec![submission("sub-1", "stu-1", &["doc-a", "doc-b", "doc-c"])]),
            profile_names: [("stu-1", Some("Ada Lovelace"))].into(),
            ..Default::default()
        };
        let docs = FakeDocs::with_texts([
            ("doc-a", Ok("first part")),
            ("doc-b", Err("connection reset")),
            ("doc-c", Ok("last part")),
        ]);

        let work =
            collect_student_work(&classroom, &docs, &course(), &course_work_id(), &token()).await;

        assert_eq!(work.len(), 1);
        assert_eq!(work[0].student_name.as_str(), "Ada Lovelace");
        assert_eq!(work[0].submission_id.as_str(), "sub-1");
        assert_eq!(work[0].text, "first part\n\nlast part");
    }

    #[tokio::test]
    async fn listing_failure_degrades_to_empty() {
        let classroom = FakeClassroom::default();
        let docs = FakeDocs::with_texts([]);

        let work =
            collect_student_work(&classroom, &docs, &course(), &course_work_id(), &token()).await;
        assert!(work.is_empty());
    }

    #[tokio::test]
    async fn profile_without_name_uses_placeholder() {
        let classroom = FakeClassroom {
            submissions: Some(vec![submission("sub-1", "stu-1", &["doc-a"])]),
            profile_names: [("stu-1", None)].into(),
            ..Default::default()
        };
        let docs = FakeDocs::with_texts([("doc-a", Ok("an answer"))]);

        let work =
            collect_student_work(&classroom, &docs, &course(), &course_work_id(), &token()).await;
        assert_eq!(work[0].student_name.as_str(), UNKNOWN_STUDENT);
    }

    #[tokio::test]
    async fn profile_fetch_failure_degrades_to_empty() {
        // No entry for stu-1: the profile call itself errors, which aborts
        // the whole pass into the empty collection.
        let classroom = FakeClassroom {
            submissions: Some(vec![submission("sub-1", "stu-1", &["doc-a"])]),
            ..Default::default()
        };
        let docs = FakeDocs::with_texts([("doc-a", Ok("an answer"))]);

        let work =
            collect_student_work(&classroom, &docs, &course(), &course_work_id(), &token()).await;
        assert!(work.is_empty());
    }

    #[tokio::test]
    async fn submission_without_attachments_has_empty_text() {
        let classroom = FakeClassroom {
            submissions: Some(vec![submission("sub-1", "stu-1", &[])]),
            profile_names: [("stu-1", Some("Ada Lovelace"))].into(),
            ..Default::default()
        };
        let docs = FakeDocs::with_texts([]);

        let work =
            collect_student_work(&classroom, &docs, &course(), &course_work_id(), &token()).await;
        assert_eq!(work.len(), 1);
        assert_eq!(work[0].text, "");
    }
}
