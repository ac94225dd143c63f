use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::services::ClassroomService;
use crate::submission::SubmissionId;
use crate::types::{AccessToken, CourseId, CourseWorkId};

/// A reviewed grade ready to be pushed back to the platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradedSubmission {
    pub submission_id: SubmissionId,
    pub grade: u32,
    pub feedback: String,
}

/// Outcome of publishing one graded submission. Items succeed or fail
/// independently; output order mirrors input order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishOutcome {
    pub submission_id: SubmissionId,
    pub grade: u32,
    pub feedback: String,
    pub success: bool,
    pub error: Option<String>,
}

/// Pushes each grade to the platform, then returns the submission to its
/// student. The grade patch and the return action are one unit per item: if
/// either fails the item is marked unsuccessful with the captured error, and
/// the loop continues unconditionally.
pub async fn publish_grades(
    classroom: &impl ClassroomService,
    course: &CourseId,
    course_work: &CourseWorkId,
    token: &AccessToken,
    graded: Vec<GradedSubmission>,
) -> Vec<PublishOutcome> {
    let mut outcomes = Vec::with_capacity(graded.len());

    for item in graded {
        info!(submission = %item.submission_id, grade = item.grade, "publishing grade");

        let result = publish_one(classroom, course, course_work, token, &item).await;
        let error = result.err().map(|err| format!("{err:#}"));
        if let Some(error) = &error {
            error!(submission = %item.submission_id, %error, "error publishing grade");
        }

        outcomes.push(PublishOutcome {
            submission_id: item.submission_id,
            grade: item.grade,
            feedback: item.feedback,
            success: error.is_none(),
            error,
        });
    }

    outcomes
}

async fn publish_one(
    classroom: &impl ClassroomService,
    course: &CourseId,
    course_work: &CourseWorkId,
    token: &AccessToken,
    item: &GradedSubmission,
) -> Result<()> {
    classroom
        .patch_assigned_grade(course, course_work, &item.submission_id, item.grade, token)
        .await?;
    classroom
        .return_submission(course, course_work, &item.submission_id, token)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeClassroom, course, course_work_id, token};

    fn graded(id: &str, grade: u32) -> GradedSubmission {
        GradedSubmission {
            submission_id: SubmissionId::new(id.to_owned()),
            grade,
            feedback: format!("feedback for {id}"),
        }
    }

    #[tokio::test]
    async fn failed_item_does_not_stop_the_batch() {
        let classroom = FakeClassroom {
            failing_patches: vec!["sub-2"],
            ..Default::default()
        };
        let graded = vec![graded("sub-1", 9), graded("sub-2", 5), graded("sub-3", 7)];

        let outcomes =
            publish_grades(&classroom, &course(), &course_work_id(), &token(), graded).await;

        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].success);
        assert!(outcomes[0].error.is_none());
        assert!(!outcomes[1].success);
        assert!(outcomes[1].error.is_some());
        assert!(outcomes[2].success);

        let calls = classroom.calls.lock().unwrap();
        assert_eq!(
            *calls,
            vec!["patch sub-1 9", "return sub-1", "patch sub-3 7", "return sub-3"]
        );
    }

    #[tokio::test]
    async fn outcomes_mirror_input_order_and_payload() {
        let classroom = FakeClassroom::default();
        let graded = vec![graded("sub-1", 10), graded("sub-2", 0)];

        let outcomes =
            publish_grades(&classroom, &course(), &course_work_id(), &token(), graded).await;

        assert_eq!(outcomes[0].submission_id.as_str(), "sub-1");
        assert_eq!(outcomes[0].grade, 10);
        assert_eq!(outcomes[0].feedback, "feedback for sub-1");
        assert_eq!(outcomes[1].submission_id.as_str(), "sub-2");
    }
}
