use std::fmt;

use serde::{Deserialize, Serialize};

use crate::course_work::DriveFile;
use crate::doc_link::DocumentId;
use crate::student::{StudentId, StudentName};

/// Platform-assigned submission identifier, unique within one listing pass.
#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionId {
    id: String,
}

impl SubmissionId {
    pub fn new(id: String) -> Self {
        Self { id }
    }

    pub fn as_str(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.id.fmt(f)
    }
}

/// Wire shape of the submission listing response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StudentSubmissionList {
    #[serde(default)]
    pub(crate) student_submissions: Vec<StudentSubmission>,
}

/// One student's submission record, with its drive-file attachments.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentSubmission {
    id: SubmissionId,
    user_id: StudentId,
    #[serde(default)]
    assignment_submission: Option<AssignmentSubmission>,
}

impl StudentSubmission {
    pub fn id(&self) -> &SubmissionId {
        &self.id
    }

    pub fn user_id(&self) -> &StudentId {
        &self.user_id
    }

    /// Attached drive documents, in attachment list order. Attachments of
    /// other kinds are skipped.
    pub fn attached_documents(&self) -> impl Iterator<Item = &DocumentId> {
        self.assignment_submission
            .iter()
            .flat_map(|submission| submission.attachments.iter())
            .filter_map(Attachment::document)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssignmentSubmission {
    #[serde(default)]
    attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Attachment {
    drive_file: Option<DriveFile>,
}

impl Attachment {
    fn document(&self) -> Option<&DocumentId> {
        self.drive_file.as_ref().map(|file| &file.id)
    }
}

/// Processed per-student record: identity plus the concatenated text of
/// every readable attachment.
#[derive(Debug, Clone)]
pub struct StudentWork {
    pub student_id: StudentId,
    pub student_name: StudentName,
    pub submission_id: SubmissionId,
    pub text: String,
}
