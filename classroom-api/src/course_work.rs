use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::error;

use crate::doc_link::DocumentId;
use crate::services::ClassroomService;
use crate::types::{AccessToken, CourseId, CourseWorkId};

/// Wire shape of one piece of course work. Only the attached materials
/// matter to the relay.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseWork {
    #[serde(default)]
    materials: Vec<Material>,
}

impl CourseWork {
    /// First material that links a drive document, in material list order.
    pub fn first_document(&self) -> Option<&DocumentId> {
        self.materials.iter().find_map(Material::document)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Material {
    drive_file: Option<SharedDriveFile>,
}

impl Material {
    fn document(&self) -> Option<&DocumentId> {
        self.drive_file.as_ref().map(|shared| &shared.drive_file.id)
    }
}

/// Materials nest the file reference one level deeper than submission
/// attachments do.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SharedDriveFile {
    drive_file: DriveFile,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DriveFile {
    pub(crate) id: DocumentId,
}

/// Finds the assignment's instructions document: the URL of the first
/// material that links a drive document. Failure here is fatal to the
/// processing request that triggered it.
pub async fn locate_instructions_document(
    classroom: &impl ClassroomService,
    course: &CourseId,
    course_work: &CourseWorkId,
    token: &AccessToken,
) -> Result<String> {
    let course_work = classroom
        .get_course_work(course, course_work, token)
        .await
        .inspect_err(|err| error!(?err, "error fetching assignment details"))
        .context("failed to retrieve assignment file")?;

    let document = course_work
        .first_document()
        .context("no document link found for the assignment")?;

    Ok(document.document_url())
}
