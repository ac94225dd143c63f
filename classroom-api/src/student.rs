use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder display name when a profile carries none.
pub const UNKNOWN_STUDENT: &str = "Unknown Student";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId {
    id: String,
}

impl StudentId {
    pub fn new(id: String) -> Self {
        Self { id }
    }

    pub fn as_str(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.id.fmt(f)
    }
}

#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentName {
    name: String,
}

impl StudentName {
    pub fn new(name: String) -> Self {
        Self { name }
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for StudentName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.name.fmt(f)
    }
}

/// Wire shape of `GET /v1/userProfiles/{id}`. Only the display name is used.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    name: Option<ProfileName>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileName {
    #[serde(default)]
    full_name: Option<StudentName>,
}

impl UserProfile {
    pub fn display_name(&self) -> StudentName {
        self.name
            .as_ref()
            .and_then(|name| name.full_name.clone())
            .unwrap_or_else(|| StudentName::new(UNKNOWN_STUDENT.to_owned()))
    }
}
