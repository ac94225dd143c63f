use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;

use crate::util::DOCS_BASE_URL;

lazy_static! {
    static ref DOC_ID: Regex = Regex::new(r"/d/([^/]+)").unwrap();
}

/// Identifier of a hosted document, as embedded in `/d/<id>` link segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct DocumentId {
    id: String,
}

impl DocumentId {
    pub fn new(id: String) -> Self {
        Self { id }
    }

    /// Extracts the document id from a document-hosting URL, or `None` when
    /// the URL has no `/d/<id>` segment.
    pub fn from_url(url: &str) -> Option<Self> {
        DOC_ID
            .captures(url)
            .map(|captures| Self::new(captures[1].to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.id
    }

    /// Canonical document URL for this id.
    pub fn document_url(&self) -> String {
        format!("{DOCS_BASE_URL}/document/d/{}", self.id)
    }

    /// Plain-text export URL for this id.
    pub fn export_url(&self) -> String {
        format!("{DOCS_BASE_URL}/document/d/{}/export?format=txt", self.id)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.id.fmt(f)
    }
}
