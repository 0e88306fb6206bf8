#![warn(clippy::unwrap_in_result)]
#![warn(clippy::unwrap_used)]

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

const SEP: char = '/';

/// Folder (prefix) under which the asset host groups uploaded media.
///
/// Always stored normalized: no leading separators and exactly one
/// trailing separator, so it can be used as a listing prefix directly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FolderPath(String);

impl FolderPath {
    /// Normalizes raw folder input into a prefix.
    ///
    /// Returns `None` when nothing but separators or whitespace is left.
    #[must_use]
    pub fn normalize(raw: &str) -> Option<Self> {
        let trimmed = raw.trim_matches(SEP);
        if trimmed.trim().is_empty() {
            return None;
        }
        Some(Self(format!("{trimmed}{SEP}")))
    }

    #[must_use]
    pub fn as_prefix(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FolderPath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Resource category used to scope a listing query on the asset host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    /// Images only
    Image,
    /// Any media type the host stores
    Auto,
}

impl ResourceType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Auto => "auto",
        }
    }

    /// Broader category to retry with when this one yields nothing.
    #[must_use]
    pub const fn fallback(self) -> Option<Self> {
        match self {
            Self::Image => Some(Self::Auto),
            Self::Auto => None,
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Folder listing returned by the listing endpoint.
///
/// `urls` are ordered ascending by the host's public id and never contain
/// duplicates or empty entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Listing {
    /// Folder exactly as requested
    pub folder: String,
    /// Normalized prefix the upstream host was queried with
    #[serde(default)]
    pub prefix: String,
    /// Secure display URLs of every asset in the folder
    #[serde(default, alias = "images")]
    pub urls: Vec<String>,
}

/// Error payload of every non-success listing response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Human readable error message
    pub error: String,
    /// Upstream diagnostic text, when the asset host rejected the request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorBody {
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}
