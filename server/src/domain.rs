use std::future::Future;

use kernel::{FolderPath, ResourceType};
use serde::Deserialize;

use crate::error::ListError;

/// One asset as reported by the host. Lives for a single listing call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AssetRecord {
    /// Host-assigned stable identifier, used as the sort key
    pub public_id: String,
    #[serde(default)]
    pub secure_url: Option<String>,
    #[serde(default)]
    pub resource_type: Option<String>,
}

/// One page of a prefix listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub resources: Vec<AssetRecord>,
    /// Continuation token; absent on the last page
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// External asset host capable of listing uploads by prefix.
pub trait AssetHost {
    /// Largest page size the host accepts.
    const MAX_PAGE_SIZE: u32;

    fn list_page(
        &self,
        prefix: &FolderPath,
        resource_type: ResourceType,
        cursor: Option<&str>,
    ) -> impl Future<Output = Result<Page, ListError>> + Send;
}
