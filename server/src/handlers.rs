#![allow(clippy::unused_async)]
use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Query, State};
use kernel::{ErrorBody, FolderPath, Listing};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::ListError;
use crate::lister;
use crate::listing_reply::ListingReply;
use crate::AppState;

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Asset host folder to list
    folder: Option<String>,
}

/// Lists asset URLs stored under a folder
#[utoipa::path(
    get,
    path = "/list-images",
    responses(
        (status = 200, response = ListingReply),
        (status = 400, description = "Missing folder parameter", body = ErrorBody),
        (status = 500, description = "Configuration or server error", body = ErrorBody),
        (status = "default", description = "Asset host error, status propagated", body = ErrorBody)
    ),
    tag = "listing",
    params(ListQuery),
)]
pub async fn list_images(
    Query(query): Query<ListQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<ListingReply, ListError> {
    let raw = query.folder.unwrap_or_default();
    let Some(folder) = FolderPath::normalize(&raw) else {
        tracing::warn!("listing rejected: '{raw}' is not a folder");
        return Err(ListError::Validation);
    };
    let Some(host) = state.host.as_ref() else {
        tracing::error!("listing of '{folder}' rejected: asset host credentials not configured");
        return Err(ListError::Config);
    };

    let start = Instant::now();
    let urls = lister::list_assets(host, &folder)
        .await
        .inspect_err(|e| tracing::error!("listing of '{folder}' failed. Error: {e}"))?;
    tracing::info!(
        "folder: {folder} listed: {} time: {:?}",
        urls.len(),
        start.elapsed()
    );

    Ok(ListingReply::new(Listing {
        folder: raw,
        prefix: folder.to_string(),
        urls,
    }))
}
