use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use kernel::ErrorBody;
use thiserror::Error;

/// Everything that can go wrong while answering a listing request.
#[derive(Debug, Error)]
pub enum ListError {
    #[error("Missing folder parameter")]
    Validation,
    #[error("Cloudinary configuration missing")]
    Config,
    /// The asset host answered with a non-success status
    #[error("asset host responded with status {status}")]
    Upstream { status: u16, body: String },
    #[error(transparent)]
    Network(#[from] reqwest::Error),
}

impl ListError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation => StatusCode::BAD_REQUEST,
            Self::Config | Self::Network(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
        }
    }
}

impl IntoResponse for ListError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Self::Upstream { status, body } => {
                ErrorBody::new(format!("Asset host listing failed with status {status}"))
                    .with_details(body)
            }
            other => ErrorBody::new(other.to_string()),
        };
        (status, Json(body)).into_response()
    }
}
