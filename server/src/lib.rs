use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::{classify::ServerErrorsFailureClass, trace::TraceLayer};
use tracing::Span;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod cloudinary;
pub mod config;
pub mod domain;
pub mod error;
mod handlers;
pub mod lister;
pub mod listing_reply;

extern crate serde;

#[cfg(test)] // <-- not needed in integration tests
extern crate rstest;

use crate::cloudinary::Cloudinary;
use crate::config::Config;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub const LIST_IMAGES_PATH: &str = "/list-images";
pub const NETLIFY_LIST_IMAGES_PATH: &str = "/.netlify/functions/list-images";

const DEFAULT_LOG_FILTER: &str = "folio=debug,server=debug,client=debug,tower_http=info";

/// Shared, read-only request state.
pub struct AppState {
    /// `None` when the credential context is incomplete
    host: Option<Cloudinary>,
}

impl AppState {
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let host = config
            .credentials
            .clone()
            .map(|credentials| Cloudinary::new(&config.api_base, credentials));
        Self { host }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(handlers::list_images),
    components(
        schemas(kernel::Listing, kernel::ErrorBody),
        responses(listing_reply::ListingReply)
    ),
    tags((name = "listing", description = "Asset host folder listings"))
)]
struct ApiDoc;

/// Installs the global tracing subscriber. Safe to call more than once.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

pub async fn run() -> io::Result<()> {
    init_tracing();

    let config = Config::from_env();
    if config.credentials.is_none() {
        tracing::warn!("asset host credentials are not configured, every listing will fail");
    }

    let socket = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(socket).await?;
    tracing::debug!("listening on {socket}");

    let app = create_routes(AppState::from_config(&config));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route(LIST_IMAGES_PATH, get(handlers::list_images))
        .route(NETLIFY_LIST_IMAGES_PATH, get(handlers::list_images))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http().on_failure(
                    |error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                        tracing::error!("Server error: {error}");
                    },
                ))
                .into_inner(),
        )
        .with_state(Arc::new(state))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("signal received, starting graceful shutdown");
}
