use std::future::Future;

use futures::future::join_all;
use kernel::Listing;
use reqwest::Client;
use resource::Resource;
use thiserror::Error;

use gallery::GalleryController;
use render::Renderer;

pub mod gallery;
pub mod lightbox;
pub mod render;
pub mod resource;

const LIST_IMAGES_PATH: &str = "list-images";
const FOLDER_PARAM: &str = "folder";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid listing endpoint URI: {0}")]
    InvalidUri(String),
    #[error("listing endpoint responded with status {status}: {body}")]
    Upstream { status: u16, body: String },
    #[error(transparent)]
    Network(#[from] reqwest::Error),
    #[error("listing response is not valid: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Where a gallery gets its ordered image URLs from.
pub trait ListingSource {
    fn fetch(&self, folder: &str) -> impl Future<Output = Result<Vec<String>, ClientError>> + Send;
}

/// HTTP client of the listing endpoint.
#[derive(Clone)]
pub struct ListingClient {
    http: Client,
    base: Resource,
}

impl ListingClient {
    pub fn new(uri: &str) -> Result<Self, ClientError> {
        let base = Resource::new(uri).ok_or_else(|| ClientError::InvalidUri(uri.to_owned()))?;
        Ok(Self {
            http: Client::new(),
            base,
        })
    }

    fn listing_url(&self, folder: &str) -> String {
        let mut resource = self.base.clone();
        resource
            .append_path(LIST_IMAGES_PATH)
            .append_query(FOLDER_PARAM, folder);
        resource.to_string()
    }

    pub async fn listing(&self, folder: &str) -> Result<Listing, ClientError> {
        let response = self.http.get(self.listing_url(folder)).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ClientError::Upstream {
                status: status.as_u16(),
                body,
            });
        }
        Ok(serde_json::from_str(&body)?)
    }
}

impl ListingSource for ListingClient {
    async fn fetch(&self, folder: &str) -> Result<Vec<String>, ClientError> {
        self.listing(folder).await.map(|listing| listing.urls)
    }
}

/// Loads every gallery concurrently. Galleries finish in no particular order.
pub async fn load_all<S, R>(controllers: &mut [GalleryController<S, R>])
where
    S: ListingSource,
    R: Renderer,
{
    join_all(controllers.iter_mut().map(|c| c.mount())).await;
}
