use kernel::{FolderPath, ResourceType};
use reqwest::Client;

use crate::config::Credentials;
use crate::domain::{AssetHost, Page};
use crate::error::ListError;

/// Cloudinary Admin API client for `resources/{resource_type}/upload` listings.
#[derive(Clone)]
pub struct Cloudinary {
    http: Client,
    api_base: String,
    credentials: Credentials,
}

impl Cloudinary {
    #[must_use]
    pub fn new(api_base: &str, credentials: Credentials) -> Self {
        Self {
            http: Client::new(),
            api_base: api_base.trim_end_matches('/').to_owned(),
            credentials,
        }
    }

    fn resources_url(&self, resource_type: ResourceType) -> String {
        format!(
            "{}/{}/resources/{resource_type}/upload",
            self.api_base, self.credentials.cloud_name
        )
    }
}

impl AssetHost for Cloudinary {
    const MAX_PAGE_SIZE: u32 = 500;

    async fn list_page(
        &self,
        prefix: &FolderPath,
        resource_type: ResourceType,
        cursor: Option<&str>,
    ) -> Result<Page, ListError> {
        let max_results = Self::MAX_PAGE_SIZE.to_string();
        let mut query = vec![
            ("prefix", prefix.as_prefix()),
            ("max_results", max_results.as_str()),
        ];
        if let Some(cursor) = cursor {
            query.push(("next_cursor", cursor));
        }

        let response = self
            .http
            .get(self.resources_url(resource_type))
            .basic_auth(&self.credentials.api_key, Some(&self.credentials.api_secret))
            .query(&query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("{resource_type} listing of '{prefix}' failed. Status: {status}");
            return Err(ListError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<Page>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn credentials() -> Credentials {
        Credentials {
            cloud_name: String::from("demo"),
            api_key: String::from("key"),
            api_secret: String::from("secret"),
        }
    }

    #[rstest]
    #[case("https://api.cloudinary.com/v1_1", ResourceType::Image, "https://api.cloudinary.com/v1_1/demo/resources/image/upload")]
    #[case("https://api.cloudinary.com/v1_1/", ResourceType::Auto, "https://api.cloudinary.com/v1_1/demo/resources/auto/upload")]
    #[case("http://localhost:9000", ResourceType::Image, "http://localhost:9000/demo/resources/image/upload")]
    #[trace]
    fn resources_url(#[case] base: &str, #[case] resource_type: ResourceType, #[case] expected: &str) {
        // Arrange
        let host = Cloudinary::new(base, credentials());

        // Act
        let url = host.resources_url(resource_type);

        // Assert
        assert_eq!(url, expected);
    }

    #[test]
    fn page_decodes_admin_api_shape() {
        // Arrange
        let json = r#"{
            "resources": [
                {"public_id": "p/bath1", "secure_url": "https://res/bath1.jpg", "resource_type": "image", "bytes": 10},
                {"public_id": "p/bath2"}
            ],
            "next_cursor": "abc"
        }"#;

        // Act
        let page: Page = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(page.resources.len(), 2);
        assert_eq!(page.resources[0].secure_url.as_deref(), Some("https://res/bath1.jpg"));
        assert!(page.resources[1].secure_url.is_none());
        assert_eq!(page.next_cursor.as_deref(), Some("abc"));
    }

    #[test]
    fn page_decodes_last_page() {
        // Act
        let page: Page = serde_json::from_str(r#"{"resources": []}"#).unwrap();

        // Assert
        assert!(page.resources.is_empty());
        assert!(page.next_cursor.is_none());
    }
}
