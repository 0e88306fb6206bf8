use std::collections::HashSet;
use std::time::Instant;

use kernel::{FolderPath, ResourceType};

use crate::domain::{AssetHost, AssetRecord};
use crate::error::ListError;

/// Lists every asset URL under `folder`, hiding the host's pagination.
///
/// Images are listed first. When that yields nothing the broader resource
/// categories are tried in turn over the same prefix. The result is ordered
/// ascending by public id (string comparison) with empty and duplicate URLs
/// removed. Any failing page fails the whole listing.
pub async fn list_assets<H: AssetHost>(
    host: &H,
    folder: &FolderPath,
) -> Result<Vec<String>, ListError> {
    let start = Instant::now();
    let mut resource_type = ResourceType::Image;
    loop {
        let records = collect_pages(host, folder, resource_type).await?;
        let urls = into_listing(records);
        if !urls.is_empty() {
            tracing::debug!(
                "folder: {folder} type: {resource_type} assets: {} time: {:?}",
                urls.len(),
                start.elapsed()
            );
            return Ok(urls);
        }
        match resource_type.fallback() {
            Some(broader) => {
                tracing::debug!("no {resource_type} assets under '{folder}', trying {broader}");
                resource_type = broader;
            }
            None => return Ok(urls),
        }
    }
}

/// Follows the continuation cursor until the host stops returning one.
async fn collect_pages<H: AssetHost>(
    host: &H,
    folder: &FolderPath,
    resource_type: ResourceType,
) -> Result<Vec<AssetRecord>, ListError> {
    let mut records = Vec::new();
    let mut cursor: Option<String> = None;
    let mut seen_cursors = HashSet::new();
    let mut pages = 0usize;

    loop {
        let page = host
            .list_page(folder, resource_type, cursor.as_deref())
            .await?;
        pages += 1;
        records.extend(page.resources);

        match page.next_cursor.filter(|c| !c.is_empty()) {
            Some(next) if seen_cursors.insert(next.clone()) => cursor = Some(next),
            Some(next) => {
                tracing::warn!("cursor '{next}' repeated while listing '{folder}', stopping");
                break;
            }
            None => break,
        }
    }

    tracing::debug!(
        "folder: {folder} type: {resource_type} pages: {pages} records: {}",
        records.len()
    );
    Ok(records)
}

/// Sorts records by public id and keeps their non-empty, unique URLs.
#[must_use]
pub fn into_listing(mut records: Vec<AssetRecord>) -> Vec<String> {
    records.sort_by(|a, b| a.public_id.cmp(&b.public_id));
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter_map(|r| r.secure_url)
        .filter(|url| !url.is_empty() && seen.insert(url.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Page;
    use std::collections::HashMap;
    use std::sync::Mutex;

    fn record(id: &str) -> AssetRecord {
        AssetRecord {
            public_id: id.to_owned(),
            secure_url: Some(format!("https://res/{id}.jpg")),
            resource_type: Some(String::from("image")),
        }
    }

    fn url(id: &str) -> String {
        format!("https://res/{id}.jpg")
    }

    /// Serves pre-built pages; page `n` hands out cursor `c{n + 1}`.
    #[derive(Default)]
    struct FakeHost {
        pages: HashMap<&'static str, Vec<Vec<AssetRecord>>>,
        loop_cursor: bool,
        fail_with: Option<u16>,
        calls: Mutex<Vec<(ResourceType, Option<String>)>>,
    }

    impl FakeHost {
        fn with(mut self, resource_type: ResourceType, pages: Vec<Vec<AssetRecord>>) -> Self {
            self.pages.insert(resource_type.as_str(), pages);
            self
        }

        fn calls(&self) -> Vec<(ResourceType, Option<String>)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl AssetHost for FakeHost {
        const MAX_PAGE_SIZE: u32 = 2;

        async fn list_page(
            &self,
            _prefix: &FolderPath,
            resource_type: ResourceType,
            cursor: Option<&str>,
        ) -> Result<Page, ListError> {
            self.calls
                .lock()
                .unwrap()
                .push((resource_type, cursor.map(str::to_owned)));
            if let Some(status) = self.fail_with {
                return Err(ListError::Upstream {
                    status,
                    body: String::from("Invalid api_key"),
                });
            }

            let ix: usize = cursor.map_or(0, |c| c[1..].parse().unwrap());
            let pages = self.pages.get(resource_type.as_str()).cloned().unwrap_or_default();
            let resources = pages.get(ix).cloned().unwrap_or_default();
            let next_cursor = if self.loop_cursor {
                Some(String::from("c1"))
            } else if ix + 1 < pages.len() {
                Some(format!("c{}", ix + 1))
            } else {
                None
            };
            Ok(Page {
                resources,
                next_cursor,
            })
        }
    }

    fn folder() -> FolderPath {
        FolderPath::normalize("projects/bath").unwrap()
    }

    #[tokio::test]
    async fn follows_cursor_through_all_pages() {
        // Arrange
        let host = FakeHost::default().with(
            ResourceType::Image,
            vec![
                vec![record("bath3"), record("bath1")],
                vec![record("bath5"), record("bath2")],
                vec![record("bath4")],
            ],
        );

        // Act
        let urls = list_assets(&host, &folder()).await.unwrap();

        // Assert
        assert_eq!(
            urls,
            vec![url("bath1"), url("bath2"), url("bath3"), url("bath4"), url("bath5")]
        );
        let cursors: Vec<Option<String>> = host.calls().into_iter().map(|(_, c)| c).collect();
        assert_eq!(
            cursors,
            vec![None, Some(String::from("c1")), Some(String::from("c2"))]
        );
    }

    #[tokio::test]
    async fn sorts_lexicographically_not_numerically() {
        // Arrange
        let host = FakeHost::default().with(
            ResourceType::Image,
            vec![vec![record("b2"), record("a1"), record("a10")]],
        );

        // Act
        let urls = list_assets(&host, &folder()).await.unwrap();

        // Assert
        assert_eq!(urls, vec![url("a1"), url("a10"), url("b2")]);
    }

    #[tokio::test]
    async fn falls_back_when_images_empty() {
        // Arrange
        let host = FakeHost::default()
            .with(ResourceType::Image, vec![vec![]])
            .with(ResourceType::Auto, vec![vec![record("plan")], vec![record("model")]]);

        // Act
        let urls = list_assets(&host, &folder()).await.unwrap();

        // Assert
        assert_eq!(urls, vec![url("model"), url("plan")]);
        let types: Vec<ResourceType> = host.calls().into_iter().map(|(t, _)| t).collect();
        assert_eq!(
            types,
            vec![ResourceType::Image, ResourceType::Auto, ResourceType::Auto]
        );
    }

    #[tokio::test]
    async fn no_fallback_when_images_found() {
        // Arrange
        let host = FakeHost::default()
            .with(ResourceType::Image, vec![vec![record("bath1")]])
            .with(ResourceType::Auto, vec![vec![record("video")]]);

        // Act
        let urls = list_assets(&host, &folder()).await.unwrap();

        // Assert
        assert_eq!(urls, vec![url("bath1")]);
        assert!(host.calls().iter().all(|(t, _)| *t == ResourceType::Image));
    }

    #[tokio::test]
    async fn empty_folder_lists_nothing() {
        // Arrange
        let host = FakeHost::default();

        // Act
        let urls = list_assets(&host, &folder()).await.unwrap();

        // Assert
        assert!(urls.is_empty());
        assert_eq!(host.calls().len(), 2);
    }

    #[tokio::test]
    async fn upstream_failure_fails_whole_listing() {
        // Arrange
        let host = FakeHost {
            fail_with: Some(401),
            ..FakeHost::default()
        };

        // Act
        let result = list_assets(&host, &folder()).await;

        // Assert
        match result {
            Err(ListError::Upstream { status, body }) => {
                assert_eq!(status, 401);
                assert_eq!(body, "Invalid api_key");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn repeated_cursor_terminates() {
        // Arrange
        let host = FakeHost {
            loop_cursor: true,
            ..FakeHost::default()
        }
        .with(ResourceType::Image, vec![vec![record("a")], vec![record("b")]]);

        // Act
        let urls = list_assets(&host, &folder()).await.unwrap();

        // Assert
        assert_eq!(urls, vec![url("a"), url("b")]);
        assert_eq!(host.calls().len(), 2);
    }

    #[test]
    fn into_listing_drops_empty_and_duplicate_urls() {
        // Arrange
        let mut missing = record("c");
        missing.secure_url = None;
        let mut blank = record("d");
        blank.secure_url = Some(String::new());
        let mut duplicate = record("e");
        duplicate.secure_url = Some(url("a"));

        // Act
        let urls = into_listing(vec![duplicate, blank, record("b"), missing, record("a")]);

        // Assert
        assert_eq!(urls, vec![url("a"), url("b")]);
    }
}
