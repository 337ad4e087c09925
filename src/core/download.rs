use crate::domain::model::{DownloadRecord, LayoutBlob};
use crate::domain::ports::Storage;
use crate::utils::error::{BoxLayoutError, Result};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

const OBJECT_URL_PREFIX: &str = "blob:box-layout/";

/// In-process table of blobs addressable by `blob:` URLs.
///
/// Clones share the same table. Entries stay alive until revoked.
#[derive(Debug, Clone, Default)]
pub struct ObjectUrlRegistry {
    next_id: Arc<AtomicU64>,
    blobs: Arc<Mutex<HashMap<String, Arc<LayoutBlob>>>>,
}

impl ObjectUrlRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_object_url(&self, blob: LayoutBlob) -> String {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let url = format!("{}{}", OBJECT_URL_PREFIX, id);
        self.table().insert(url.clone(), Arc::new(blob));
        url
    }

    pub fn resolve(&self, url: &str) -> Option<Arc<LayoutBlob>> {
        self.table().get(url).cloned()
    }

    pub fn revoke(&self, url: &str) -> bool {
        self.table().remove(url).is_some()
    }

    pub fn len(&self) -> usize {
        self.table().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn table(&self) -> std::sync::MutexGuard<'_, HashMap<String, Arc<LayoutBlob>>> {
        // A poisoned table still holds valid entries.
        self.blobs.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// An anchor pointing at an object URL with a suggested download name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadLink {
    pub href: String,
    pub download: String,
}

impl DownloadLink {
    pub fn new(href: impl Into<String>, download: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            download: download.into(),
        }
    }

    /// Activates the link: the blob behind `href` is saved under `download`.
    pub async fn click<S: Storage>(
        &self,
        registry: &ObjectUrlRegistry,
        storage: &S,
    ) -> Result<DownloadRecord> {
        let blob = registry
            .resolve(&self.href)
            .ok_or_else(|| BoxLayoutError::UnknownObjectUrl {
                url: self.href.clone(),
            })?;

        tracing::debug!(
            "Saving {} bytes from {} as '{}'",
            blob.len(),
            self.href,
            self.download
        );
        let path = storage.save_download(&self.download, &blob.bytes).await?;

        Ok(DownloadRecord {
            suggested_name: self.download.clone(),
            path,
            size_bytes: blob.len(),
            completed_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tokio::sync::Mutex as AsyncMutex;

    #[derive(Default)]
    struct MockStorage {
        files: AsyncMutex<HashMap<String, Vec<u8>>>,
    }

    impl Storage for MockStorage {
        async fn save_download(&self, suggested_name: &str, data: &[u8]) -> Result<PathBuf> {
            let mut files = self.files.lock().await;
            files.insert(suggested_name.to_string(), data.to_vec());
            Ok(PathBuf::from(suggested_name))
        }
    }

    fn svg_blob() -> LayoutBlob {
        LayoutBlob::new(
            b"<svg xmlns=\"http://www.w3.org/2000/svg\"/>".to_vec(),
            Some("image/svg+xml".to_string()),
        )
    }

    #[test]
    fn test_object_urls_are_unique() {
        let registry = ObjectUrlRegistry::new();
        let first = registry.create_object_url(svg_blob());
        let second = registry.create_object_url(svg_blob());

        assert_ne!(first, second);
        assert!(first.starts_with("blob:"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_revoke_releases_blob() {
        let registry = ObjectUrlRegistry::new();
        let url = registry.create_object_url(svg_blob());

        assert!(registry.resolve(&url).is_some());
        assert!(registry.revoke(&url));
        assert!(registry.resolve(&url).is_none());
        assert!(!registry.revoke(&url));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_clones_share_table() {
        let registry = ObjectUrlRegistry::new();
        let shared = registry.clone();
        let url = registry.create_object_url(svg_blob());

        assert!(shared.resolve(&url).is_some());
    }

    #[tokio::test]
    async fn test_click_saves_blob_under_download_name() {
        let registry = ObjectUrlRegistry::new();
        let storage = MockStorage::default();
        let url = registry.create_object_url(svg_blob());

        let link = DownloadLink::new(url, "box_layout.svg");
        let record = link.click(&registry, &storage).await.unwrap();

        assert_eq!(record.suggested_name, "box_layout.svg");
        assert_eq!(record.size_bytes, svg_blob().len());
        let files = storage.files.lock().await;
        assert_eq!(files.get("box_layout.svg"), Some(&svg_blob().bytes));
    }

    #[tokio::test]
    async fn test_click_on_revoked_url_fails() {
        let registry = ObjectUrlRegistry::new();
        let storage = MockStorage::default();
        let url = registry.create_object_url(svg_blob());
        registry.revoke(&url);

        let result = DownloadLink::new(url, "box_layout.svg")
            .click(&registry, &storage)
            .await;

        assert!(matches!(
            result,
            Err(BoxLayoutError::UnknownObjectUrl { .. })
        ));
        assert!(storage.files.lock().await.is_empty());
    }
}
