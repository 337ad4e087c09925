use crate::domain::model::{LayoutBlob, LayoutRequest};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;

/// The form the handler is attached to. Fields are looked up by stable id.
pub trait FormSource: Send + Sync {
    fn field_value(&self, id: &str) -> Option<String>;
}

/// The remote collaborator that turns dimensions into a layout file.
#[async_trait]
pub trait LayoutService: Send + Sync {
    async fn request_layout(&self, request: &LayoutRequest) -> Result<LayoutBlob>;
}

pub trait Storage: Send + Sync {
    /// Saves `data` under `suggested_name` or the next free variant of it,
    /// returning the path actually written.
    fn save_download(
        &self,
        suggested_name: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<PathBuf>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn endpoint(&self) -> &str;
    fn output_dir(&self) -> &str;
    fn download_filename(&self) -> &str;
    fn request_timeout(&self) -> Option<Duration>;
}
