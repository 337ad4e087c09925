pub mod download;
pub mod handler;
pub mod service;

pub use crate::domain::model::{DimensionInput, DownloadRecord, LayoutBlob, LayoutRequest};
pub use crate::domain::ports::{ConfigProvider, FormSource, LayoutService, Storage};
pub use crate::utils::error::Result;
