use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const LENGTH_FIELD: &str = "length";
pub const BREADTH_FIELD: &str = "breadth";
pub const HEIGHT_FIELD: &str = "height";

/// Raw text of the three dimension fields, exactly as the form holds them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionInput {
    pub length: String,
    pub breadth: String,
    pub height: String,
}

/// JSON body posted to the layout endpoint. Key order is length, breadth, height.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutRequest {
    pub length: String,
    pub breadth: String,
    pub height: String,
}

impl From<DimensionInput> for LayoutRequest {
    fn from(input: DimensionInput) -> Self {
        Self {
            length: input.length,
            breadth: input.breadth,
            height: input.height,
        }
    }
}

/// Opaque response body. The content type is kept for logging only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutBlob {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

impl LayoutBlob {
    pub fn new(bytes: Vec<u8>, content_type: Option<String>) -> Self {
        Self {
            bytes,
            content_type,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DownloadRecord {
    pub suggested_name: String,
    pub path: PathBuf,
    pub size_bytes: usize,
    pub completed_at: DateTime<Utc>,
}
