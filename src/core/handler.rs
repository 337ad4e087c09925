use crate::core::download::{DownloadLink, ObjectUrlRegistry};
use crate::core::{
    ConfigProvider, DimensionInput, DownloadRecord, FormSource, LayoutRequest, LayoutService,
    Storage,
};
use crate::domain::model::{BREADTH_FIELD, HEIGHT_FIELD, LENGTH_FIELD};
use crate::utils::error::{BoxLayoutError, Result};
use std::sync::Arc;
use tokio::task::JoinHandle;

pub const DEFAULT_DOWNLOAD_NAME: &str = "box_layout.svg";

/// A submit interaction on the dimension form.
#[derive(Debug, Default)]
pub struct SubmitEvent {
    form_id: String,
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new(form_id: impl Into<String>) -> Self {
        Self {
            form_id: form_id.into(),
            default_prevented: false,
        }
    }

    pub fn form_id(&self) -> &str {
        &self.form_id
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// An in-flight submission. Dropping it leaves the request running.
#[derive(Debug)]
pub struct Submission {
    task: JoinHandle<Option<DownloadRecord>>,
}

impl Submission {
    /// Waits for the chain to finish. `None` means it stopped without a download.
    pub async fn settled(self) -> Option<DownloadRecord> {
        match self.task.await {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!("Submission task ended abnormally: {}", e);
                None
            }
        }
    }
}

struct Inner<F, S> {
    form: F,
    service: Arc<dyn LayoutService>,
    storage: S,
    registry: ObjectUrlRegistry,
    download_name: String,
}

/// Bridges a form submit to a layout download.
///
/// Each submit reads the three dimension fields, posts them to the layout
/// service and saves the response body under the configured download name.
/// Submissions are independent: nothing is queued, deduplicated or cancelled.
pub struct SubmitHandler<F: FormSource, S: Storage> {
    inner: Arc<Inner<F, S>>,
}

impl<F: FormSource, S: Storage> Clone for SubmitHandler<F, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<F, S> SubmitHandler<F, S>
where
    F: FormSource + 'static,
    S: Storage + 'static,
{
    pub fn new(form: F, service: Arc<dyn LayoutService>, storage: S) -> Self {
        Self::with_download_name(form, service, storage, DEFAULT_DOWNLOAD_NAME)
    }

    pub fn from_config<C: ConfigProvider>(
        form: F,
        service: Arc<dyn LayoutService>,
        storage: S,
        config: &C,
    ) -> Self {
        Self::with_download_name(form, service, storage, config.download_filename())
    }

    pub fn with_download_name(
        form: F,
        service: Arc<dyn LayoutService>,
        storage: S,
        download_name: &str,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                form,
                service,
                storage,
                registry: ObjectUrlRegistry::new(),
                download_name: download_name.to_string(),
            }),
        }
    }

    pub fn registry(&self) -> &ObjectUrlRegistry {
        &self.inner.registry
    }

    pub fn form(&self) -> &F {
        &self.inner.form
    }

    /// Listener entry point. Suppresses the default action, then runs the
    /// request chain in the background. Failures are logged and dropped.
    pub fn on_submit(&self, event: &mut SubmitEvent) -> Submission {
        event.prevent_default();
        tracing::debug!("Submit on form '{}'", event.form_id());

        let handler = self.clone();
        let task = tokio::spawn(async move {
            match handler.submit().await {
                Ok(record) => {
                    tracing::info!(
                        "Downloaded {} ({} bytes)",
                        record.path.display(),
                        record.size_bytes
                    );
                    Some(record)
                }
                Err(e) => {
                    tracing::warn!("Layout download abandoned: {}", e);
                    None
                }
            }
        });

        Submission { task }
    }

    /// Runs the chain inline: read fields, request the layout, trigger the download.
    pub async fn submit(&self) -> Result<DownloadRecord> {
        let input = self.read_dimensions()?;
        let request = LayoutRequest::from(input);

        let blob = self.inner.service.request_layout(&request).await?;
        tracing::debug!(
            "Received layout blob: {} bytes, content type {:?}",
            blob.len(),
            blob.content_type
        );

        let registry = &self.inner.registry;
        let href = registry.create_object_url(blob);
        let link = DownloadLink::new(href.clone(), self.inner.download_name.clone());
        let result = link.click(registry, &self.inner.storage).await;
        registry.revoke(&href);

        result
    }

    fn read_dimensions(&self) -> Result<DimensionInput> {
        Ok(DimensionInput {
            length: self.read_field(LENGTH_FIELD)?,
            breadth: self.read_field(BREADTH_FIELD)?,
            height: self.read_field(HEIGHT_FIELD)?,
        })
    }

    fn read_field(&self, id: &str) -> Result<String> {
        self.inner
            .form
            .field_value(id)
            .ok_or_else(|| BoxLayoutError::MissingField {
                field: id.to_string(),
            })
    }
}
