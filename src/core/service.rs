use crate::core::{ConfigProvider, LayoutBlob, LayoutRequest, LayoutService};
use crate::utils::error::{BoxLayoutError, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use url::Url;

/// Posts layout requests to `<base_url><endpoint>` and returns the raw body.
#[derive(Debug, Clone)]
pub struct HttpLayoutService {
    client: Client,
    url: Url,
}

impl HttpLayoutService {
    pub fn new(base_url: &str, endpoint: &str) -> Result<Self> {
        Self::with_client(Client::new(), base_url, endpoint)
    }

    pub fn with_client(client: Client, base_url: &str, endpoint: &str) -> Result<Self> {
        Ok(Self {
            client,
            url: endpoint_url(base_url, endpoint)?,
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        Self::with_client(builder.build()?, config.base_url(), config.endpoint())
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

/// Appends `endpoint` to whatever path `base_url` already has, so a server
/// mounted under a prefix keeps it.
pub fn endpoint_url(base_url: &str, endpoint: &str) -> Result<Url> {
    let mut url = Url::parse(base_url)?;
    let path = format!(
        "{}/{}",
        url.path().trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    );
    url.set_path(&path);
    Ok(url)
}

#[async_trait]
impl LayoutService for HttpLayoutService {
    async fn request_layout(&self, request: &LayoutRequest) -> Result<LayoutBlob> {
        let body = serde_json::to_vec(request)?;

        tracing::debug!("POST {} ({} byte body)", self.url, body.len());
        let response = self
            .client
            .post(self.url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Layout response status: {}", status);
        if !status.is_success() {
            return Err(BoxLayoutError::HttpStatus {
                status,
                url: self.url.to_string(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await?;

        Ok(LayoutBlob::new(bytes.to_vec(), content_type))
    }
}
