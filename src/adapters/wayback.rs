use crate::config::toml_config::ArchiveSettings;
use crate::domain::model::ArchiveEntry;
use crate::domain::ports::ArchiveIndex;
use crate::utils::error::{Result, WaybackError};
use async_trait::async_trait;
use reqwest::Client;
use url::Url;

/// Wayback Machine CDX 查詢客戶端
pub struct WaybackClient {
    client: Client,
    endpoint: Url,
}

impl WaybackClient {
    pub fn new(settings: &ArchiveSettings) -> Result<Self> {
        let endpoint = Url::parse(&settings.endpoint).map_err(|e| {
            WaybackError::InvalidConfigValueError {
                field: "archive.endpoint".to_string(),
                value: settings.endpoint.clone(),
                reason: e.to_string(),
            }
        })?;

        let mut builder = Client::builder();
        if let Some(timeout) = settings.timeout() {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = &settings.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }

        Ok(Self {
            client: builder.build()?,
            endpoint,
        })
    }

    /// `<endpoint>?url=<pattern>&output=json&collapse=urlkey`
    pub fn request_url(&self, pattern: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("url", pattern)
            .append_pair("output", "json")
            .append_pair("collapse", "urlkey");
        url
    }
}

#[async_trait]
impl ArchiveIndex for WaybackClient {
    async fn fetch(&self, pattern: &str) -> Result<Vec<ArchiveEntry>> {
        let url = self.request_url(pattern);
        tracing::debug!("Wayback request: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| WaybackError::fetch(pattern, format!("HTTP error: {}", e)))?;

        let status = response.status();
        tracing::debug!("Wayback response status: {}", status);
        if !status.is_success() {
            return Err(WaybackError::fetch(
                pattern,
                format!("unexpected HTTP status {}", status),
            ));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| WaybackError::fetch(pattern, format!("read error: {}", e)))?;

        parse_cdx_rows(&body)
            .map_err(|e| WaybackError::fetch(pattern, format!("JSON error: {}", e)))
    }
}

/// Parses a CDX `output=json` body. Row 0 is the field header and is always
/// dropped; rows shorter than three columns are skipped.
pub fn parse_cdx_rows(body: &[u8]) -> serde_json::Result<Vec<ArchiveEntry>> {
    let rows: Vec<Vec<String>> = serde_json::from_slice(body)?;

    Ok(rows
        .into_iter()
        .skip(1)
        .filter(|row| row.len() >= 3)
        .map(|mut row| {
            let url = row.swap_remove(2);
            let timestamp = row.swap_remove(1);
            ArchiveEntry { timestamp, url }
        })
        .collect())
}
