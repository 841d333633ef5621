use crate::error::ReportError;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode, Url};
use std::sync::Arc;
use std::time::Duration;
use tally_common::types::MetricValue;

/// Pushes a single metric to the collector.
#[async_trait]
pub trait MetricSender: Send + Sync {
    async fn send(&self, name: &str, value: MetricValue) -> Result<(), ReportError>;
}

#[async_trait]
impl<T: MetricSender + ?Sized> MetricSender for Arc<T> {
    async fn send(&self, name: &str, value: MetricValue) -> Result<(), ReportError> {
        (**self).send(name, value).await
    }
}

/// Sends `POST {base}/update/{kind}/{name}/{value}` requests.
#[derive(Debug, Clone)]
pub struct HttpSender {
    client: Client,
    base: Url,
}

impl HttpSender {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ReportError> {
        let base = Url::parse(base_url).map_err(|e| ReportError::Url(format!("{base_url}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(ReportError::Url(base_url.to_string()));
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base })
    }

    /// Builds the update URL, percent-encoding the name as one path segment.
    pub fn update_url(&self, name: &str, value: MetricValue) -> Result<Url, ReportError> {
        let mut url = self.base.clone();
        let raw = value.to_string();
        url.path_segments_mut()
            .map_err(|_| ReportError::Url(self.base.to_string()))?
            .pop_if_empty()
            .extend(["update", value.kind().as_str(), name, raw.as_str()]);
        Ok(url)
    }
}

#[async_trait]
impl MetricSender for HttpSender {
    async fn send(&self, name: &str, value: MetricValue) -> Result<(), ReportError> {
        let url = self.update_url(name, value)?;
        let resp = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "text/plain")
            .send()
            .await?;

        if resp.status() != StatusCode::OK {
            return Err(ReportError::Status {
                status: resp.status().as_u16(),
            });
        }
        Ok(())
    }
}
