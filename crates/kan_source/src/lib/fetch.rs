//! Page transport: the injected HTTP capability and its production
//! implementation. The core never touches the network except through
//! [`PageFetcher`], so tests (and hosts with their own transport)
//! supply their own implementation.

use std::future::Future;

use anyhow::Context;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};

use crate::document::KanHtmlDocument;

/// HTTP GET capability: fetch a URL, yield its body as a document.
/// A non-2xx status is an error.
pub trait PageFetcher {
    fn fetch_page(
        &self,
        url: &str,
    ) -> impl Future<Output = anyhow::Result<KanHtmlDocument>> + Send;
}

impl<T: PageFetcher + Send + Sync> PageFetcher for &T {
    async fn fetch_page(&self, url: &str) -> anyhow::Result<KanHtmlDocument> {
        (**self).fetch_page(url).await
    }
}

/// Production fetcher: a retrying reqwest client. Timeout and retry
/// policy live here, outside the parsing core.
pub struct HttpFetcher {
    client: ClientWithMiddleware,
}

impl HttpFetcher {
    pub fn new() -> Self {
        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(2);
        let client = ClientBuilder::new(reqwest::Client::new())
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();
        HttpFetcher { client }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl PageFetcher for HttpFetcher {
    #[tracing::instrument(skip(self))]
    async fn fetch_page(&self, url: &str) -> anyhow::Result<KanHtmlDocument> {
        let response = self
            .client
            .get(url)
            .header("Accept-Language", "he-IL,he;q=0.9,en;q=0.8")
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = ?e, url, "Page request failed"))
            .with_context(|| format!("Failed to fetch {url}"))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, url, "Non-success response");
            anyhow::bail!("HTTP error {status} for {url}");
        }

        let body = response
            .text()
            .await
            .context("Failed to read response body")?;
        tracing::debug!(url, length = body.len(), "Fetched page");
        Ok(body.into())
    }
}
