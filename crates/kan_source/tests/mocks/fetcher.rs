use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use kan_source::{KanHtmlDocument, PageFetcher};

/// URL-to-body fetcher that records every request in order.
#[derive(Clone, Default)]
pub struct MockPageFetcher {
    pub pages: HashMap<String, String>,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_with: Option<String>,
}

impl MockPageFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.pages.insert(url.into(), body.into());
        self
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            fail_with: Some(msg.to_string()),
            ..Default::default()
        }
    }
}

impl PageFetcher for MockPageFetcher {
    async fn fetch_page(&self, url: &str) -> anyhow::Result<KanHtmlDocument> {
        self.calls.lock().unwrap().push(url.to_string());
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        self.pages
            .get(url)
            .map(|body| KanHtmlDocument::new(body.clone()))
            .ok_or_else(|| anyhow::anyhow!("HTTP error 404 for {url}"))
    }
}
