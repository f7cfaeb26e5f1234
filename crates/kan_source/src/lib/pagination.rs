//! Pagination aggregator: drives sequential fetch+parse cycles across
//! a listing's page sequence and concatenates the results.
//!
//! Page N+1 is never requested before page N is parsed; next-page
//! presence can only be read from the just-fetched page, and the
//! sequential walk is what makes termination detection reliable.

use itertools::Itertools;
use tracing::{debug, warn};

use crate::{document::KanHtmlDocument, fetch::PageFetcher, fields, selectors};

/// How subsequent pages of a listing are discovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStrategy {
    /// Follow the next-page control, requesting `?page=N` for N > 1.
    QueryPage,
    /// Collect every pagination anchor from the first page up front,
    /// deduplicate, and fetch each discovered link once.
    LinkDiscovery,
}

#[derive(Debug, Clone, Copy)]
pub struct Paginator {
    /// Hard upper bound on fetched pages. Reaching it is a normal stop
    /// condition, not an error; it guarantees termination even when
    /// malformed markup fools the next-page probe.
    pub max_pages: usize,
    pub strategy: PageStrategy,
}

impl Default for Paginator {
    fn default() -> Self {
        Paginator {
            max_pages: 5,
            strategy: PageStrategy::QueryPage,
        }
    }
}

impl Paginator {
    pub fn new(strategy: PageStrategy) -> Self {
        Paginator {
            strategy,
            ..Default::default()
        }
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Fetch and parse every page of a listing, concatenating the
    /// per-page items in page order (first-to-last within each page).
    ///
    /// Stops on: an empty page, a missing or disabled next control, a
    /// failed fetch, or the page bound. All of these are normal ends
    /// of the listing.
    #[tracing::instrument(skip(fetcher, parse))]
    pub async fn collect_pages<F, P, T>(&self, fetcher: &F, first_url: &str, parse: P) -> Vec<T>
    where
        F: PageFetcher + Sync,
        P: Fn(&KanHtmlDocument) -> Vec<T>,
    {
        match self.strategy {
            PageStrategy::QueryPage => self.walk_query_pages(fetcher, first_url, &parse).await,
            PageStrategy::LinkDiscovery => {
                self.walk_discovered_links(fetcher, first_url, &parse).await
            }
        }
    }

    async fn walk_query_pages<F, P, T>(&self, fetcher: &F, first_url: &str, parse: &P) -> Vec<T>
    where
        F: PageFetcher + Sync,
        P: Fn(&KanHtmlDocument) -> Vec<T>,
    {
        let mut items = Vec::new();
        for page in 1..=self.max_pages {
            let url = if page == 1 {
                first_url.to_string()
            } else {
                format!("{first_url}?page={page}")
            };
            let doc = match fetcher.fetch_page(&url).await {
                Ok(doc) => doc,
                Err(e) => {
                    warn!(error = ?e, url, "Page fetch failed, ending pagination");
                    break;
                }
            };
            let page_items = parse(&doc);
            if page_items.is_empty() {
                debug!(url, "Empty page, end of listing");
                break;
            }
            items.extend(page_items);
            if !has_next_page(&doc) {
                break;
            }
        }
        items
    }

    async fn walk_discovered_links<F, P, T>(
        &self,
        fetcher: &F,
        first_url: &str,
        parse: &P,
    ) -> Vec<T>
    where
        F: PageFetcher + Sync,
        P: Fn(&KanHtmlDocument) -> Vec<T>,
    {
        let first_doc = match fetcher.fetch_page(first_url).await {
            Ok(doc) => doc,
            Err(e) => {
                warn!(error = ?e, url = first_url, "First page fetch failed");
                return Vec::new();
            }
        };
        let mut items = parse(&first_doc);
        if items.is_empty() {
            return items;
        }

        let links: Vec<String> = discover_page_links(&first_doc)
            .into_iter()
            .filter(|link| link != first_url)
            .take(self.max_pages.saturating_sub(1))
            .collect();
        debug!(count = links.len(), "Discovered pagination links");

        for url in links {
            let doc = match fetcher.fetch_page(&url).await {
                Ok(doc) => doc,
                Err(e) => {
                    warn!(error = ?e, url, "Page fetch failed, ending pagination");
                    break;
                }
            };
            let page_items = parse(&doc);
            if page_items.is_empty() {
                break;
            }
            items.extend(page_items);
        }
        items
    }
}

/// True when the document carries an enabled next-page control.
fn has_next_page(doc: &KanHtmlDocument) -> bool {
    let dom = doc.tree();
    for selector in &selectors::PAGINATION.next {
        if let Some(next) = dom.select(selector).next() {
            return !next.value().classes().any(|c| c == "disabled");
        }
    }
    false
}

/// All pagination anchor targets in document order, resolved against
/// the site origin and deduplicated.
fn discover_page_links(doc: &KanHtmlDocument) -> Vec<String> {
    let dom = doc.tree();
    for selector in &selectors::PAGINATION.links {
        let links: Vec<String> = dom
            .select(selector)
            .filter_map(|a| a.value().attr("href"))
            .filter(|href| !href.is_empty())
            .map(fields::resolve_site_url)
            .unique()
            .collect();
        if !links.is_empty() {
            return links;
        }
    }
    Vec::new()
}
