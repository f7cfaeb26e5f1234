use std::ops::Deref;

use scraper::Html;

/// A fetched HTML page, held as raw text.
///
/// `scraper::Html` is not `Send`, so the tree is built on demand
/// inside synchronous parsing code and never carried across an await
/// point; futures that hold a `KanHtmlDocument` stay `Send`.
pub struct KanHtmlDocument(String);

impl KanHtmlDocument {
    pub fn new(doc: String) -> Self {
        KanHtmlDocument(doc)
    }

    /// Parse the raw text into a queryable tree.
    pub fn tree(&self) -> Html {
        Html::parse_document(&self.0)
    }
}

impl Deref for KanHtmlDocument {
    type Target = String;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<String> for KanHtmlDocument {
    fn from(value: String) -> Self {
        KanHtmlDocument(value)
    }
}
