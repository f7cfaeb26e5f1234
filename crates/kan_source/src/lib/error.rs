use thiserror::Error;

/// Internal parse failures.
///
/// None of these escape the adapter entry points; they exist so the
/// playable pipeline can say *why* a page was rejected before the
/// failure is logged and absorbed into `None`.
#[derive(Error, Debug)]
pub enum Error {
    #[error("parse error: {0}")]
    ParseError(&'static str),

    #[error("malformed embedded json: {0}")]
    Json(#[from] serde_json::Error),
}
