use thiserror::Error;

/// Errors raised while collecting season statistics.
///
/// Rows that fail to match across the three per-season tables are not an
/// error; inner-join semantics silently drop them.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The HTTP request failed or the site answered with an error status.
    #[error("request for {url} failed: {source}")]
    Fetch {
        url: String,
        source: reqwest::Error,
    },

    /// An expected table caption was missing from the season page.
    #[error("no table captioned '{caption}' on the season page")]
    TableNotFound { caption: String },

    /// Header and cell counts disagree while building a table.
    #[error("{context}: expected {expected} columns, found {found}")]
    ColumnMismatch {
        context: String,
        expected: usize,
        found: usize,
    },

    /// Writing the output CSV failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
