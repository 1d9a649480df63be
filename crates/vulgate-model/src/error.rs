use thiserror::Error;

/// Failures that abort a typesetting run.
///
/// None of these are retried: the caller reports the error and exits
/// without writing the output document.
#[derive(Debug, Error)]
pub enum Error {
    /// A fetch failed or the server answered with a non-success status.
    #[error("network error for {url}: {message}")]
    Network { url: String, message: String },

    /// An expected structural element is missing (heading, footnote list, anchor).
    #[error("parse error: {0}")]
    Parse(String),

    /// A footnote marker `[n]` points past the end of the chapter's footnotes.
    #[error("footnote marker [{marker}] has no matching footnote ({available} available)")]
    IndexOutOfRange { marker: usize, available: usize },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
