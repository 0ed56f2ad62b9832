use camino::Utf8PathBuf;
use thiserror::Error;

/// Canonical errors for jassguard core
#[derive(Error, Debug)]
pub enum Error {
    // -------- Search engine --------
    #[error("input text is empty or whitespace-only")]
    InvalidInput,

    #[error("search pattern is empty")]
    InvalidPattern,

    #[error("offset {offset} out of range (text length {len})")]
    OutOfRange { offset: usize, len: usize },

    #[error("offset {0} is not on a character boundary")]
    NotCharBoundary(usize),

    // -------- Rules / injection --------
    #[error("severity {0} outside 0..=9")]
    InvalidSeverity(u8),

    #[error("could not find the {0} section of the script")]
    AnchorNotFound(&'static str),

    #[error("injection pack file missing: {0}")]
    PackFileMissing(Utf8PathBuf),

    // -------- Sources --------
    #[error("script entry not found in {0}")]
    EntryNotFound(Utf8PathBuf),

    #[error("path is not valid UTF-8: {0}")]
    NonUtf8Path(String),

    // -------- Wrapped sources --------
    #[error(transparent)]
    Grep(#[from] grep_regex::Error),

    #[error(transparent)]
    GrepMatcher(#[from] grep_matcher::NoError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Glob(#[from] globset::Error),

    #[error(transparent)]
    Walk(#[from] ignore::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
