//! Error type shared by the whole library

use crate::inputs::InputKind;

use std::path::PathBuf;

use thiserror::Error;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while selecting candidates or handling the
/// persisted selector table
#[derive(Debug, Error)]
pub enum Error {
    /// Year tag outside of the supported data-taking campaigns
    #[error("unrecognized year tag {0:?} (expected 2016, 2017 or 2018)")]
    InvalidYearTag(String),

    /// A year-dependent selector was evaluated without a year tag
    #[error("selector `{0}` is year-dependent but no year tag was given")]
    MissingYear(String),

    /// Columns which should be index-aligned are not
    #[error("column `{argument}` holds {found} but column `{reference}` holds {expected}")]
    ShapeMismatch {
        /// First column, whose shape every other column must match
        reference: &'static str,
        /// Offending column
        argument: &'static str,
        /// Shape of the reference column
        expected: String,
        /// Shape of the offending column
        found: String,
    },

    /// Event offsets which do not partition the column values
    #[error("invalid event offsets: {0}")]
    InvalidOffsets(String),

    /// A named input column required by a selector is absent
    #[error("missing input column `{0}`")]
    MissingInput(String),

    /// A named input column holds values of the wrong kind
    #[error("input column `{name}` should hold {expected} values")]
    InputKind {
        /// Column name
        name: String,
        /// Kind expected by the selector
        expected: InputKind,
    },

    /// An input column could not be decoded from its serialized form
    #[error("malformed input column `{name}`: {reason}")]
    MalformedInput {
        /// Column name
        name: String,
        /// What was wrong with it
        reason: String,
    },

    /// Selector name which is not part of the table
    #[error("unknown selector `{0}`")]
    UnknownSelector(String),

    /// Persisted table lacking one of the cataloged selectors
    #[error("selector table does not provide `{0}`")]
    MissingSelector(&'static str),

    /// Persisted table written by an incompatible version
    #[error("unsupported selector table format version {0}")]
    FormatVersion(u32),

    /// I/O failure on the persisted table or an input file
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// JSON (de)serialization failure
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Failure to format the artifact creation timestamp
    #[error(transparent)]
    Timestamp(#[from] time::error::Format),
}

impl Error {
    /// Tag an I/O error with the path it occured on
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Error::Io { path, source }
    }
}
