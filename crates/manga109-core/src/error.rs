use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Manga109Error {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse XML: {0}")]
    ParseError(String),

    #[error("failed to parse {path}: {reason}")]
    Xml { path: PathBuf, reason: String },

    #[error("malformed annotation: {0}")]
    MalformedAnnotation(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Manga109Error {
    /// True for errors raised by the XML read step (either variant).
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Manga109Error::ParseError(_) | Manga109Error::Xml { .. }
        )
    }
}
