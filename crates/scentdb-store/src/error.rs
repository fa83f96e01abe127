use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The store file exists but does not hold a valid store document.
    /// Reads degrade to an empty view; mutations refuse to overwrite it.
    #[error("store file {path} is corrupt: {source}")]
    Corrupt {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize store document: {0}")]
    Serialize(#[source] serde_json::Error),
}
