use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The value could not be turned into JSON.
    #[error("could not serialize value for '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A stored value exists but does not have the expected shape.
    #[error("stored value for '{key}' is unreadable: {source}")]
    Deserialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("store file '{path}' is not a JSON object: {message}")]
    Corrupt { path: String, message: String },

    #[error("store I/O failed on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("store unavailable: {0}")]
    Unavailable(String),
}
