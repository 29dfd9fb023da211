use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("breakpoint payload is not valid JSON: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("settings entry `{key}` must be a JSON-encoded string")]
    PayloadNotString { key: String },
    #[error("breakpoint `{id}` is declared more than once")]
    DuplicateBreakpoint { id: String },
    #[error("viewport rejected media query `{query}`: {reason}")]
    Viewport { query: String, reason: String },
    #[error("theme `{name}` could not be resolved: {source}")]
    Theme {
        name: String,
        #[source]
        source: RegistryError,
    },
}

/// Error returned by external theme and breakpoint registries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("unknown theme `{0}`")]
    UnknownTheme(String),
    #[error("no active theme")]
    NoActiveTheme,
    #[error("{0}")]
    Other(String),
}
