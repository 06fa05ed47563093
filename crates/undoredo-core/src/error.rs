use thiserror::Error;

/// Boxed error returned by fallible property setters.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum UndoRedoError {
    #[error("The state cannot be null")]
    NullState,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Property not found: {0}")]
    PropertyNotFound(String),

    #[error("Property `{0}` has no setter")]
    ReadOnlyProperty(String),

    #[error("Failed to write property `{property}`")]
    PropertyWrite {
        property: String,
        #[source]
        source: BoxError,
    },

    #[error("State is already borrowed")]
    StateBorrowed,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),
}
