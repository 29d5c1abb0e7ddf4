use thiserror::Error;

/// Top-level error type for Lapis.
#[derive(Debug, Error)]
pub enum LapisError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Settings store error.
    #[error("settings error: {0}")]
    Settings(String),

    /// Error from the messaging channel.
    #[error("channel error: {0}")]
    Channel(String),

    /// A command head pattern failed to compile.
    #[error("invalid command pattern: {0}")]
    Pattern(String),

    /// Failure inside a command handler.
    #[error("command error: {0}")]
    Command(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
