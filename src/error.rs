use thiserror::Error;

/// Errors raised by the admin toolkit and its host adapters.
///
/// Not-found and ambiguous lookups are not errors; they are
/// [`Resolution`](crate::resolver::Resolution) variants reported to the admin.
#[derive(Debug, Error)]
pub enum EconAdminError {
    /// Wrapper around IO errors (reading snapshots, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapper around serde_json errors for economy snapshots.
    #[error("snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// The host was handed an account id it does not know.
    #[error("unknown account id {0}")]
    UnknownAccount(i64),

    /// The host was handed a currency id it does not know.
    #[error("unknown currency id {0}")]
    UnknownCurrency(i64),

    /// Amount is not a finite number.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// Command line could not be parsed; carries the usage text.
    #[error("usage: {0}")]
    Usage(String),

    /// Command verb is not an admin command.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// Configuration values out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
