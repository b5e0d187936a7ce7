use thiserror::Error;

/// Unified error type for the entire cashflow-core library.
/// Every public fallible function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Input validation ────────────────────────────────────────────
    #[error("Invalid transaction: {0}")]
    InvalidTransaction(String),

    #[error("Invalid date range: {0}")]
    InvalidRange(String),

    #[error("Invalid window: {0}")]
    InvalidWindow(String),

    #[error("Invalid horizon: {0}")]
    InvalidHorizon(String),

    // ── Arithmetic ──────────────────────────────────────────────────
    #[error("Decimal overflow while computing {0}")]
    Overflow(String),

    // ── Configuration ───────────────────────────────────────────────
    #[error("Settings validation failed: {0}")]
    ValidationError(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}
