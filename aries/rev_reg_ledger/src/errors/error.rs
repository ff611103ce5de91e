use revocation_delta::error::RevocationDeltaError;
use thiserror::Error as ThisError;

pub type RevRegLedgerResult<T> = Result<T, RevRegLedgerError>;

#[derive(Debug, ThisError)]
pub enum RevRegLedgerError {
    #[error("Failed to fetch genesis transactions from {url}: {reason}")]
    GenesisFetchFailed { url: String, reason: String },
    #[error("Failed to open pool: {0}")]
    PoolOpenFailed(String),
    #[error("Malformed transaction (seqNo {seq_no}): {reason}")]
    MalformedTransaction { seq_no: i32, reason: String },
    #[error("Ledger submission failed: {0}")]
    LedgerSubmissionFailed(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl RevRegLedgerError {
    pub fn malformed_transaction(seq_no: i32, reason: impl Into<String>) -> Self {
        Self::MalformedTransaction {
            seq_no,
            reason: reason.into(),
        }
    }
}

impl From<RevocationDeltaError> for RevRegLedgerError {
    fn from(err: RevocationDeltaError) -> Self {
        match err {
            RevocationDeltaError::InvalidInput(msg) => Self::InvalidInput(msg),
        }
    }
}
