use tokio::sync::oneshot::error::RecvError;

use super::error::RevRegLedgerError;

impl From<RecvError> for RevRegLedgerError {
    fn from(err: RecvError) -> Self {
        RevRegLedgerError::LedgerSubmissionFailed(format!(
            "pool dropped the request before replying: {err}"
        ))
    }
}
