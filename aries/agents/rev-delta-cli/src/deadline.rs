use std::time::Duration;

use async_trait::async_trait;
use rev_reg_ledger::{
    errors::error::{RevRegLedgerError, RevRegLedgerResult},
    indy_vdr::pool::PreparedRequest,
    ledger::request_submitter::RequestSubmitter,
};

/// Bounds every ledger read made through the inner submitter by a fixed deadline.
#[derive(Clone, Debug)]
pub struct DeadlineSubmitter<T> {
    inner: T,
    deadline: Duration,
}

impl<T> DeadlineSubmitter<T>
where
    T: RequestSubmitter,
{
    pub fn new(inner: T, deadline: Duration) -> Self {
        Self { inner, deadline }
    }
}

#[async_trait]
impl<T> RequestSubmitter for DeadlineSubmitter<T>
where
    T: RequestSubmitter,
{
    async fn submit(&self, request: PreparedRequest) -> RevRegLedgerResult<String> {
        let request_label = format!("request type {} (reqId {})", request.txn_type, request.req_id);
        tokio::time::timeout(self.deadline, self.inner.submit(request))
            .await
            .map_err(|_| {
                RevRegLedgerError::LedgerSubmissionFailed(format!(
                    "{request_label}: timed out after {:?}",
                    self.deadline
                ))
            })?
    }
}
