use async_trait::async_trait;
use indy_vdr::pool::PreparedRequest;

use crate::errors::error::RevRegLedgerResult;

pub mod vdr_ledger;

/// Sends a prepared read request to the ledger and returns the raw reply.
#[async_trait]
pub trait RequestSubmitter: Send + Sync {
    async fn submit(&self, request: PreparedRequest) -> RevRegLedgerResult<String>;
}
