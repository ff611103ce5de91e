use std::fmt::{Debug, Formatter};

use indy_vdr::{
    ledger::{identifiers::RevocationRegistryId, RequestBuilder},
    pool::{LedgerType, ProtocolVersion},
};
use log::debug;
use revocation_delta::SnapshotPair;
use serde::Serialize;

use super::{
    request_submitter::RequestSubmitter,
    transaction::{RegistryDelta, TransactionRecord, TransactionReply},
};
use crate::errors::error::{RevRegLedgerError, RevRegLedgerResult};

/// Registry deltas just before and at the time of a registry entry transaction.
#[derive(Debug, Clone, Serialize)]
pub struct DeltaWindow {
    pub record: TransactionRecord,
    pub before: RegistryDelta,
    pub after: RegistryDelta,
}

impl DeltaWindow {
    pub fn snapshot_pair(&self) -> RevRegLedgerResult<SnapshotPair> {
        Ok(SnapshotPair {
            revoked_old: self.before.revoked()?,
            revoked_new: self.after.revoked()?,
            issued_old: self.before.issued()?,
            issued_new: self.after.issued()?,
        })
    }
}

pub struct RevRegDeltaFetcher<T>
where
    T: RequestSubmitter,
{
    request_submitter: T,
    protocol_version: ProtocolVersion,
}

impl<T> RevRegDeltaFetcher<T>
where
    T: RequestSubmitter,
{
    pub fn new(request_submitter: T) -> Self {
        Self {
            request_submitter,
            protocol_version: ProtocolVersion::Node1_4,
        }
    }

    pub fn request_builder(&self) -> RequestBuilder {
        RequestBuilder::new(self.protocol_version)
    }

    pub async fn get_ledger_txn(&self, seq_no: i32) -> RevRegLedgerResult<String> {
        debug!("get_ledger_txn >> seq_no: {seq_no}");
        let request = self.request_builder().build_get_txn_request(
            None,
            LedgerType::DOMAIN.to_id(),
            seq_no,
        )?;
        let response = self.request_submitter.submit(request).await?;
        debug!("get_ledger_txn << response: {response}");
        Ok(response)
    }

    pub async fn get_transaction(&self, seq_no: i32) -> RevRegLedgerResult<TransactionReply> {
        let response = self.get_ledger_txn(seq_no).await?;
        TransactionReply::parse(seq_no, &response)
    }

    pub async fn get_transaction_record(
        &self,
        seq_no: i32,
    ) -> RevRegLedgerResult<TransactionRecord> {
        let reply = self.get_transaction(seq_no).await?;
        TransactionRecord::from_reply(seq_no, &reply)
    }

    pub async fn get_rev_reg_delta(
        &self,
        rev_reg_def_id: &str,
        from: Option<u64>,
        to: u64,
    ) -> RevRegLedgerResult<RegistryDelta> {
        debug!("get_rev_reg_delta >> rev_reg_def_id: {rev_reg_def_id}, from: {from:?}, to: {to}");
        let revoc_reg_def_id = RevocationRegistryId(rev_reg_def_id.to_string());
        let request = self.request_builder().build_get_revoc_reg_delta_request(
            None,
            &revoc_reg_def_id,
            from.map(to_ledger_timestamp).transpose()?,
            to_ledger_timestamp(to)?,
        )?;
        let response = self.request_submitter.submit(request).await?;
        debug!("get_rev_reg_delta << response: {response}");
        RegistryDelta::parse(rev_reg_def_id, from, to, &response)
    }

    /// Reads the registry entry transaction `seq_no` and fetches the delta of its registry
    /// as of the transaction's ledger time.
    pub async fn fetch_delta_for_transaction(
        &self,
        seq_no: i32,
    ) -> RevRegLedgerResult<RegistryDelta> {
        let record = self.get_transaction_record(seq_no).await?;
        debug!("fetch_delta_for_transaction >> record: {record:?}");
        self.get_rev_reg_delta(&record.rev_reg_def_id, None, record.txn_time)
            .await
    }

    /// Like [`Self::fetch_delta_for_transaction`], additionally fetching the delta one second
    /// before the transaction so both sides of the entry can be compared.
    pub async fn fetch_delta_window(&self, seq_no: i32) -> RevRegLedgerResult<DeltaWindow> {
        let record = self.get_transaction_record(seq_no).await?;
        let before = self
            .get_rev_reg_delta(&record.rev_reg_def_id, None, record.txn_time.saturating_sub(1))
            .await?;
        let after = self
            .get_rev_reg_delta(&record.rev_reg_def_id, None, record.txn_time)
            .await?;
        Ok(DeltaWindow {
            record,
            before,
            after,
        })
    }
}

impl<T> Debug for RevRegDeltaFetcher<T>
where
    T: RequestSubmitter,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "RevRegDeltaFetcher instance")
    }
}

fn to_ledger_timestamp(timestamp: u64) -> RevRegLedgerResult<i64> {
    i64::try_from(timestamp).map_err(|_| {
        RevRegLedgerError::InvalidInput(format!("timestamp {timestamp} exceeds ledger range"))
    })
}
