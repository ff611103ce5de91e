use std::collections::BTreeMap;

use log::{debug, info, trace, warn};
use revocation_delta::{IndexSet, IssuanceType, RevocationRegistryState};
use serde::Serialize;
use serde_json::Value;

use super::{
    delta_fetcher::RevRegDeltaFetcher,
    request_submitter::RequestSubmitter,
    transaction::{LedgerTransaction, REVOC_REG_DEF, REVOC_REG_ENTRY},
};
use crate::errors::error::{RevRegLedgerError, RevRegLedgerResult};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    /// Last sequence number that was read and applied.
    pub last_seq_no: Option<i32>,
    /// Ledger size reported by the last transaction read, `0` when none was read.
    pub ledger_size: u64,
    pub registries: BTreeMap<String, RevocationRegistryState>,
    /// Registry entries whose definition was not seen during the scan.
    pub orphan_entries: Vec<i32>,
}

/// Replays registry definitions and entries from the domain ledger, one transaction at a
/// time, keeping the reconciled state of every registry it encounters.
#[derive(Debug)]
pub struct RevRegScanner<'a, T>
where
    T: RequestSubmitter,
{
    fetcher: &'a RevRegDeltaFetcher<T>,
}

impl<'a, T> RevRegScanner<'a, T>
where
    T: RequestSubmitter,
{
    pub fn new(fetcher: &'a RevRegDeltaFetcher<T>) -> Self {
        Self { fetcher }
    }

    pub async fn scan(
        &self,
        from_seq_no: i32,
        limit: Option<u32>,
    ) -> RevRegLedgerResult<ScanReport> {
        if from_seq_no < 1 {
            return Err(RevRegLedgerError::InvalidInput(format!(
                "scan must start at a positive seqNo, got {from_seq_no}"
            )));
        }
        // Unknown until the first transaction has been read.
        let mut ledger_size: Option<u64> = None;
        let mut report = ScanReport::default();
        let mut seq_no = from_seq_no;
        let mut visited: u32 = 0;

        info!("Starting scan at seqNo={seq_no}");
        while u64::try_from(seq_no)
            .is_ok_and(|current| ledger_size.map_or(true, |size| current <= size))
            && limit.map_or(true, |limit| visited < limit)
        {
            let reply = self.fetcher.get_transaction(seq_no).await?;
            let Some(transaction) = reply.result.data else {
                debug!("scan >> no transaction at seqNo={seq_no}, stopping");
                break;
            };
            ledger_size = Some(transaction.ledger_size.ok_or_else(|| {
                RevRegLedgerError::malformed_transaction(seq_no, "reply carries no ledgerSize")
            })?);

            Self::apply_transaction(&mut report, seq_no, &transaction)?;
            report.last_seq_no = Some(seq_no);
            visited += 1;

            if seq_no % 100 == 0 {
                info!("Reached seqNo={seq_no}");
            }
            seq_no = match seq_no.checked_add(1) {
                Some(next) => next,
                None => break,
            };
        }

        report.ledger_size = ledger_size.unwrap_or_default();
        info!(
            "Scan finished at seqNo={:?}, {} registries tracked",
            report.last_seq_no,
            report.registries.len()
        );
        Ok(report)
    }

    fn apply_transaction(
        report: &mut ScanReport,
        seq_no: i32,
        transaction: &LedgerTransaction,
    ) -> RevRegLedgerResult<()> {
        let data = &transaction.txn.data;
        match transaction.txn.txn_type.as_str() {
            REVOC_REG_DEF => {
                let id = string_field(seq_no, data.get("id"), "id")?;
                let issuance_type = string_field(
                    seq_no,
                    data.get("value").and_then(|value| value.get("issuanceType")),
                    "value.issuanceType",
                )?
                .parse::<IssuanceType>()
                .map_err(|err| RevRegLedgerError::malformed_transaction(seq_no, err.to_string()))?;
                trace!("[{seq_no}] Found a REVOC_REG_DEF transaction: {id} ({issuance_type})");
                report
                    .registries
                    .insert(id.to_string(), RevocationRegistryState::new(issuance_type));
            }
            REVOC_REG_ENTRY => {
                let id = string_field(seq_no, data.get("revocRegDefId"), "revocRegDefId")?;
                let Some(state) = report.registries.get_mut(id) else {
                    warn!("[{seq_no}] Could not find REVOC_REG_DEF for REVOC_REG_ENTRY: {id}");
                    report.orphan_entries.push(seq_no);
                    return Ok(());
                };
                let value = data.get("value");
                let issued = index_field(seq_no, value, "issued")?;
                let revoked = index_field(seq_no, value, "revoked")?;
                let result = state.apply_entry(issued.as_ref(), revoked.as_ref());
                trace!("[{seq_no}] Applied REVOC_REG_ENTRY for {id}: {result}");
            }
            _ => {}
        }
        Ok(())
    }
}

fn string_field<'v>(
    seq_no: i32,
    value: Option<&'v Value>,
    name: &str,
) -> RevRegLedgerResult<&'v str> {
    value.and_then(Value::as_str).ok_or_else(|| {
        RevRegLedgerError::malformed_transaction(
            seq_no,
            format!("txn.data.{name} is missing or not a string"),
        )
    })
}

/// `None` when the entry does not carry the list at all.
fn index_field(
    seq_no: i32,
    value: Option<&Value>,
    name: &str,
) -> RevRegLedgerResult<Option<IndexSet>> {
    match value.and_then(|value| value.get(name)) {
        None | Some(Value::Null) => Ok(None),
        field => IndexSet::from_json_field(field).map(Some).map_err(|err| {
            RevRegLedgerError::malformed_transaction(
                seq_no,
                format!("txn.data.value.{name}: {err}"),
            )
        }),
    }
}
