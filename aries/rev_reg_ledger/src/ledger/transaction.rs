use revocation_delta::IndexSet;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::error::{RevRegLedgerError, RevRegLedgerResult};

pub const REVOC_REG_DEF: &str = "113";
pub const REVOC_REG_ENTRY: &str = "114";

/// Reply to a GET_TXN request.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TransactionReply {
    #[serde(default)]
    pub op: Option<String>,
    pub result: TransactionResult,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResult {
    #[serde(default)]
    pub seq_no: Option<u64>,
    /// Absent for sequence numbers past the end of the ledger.
    #[serde(default)]
    pub data: Option<LedgerTransaction>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerTransaction {
    #[serde(default)]
    pub ledger_size: Option<u64>,
    pub txn: TransactionBody,
    #[serde(default)]
    pub txn_metadata: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TransactionBody {
    #[serde(rename = "type")]
    pub txn_type: String,
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl TransactionReply {
    pub fn parse(seq_no: i32, raw: &str) -> RevRegLedgerResult<Self> {
        serde_json::from_str(raw)
            .map_err(|err| RevRegLedgerError::malformed_transaction(seq_no, err.to_string()))
    }
}

/// Revocation registry and ledger time of a registry entry transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionRecord {
    pub seq_no: i32,
    pub rev_reg_def_id: String,
    pub txn_time: u64,
}

impl TransactionRecord {
    pub fn from_reply(seq_no: i32, reply: &TransactionReply) -> RevRegLedgerResult<Self> {
        let data = reply.result.data.as_ref().ok_or_else(|| {
            RevRegLedgerError::malformed_transaction(seq_no, "reply carries no transaction")
        })?;
        let rev_reg_def_id = data
            .txn
            .data
            .get("revocRegDefId")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                RevRegLedgerError::malformed_transaction(
                    seq_no,
                    "txn.data.revocRegDefId is missing or not a string",
                )
            })?;
        let txn_time = data
            .txn_metadata
            .get("txnTime")
            .and_then(Value::as_u64)
            .ok_or_else(|| {
                RevRegLedgerError::malformed_transaction(
                    seq_no,
                    "txnMetadata.txnTime is missing or not a non-negative integer",
                )
            })?;

        Ok(Self {
            seq_no,
            rev_reg_def_id: rev_reg_def_id.to_string(),
            txn_time,
        })
    }
}

/// Reply to a GET_REVOC_REG_DELTA request, kept as received.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegistryDelta {
    pub rev_reg_def_id: String,
    pub from: Option<u64>,
    pub to: u64,
    pub response: Value,
}

impl RegistryDelta {
    pub fn parse(
        rev_reg_def_id: &str,
        from: Option<u64>,
        to: u64,
        raw: &str,
    ) -> RevRegLedgerResult<Self> {
        Ok(Self {
            rev_reg_def_id: rev_reg_def_id.to_string(),
            from,
            to,
            response: serde_json::from_str(raw)?,
        })
    }

    fn delta_value(&self) -> Option<&Value> {
        self.response.pointer("/result/data/value")
    }

    /// Indices revoked as of `to`. A registry without entries yields an empty set.
    pub fn revoked(&self) -> RevRegLedgerResult<IndexSet> {
        Ok(IndexSet::from_json_field(
            self.delta_value().and_then(|value| value.get("revoked")),
        )?)
    }

    /// Indices issued as of `to`. A registry without entries yields an empty set.
    pub fn issued(&self) -> RevRegLedgerResult<IndexSet> {
        Ok(IndexSet::from_json_field(
            self.delta_value().and_then(|value| value.get("issued")),
        )?)
    }
}
