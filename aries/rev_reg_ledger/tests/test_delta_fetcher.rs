use async_trait::async_trait;
use indy_vdr::pool::PreparedRequest;
use mockall::{mock, Sequence};
use rev_reg_ledger::{
    errors::error::{RevRegLedgerError, RevRegLedgerResult},
    ledger::{delta_fetcher::RevRegDeltaFetcher, request_submitter::RequestSubmitter},
};
use revocation_delta::{IndexSet, ReconciliationStrategy};
use serde_json::{json, Value};

mock! {
    pub RequestSubmitter {}
    #[async_trait]
    impl RequestSubmitter for RequestSubmitter {
        async fn submit(&self, request: PreparedRequest) -> RevRegLedgerResult<String>;
    }
}

const GET_TXN: &str = "3";
const GET_REVOC_REG_DELTA: &str = "117";

fn operation(request: &PreparedRequest) -> &Value {
    &request.req_json["operation"]
}

fn entry_txn_reply(seq_no: i32, txn_data: Value, txn_metadata: Value) -> String {
    json!({
        "op": "REPLY",
        "result": {
            "type": GET_TXN,
            "seqNo": seq_no,
            "data": {
                "ledgerSize": 5000,
                "txn": { "type": "114", "data": txn_data, "metadata": {} },
                "txnMetadata": txn_metadata
            }
        }
    })
    .to_string()
}

fn delta_reply(revoked: &[u64], issued: &[u64]) -> String {
    json!({
        "op": "REPLY",
        "result": {
            "type": GET_REVOC_REG_DELTA,
            "data": {
                "revocRegDefId": "R1",
                "value": { "accum_to": {}, "revoked": revoked, "issued": issued }
            }
        }
    })
    .to_string()
}

fn expect_get_txn(mock: &mut MockRequestSubmitter, seq: &mut Sequence, seq_no: i32, reply: String) {
    mock.expect_submit()
        .times(1)
        .in_sequence(seq)
        .withf(move |request| {
            request.txn_type == GET_TXN
                && operation(request)["data"] == json!(seq_no)
                && operation(request)["ledgerId"] == json!(1)
        })
        .return_once(move |_| Ok(reply));
}

fn expect_get_delta(mock: &mut MockRequestSubmitter, seq: &mut Sequence, to: i64, reply: String) {
    mock.expect_submit()
        .times(1)
        .in_sequence(seq)
        .withf(move |request| {
            request.txn_type == GET_REVOC_REG_DELTA
                && operation(request)["revocRegDefId"] == json!("R1")
                && operation(request)["to"] == json!(to)
                && operation(request).get("from").map_or(true, Value::is_null)
        })
        .return_once(move |_| Ok(reply));
}

#[tokio::test]
async fn test_delta_request_targets_registry_and_time_of_transaction() {
    let mut submitter = MockRequestSubmitter::new();
    let mut seq = Sequence::new();
    expect_get_txn(
        &mut submitter,
        &mut seq,
        843,
        entry_txn_reply(
            843,
            json!({ "revocRegDefId": "R1", "revocDefType": "CL_ACCUM" }),
            json!({ "txnTime": 1000, "seqNo": 843 }),
        ),
    );
    expect_get_delta(&mut submitter, &mut seq, 1000, delta_reply(&[3, 1], &[]));

    let fetcher = RevRegDeltaFetcher::new(submitter);
    let delta = fetcher.fetch_delta_for_transaction(843).await.unwrap();

    assert_eq!(delta.rev_reg_def_id, "R1");
    assert_eq!(delta.to, 1000);
    assert_eq!(delta.from, None);
    assert_eq!(delta.revoked().unwrap(), IndexSet::from([1, 3]));
}

#[tokio::test]
async fn test_missing_registry_id_stops_before_delta_request() {
    let mut submitter = MockRequestSubmitter::new();
    let mut seq = Sequence::new();
    expect_get_txn(
        &mut submitter,
        &mut seq,
        7,
        entry_txn_reply(7, json!({ "value": {} }), json!({ "txnTime": 1000 })),
    );

    let fetcher = RevRegDeltaFetcher::new(submitter);
    let err = fetcher.fetch_delta_for_transaction(7).await.unwrap_err();

    assert!(matches!(err, RevRegLedgerError::MalformedTransaction { seq_no: 7, .. }));
}

#[tokio::test]
async fn test_missing_txn_time_is_malformed() {
    let mut submitter = MockRequestSubmitter::new();
    let mut seq = Sequence::new();
    expect_get_txn(
        &mut submitter,
        &mut seq,
        8,
        entry_txn_reply(8, json!({ "revocRegDefId": "R1" }), json!({})),
    );

    let fetcher = RevRegDeltaFetcher::new(submitter);
    let err = fetcher.fetch_delta_for_transaction(8).await.unwrap_err();

    assert!(matches!(err, RevRegLedgerError::MalformedTransaction { seq_no: 8, .. }));
}

#[tokio::test]
async fn test_submission_failure_is_surfaced() {
    let mut submitter = MockRequestSubmitter::new();
    submitter.expect_submit().times(1).return_once(|_| {
        Err(RevRegLedgerError::LedgerSubmissionFailed(
            "request type 3: pool timeout".to_string(),
        ))
    });

    let fetcher = RevRegDeltaFetcher::new(submitter);
    let err = fetcher.fetch_delta_for_transaction(843).await.unwrap_err();

    assert!(matches!(err, RevRegLedgerError::LedgerSubmissionFailed(_)));
}

#[tokio::test]
async fn test_second_submission_failure_is_surfaced() {
    let mut submitter = MockRequestSubmitter::new();
    let mut seq = Sequence::new();
    expect_get_txn(
        &mut submitter,
        &mut seq,
        843,
        entry_txn_reply(843, json!({ "revocRegDefId": "R1" }), json!({ "txnTime": 1000 })),
    );
    submitter
        .expect_submit()
        .times(1)
        .in_sequence(&mut seq)
        .return_once(|_| {
            Err(RevRegLedgerError::LedgerSubmissionFailed(
                "request type 117: no consensus".to_string(),
            ))
        });

    let fetcher = RevRegDeltaFetcher::new(submitter);
    let err = fetcher.fetch_delta_for_transaction(843).await.unwrap_err();

    assert!(matches!(err, RevRegLedgerError::LedgerSubmissionFailed(_)));
}

#[tokio::test]
async fn test_delta_window_brackets_transaction_time() {
    let mut submitter = MockRequestSubmitter::new();
    let mut seq = Sequence::new();
    expect_get_txn(
        &mut submitter,
        &mut seq,
        843,
        entry_txn_reply(
            843,
            json!({ "revocRegDefId": "R1", "value": { "revoked": [9] } }),
            json!({ "txnTime": 1000 }),
        ),
    );
    expect_get_delta(&mut submitter, &mut seq, 999, delta_reply(&[1, 2, 9], &[]));
    expect_get_delta(&mut submitter, &mut seq, 1000, delta_reply(&[9], &[2, 9]));

    let fetcher = RevRegDeltaFetcher::new(submitter);
    let window = fetcher.fetch_delta_window(843).await.unwrap();

    assert_eq!(window.record.txn_time, 1000);
    assert_eq!(window.before.to, 999);
    assert_eq!(window.after.to, 1000);

    let snapshot = window.snapshot_pair().unwrap();
    assert_eq!(
        snapshot.reconcile(ReconciliationStrategy::RevokedAsPrimary),
        IndexSet::from([1, 9])
    );
}

#[tokio::test]
async fn test_get_transaction_record() {
    let mut submitter = MockRequestSubmitter::new();
    let mut seq = Sequence::new();
    expect_get_txn(
        &mut submitter,
        &mut seq,
        12,
        entry_txn_reply(12, json!({ "revocRegDefId": "R1" }), json!({ "txnTime": 42 })),
    );

    let fetcher = RevRegDeltaFetcher::new(submitter);
    let record = fetcher.get_transaction_record(12).await.unwrap();

    assert_eq!(record.seq_no, 12);
    assert_eq!(record.rev_reg_def_id, "R1");
    assert_eq!(record.txn_time, 42);
}
