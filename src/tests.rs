use super::*;
use crate::test_utils::{parameterize, record, StaticRegistry};
use serde_json::json;

// transfer(0x7c07f7abe10ce8e33dc6c5ad68fe033085256a84, 10^21)
const ERC20_TRANSFER_DATA: &str = "0xa9059cbb\
    0000000000000000000000007c07f7abe10ce8e33dc6c5ad68fe033085256a84\
    00000000000000000000000000000000000000000000003635c9adc5dea00000";

fn transfer_registry() -> StaticRegistry {
    StaticRegistry::new(vec![record(145, "2016-07-09T03:58:28.234977Z", "transfer(address,uint256)")])
}

#[tokio::test]
async fn erc20_transfer_is_decoded() {
    let pipeline = InsightPipeline::new(transfer_registry());
    let insight = pipeline
        .on_transaction(&json!({ "data": ERC20_TRANSFER_DATA }))
        .await
        .unwrap();

    assert_eq!(insight.kind, "transfer(address,uint256)");
    assert_eq!(
        insight.params,
        Some(json!([
            "0x7c07f7abe10ce8e33dc6c5ad68fe033085256a84",
            "1000000000000000000000"
        ]))
    );
    assert_eq!(insight.decode_error, None);
    assert_eq!(pipeline.registry().calls(), 1);
}

#[tokio::test]
async fn serialized_insight_matches_host_shape() {
    let insight = InsightPipeline::new(transfer_registry())
        .on_transaction(&json!({ "data": ERC20_TRANSFER_DATA }))
        .await
        .unwrap();
    let value = serde_json::to_value(&insight).unwrap();
    assert_eq!(value["type"], "transfer(address,uint256)");
    assert_eq!(value["params"][0], "0x7c07f7abe10ce8e33dc6c5ad68fe033085256a84");
    assert_eq!(value["params"][1], "1000000000000000000000");
}

// Transactions that never reach the registry
fn non_decodable_transaction(transaction: serde_json::Value) {
    tokio_test::block_on(async {
        let pipeline = InsightPipeline::new(transfer_registry());
        let insight = pipeline.on_transaction(&transaction).await.unwrap();
        assert_eq!(insight, Insight::unknown());
        assert_eq!(pipeline.registry().calls(), 0);
    });
}

parameterize!(
    non_decodable_transaction,
    [
        (
            plain_value_transfer,
            json!({ "to": "0x7c07f7abe10ce8e33dc6c5ad68fe033085256a84", "value": "0x1" })
        ),
        (data_not_a_string, json!({ "data": 42 })),
        (data_null, json!({ "data": null })),
        (not_an_object, json!("0xa9059cbb")),
        (array_transaction, json!([{ "data": "0xa9059cbb" }])),
        (empty_data, json!({ "data": "0x" })),
        (data_shorter_than_selector, json!({ "data": "0xa9059c" })),
        (selector_not_hex, json!({ "data": "0xnothexx0" })),
    ]
);

#[tokio::test]
async fn unknown_without_params_when_field_missing() {
    let insight = InsightPipeline::new(transfer_registry())
        .on_transaction(&json!({}))
        .await
        .unwrap();
    assert_eq!(serde_json::to_value(&insight).unwrap(), json!({ "type": "unknown" }));
}

#[tokio::test]
async fn unregistered_selector_is_unknown() {
    let pipeline = InsightPipeline::new(StaticRegistry::new(vec![]));
    let insight = pipeline
        .on_transaction(&json!({ "data": ERC20_TRANSFER_DATA }))
        .await
        .unwrap();
    assert!(insight.is_unknown());
    assert_eq!(insight.params, None);
    assert_eq!(pipeline.registry().calls(), 1);
}

#[tokio::test]
async fn registry_failure_is_surfaced() {
    let err = InsightPipeline::new(StaticRegistry::failing(500))
        .on_transaction(&json!({ "data": ERC20_TRANSFER_DATA }))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        InsightError::Registry(RegistryError::Status { status: 500, .. })
    ));
}

#[tokio::test]
async fn short_call_data_is_flagged_not_swallowed() {
    // selector plus a single word, transfer needs two
    let data = &ERC20_TRANSFER_DATA[..10 + 64];
    let insight = InsightPipeline::new(transfer_registry())
        .on_transaction(&json!({ "data": data }))
        .await
        .unwrap();

    assert_eq!(insight.kind, "transfer(address,uint256)");
    assert_eq!(insight.params, None);
    assert!(insight.decode_error.is_some());
}

#[tokio::test]
async fn earliest_registration_wins_and_candidates_are_listed() {
    let registry = StaticRegistry::new(vec![
        record(2, "2021-01-01", "bar(uint256)"),
        record(1, "2020-01-01", "foo(uint256)"),
    ]);
    let data = "0xa9059cbb000000000000000000000000000000000000000000000000000000000000002a";
    let insight = InsightPipeline::new(registry)
        .on_transaction(&json!({ "data": data }))
        .await
        .unwrap();

    assert_eq!(insight.kind, "foo(uint256)");
    assert_eq!(insight.params, Some(json!(["42"])));
    assert_eq!(insight.candidates, vec!["foo(uint256)", "bar(uint256)"]);
}

#[tokio::test]
async fn strategy_can_be_swapped() {
    let registry = StaticRegistry::new(vec![
        record(1, "2021-01-01", "by_id(uint256)"),
        record(2, "2020-01-01", "by_date(uint256)"),
    ]);
    let data = "0xa9059cbb000000000000000000000000000000000000000000000000000000000000002a";
    let insight = InsightPipeline::new(registry)
        .with_strategy(LowestId)
        .on_transaction(&json!({ "data": data }))
        .await
        .unwrap();
    assert_eq!(insight.kind, "by_id(uint256)");
}

#[tokio::test]
async fn tuple_parameters_are_decoded() {
    let tokens = vec![ethabi::Token::Array(vec![ethabi::Token::Tuple(vec![
        ethabi::Token::Address(ethereum_types::H160::from_low_u64_be(0xbeef)),
        ethabi::Token::Bytes(vec![0x12, 0x34]),
    ])])];
    let data = format!("0x252dba42{}", hex::encode(ethabi::encode(&tokens)));
    let registry = StaticRegistry::new(vec![record(1, "2019-03-01", "aggregate((address,bytes)[])")]);

    let insight = InsightPipeline::new(registry)
        .on_transaction(&json!({ "data": data }))
        .await
        .unwrap();
    assert_eq!(
        insight.params,
        Some(json!([[["0x000000000000000000000000000000000000beef", "0x1234"]]]))
    );
}

#[tokio::test]
async fn unparseable_signature_is_flagged() {
    let registry = StaticRegistry::new(vec![record(1, "2019-03-01", "broken(uint256")]);
    let insight = InsightPipeline::new(registry)
        .on_transaction(&json!({ "data": ERC20_TRANSFER_DATA }))
        .await
        .unwrap();
    assert_eq!(insight.kind, "broken(uint256");
    assert_eq!(insight.params, None);
    assert!(insight.decode_error.unwrap().contains("unbalanced"));
}

// Registry signatures are community submitted, malformed ones must be flagged
fn malformed_signature_is_flagged(signature: &str) {
    tokio_test::block_on(async {
        let registry = StaticRegistry::new(vec![record(1, "2019-03-01", signature)]);
        let insight = InsightPipeline::new(registry)
            .on_transaction(&json!({ "data": ERC20_TRANSFER_DATA }))
            .await
            .unwrap();
        assert_eq!(insight.kind, signature);
        assert_eq!(insight.params, None);
        assert!(insight.decode_error.is_some());
    });
}

parameterize!(
    malformed_signature_is_flagged,
    [
        (lone_closing_bracket, "f(])"),
        (non_ascii_array, "f(\u{e9}[])"),
        (unclosed_array, "f(uint256[)"),
        (empty_tuple_array, "f(()[])"),
        (zero_length_fixed_array, "f(uint256[0][])"),
    ]
);

#[tokio::test]
async fn zero_sized_elements_are_not_decoded() {
    // offset 0x20, length 0x1000000 and nothing else
    let data = "0xa9059cbb\
        0000000000000000000000000000000000000000000000000000000000000020\
        0000000000000000000000000000000000000000000000000000000001000000";
    let registry = StaticRegistry::new(vec![record(1, "2019-03-01", "f(()[])")]);
    let insight = InsightPipeline::new(registry)
        .on_transaction(&json!({ "data": data }))
        .await
        .unwrap();
    assert_eq!(insight.params, None);
    assert!(insight.decode_error.unwrap().contains("empty tuple"));
}
