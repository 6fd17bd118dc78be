//! Logging and metrics exposition over a live chain.

use beacon_telemetry::{
    encode_metrics, init_telemetry, record_error, register_metrics, TelemetryConfig,
    TelemetryError,
};
use bc_04_state_transition::ImportOutcome;

use super::harness::TestNode;

#[tokio::test]
async fn test_exposition_covers_node_and_subsystems() {
    let config = TelemetryConfig {
        log_level: "warn,bc_04_state_transition=info".to_string(),
        ..TelemetryConfig::default()
    };
    match init_telemetry(&config) {
        Ok(handle) => assert_eq!(handle.port(), config.metrics_port),
        // A subscriber installed elsewhere in this binary stops init early.
        Err(TelemetryError::SubscriberInit(_)) => {
            let _ = register_metrics(&config);
        }
        Err(e) => panic!("unexpected telemetry error: {e}"),
    }

    let node = TestNode::start(16);
    node.sync().await;
    for slot in 1..=8 {
        node.propose_and_import(slot);
    }

    let mut tampered = node.proposer(node.proposer_for(9)).propose(9).unwrap();
    tampered.randao_reveal = [1u8; 32];
    if let ImportOutcome::Rejected(verdict) = node.chain.import_block(&tampered).unwrap() {
        record_error("bc-03", &format!("{verdict:?}"));
    } else {
        panic!("tampered block imported");
    }

    let text = encode_metrics().unwrap();
    assert!(text.contains("beacon_subsystem_errors_total"));
    assert!(text.contains("state_transition_blocks_applied_total"));
    assert!(text.contains("state_transition_cycle_transitions_total"));
    assert!(text.contains("block_validation_verdicts_total"));
}
