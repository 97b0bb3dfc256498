// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Results file format and summaries built from it

use serde_json::{json, Value};
use std::time::Duration;
use zkml_mnist_node::eval::{
    BatchSummary, CsvResultLog, ExecutionRecord, ReferencePrediction, CSV_HEADERS,
};
use zkml_mnist_node::prover::{ProofResult, ProofStats};

fn proof_result(actual: i64, predicted: usize, proof: bool, verification: Value) -> ProofResult {
    ProofResult {
        proof,
        verification,
        actual_label: Some(actual),
        predicted_label: predicted,
        stats: ProofStats {
            witness_generation_time: 0.4,
            proof_generation_time: 11.5,
            proof_verification_time: if proof { 0.9 } else { 0.0 },
            total_execution_time: 13.0,
        },
    }
}

fn reference(label: usize) -> ReferencePrediction {
    ReferencePrediction {
        label,
        elapsed: Duration::from_millis(3),
    }
}

#[test]
fn test_exact_header_line() {
    assert_eq!(
        CSV_HEADERS.join(","),
        "actual_label,torch_model_prediction,ZKML_preredicted_label,proof,verification,\
         proof_generation_time,proof_verification_time,total_execution_time,\
         witness_generation_time,torch_model_predict_time"
    );
}

#[test]
fn test_existing_empty_file_gets_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("results.csv");
    std::fs::write(&path, "").unwrap();

    let log = CsvResultLog::new(&path);
    log.append(&ExecutionRecord::new(
        &proof_result(1, 1, true, json!(true)),
        &reference(1),
    ))
    .unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("actual_label,"));
    assert_eq!(text.lines().count(), 2);
}

#[test]
fn test_soft_failure_row() {
    let dir = tempfile::tempdir().unwrap();
    let log = CsvResultLog::new(dir.path().join("results.csv"));
    log.append(&ExecutionRecord::new(
        &proof_result(4, 9, false, Value::Null),
        &reference(4),
    ))
    .unwrap();

    let text = std::fs::read_to_string(log.path()).unwrap();
    let row = text.lines().nth(1).unwrap();
    let cells: Vec<&str> = row.split(',').collect();
    assert_eq!(cells.len(), 10);
    assert_eq!(cells[..5], ["4", "4", "9", "false", ""]);
}

#[test]
fn test_summary_from_log() {
    let dir = tempfile::tempdir().unwrap();
    let log = CsvResultLog::new(dir.path().join("results.csv"));
    log.append(&ExecutionRecord::new(&proof_result(7, 7, true, json!(true)), &reference(7)))
        .unwrap();
    log.append(&ExecutionRecord::new(&proof_result(2, 3, false, Value::Null), &reference(2)))
        .unwrap();

    let summary = BatchSummary::from_records(&log.read_all().unwrap());
    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.proofs, 1);
    assert_eq!(summary.verified, 1);
    assert_eq!(summary.zkml_correct, 1);
    assert_eq!(summary.reference_correct, 2);
    assert_eq!(summary.agreement, 1);
}
