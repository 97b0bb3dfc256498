// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Append-only CSV log of successful proof requests

use super::error::EvalResult;
use super::reference_model::ReferencePrediction;
use crate::prover::ProofResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

/// Column order of the results file
pub const CSV_HEADERS: [&str; 10] = [
    "actual_label",
    "torch_model_prediction",
    "ZKML_preredicted_label",
    "proof",
    "verification",
    "proof_generation_time",
    "proof_verification_time",
    "total_execution_time",
    "witness_generation_time",
    "torch_model_predict_time",
];

/// One CSV row; field order matches `CSV_HEADERS`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionRecord {
    pub actual_label: Option<i64>,
    pub torch_model_prediction: usize,
    #[serde(rename = "ZKML_preredicted_label")]
    pub zkml_predicted_label: usize,
    pub proof: bool,
    /// `true`/`false`, empty when verification was skipped, JSON otherwise
    pub verification: String,
    pub proof_generation_time: f64,
    pub proof_verification_time: f64,
    pub total_execution_time: f64,
    pub witness_generation_time: f64,
    pub torch_model_predict_time: f64,
}

impl ExecutionRecord {
    pub fn new(result: &ProofResult, reference: &ReferencePrediction) -> Self {
        Self {
            actual_label: result.actual_label,
            torch_model_prediction: reference.label,
            zkml_predicted_label: result.predicted_label,
            proof: result.proof,
            verification: verification_cell(&result.verification),
            proof_generation_time: result.stats.proof_generation_time,
            proof_verification_time: result.stats.proof_verification_time,
            total_execution_time: result.stats.total_execution_time,
            witness_generation_time: result.stats.witness_generation_time,
            torch_model_predict_time: reference.elapsed.as_secs_f64(),
        }
    }

    pub fn verified(&self) -> bool {
        self.verification == "true"
    }
}

fn verification_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct CsvResultLog {
    path: PathBuf,
}

impl CsvResultLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one row, writing the header first if the file is new or empty
    pub fn append(&self, record: &ExecutionRecord) -> EvalResult<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let needs_header = file.metadata()?.len() == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if needs_header {
            writer.write_record(CSV_HEADERS)?;
        }
        writer.serialize(record)?;
        writer.flush()?;
        Ok(())
    }

    /// Read every row back
    pub fn read_all(&self) -> EvalResult<Vec<ExecutionRecord>> {
        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut records = Vec::new();
        for row in reader.deserialize() {
            records.push(row?);
        }
        Ok(records)
    }
}
