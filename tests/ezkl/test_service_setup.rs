// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Service construction from configuration and on-disk artifacts

use ethers::types::Address;
use std::collections::HashMap;
use std::path::Path;
use zkml_mnist_node::crypto::ezkl::{BackendKind, EzklConfig, EzklError};
use zkml_mnist_node::prover::{ProofRequest, ProvingService};

const VERIFIER: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

fn mock_config(dir: &Path, extra: &[(&str, &str)]) -> EzklConfig {
    let mut vars: HashMap<String, String> = HashMap::new();
    vars.insert("ZKML_BACKEND".into(), "mock".into());
    vars.insert(
        "ZKML_SETTINGS".into(),
        dir.join("settings.json").display().to_string(),
    );
    vars.insert(
        "ZKML_VERIFIER_ADDRESS_FILE".into(),
        dir.join("address.json").display().to_string(),
    );
    for (k, v) in extra {
        vars.insert(k.to_string(), v.to_string());
    }
    EzklConfig::from_lookup(|key| vars.get(key).cloned()).unwrap()
}

fn write_settings(dir: &Path) {
    std::fs::write(
        dir.join("settings.json"),
        r#"{"run_args": {"input_visibility": "Private"}, "model_output_scales": [7], "model_input_scales": [7]}"#,
    )
    .unwrap();
}

#[tokio::test]
async fn test_mock_service_from_config() {
    let dir = tempfile::tempdir().unwrap();
    write_settings(dir.path());
    std::fs::write(dir.path().join("address.json"), format!("\"{}\"\n", VERIFIER)).unwrap();

    let config = mock_config(dir.path(), &[("ZKML_INPUT_LEN", "4")]);
    assert_eq!(config.backend, BackendKind::Mock);

    let service = ProvingService::from_config(&config).unwrap();
    assert_eq!(
        service.options().verifier,
        Some(VERIFIER.parse::<Address>().unwrap())
    );

    let result = service
        .prove(&ProofRequest::new(vec![0.0, 1.0, 1.0, 0.0], 0))
        .await
        .unwrap();
    assert!(result.proof);
    assert_eq!(result.verification, serde_json::Value::Bool(true));
}

#[test]
fn test_missing_settings_is_setup_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = mock_config(dir.path(), &[]);

    let err = ProvingService::from_config(&config).err().unwrap();
    assert!(matches!(err, EzklError::ArtifactNotFound { .. }));
    assert!(err.is_setup_error());
}

#[test]
fn test_missing_address_file_is_setup_error() {
    let dir = tempfile::tempdir().unwrap();
    write_settings(dir.path());

    let config = mock_config(dir.path(), &[]);
    let err = ProvingService::from_config(&config).err().unwrap();
    assert!(matches!(err, EzklError::ArtifactNotFound { .. }));
}

#[test]
fn test_skip_verify_needs_no_address() {
    let dir = tempfile::tempdir().unwrap();
    write_settings(dir.path());

    let config = mock_config(dir.path(), &[("ZKML_SKIP_VERIFY", "true")]);
    let service = ProvingService::from_config(&config).unwrap();
    assert!(service.options().verifier.is_none());
}

#[test]
fn test_cli_backend_requires_circuit_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    write_settings(dir.path());

    let mut config = mock_config(dir.path(), &[]);
    config.backend = BackendKind::EzklCli;
    config.compiled_circuit_path = dir.path().join("network.compiled");

    match config.check_artifacts() {
        Err(EzklError::ArtifactNotFound { path }) => {
            assert!(path.ends_with("network.compiled"))
        }
        other => panic!("expected missing circuit, got {:?}", other),
    }
}
