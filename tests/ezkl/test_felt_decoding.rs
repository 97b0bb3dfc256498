// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Field element decoding of circuit outputs
//!
//! Witness outputs are BN254 scalars in little-endian hex; values above
//! (p - 1) / 2 encode negatives, and the output scale is a power-of-two
//! fixed point exponent.

use ethers::types::U256;
use zkml_mnist_node::crypto::ezkl::felt::{parse_felt, FIELD_MODULUS};
use zkml_mnist_node::crypto::ezkl::{felt_to_float, felt_to_integer, float_to_felt, Witness};

fn le_hex(value: U256) -> String {
    let mut bytes = [0u8; 32];
    value.to_little_endian(&mut bytes);
    hex::encode(bytes)
}

#[test]
fn test_small_positive_felt() {
    // 640 = 5 * 2^7
    let felt = le_hex(U256::from(640u64));
    assert_eq!(felt_to_integer(&felt).unwrap(), 640);
    assert_eq!(felt_to_float(&felt, 7).unwrap(), 5.0);
}

#[test]
fn test_negative_felt_wraps_modulus() {
    let minus_one = le_hex(FIELD_MODULUS - U256::one());
    assert_eq!(felt_to_integer(&minus_one).unwrap(), -1);

    let minus_half = le_hex(FIELD_MODULUS - U256::from(64u64));
    assert_eq!(felt_to_float(&minus_half, 7).unwrap(), -0.5);
}

#[test]
fn test_prefixed_felt_accepted() {
    let felt = format!("0x{}", le_hex(U256::from(3u64)));
    assert_eq!(parse_felt(&felt).unwrap(), U256::from(3u64));
}

#[test]
fn test_float_to_felt_is_inverse_on_grid() {
    let felt = float_to_felt(-2.25, 4).unwrap();
    assert_eq!(felt.len(), 64);
    assert_eq!(felt_to_float(&felt, 4).unwrap(), -2.25);
}

#[test]
fn test_witness_prediction_uses_output_scale() {
    let logits = [-1.5, 0.25, 4.0, 3.75, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
    let witness = Witness::from_values(&[0.0, 1.0], 0, &logits, 7).unwrap();

    assert_eq!(witness.predicted_label(7, 10).unwrap(), 2);
    assert_eq!(witness.decode_outputs(7, 2).unwrap(), vec![-1.5, 0.25]);
}

#[test]
fn test_witness_with_too_few_outputs() {
    let witness = Witness::from_values(&[], 0, &[1.0, 2.0], 7).unwrap();
    assert!(witness.predicted_label(7, 10).is_err());
}
