// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Field Element Codec
//!
//! EZKL serializes witness values as BN254 scalar field elements encoded as
//! 32-byte little-endian hex strings (optionally `0x` prefixed). Values above
//! `(p - 1) / 2` represent negative integers. Real values are recovered by
//! dividing the integer representation by `2^scale`.

use super::error::{EzklError, EzklResult};
use ethers::types::U256;

/// BN254 scalar field modulus
pub const FIELD_MODULUS: U256 = U256([
    0x43e1f593f0000001,
    0x2833e84879b97091,
    0xb85045b68181585d,
    0x30644e72e131a029,
]);

fn invalid(felt: &str, reason: impl Into<String>) -> EzklError {
    EzklError::InvalidFelt {
        felt: felt.to_string(),
        reason: reason.into(),
    }
}

/// Parse a hex-encoded field element
pub fn parse_felt(felt: &str) -> EzklResult<U256> {
    let digits = felt.trim();
    let digits = digits.strip_prefix("0x").unwrap_or(digits);
    if digits.is_empty() {
        return Err(invalid(felt, "empty"));
    }

    // hex::decode needs an even number of digits
    let padded;
    let digits = if digits.len() % 2 == 1 {
        padded = format!("0{}", digits);
        padded.as_str()
    } else {
        digits
    };

    let bytes = hex::decode(digits).map_err(|e| invalid(felt, e.to_string()))?;
    if bytes.len() > 32 {
        return Err(invalid(felt, format!("{} bytes exceeds 32", bytes.len())));
    }

    let value = U256::from_little_endian(&bytes);
    if value >= FIELD_MODULUS {
        return Err(invalid(felt, "not reduced modulo the field"));
    }
    Ok(value)
}

/// Signed integer representation of a field element
pub fn felt_to_integer(felt: &str) -> EzklResult<i128> {
    let value = parse_felt(felt)?;
    let half = (FIELD_MODULUS - U256::one()) / 2;

    if value > half {
        let magnitude = FIELD_MODULUS - value;
        if magnitude.bits() > 127 {
            return Err(invalid(felt, "magnitude does not fit in i128"));
        }
        Ok(-(magnitude.low_u128() as i128))
    } else {
        if value.bits() > 127 {
            return Err(invalid(felt, "magnitude does not fit in i128"));
        }
        Ok(value.low_u128() as i128)
    }
}

/// Dequantize a field element at the given fixed-point scale
pub fn felt_to_float(felt: &str, scale: i32) -> EzklResult<f64> {
    let int_rep = felt_to_integer(felt)?;
    Ok(int_rep as f64 / scale_to_multiplier(scale))
}

/// Quantize a real value into a field element at the given scale
pub fn float_to_felt(value: f64, scale: i32) -> EzklResult<String> {
    if !value.is_finite() {
        return Err(invalid(&value.to_string(), "not a finite number"));
    }

    let quantized = (value * scale_to_multiplier(scale)).round();
    if quantized.abs() >= i128::MAX as f64 {
        return Err(invalid(&value.to_string(), "out of range at this scale"));
    }
    let int_rep = quantized as i128;

    let magnitude = U256::from(int_rep.unsigned_abs());
    let field_value = if int_rep < 0 {
        FIELD_MODULUS - magnitude
    } else {
        magnitude
    };

    let mut bytes = [0u8; 32];
    field_value.to_little_endian(&mut bytes);
    Ok(hex::encode(bytes))
}

/// `2^scale` as used by EZKL's fixed-point encoding
pub fn scale_to_multiplier(scale: i32) -> f64 {
    2f64.powi(scale)
}
