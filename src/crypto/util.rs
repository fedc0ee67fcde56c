// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use num_bigint_dig::{BigUint, ModInverse};
use num_traits::Zero;

use crate::error::{Error, Result};

/// Computes `value⁻¹ mod modulus`.
///
/// Fails with `DecryptionFailed` when `gcd(value, modulus) != 1`, which only
/// happens for a corrupted or tampered key.
pub fn modular_inverse(value: &BigUint, modulus: &BigUint) -> Result<BigUint> {
    value
        .mod_inverse(modulus)
        .and_then(|inverse| inverse.to_biguint())
        .ok_or_else(|| Error::DecryptionFailed("multiplier has no inverse modulo m".into()))
}

/// Knapsack sum of the weights whose bit is set.
///
/// `bits` and `weights` have the same length; an all-zero block sums to 0.
pub fn knapsack_sum(weights: &[BigUint], bits: &[u8]) -> BigUint {
    weights
        .iter()
        .zip(bits)
        .filter(|&(_, &bit)| bit == 1)
        .fold(BigUint::zero(), |acc, (weight, _)| acc + weight)
}
