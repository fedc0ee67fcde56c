// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use num_bigint_dig::{BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::One;
use rand::Rng;
use tracing::trace;

use crate::error::{Error, Result};

/// Pick a modulus uniformly from `[sum + 1, 2 * sum]`.
///
/// Any subset sum of the private weights stays strictly below the modulus,
/// so reducing it modulo `m` never wraps. Both bounds are raised to at least
/// 3 so that `[2, m - 1]` always holds a multiplier; this only affects a
/// single weight of 1.
pub fn choose_modulus<R: Rng + ?Sized>(sum: &BigUint, rng: &mut R) -> BigUint {
    let floor = BigUint::from(3u32);
    let low = (sum + BigUint::one()).max(floor.clone());
    let high = (sum << 1).max(floor) + BigUint::one();
    rng.gen_biguint_range(&low, &high)
}

/// Find a multiplier `r` in `[2, m - 1]` coprime to `modulus`.
///
/// Candidates are sampled uniformly, at most `max_attempts` times. Returns the
/// multiplier together with the number of candidates drawn.
pub fn find_multiplier<R: Rng + ?Sized>(
    modulus: &BigUint,
    max_attempts: usize,
    rng: &mut R,
) -> Result<(BigUint, usize)> {
    let low = BigUint::from(2u32);
    if *modulus <= low {
        return Err(Error::KeyGenerationFailed(format!(
            "modulus {} leaves no room for a multiplier",
            modulus
        )));
    }

    for attempt in 1..=max_attempts {
        let candidate = rng.gen_biguint_range(&low, modulus);
        if candidate.gcd(modulus).is_one() {
            return Ok((candidate, attempt));
        }
        trace!(attempt, "multiplier candidate shares a factor with the modulus");
    }

    Err(Error::KeyGenerationFailed(format!(
        "no multiplier coprime to the modulus after {} attempts",
        max_attempts
    )))
}

/// Disguise the private weights: `b[i] = (r * w[i]) mod m`.
pub fn transform(weights: &[BigUint], multiplier: &BigUint, modulus: &BigUint) -> Vec<BigUint> {
    weights.iter().map(|weight| (weight * multiplier) % modulus).collect()
}
