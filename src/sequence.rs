// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Superincreasing sequences and their linear-time subset-sum solver.

use num_bigint_dig::BigUint;
use num_traits::Zero;
use rand::Rng;
use zeroize::Zeroize;

use crate::codec::Bitstream;
use crate::error::{Error, Result};

/// A sequence in which every element exceeds the sum of all elements before it.
///
/// This is the secret half of a private key. It is validated on every
/// construction path and immutable afterwards.
#[allow(missing_debug_implementations)]
#[derive(Clone, PartialEq, Eq, Zeroize)]
#[cfg_attr(feature = "expose-secret", derive(Debug))]
pub struct SuperincreasingSequence {
    weights: Vec<BigUint>,
}

impl SuperincreasingSequence {
    /// Generate a random superincreasing sequence of length `n`.
    ///
    /// The first element is drawn from `[min_start, min_start + max_jitter]`;
    /// each following element is the running sum plus a jump drawn from
    /// `[1, max_jitter]`. The jitter bound keeps growth close to doubling per
    /// element.
    pub fn generate<R: Rng + ?Sized>(
        n: usize,
        min_start: u64,
        max_jitter: u64,
        rng: &mut R,
    ) -> Result<Self> {
        if n == 0 {
            return Err(Error::InvalidParameter("sequence length must be at least 1".into()));
        }
        if max_jitter < 1 {
            return Err(Error::InvalidParameter("max_jitter must be at least 1".into()));
        }
        if min_start == 0 {
            return Err(Error::InvalidParameter("min_start must be positive".into()));
        }

        let mut weights = Vec::with_capacity(n);
        let first = BigUint::from(min_start) + BigUint::from(rng.gen_range(0..=max_jitter));
        let mut sum = first.clone();
        weights.push(first);

        for _ in 1..n {
            let next = &sum + BigUint::from(rng.gen_range(1..=max_jitter));
            sum += &next;
            weights.push(next);
        }

        Ok(Self { weights })
    }

    /// Check the superincreasing property.
    ///
    /// Returns `true` iff the sequence is non-empty, its first element is
    /// positive and every later element exceeds the sum of its predecessors.
    pub fn validate(sequence: &[BigUint]) -> bool {
        if sequence.is_empty() {
            return false;
        }

        // sum starts at zero, so this also rejects a zero first element
        let mut sum = BigUint::zero();
        for weight in sequence {
            if *weight <= sum {
                return false;
            }
            sum += weight;
        }
        true
    }

    /// Solve the subset-sum problem for `target` greedily.
    ///
    /// Walking from the largest weight down, a weight is taken whenever it
    /// fits the remaining target. Bit `i` of the result selects weight `i`.
    /// Returns `None` if no subset sums to exactly `target`.
    pub fn solve(&self, target: &BigUint) -> Option<Bitstream> {
        let mut remaining = target.clone();
        let mut bits = vec![0u8; self.weights.len()];

        for (i, weight) in self.weights.iter().enumerate().rev() {
            if remaining >= *weight {
                bits[i] = 1;
                remaining -= weight;
            }
        }

        remaining.is_zero().then(|| Bitstream::from_bits_unchecked(bits))
    }

    /// Sum of all elements.
    pub fn sum(&self) -> BigUint {
        self.weights.iter().fold(BigUint::zero(), |acc, weight| acc + weight)
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn as_slice(&self) -> &[BigUint] {
        &self.weights
    }
}

impl TryFrom<Vec<BigUint>> for SuperincreasingSequence {
    type Error = Error;

    fn try_from(weights: Vec<BigUint>) -> Result<Self> {
        if !Self::validate(&weights) {
            return Err(Error::InvalidParameter("sequence is not superincreasing".into()));
        }
        Ok(Self { weights })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn big(values: &[u64]) -> Vec<BigUint> {
        values.iter().map(|&v| BigUint::from(v)).collect()
    }

    #[test]
    fn generated_sequences_are_superincreasing() {
        let mut rng = StdRng::seed_from_u64(7);
        for n in 1..=64 {
            for jitter in [1, 2, 10, 1000] {
                let seq = SuperincreasingSequence::generate(n, 2, jitter, &mut rng).unwrap();
                assert_eq!(seq.len(), n);
                assert!(SuperincreasingSequence::validate(seq.as_slice()));
            }
        }
    }

    #[test]
    fn first_element_respects_bounds() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let seq = SuperincreasingSequence::generate(1, 5, 3, &mut rng).unwrap();
            let first = &seq.as_slice()[0];
            assert!(*first >= BigUint::from(5u32) && *first <= BigUint::from(8u32));
        }
    }

    #[test]
    fn growth_is_bounded_by_jitter() {
        let mut rng = StdRng::seed_from_u64(3);
        let seq = SuperincreasingSequence::generate(16, 1, 4, &mut rng).unwrap();

        let mut sum = BigUint::zero();
        for weight in seq.as_slice() {
            if !sum.is_zero() {
                assert!(*weight > sum);
                assert!(*weight <= &sum + 4u32);
            }
            sum += weight;
        }
    }

    #[test]
    fn rejects_invalid_parameters() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            SuperincreasingSequence::generate(0, 2, 10, &mut rng),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            SuperincreasingSequence::generate(8, 2, 0, &mut rng),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            SuperincreasingSequence::generate(8, 0, 10, &mut rng),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn validate_examples() {
        assert!(SuperincreasingSequence::validate(&big(&[2, 7, 11, 21, 42, 89, 180, 354])));
        assert!(SuperincreasingSequence::validate(&big(&[1])));
        assert!(!SuperincreasingSequence::validate(&[]));
        assert!(!SuperincreasingSequence::validate(&big(&[0, 1, 2])));
        // 3 is not greater than 1 + 2
        assert!(!SuperincreasingSequence::validate(&big(&[1, 2, 3])));
        assert!(!SuperincreasingSequence::validate(&big(&[5, 4])));
    }

    #[test]
    fn try_from_validates() {
        assert!(SuperincreasingSequence::try_from(big(&[1, 2, 4, 8])).is_ok());
        assert!(matches!(
            SuperincreasingSequence::try_from(big(&[1, 2, 3])),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn greedy_solver_recovers_subset() {
        let seq = SuperincreasingSequence::try_from(big(&[2, 7, 11, 21, 42, 89, 180, 354])).unwrap();

        // 7 + 21 + 180 = 208
        let bits = seq.solve(&BigUint::from(208u32)).unwrap();
        assert_eq!(bits.as_slice(), &[0, 1, 0, 1, 0, 0, 1, 0]);

        let none = seq.solve(&BigUint::zero()).unwrap();
        assert_eq!(none.as_slice(), &[0; 8]);

        let all = seq.solve(&seq.sum()).unwrap();
        assert_eq!(all.as_slice(), &[1; 8]);
    }

    #[test]
    fn greedy_solver_rejects_unreachable_targets() {
        let seq = SuperincreasingSequence::try_from(big(&[2, 7, 11, 21, 42, 89, 180, 354])).unwrap();

        assert!(seq.solve(&BigUint::from(1u32)).is_none());
        assert!(seq.solve(&BigUint::from(8u32)).is_none());
        assert!(seq.solve(&(seq.sum() + 1u32)).is_none());
    }

    #[test]
    fn sum_matches_elements() {
        let seq = SuperincreasingSequence::try_from(big(&[3, 5, 9, 20])).unwrap();
        assert_eq!(seq.sum(), BigUint::from(37u32));
    }
}
