// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;
use std::ops::Deref;

use num_bigint_dig::BigUint;

use crate::error::{Error, Result};

/// Ordered cipher values, one per `block_size`-bit block.
///
/// `padding` counts the zero bits appended to complete the final block when
/// the message length is not a multiple of the block size. Block order is
/// significant and must be preserved by whatever stores or transports the
/// values.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "crate::repr::CiphertextRepr", into = "crate::repr::CiphertextRepr")
)]
pub struct Ciphertext {
    values: Vec<BigUint>,
    block_size: usize,
    padding: usize,
}

impl Ciphertext {
    pub fn new(values: Vec<BigUint>, block_size: usize, padding: usize) -> Self {
        Self { values, block_size, padding }
    }

    /// Parse whitespace-separated decimal cipher values.
    pub fn parse(text: &str, block_size: usize, padding: usize) -> Result<Self> {
        let values = text
            .split_whitespace()
            .map(|token| {
                token.parse::<BigUint>().map_err(|_| {
                    Error::InvalidInput(format!("'{}' is not a non-negative integer", token))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(values, block_size, padding))
    }

    pub fn values(&self) -> &[BigUint] {
        &self.values
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn padding(&self) -> usize {
        self.padding
    }

    pub fn into_values(self) -> Vec<BigUint> {
        self.values
    }
}

impl Deref for Ciphertext {
    type Target = [BigUint];

    fn deref(&self) -> &Self::Target {
        &self.values
    }
}

/// Renders the values separated by single spaces.
impl fmt::Display for Ciphertext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", value)?;
        }
        Ok(())
    }
}
