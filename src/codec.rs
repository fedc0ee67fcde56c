// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::error::{Error, Result};

/// An ordered sequence of bits, each stored as a `0` or `1` byte.
///
/// Bytes are expanded most-significant-bit first, so `0b1000_0001` becomes
/// `[1, 0, 0, 0, 0, 0, 0, 1]`. Blocks handed to the cipher are consecutive,
/// non-overlapping runs of this sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Bitstream {
    bits: Vec<u8>,
}

impl Bitstream {
    /// Construct a bitstream from raw bit values.
    ///
    /// Every element must be exactly `0` or `1`.
    pub fn new(bits: Vec<u8>) -> Result<Self> {
        if let Some(pos) = bits.iter().position(|&bit| bit > 1) {
            return Err(Error::InvalidInput(format!(
                "bit {} has value {}, expected 0 or 1",
                pos, bits[pos]
            )));
        }
        Ok(Self { bits })
    }

    /// Expand bytes into bits, eight per byte, MSB first.
    pub fn from_bytes<B: AsRef<[u8]>>(bytes: B) -> Self {
        let bytes = bytes.as_ref();
        let mut bits = Vec::with_capacity(bytes.len() * 8);
        for byte in bytes {
            for shift in (0..8).rev() {
                bits.push((byte >> shift) & 1);
            }
        }
        Self { bits }
    }

    /// Pack the bits back into bytes.
    ///
    /// Fails unless the length is a multiple of 8.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        if self.bits.len() % 8 != 0 {
            return Err(Error::InvalidInput(format!(
                "bitstream of {} bits is not byte aligned",
                self.bits.len()
            )));
        }
        Ok(pack(&self.bits))
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bits
    }

    /// Append zero bits until the length is a multiple of `block_size`.
    ///
    /// Returns the number of bits appended.
    pub fn pad_to_multiple(&mut self, block_size: usize) -> usize {
        if block_size == 0 {
            return 0;
        }
        let padding = (block_size - self.bits.len() % block_size) % block_size;
        self.bits.resize(self.bits.len() + padding, 0);
        padding
    }

    /// Remove `padding` trailing bits previously added by [`pad_to_multiple`].
    ///
    /// The removed bits must all be zero.
    ///
    /// [`pad_to_multiple`]: Bitstream::pad_to_multiple
    pub fn truncate_padding(&mut self, padding: usize) -> Result<()> {
        if padding > self.bits.len() {
            return Err(Error::InvalidInput(format!(
                "padding of {} bits exceeds stream of {} bits",
                padding,
                self.bits.len()
            )));
        }
        let keep = self.bits.len() - padding;
        if self.bits[keep..].iter().any(|&bit| bit != 0) {
            return Err(Error::InvalidInput("padding bits are not zero".into()));
        }
        self.bits.truncate(keep);
        Ok(())
    }

    pub(crate) fn from_bits_unchecked(bits: Vec<u8>) -> Self {
        Self { bits }
    }

    pub(crate) fn into_bits(self) -> Vec<u8> {
        self.bits
    }
}

impl AsRef<[u8]> for Bitstream {
    fn as_ref(&self) -> &[u8] {
        &self.bits
    }
}

/// Pack MSB-first bits into bytes. `bits.len()` must be a multiple of 8.
pub(crate) fn pack(bits: &[u8]) -> Vec<u8> {
    bits.chunks_exact(8).map(|byte| byte.iter().fold(0u8, |acc, &bit| (acc << 1) | bit)).collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn bytes_expand_msb_first() {
        let bits = Bitstream::from_bytes([0b1000_0001, 0x0f]);
        assert_eq!(bits.as_slice(), &[1, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 1, 1, 1]);
    }

    #[test]
    fn bytes_roundtrip() {
        let data = "Hello, 世界!".as_bytes();
        let bits = Bitstream::from_bytes(data);
        assert_eq!(bits.len(), data.len() * 8);
        assert_eq!(bits.to_bytes().unwrap(), data);
    }

    #[test]
    fn empty_input() {
        let bits = Bitstream::from_bytes([]);
        assert!(bits.is_empty());
        assert!(bits.to_bytes().unwrap().is_empty());
    }

    #[test]
    fn rejects_non_binary_values() {
        let result = Bitstream::new(vec![0, 1, 2, 1]);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn rejects_unaligned_to_bytes() {
        let bits = Bitstream::new(vec![1, 0, 1]).unwrap();
        assert!(matches!(bits.to_bytes(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn pads_to_block_boundary() {
        let mut bits = Bitstream::from_bytes([0xff]);
        assert_eq!(bits.pad_to_multiple(5), 2);
        assert_eq!(bits.len(), 10);
        assert_eq!(&bits.as_slice()[8..], &[0, 0]);

        // already aligned
        assert_eq!(bits.pad_to_multiple(5), 0);
        assert_eq!(bits.len(), 10);
    }

    #[test]
    fn truncate_padding_restores_original() {
        let mut bits = Bitstream::from_bytes([0xa5, 0x5a]);
        let padding = bits.pad_to_multiple(7);
        assert_eq!(padding, 5);

        bits.truncate_padding(padding).unwrap();
        assert_eq!(bits.to_bytes().unwrap(), vec![0xa5, 0x5a]);
    }

    #[test]
    fn truncate_padding_rejects_set_bits() {
        let mut bits = Bitstream::new(vec![1, 0, 1, 1]).unwrap();
        assert!(matches!(bits.truncate_padding(2), Err(Error::InvalidInput(_))));
        assert!(matches!(bits.truncate_padding(5), Err(Error::InvalidInput(_))));
        // failed truncation leaves the stream untouched
        assert_eq!(bits.len(), 4);
    }
}
