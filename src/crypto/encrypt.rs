// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{Encrypt, EncryptBytes, Stream, util};
use crate::ciphertext::Ciphertext;
use crate::codec::Bitstream;
use crate::error::{Error, Result};
use crate::keypair::PublicKey;

use num_bigint_dig::BigUint;

impl Encrypt for PublicKey {
    fn encrypt(&self, bits: &Bitstream) -> Result<Ciphertext> {
        let n = self.block_size();
        if bits.is_empty() || bits.len() % n != 0 {
            return Err(Error::InvalidInput(format!(
                "bitstream of {} bits is not a positive multiple of the {}-bit block size",
                bits.len(),
                n
            )));
        }

        let values = bits.as_slice().chunks_exact(n).map(|block| self.encrypt_block(block)).collect();

        Ok(Ciphertext::new(values, n, 0))
    }
}

impl EncryptBytes for PublicKey {
    fn encrypt_bytes<P: AsRef<[u8]>>(&self, data: P) -> Result<Ciphertext> {
        let mut encryptor = self.encryptor();
        encryptor.update(data.as_ref())?;
        encryptor.finalize()
    }
}

impl<'a> PublicKey {
    /// Create a streaming encryptor for this key.
    pub fn encryptor(&'a self) -> Encryptor<'a> {
        Encryptor::new(self)
    }

    /// Cipher value of a single block of exactly `block_size` bits.
    pub(crate) fn encrypt_block(&self, block: &[u8]) -> BigUint {
        util::knapsack_sum(&self.values, block)
    }
}

/// Streaming encryption context.
///
/// Bytes are expanded MSB-first into a bit buffer; every time the buffer
/// holds a full block it is encrypted and emitted. [`Stream::finalize`]
/// zero-pads the last partial block and records the padding in the returned
/// [`Ciphertext`].
#[derive(Debug)]
pub struct Encryptor<'a> {
    pub_key: &'a PublicKey,

    /// Bits of the current incomplete block.
    buffer: Vec<u8>,

    /// Every cipher value produced so far, in block order.
    values: Vec<BigUint>,
}

impl<'a> Encryptor<'a> {
    pub(crate) fn new(pub_key: &'a PublicKey) -> Self {
        Self {
            pub_key,
            buffer: Vec::with_capacity(pub_key.block_size()),
            values: Vec::new(),
        }
    }

    /// Encrypt the buffer if it holds a full block.
    fn flush_block(&mut self) -> Option<BigUint> {
        if self.buffer.len() < self.pub_key.block_size() {
            return None;
        }
        let value = self.pub_key.encrypt_block(&self.buffer);
        self.buffer.clear();
        self.values.push(value.clone());
        Some(value)
    }
}

impl<'a> Stream for Encryptor<'a> {
    type Input = [u8];
    type Output = Vec<BigUint>;
    type Finished = Ciphertext;

    fn update(&mut self, data: &[u8]) -> Result<Vec<BigUint>> {
        let mut emitted = Vec::new();
        for byte in data {
            for shift in (0..8).rev() {
                self.buffer.push((byte >> shift) & 1);
                emitted.extend(self.flush_block());
            }
        }
        Ok(emitted)
    }

    fn finalize(mut self) -> Result<Ciphertext> {
        let n = self.pub_key.block_size();
        let padding = if self.buffer.is_empty() { 0 } else { n - self.buffer.len() };

        if padding > 0 {
            self.buffer.resize(n, 0);
            self.flush_block();
        }

        Ok(Ciphertext::new(self.values, n, padding))
    }
}
