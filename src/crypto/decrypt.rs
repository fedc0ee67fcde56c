// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{Decrypt, DecryptBytes, Stream, util};
use crate::ciphertext::Ciphertext;
use crate::codec::{self, Bitstream};
use crate::error::{Error, Result};
use crate::keypair::PrivateKey;

use num_bigint_dig::BigUint;
use rayon::prelude::*;
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

impl Decrypt for PrivateKey {
    fn decrypt(&self, ciphertext: &Ciphertext) -> Result<Bitstream> {
        // Ensure the ciphertext was produced for a key of this length.
        if ciphertext.block_size() != self.block_size() {
            return Err(Error::KeyMismatch);
        }

        let bits = self.decrypt_values(ciphertext.values())?;
        Ok(Bitstream::from_bits_unchecked(bits))
    }
}

impl DecryptBytes for PrivateKey {
    fn decrypt_bytes(&self, ciphertext: &Ciphertext) -> Result<Vec<u8>> {
        if ciphertext.block_size() != self.block_size() {
            return Err(Error::KeyMismatch);
        }

        let mut decryptor = self.decryptor(ciphertext.padding());
        let mut output = decryptor.update(ciphertext.values())?;
        output.extend(decryptor.finalize()?);

        Ok(output)
    }
}

impl<'a> PrivateKey {
    /// Create a streaming decryptor for this key.
    ///
    /// `padding` is the number of zero bits the sender appended to the final
    /// block, as recorded in [`Ciphertext::padding`].
    pub fn decryptor(&'a self, padding: usize) -> Decryptor<'a> {
        Decryptor::new(self, padding)
    }

    /// Recover the bits of each cipher value, concatenated in input order.
    ///
    /// c' = c · r⁻¹ mod m equals the private subset sum because every subset
    /// sum of `w` is below `m`. The greedy solver then reads the bits off `w`.
    pub(crate) fn decrypt_values(&self, values: &[BigUint]) -> Result<Vec<u8>> {
        let r_inv = util::modular_inverse(&self.multiplier, &self.modulus)?;

        let blocks = values
            .par_iter()
            .enumerate()
            .map(|(index, c)| {
                let target = (c * &r_inv) % &self.modulus;
                self.weights.solve(&target).ok_or_else(|| {
                    debug!(block = index, "cipher value has no subset-sum solution");
                    Error::DecryptionFailed(format!(
                        "block {} is inconsistent with this private key",
                        index
                    ))
                })
            })
            .collect::<Result<Vec<Bitstream>>>()?;

        Ok(blocks.into_iter().flat_map(Bitstream::into_bits).collect())
    }
}

/// Incremental (streaming) decryption context.
///
/// Cipher values may arrive in any number of batches. Bytes are released as
/// soon as they can no longer overlap the final block, which is the only one
/// that may carry padding.
#[allow(missing_debug_implementations)]
#[derive(PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(feature = "expose-secret", derive(Debug))]
pub struct Decryptor<'a> {
    #[zeroize(skip)]
    priv_key: &'a PrivateKey,
    padding: usize,

    /// Recovered bits not yet packed into output bytes.
    buffer: Vec<u8>,
}

impl<'a> Decryptor<'a> {
    pub(crate) fn new(priv_key: &'a PrivateKey, padding: usize) -> Self {
        Self { priv_key, padding, buffer: Vec::new() }
    }
}

impl<'a> Stream for Decryptor<'a> {
    type Input = [BigUint];
    type Output = Vec<u8>;
    type Finished = Vec<u8>;

    fn update(&mut self, values: &[BigUint]) -> Result<Vec<u8>> {
        let bits = self.priv_key.decrypt_values(values)?;
        self.buffer.extend_from_slice(&bits);

        // hold back the last block, it may end in padding
        let ready = self.buffer.len().saturating_sub(self.priv_key.block_size()) / 8 * 8;
        let output = codec::pack(&self.buffer[..ready]);
        self.buffer.drain(..ready);

        Ok(output)
    }

    fn finalize(mut self) -> Result<Vec<u8>> {
        let n = self.priv_key.block_size();
        if self.padding >= n {
            return Err(Error::InvalidInput(format!(
                "padding of {} bits is not smaller than the {}-bit block size",
                self.padding, n
            )));
        }

        let mut rest = Bitstream::from_bits_unchecked(std::mem::take(&mut self.buffer));
        rest.truncate_padding(self.padding)?;
        rest.to_bytes()
    }
}
