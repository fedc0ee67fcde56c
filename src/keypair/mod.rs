// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

mod util;

use crate::ciphertext::Ciphertext;
use crate::codec::Bitstream;
use crate::crypto::{Decryptor, Encryptor};
use crate::error::{Error, Result};
use crate::sequence::SuperincreasingSequence;
use crate::{Decrypt, DecryptBytes, Encrypt, EncryptBytes};

use num_bigint_dig::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, warn};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Public half of a knapsack key pair.
///
/// Holds the disguised weights `b[i] = (r * w[i]) mod m` together with the
/// modulus `m`. The number of weights is the block size `N`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "crate::repr::PublicKeyRepr", into = "crate::repr::PublicKeyRepr")
)]
pub struct PublicKey {
    pub(crate) values: Vec<BigUint>,
    pub(crate) modulus: BigUint,
}

impl PublicKey {
    /// Construct a public key from its components.
    ///
    /// There must be at least one value and every value must lie in `(0, m)`.
    pub fn new(values: Vec<BigUint>, modulus: BigUint) -> Result<Self> {
        if values.is_empty() || modulus.is_zero() {
            return Err(Error::InvalidPublicKey);
        }
        if values.iter().any(|value| value.is_zero() || *value >= modulus) {
            return Err(Error::InvalidPublicKey);
        }

        Ok(Self { values, modulus })
    }

    /// Return the public knapsack weights.
    pub fn values(&self) -> &[BigUint] {
        &self.values
    }

    /// Return the modulus `m`.
    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// Number of bits encrypted per block.
    pub fn block_size(&self) -> usize {
        self.values.len()
    }
}

/// Secret key material: the superincreasing weights `w`, modulus `m` and
/// multiplier `r`.
///
/// Every construction path checks that `w` is superincreasing, `m > sum(w)`,
/// `0 < r < m` and `gcd(r, m) = 1`. Fields are zeroized on drop.
#[allow(missing_debug_implementations)]
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(feature = "expose-secret", derive(Debug))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "crate::repr::PrivateKeyRepr", into = "crate::repr::PrivateKeyRepr")
)]
pub struct PrivateKey {
    pub(crate) weights: SuperincreasingSequence,
    pub(crate) modulus: BigUint,
    pub(crate) multiplier: BigUint,
}

impl PrivateKey {
    /// Construct a private key from its components.
    pub fn new(weights: Vec<BigUint>, modulus: BigUint, multiplier: BigUint) -> Result<Self> {
        let weights =
            SuperincreasingSequence::try_from(weights).map_err(|_| Error::InvalidPrivateKey)?;
        Self::from_sequence(weights, modulus, multiplier)
    }

    pub(crate) fn from_sequence(
        weights: SuperincreasingSequence,
        modulus: BigUint,
        multiplier: BigUint,
    ) -> Result<Self> {
        if modulus <= weights.sum() {
            return Err(Error::InvalidPrivateKey);
        }
        if multiplier.is_zero() || multiplier >= modulus {
            return Err(Error::InvalidPrivateKey);
        }
        if !multiplier.gcd(&modulus).is_one() {
            return Err(Error::InvalidPrivateKey);
        }

        Ok(Self { weights, modulus, multiplier })
    }

    /// Derive the matching public key.
    pub fn public_key(&self) -> PublicKey {
        let values = util::transform(self.weights.as_slice(), &self.multiplier, &self.modulus);
        PublicKey { values, modulus: self.modulus.clone() }
    }

    /// Return the superincreasing weights.
    pub fn weights(&self) -> &SuperincreasingSequence {
        &self.weights
    }

    /// Return the modulus `m`.
    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// Return the multiplier `r`.
    pub fn multiplier(&self) -> &BigUint {
        &self.multiplier
    }

    /// Number of bits decrypted per block.
    pub fn block_size(&self) -> usize {
        self.weights.len()
    }
}

/// A complete key pair consisting of public and private components.
///
/// Secret material is zeroized when dropped.
#[allow(missing_debug_implementations)]
#[derive(PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(feature = "expose-secret", derive(Debug))]
pub struct KeyPair {
    #[zeroize(skip)]
    pub(crate) public: PublicKey,
    pub(crate) secret: PrivateKey,
}

impl<'a> KeyPair {
    /// Generate a key pair with default parameters (8-bit blocks).
    pub fn generate() -> Result<Self> {
        KeyPairBuilder::new().build()
    }

    /// Generate a key pair with a custom block size.
    pub fn generate_with_size(block_size: usize) -> Result<Self> {
        KeyPairBuilder::new().block_size(block_size).build()
    }

    /// Rebuild a key pair around an existing private key.
    pub fn from_private_key(secret: PrivateKey) -> Self {
        let public = secret.public_key();
        Self { public, secret }
    }

    /// Return the public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    /// Return the private key.
    pub fn private_key(&self) -> &PrivateKey {
        &self.secret
    }

    /// Create a streaming encryptor bound to this public key.
    pub fn encryptor(&'a self) -> Encryptor<'a> {
        self.public.encryptor()
    }

    /// Create a streaming decryptor bound to this private key.
    pub fn decryptor(&'a self, padding: usize) -> Decryptor<'a> {
        self.secret.decryptor(padding)
    }
}

impl Encrypt for KeyPair {
    fn encrypt(&self, bits: &Bitstream) -> Result<Ciphertext> {
        self.public.encrypt(bits)
    }
}

impl EncryptBytes for KeyPair {
    fn encrypt_bytes<P: AsRef<[u8]>>(&self, data: P) -> Result<Ciphertext> {
        self.public.encrypt_bytes(data)
    }
}

impl Decrypt for KeyPair {
    fn decrypt(&self, ciphertext: &Ciphertext) -> Result<Bitstream> {
        self.secret.decrypt(ciphertext)
    }
}

impl DecryptBytes for KeyPair {
    fn decrypt_bytes(&self, ciphertext: &Ciphertext) -> Result<Vec<u8>> {
        self.secret.decrypt_bytes(ciphertext)
    }
}

/// Builder for generating key pairs with configurable parameters.
#[derive(Debug, Clone)]
pub struct KeyPairBuilder {
    block_size: usize,
    min_start: u64,
    max_jitter: u64,
    max_attempts: usize,
    seed: Option<u64>,
}

impl KeyPairBuilder {
    /// One block per byte.
    pub const DEFAULT_BLOCK_SIZE: usize = 8;

    pub const DEFAULT_MIN_START: u64 = 2;

    pub const DEFAULT_MAX_JITTER: u64 = 10;

    /// Upper bound on multiplier candidates drawn before giving up.
    pub const DEFAULT_MAX_ATTEMPTS: usize = 1000;

    /// Create a builder with default parameters.
    pub fn new() -> Self {
        Self {
            block_size: Self::DEFAULT_BLOCK_SIZE,
            min_start: Self::DEFAULT_MIN_START,
            max_jitter: Self::DEFAULT_MAX_JITTER,
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
            seed: None,
        }
    }

    /// Set the number of bits per block (the key length `N`).
    pub fn block_size(mut self, bits: usize) -> Self {
        self.block_size = bits;
        self
    }

    /// Set the lower bound of the first private weight.
    pub fn min_start(mut self, min_start: u64) -> Self {
        self.min_start = min_start;
        self
    }

    /// Set the upper bound of the random jump added at each step.
    pub fn max_jitter(mut self, max_jitter: u64) -> Self {
        self.max_jitter = max_jitter;
        self
    }

    /// Set how many multiplier candidates may be drawn.
    pub fn max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Seed the generator for reproducible keys.
    ///
    /// Without a seed, every `build` draws fresh entropy from the OS.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Generate the key pair.
    pub fn build(self) -> Result<KeyPair> {
        if self.block_size > 0 && self.block_size < 8 {
            warn!(
                block_size = self.block_size,
                "block size below 8 bits, every byte spans several blocks"
            );
        }

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let weights = SuperincreasingSequence::generate(
            self.block_size,
            self.min_start,
            self.max_jitter,
            &mut rng,
        )?;
        if !SuperincreasingSequence::validate(weights.as_slice()) {
            return Err(Error::KeyGenerationFailed("weights are not superincreasing".into()));
        }

        let modulus = util::choose_modulus(&weights.sum(), &mut rng);
        let (multiplier, attempts) = util::find_multiplier(&modulus, self.max_attempts, &mut rng)?;

        let secret = PrivateKey::from_sequence(weights, modulus, multiplier).map_err(|err| {
            Error::KeyGenerationFailed(format!("generated key failed validation: {}", err))
        })?;
        let public = secret.public_key();

        debug!(
            block_size = self.block_size,
            modulus_bits = public.modulus.bits(),
            attempts,
            "generated knapsack key pair"
        );

        Ok(KeyPair { public, secret })
    }
}

impl Default for KeyPairBuilder {
    fn default() -> Self {
        Self::new()
    }
}
