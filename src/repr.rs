// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Exchange representation of keys and ciphertexts.
//!
//! ```text
//! {
//!   "private": { "weights": ["2", ...], "modulus": "881", "multiplier": "588" },
//!   "public":  { "values": ["295", ...], "modulus": "881", "length": 8 }
//! }
//! ```
//!
//! Big integers are written as decimal strings. Deserialization runs the
//! validating constructors, so a key read from storage is held to the same
//! invariants as a freshly generated one.

use num_bigint_dig::BigUint;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ciphertext::Ciphertext;
use crate::error::Error;
use crate::keypair::{KeyPair, PrivateKey, PublicKey};

mod decimal {
    use super::*;

    pub fn serialize<S: Serializer>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_str_radix(10))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigUint, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(D::Error::custom)
    }
}

mod decimal_seq {
    use super::*;

    pub fn serialize<S: Serializer>(values: &[BigUint], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(values.iter().map(|value| value.to_str_radix(10)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<BigUint>, D::Error> {
        Vec::<String>::deserialize(deserializer)?
            .iter()
            .map(|text| text.parse().map_err(D::Error::custom))
            .collect()
    }
}

#[derive(Serialize, Deserialize)]
pub(crate) struct PublicKeyRepr {
    #[serde(with = "decimal_seq")]
    values: Vec<BigUint>,
    #[serde(with = "decimal")]
    modulus: BigUint,
    length: usize,
}

impl From<PublicKey> for PublicKeyRepr {
    fn from(key: PublicKey) -> Self {
        let length = key.block_size();
        Self { values: key.values, modulus: key.modulus, length }
    }
}

impl TryFrom<PublicKeyRepr> for PublicKey {
    type Error = Error;

    fn try_from(repr: PublicKeyRepr) -> Result<Self, Error> {
        if repr.length != repr.values.len() {
            return Err(Error::InvalidPublicKey);
        }
        PublicKey::new(repr.values, repr.modulus)
    }
}

#[derive(Serialize, Deserialize)]
pub(crate) struct PrivateKeyRepr {
    #[serde(with = "decimal_seq")]
    weights: Vec<BigUint>,
    #[serde(with = "decimal")]
    modulus: BigUint,
    #[serde(with = "decimal")]
    multiplier: BigUint,
}

impl From<PrivateKey> for PrivateKeyRepr {
    fn from(key: PrivateKey) -> Self {
        Self {
            weights: key.weights().as_slice().to_vec(),
            modulus: key.modulus().clone(),
            multiplier: key.multiplier().clone(),
        }
    }
}

impl TryFrom<PrivateKeyRepr> for PrivateKey {
    type Error = Error;

    fn try_from(repr: PrivateKeyRepr) -> Result<Self, Error> {
        PrivateKey::new(repr.weights, repr.modulus, repr.multiplier)
    }
}

#[derive(Serialize, Deserialize)]
pub(crate) struct CiphertextRepr {
    #[serde(with = "decimal_seq")]
    values: Vec<BigUint>,
    block_size: usize,
    padding: usize,
}

impl From<Ciphertext> for CiphertextRepr {
    fn from(ciphertext: Ciphertext) -> Self {
        let (block_size, padding) = (ciphertext.block_size(), ciphertext.padding());
        Self { values: ciphertext.into_values(), block_size, padding }
    }
}

impl From<CiphertextRepr> for Ciphertext {
    fn from(repr: CiphertextRepr) -> Self {
        Ciphertext::new(repr.values, repr.block_size, repr.padding)
    }
}

#[derive(Serialize)]
struct KeyPairRef<'a> {
    private: &'a PrivateKey,
    public: &'a PublicKey,
}

#[derive(Deserialize)]
struct KeyPairRepr {
    private: PrivateKey,
    public: PublicKey,
}

impl Serialize for KeyPair {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        KeyPairRef { private: &self.secret, public: &self.public }.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for KeyPair {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = KeyPairRepr::deserialize(deserializer)?;
        let pair = KeyPair::from_private_key(repr.private);

        // the public half must be derivable from the private half
        if pair.public != repr.public {
            return Err(D::Error::custom(Error::InvalidPublicKey));
        }
        Ok(pair)
    }
}
