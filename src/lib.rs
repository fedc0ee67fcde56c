// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Merkle-Hellman Knapsack Cryptosystem
//!
//! Public-key encryption built on the subset-sum problem. The private key is
//! a superincreasing sequence `w`, a modulus `m > Σw` and a multiplier `r`
//! coprime to `m`; the public key is `b[i] = r · w[i] mod m`. A block of `n`
//! bits is encrypted as the sum of the public values selected by its 1-bits,
//! and decrypted by undoing the multiplier and solving the now easy
//! superincreasing knapsack greedily.
//!
//! Reference: [Merkle & Hellman (1978), IEEE Trans. Inf. Theory](https://doi.org/10.1109/TIT.1978.1055927)
//!
//! ## Security
//!
//! The basic scheme was broken by Shamir (1982) and by lattice reduction
//! attacks. Use this crate for teaching and experimentation only. Private
//! key material is zeroized on drop via the `zeroize` crate.
//!
//! ## Example
//!
//! ```rust,no_run
//! use knapcrypt::{DecryptBytes, EncryptBytes, KeyPair};
//!
//! let keypair = KeyPair::generate().expect("key generation failed");
//! let message = "hello world";
//!
//! let ciphertext = keypair.public_key().encrypt_bytes(message).expect("encryption failed");
//! let decrypted = keypair.private_key().decrypt_bytes(&ciphertext).expect("decryption failed");
//! assert_eq!(message.as_bytes(), decrypted);
//! ```
//!
//! The [`knapsack`] module additionally provides an exact dynamic
//! programming solver for the general bounded 0/1 knapsack problem.

mod ciphertext;
mod codec;
mod crypto;
mod error;
mod keypair;
pub mod knapsack;
#[cfg(feature = "serde")]
mod repr;
mod sequence;

pub use ciphertext::*;
pub use codec::Bitstream;
pub use crypto::{Decrypt, DecryptBytes, Decryptor, Encrypt, EncryptBytes, Encryptor, Stream};
pub use error::*;
pub use keypair::{KeyPair, KeyPairBuilder, PrivateKey, PublicKey};
pub use sequence::SuperincreasingSequence;
