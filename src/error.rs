// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Errors that can occur during key generation, encryption, decryption and
/// knapsack solving.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Key generation failed: {0}")]
    KeyGenerationFailed(String),

    #[error("decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("Invalid public key")]
    InvalidPublicKey,

    #[error("Invalid private key")]
    InvalidPrivateKey,

    #[error("Ciphertext block size does not match the key length")]
    KeyMismatch,
}

pub type Result<T> = std::result::Result<T, Error>;
