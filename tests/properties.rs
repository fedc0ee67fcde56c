//! Property-based tests for the knapsack cryptosystem
//!
//! These tests verify the invariants the scheme relies on:
//!
//! 1. **Round-trip**: decrypt(encrypt(m)) == m for all byte messages and block sizes
//! 2. **Superincreasing**: generated private weights always validate
//! 3. **Invertibility**: every generated multiplier has an inverse mod m
//! 4. **Streaming**: chunked encryption matches one-shot encryption
//! 5. **Optimality**: the knapsack solver matches exhaustive search

use knapcrypt::knapsack::{self, Item};
use knapcrypt::{
    Bitstream, Decrypt, DecryptBytes, Encrypt, EncryptBytes, KeyPairBuilder, Stream,
    SuperincreasingSequence,
};
use num_bigint_dig::{BigUint, ModInverse};
use num_traits::Zero;
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

// Exhaustive search over every subset
fn brute_force(items: &[Item], capacity: i64) -> i64 {
    (0u32..(1 << items.len()))
        .filter_map(|mask| {
            let chosen = items.iter().enumerate().filter(|(i, _)| mask & (1 << i) != 0);
            let (weight, value) =
                chosen.fold((0, 0), |(w, v), (_, item)| (w + item.weight, v + item.value));
            (weight <= capacity).then_some(value)
        })
        .max()
        .unwrap_or(0)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_bytes_roundtrip(
        data in prop::collection::vec(any::<u8>(), 0..200),
        block_size in 1usize..48,
        seed in any::<u64>(),
    ) {
        let keypair = KeyPairBuilder::new().block_size(block_size).seed(seed).build().unwrap();

        let ciphertext = keypair.public_key().encrypt_bytes(&data).unwrap();
        prop_assert!(ciphertext.padding() < block_size);
        prop_assert_eq!(ciphertext.len() * block_size, data.len() * 8 + ciphertext.padding());

        let decrypted = keypair.private_key().decrypt_bytes(&ciphertext).unwrap();
        prop_assert_eq!(decrypted, data);
    }

    #[test]
    fn prop_bits_roundtrip(
        bits in prop::collection::vec(0u8..=1, 1..16),
        blocks in 1usize..8,
        seed in any::<u64>(),
    ) {
        let block_size = bits.len();
        let keypair = KeyPairBuilder::new().block_size(block_size).seed(seed).build().unwrap();

        let message: Vec<u8> = bits.iter().copied().cycle().take(block_size * blocks).collect();
        let bitstream = Bitstream::new(message).unwrap();

        let ciphertext = keypair.encrypt(&bitstream).unwrap();
        prop_assert_eq!(ciphertext.len(), blocks);
        prop_assert_eq!(keypair.decrypt(&ciphertext).unwrap(), bitstream);
    }

    #[test]
    fn prop_generated_sequence_is_superincreasing(
        n in 1usize..128,
        min_start in 1u64..1000,
        max_jitter in 1u64..1000,
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let sequence = SuperincreasingSequence::generate(n, min_start, max_jitter, &mut rng).unwrap();

        prop_assert_eq!(sequence.len(), n);
        prop_assert!(SuperincreasingSequence::validate(sequence.as_slice()));
        prop_assert!(sequence.as_slice()[0] >= BigUint::from(min_start));
    }

    #[test]
    fn prop_generated_key_is_invertible(block_size in 1usize..64, seed in any::<u64>()) {
        let keypair = KeyPairBuilder::new().block_size(block_size).seed(seed).build().unwrap();
        let secret = keypair.private_key();

        prop_assert!(secret.modulus() > &secret.weights().sum());
        prop_assert!(secret.modulus() <= &(secret.weights().sum() * 2u32));

        let inverse = secret.multiplier().clone().mod_inverse(secret.modulus());
        prop_assert!(inverse.is_some());

        for value in keypair.public_key().values() {
            prop_assert!(!value.is_zero() && value < secret.modulus());
        }
    }

    #[test]
    fn prop_streaming_matches_one_shot(
        data in prop::collection::vec(any::<u8>(), 0..128),
        chunk in 1usize..17,
        block_size in 1usize..24,
        seed in any::<u64>(),
    ) {
        let keypair = KeyPairBuilder::new().block_size(block_size).seed(seed).build().unwrap();
        let expected = keypair.encrypt_bytes(&data).unwrap();

        let mut encryptor = keypair.encryptor();
        let mut emitted = Vec::new();
        for piece in data.chunks(chunk) {
            emitted.extend(encryptor.update(piece).unwrap());
        }
        let ciphertext = encryptor.finalize().unwrap();

        prop_assert_eq!(&ciphertext, &expected);
        prop_assert!(emitted.len() <= ciphertext.len());
        prop_assert_eq!(&emitted[..], &ciphertext[..emitted.len()]);

        let mut decryptor = keypair.decryptor(ciphertext.padding());
        let mut plaintext = Vec::new();
        for values in ciphertext.chunks(chunk) {
            plaintext.extend(decryptor.update(values).unwrap());
        }
        plaintext.extend(decryptor.finalize().unwrap());

        prop_assert_eq!(plaintext, data);
    }

    #[test]
    fn prop_knapsack_is_optimal(
        pairs in prop::collection::vec((0i64..20, -10i64..50), 0..12),
        capacity in 0i64..60,
    ) {
        let items: Vec<Item> = pairs.iter().map(|&(w, v)| Item::new(w, v)).collect();
        let selection = knapsack::solve(&items, capacity).unwrap();

        prop_assert_eq!(selection.total_value, brute_force(&items, capacity));
        prop_assert!(selection.total_weight <= capacity);

        let value: i64 = selection.indices.iter().map(|&i| items[i].value).sum();
        prop_assert_eq!(value, selection.total_value);
    }
}
