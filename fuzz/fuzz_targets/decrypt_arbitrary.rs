#![no_main]

use knapcrypt::{Ciphertext, Decrypt, DecryptBytes, Encrypt, Error, KeyPair, KeyPairBuilder};
use libfuzzer_sys::fuzz_target;
use num_bigint_dig::BigUint;
use std::sync::OnceLock;

static KEYPAIR: OnceLock<KeyPair> = OnceLock::new();

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let keypair =
        KEYPAIR.get_or_init(|| KeyPairBuilder::new().block_size(16).seed(42).build().unwrap());
    let n = keypair.public_key().block_size();

    // Arbitrary cipher values, three bytes each
    let values: Vec<BigUint> = data.chunks(3).map(BigUint::from_bytes_be).collect();
    let padding = data[0] as usize % (n + 2);
    let ciphertext = Ciphertext::new(values, n, padding);

    // Decryption must fail cleanly or produce bits that encrypt back to the
    // same residues mod m
    match keypair.decrypt(&ciphertext) {
        Ok(bits) => {
            let m = keypair.public_key().modulus();
            let reencrypted = keypair.encrypt(&bits).unwrap();
            for (a, b) in reencrypted.values().iter().zip(ciphertext.values()) {
                assert_eq!(a % m, b % m);
            }
        }
        Err(err) => assert!(matches!(err, Error::DecryptionFailed(_))),
    }

    let _ = keypair.decrypt_bytes(&ciphertext);
});
