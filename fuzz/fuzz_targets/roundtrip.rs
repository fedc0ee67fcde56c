#![no_main]

use knapcrypt::{DecryptBytes, EncryptBytes, KeyPair, KeyPairBuilder};
use libfuzzer_sys::fuzz_target;
use std::sync::OnceLock;

static KEYPAIRS: OnceLock<Vec<KeyPair>> = OnceLock::new();

fuzz_target!(|data: &[u8]| {
    let Some((&selector, message)) = data.split_first() else {
        return;
    };

    // one key per block size class: sub-byte, byte, and wider than a byte
    let keypairs = KEYPAIRS.get_or_init(|| {
        [3, 8, 61]
            .into_iter()
            .map(|bits| KeyPairBuilder::new().block_size(bits).seed(bits as u64).build().unwrap())
            .collect()
    });
    let keypair = &keypairs[selector as usize % keypairs.len()];

    let ciphertext = keypair.encrypt_bytes(message).unwrap();
    assert!(ciphertext.padding() < keypair.public_key().block_size());

    let decrypted = keypair.decrypt_bytes(&ciphertext).unwrap();
    assert_eq!(message, decrypted.as_slice());
});
