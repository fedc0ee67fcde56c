#![no_main]

use knapcrypt::{DecryptBytes, EncryptBytes, KeyPair, KeyPairBuilder, Stream};
use libfuzzer_sys::fuzz_target;
use std::sync::OnceLock;

static KEYPAIR: OnceLock<KeyPair> = OnceLock::new();

fuzz_target!(|data: &[u8]| {
    let Some((&chunk, message)) = data.split_first() else {
        return;
    };
    let chunk = (chunk as usize).max(1);

    let keypair =
        KEYPAIR.get_or_init(|| KeyPairBuilder::new().block_size(13).seed(7).build().unwrap());

    let mut encryptor = keypair.encryptor();
    for piece in message.chunks(chunk) {
        encryptor.update(piece).unwrap();
    }
    let ciphertext = encryptor.finalize().unwrap();

    // Chunking must not change the ciphertext
    assert_eq!(ciphertext, keypair.encrypt_bytes(message).unwrap());

    let mut decryptor = keypair.decryptor(ciphertext.padding());
    let mut plaintext = Vec::new();
    for values in ciphertext.chunks(chunk) {
        plaintext.extend(decryptor.update(values).unwrap());
    }
    plaintext.extend(decryptor.finalize().unwrap());

    assert_eq!(plaintext, message);
    assert_eq!(plaintext, keypair.decrypt_bytes(&ciphertext).unwrap());
});
