mod decrypt;
mod encrypt;
pub(crate) mod util;

pub use decrypt::Decryptor;
pub use encrypt::Encryptor;

use crate::ciphertext::Ciphertext;
use crate::codec::Bitstream;
use crate::error::Result;

/// Encrypts a bitstream block by block.
pub trait Encrypt {
    /// Encrypt a bitstream whose length is a positive multiple of the key's
    /// block size.
    ///
    /// Each block maps to the sum of the public weights whose bit is set.
    /// For arbitrary byte data, use [`EncryptBytes::encrypt_bytes`].
    fn encrypt(&self, bits: &Bitstream) -> Result<Ciphertext>;
}

/// Encrypts arbitrary-length byte data, padding the final block.
pub trait EncryptBytes {
    /// Encrypt arbitrary-length input.
    ///
    /// The output can be decrypted with `PrivateKey::decrypt_bytes`.
    fn encrypt_bytes<P: AsRef<[u8]>>(&self, data: P) -> Result<Ciphertext>;
}

/// Recovers the bitstream from a ciphertext.
pub trait Decrypt {
    /// Recover the bits of every block, in ciphertext order.
    fn decrypt(&self, ciphertext: &Ciphertext) -> Result<Bitstream>;
}

/// Recovers byte data encrypted with [`EncryptBytes`].
///
/// Typically implemented by delegating to the streaming [`Decryptor`].
pub trait DecryptBytes {
    /// Decrypt all blocks, strip the recorded padding and pack into bytes.
    fn decrypt_bytes(&self, ciphertext: &Ciphertext) -> Result<Vec<u8>>;
}

/// Stateful interface for incremental cryptographic processing.
///
/// Implementations accept input in chunks via [`update`] and return any
/// immediately available output. Remaining buffered state is processed and
/// returned by [`finalize`], which consumes the stream.
///
/// [`update`]: Stream::update
/// [`finalize`]: Stream::finalize
pub trait Stream {
    type Input: ?Sized;
    type Output;
    type Finished;

    /// Processes the next chunk of input.
    fn update(&mut self, input: &Self::Input) -> Result<Self::Output>;

    /// Completes processing and returns any remaining output.
    fn finalize(self) -> Result<Self::Finished>;
}
