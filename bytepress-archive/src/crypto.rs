//! Optional encryption envelope around a compressed stream.
//!
//! Wire format: `salt (8 octets)` then `iv (16 octets)` then the
//! AES-256-CBC ciphertext of the compressed stream with PKCS#7 padding.
//! The key is derived with PBKDF2-HMAC-SHA256 over the password and salt
//! at 10 000 iterations.
//!
//! A wrong password surfaces as bad padding on the final block and is
//! reported as a [`Crypto`](bytepress_core::BytePressError::Crypto) error.

use aes::cipher::block_padding::Pkcs7;
use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use bytepress_core::CHUNK_SIZE;
use bytepress_core::error::{BytePressError, Result};
use bytepress_core::stream::read_chunk;
use rand::RngCore;
use rand::rngs::OsRng;
use sha2::Sha256;
use std::io::{Read, Write};

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Salt length prefixed to the envelope.
pub const SALT_LEN: usize = 8;

/// IV length following the salt.
pub const IV_LEN: usize = 16;

const KEY_LEN: usize = 32;
const BLOCK_LEN: usize = 16;
const PBKDF2_ITERATIONS: u32 = 10_000;

fn derive_key(password: &str, salt: &[u8]) -> [u8; KEY_LEN] {
    let mut key = [0u8; KEY_LEN];
    pbkdf2::pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, PBKDF2_ITERATIONS, &mut key);
    key
}

/// Encrypt `input` into `output` under `password`.
///
/// A fresh random salt and IV prefix the ciphertext. Returns the total
/// number of bytes written, prefix included.
pub fn encrypt_stream<R, W>(input: &mut R, output: &mut W, password: &str) -> Result<u64>
where
    R: Read,
    W: Write,
{
    if password.is_empty() {
        return Err(BytePressError::invalid_argument("empty password"));
    }

    let mut salt = [0u8; SALT_LEN];
    let mut iv = [0u8; IV_LEN];
    OsRng.fill_bytes(&mut salt);
    OsRng.fill_bytes(&mut iv);
    output.write_all(&salt)?;
    output.write_all(&iv)?;

    let key = derive_key(password, &salt);
    let mut cipher = Aes256CbcEnc::new(&key.into(), &iv.into());

    let mut written = (SALT_LEN + IV_LEN) as u64;
    let mut buf = [0u8; CHUNK_SIZE + BLOCK_LEN];
    loop {
        let len = read_chunk(input, &mut buf[..CHUNK_SIZE])?;
        if len < CHUNK_SIZE {
            // Final chunk: pad and finish.
            let ciphertext = cipher
                .encrypt_padded_mut::<Pkcs7>(&mut buf, len)
                .map_err(|_| BytePressError::crypto("block padding failed"))?;
            output.write_all(ciphertext)?;
            written += ciphertext.len() as u64;
            break;
        }
        for block in buf[..CHUNK_SIZE].chunks_mut(BLOCK_LEN) {
            cipher.encrypt_block_mut(GenericArray::from_mut_slice(block));
        }
        output.write_all(&buf[..CHUNK_SIZE])?;
        written += CHUNK_SIZE as u64;
    }

    Ok(written)
}

/// Decrypt an envelope produced by [`encrypt_stream`].
///
/// Returns the number of plaintext bytes written. The final block is held
/// back one chunk so its padding can be validated before anything past it
/// is trusted.
pub fn decrypt_stream<R, W>(input: &mut R, output: &mut W, password: &str) -> Result<u64>
where
    R: Read,
    W: Write,
{
    if password.is_empty() {
        return Err(BytePressError::invalid_argument("empty password"));
    }

    let mut salt = [0u8; SALT_LEN];
    let mut iv = [0u8; IV_LEN];
    read_prefix(input, &mut salt)?;
    read_prefix(input, &mut iv)?;

    let key = derive_key(password, &salt);
    let mut cipher = Aes256CbcDec::new(&key.into(), &iv.into());

    let mut pending = [0u8; CHUNK_SIZE];
    let mut pending_len = 0usize;
    let mut written = 0u64;

    loop {
        let mut buf = [0u8; CHUNK_SIZE];
        let len = read_chunk(input, &mut buf)?;
        if len == 0 {
            break;
        }
        if len % BLOCK_LEN != 0 {
            return Err(BytePressError::crypto(
                "ciphertext length is not a multiple of the cipher block",
            ));
        }

        if pending_len > 0 {
            for block in pending[..pending_len].chunks_mut(BLOCK_LEN) {
                cipher.decrypt_block_mut(GenericArray::from_mut_slice(block));
            }
            output.write_all(&pending[..pending_len])?;
            written += pending_len as u64;
        }
        pending[..len].copy_from_slice(&buf[..len]);
        pending_len = len;
    }

    if pending_len == 0 {
        return Err(BytePressError::crypto("empty ciphertext"));
    }

    let plaintext = cipher
        .decrypt_padded_mut::<Pkcs7>(&mut pending[..pending_len])
        .map_err(|_| BytePressError::crypto("bad padding (wrong password or corrupted stream)"))?;
    output.write_all(plaintext)?;
    written += plaintext.len() as u64;

    Ok(written)
}

fn read_prefix<R: Read>(input: &mut R, buf: &mut [u8]) -> Result<()> {
    input.read_exact(buf).map_err(|e| {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            BytePressError::truncated(buf.len() as u64)
        } else {
            e.into()
        }
    })
}
