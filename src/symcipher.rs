//! AES-256-CBC + HMAC-SHA-256 encrypt-then-MAC framing.
//!
//! The frame is `IV(16) || ciphertext || MAC(32)`. Both the AES and HMAC keys are derived from
//! a single input key via SHA-512: the first 32 bytes key the cipher, the last 32 key the MAC.
//! The input key is typically the canonical encoding of a `Gt` element (see [`crate::pre`]), so
//! it takes an arbitrary-length slice rather than a fixed-size array.

use std::io::{Read, Write};

use aes::Aes256;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use hmac::{Hmac, Mac};
use rand::{CryptoRng, RngCore};
use sha2::{Sha256, Sha512};

use crate::errors::SymCipherError;

const BLOCK_SIZE: usize = 16;
const MAC_SIZE: usize = 32;
/// The shortest possible frame: one IV block, one ciphertext block, and a MAC.
const MIN_FRAME_LEN: usize = BLOCK_SIZE + BLOCK_SIZE + MAC_SIZE;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;
type HmacSha256 = Hmac<Sha256>;

fn derive_sub_keys(key: &[u8]) -> ([u8; 32], [u8; 32]) {
    use sha2::Digest;

    let derived = Sha512::digest(key);
    let mut key_e = [0u8; 32];
    let mut key_m = [0u8; 32];
    key_e.copy_from_slice(&derived[..32]);
    key_m.copy_from_slice(&derived[32..]);
    (key_e, key_m)
}

/// Encrypts `plaintext` under `key`, returning `IV || ciphertext || MAC`.
pub fn encrypt(key: &[u8], plaintext: &[u8], mut rng: impl RngCore + CryptoRng) -> Vec<u8> {
    let (key_e, key_m) = derive_sub_keys(key);

    let mut iv = [0u8; BLOCK_SIZE];
    rng.fill_bytes(&mut iv);

    let ciphertext =
        Aes256CbcEnc::new(&key_e.into(), &iv.into()).encrypt_padded_vec_mut::<Pkcs7>(plaintext);

    let mut frame = Vec::with_capacity(BLOCK_SIZE + ciphertext.len() + MAC_SIZE);
    frame.extend_from_slice(&iv);
    frame.extend_from_slice(&ciphertext);

    let mut mac = HmacSha256::new_from_slice(&key_m).expect("HMAC accepts any key length");
    mac.update(&frame);
    frame.extend_from_slice(&mac.finalize().into_bytes());

    frame
}

/// Decrypts a frame produced by [`encrypt`], verifying its MAC before decrypting.
pub fn decrypt(key: &[u8], frame: &[u8]) -> Result<Vec<u8>, SymCipherError> {
    if frame.len() < MIN_FRAME_LEN {
        return Err(SymCipherError::ShortInput);
    }
    if (frame.len() - BLOCK_SIZE - MAC_SIZE) % BLOCK_SIZE != 0 {
        return Err(SymCipherError::InvalidPadding);
    }

    let (key_e, key_m) = derive_sub_keys(key);

    let (body, tag) = frame.split_at(frame.len() - MAC_SIZE);
    let mut mac = HmacSha256::new_from_slice(&key_m).expect("HMAC accepts any key length");
    mac.update(body);
    mac.verify_slice(tag).map_err(|_| SymCipherError::InvalidMac)?;

    let (iv, ciphertext) = body.split_at(BLOCK_SIZE);
    Aes256CbcDec::new(&key_e.into(), iv.into())
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| SymCipherError::InvalidPadding)
}

/// Reads all of `input` and encrypts it under `key`, writing the resulting frame to `output`.
///
/// Buffers the whole plaintext before encrypting, the same way the Go original's
/// `NewEncryptClosure` does despite taking an `io.Reader`/`io.Writer` pair — this frame format
/// needs the full length up front to place the MAC, so there's no streaming win to be had.
pub fn encrypt_stream(
    key: &[u8],
    mut input: impl Read,
    mut output: impl Write,
    rng: impl RngCore + CryptoRng,
) -> Result<(), SymCipherError> {
    let mut plaintext = Vec::new();
    input.read_to_end(&mut plaintext).map_err(SymCipherError::Io)?;
    output.write_all(&encrypt(key, &plaintext, rng)).map_err(SymCipherError::Io)?;
    Ok(())
}

/// Reads a frame produced by [`encrypt_stream`] (or [`encrypt`]) from `input`, decrypts it under
/// `key`, and writes the plaintext to `output`.
pub fn decrypt_stream(
    key: &[u8],
    mut input: impl Read,
    mut output: impl Write,
) -> Result<(), SymCipherError> {
    let mut frame = Vec::new();
    input.read_to_end(&mut frame).map_err(SymCipherError::Io)?;
    output.write_all(&decrypt(key, &frame)?).map_err(SymCipherError::Io)?;
    Ok(())
}
