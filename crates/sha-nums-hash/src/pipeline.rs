//! One-shot digest: seed, fold every block, serialize.

#![forbid(unsafe_code)]

use crate::compress::{compress, HashState};
use crate::constants::{tables, Tables};
use crate::padding::blocks;
use sha_nums_core::{Digest, Result, DIGEST_LEN};

/// Handle over the verified constant tables.
///
/// Cheap to copy; hash as many messages as needed with one handle.
#[derive(Clone, Copy, Debug)]
pub struct Sha256 {
    tables: &'static Tables,
}

impl Sha256 {
    /// Fails with `InitializationFault` if the derived constants do not match
    /// the reference tables.
    pub fn new() -> Result<Self> {
        Ok(Self { tables: tables()? })
    }

    /// SHA-256 of `message`.
    pub fn digest(&self, message: &[u8]) -> Result<[u8; DIGEST_LEN]> {
        let mut state = HashState::new(self.tables.h0);
        for block in blocks(message)? {
            state = compress(&state, &block, &self.tables.k);
        }
        Ok(state.to_bytes())
    }

    /// Like [`Sha256::digest`], wrapped as a [`Digest`].
    pub fn hash(&self, message: &[u8]) -> Result<Digest> {
        self.digest(message).map(Digest::new)
    }
}

/// SHA-256 of `message`.
pub fn digest(message: &[u8]) -> Result<[u8; DIGEST_LEN]> {
    Sha256::new()?.digest(message)
}

/// SHA-256 of `message` as 64 lowercase hex characters.
pub fn digest_hex(message: &[u8]) -> Result<String> {
    Ok(Sha256::new()?.hash(message)?.to_hex())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        // FIPS 180-4 example: SHA-256("")
        assert_eq!(
            digest_hex(b"").unwrap(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_abc() {
        // FIPS 180-4 example: SHA-256("abc")
        assert_eq!(
            digest_hex(b"abc").unwrap(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_448_bits() {
        // FIPS 180-4 example: 448-bit message (56 bytes, two blocks)
        assert_eq!(
            digest_hex(b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq").unwrap(),
            "248d6a61d20638b8e5c026930c3e6039a33ce45964ff2167f6ecedd419db06c1"
        );
    }

    #[test]
    fn test_896_bits() {
        let msg = b"abcdefghbcdefghicdefghijdefghijkefghijklfghijklmghijklmn\
                    hijklmnoijklmnopjklmnopqklmnopqrlmnopqrsmnopqrstnopqrstu";
        assert_eq!(
            digest_hex(msg).unwrap(),
            "cf5b16a778af8380036ce59e7b0492370b249b11e8f07a51afac45037afee9d1"
        );
    }

    #[test]
    fn test_one_million_a() {
        let msg = vec![b'a'; 1_000_000];
        assert_eq!(
            digest_hex(&msg).unwrap(),
            "cdc76e5c9914fb9281a1c7e284d73e67f1809a48a497200e046d39ccc7112cd0"
        );
    }

    #[test]
    fn test_handle_reuse_and_hash_wrapper() {
        let sha = Sha256::new().unwrap();
        let a = sha.digest(b"hello world").unwrap();
        let b = sha.digest(b"hello world").unwrap();
        assert_eq!(a, b);
        assert_eq!(sha.hash(b"hello world").unwrap().into_bytes(), a);
        assert_eq!(digest(b"hello world").unwrap(), a);
    }

    #[test]
    fn test_single_bit_flip_changes_digest() {
        let msg = b"The quick brown fox jumps over the lazy dog".to_vec();
        let base = digest(&msg).unwrap();

        for byte in [0, 7, msg.len() - 1] {
            for bit in 0..8 {
                let mut flipped = msg.clone();
                flipped[byte] ^= 1 << bit;
                assert_ne!(digest(&flipped).unwrap(), base, "byte {} bit {}", byte, bit);
            }
        }
    }
}
