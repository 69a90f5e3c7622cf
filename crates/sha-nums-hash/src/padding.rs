//! Message padding and parsing (FIPS 180-4 sections 5.1.1 and 5.2.1).
//!
//! The padded message is never materialized: full data blocks are read
//! straight from the input, and only the last one or two blocks (remaining
//! data, 0x80, zero fill, 64-bit big-endian bit length) are assembled in a
//! small tail buffer.

#![forbid(unsafe_code)]

use crate::constants::Word;
use sha_nums_core::{Error, Result};
use std::iter::FusedIterator;

/// Block size in bytes.
pub const BLOCK_LEN: usize = 64;

/// Offset within the final block where the length field starts.
const LENGTH_OFFSET: usize = BLOCK_LEN - 8;

/// One 512-bit block of padded input.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Block([u8; BLOCK_LEN]);

impl Block {
    pub const fn new(bytes: [u8; BLOCK_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; BLOCK_LEN] {
        &self.0
    }

    /// The block as 16 big-endian words.
    pub fn words(&self) -> [Word; 16] {
        let mut words = [0; 16];
        for (word, chunk) in words.iter_mut().zip(self.0.chunks_exact(4)) {
            *word = Word::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        words
    }
}

impl std::fmt::Debug for Block {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Block({})", hex::encode(self.0))
    }
}

/// Number of blocks a message of `len` bytes pads to.
pub fn block_count(len: usize) -> usize {
    let full = len / BLOCK_LEN;
    if len % BLOCK_LEN < LENGTH_OFFSET {
        full + 1
    } else {
        full + 2
    }
}

/// Message length in bits, or `MessageTooLong` when it does not fit in 64 bits.
pub fn bit_length(len: usize) -> Result<u64> {
    u64::try_from(len)
        .ok()
        .and_then(|n| n.checked_mul(8))
        .ok_or(Error::MessageTooLong { len })
}

/// Pad and split `message` into blocks.
///
/// Fails only when the message is too long for the 64-bit length field.
pub fn blocks(message: &[u8]) -> Result<Blocks<'_>> {
    let bit_len = bit_length(message.len())?;
    Ok(Blocks {
        data: message,
        bit_len,
        remaining: block_count(message.len()),
        tail: None,
    })
}

/// Final one or two blocks: leftover data plus padding.
struct Tail {
    buf: [u8; 2 * BLOCK_LEN],
    len: usize,
    pos: usize,
}

impl Tail {
    fn new(leftover: &[u8], bit_len: u64) -> Self {
        debug_assert!(leftover.len() < BLOCK_LEN);

        let mut buf = [0u8; 2 * BLOCK_LEN];
        buf[..leftover.len()].copy_from_slice(leftover);
        buf[leftover.len()] = 0x80;

        // 0x80 and the length field fit after at most 55 data bytes
        let len = if leftover.len() < LENGTH_OFFSET {
            BLOCK_LEN
        } else {
            2 * BLOCK_LEN
        };
        buf[len - 8..len].copy_from_slice(&bit_len.to_be_bytes());

        Self { buf, len, pos: 0 }
    }

    fn next_block(&mut self) -> Option<Block> {
        if self.pos >= self.len {
            return None;
        }
        let mut block = [0u8; BLOCK_LEN];
        block.copy_from_slice(&self.buf[self.pos..self.pos + BLOCK_LEN]);
        self.pos += BLOCK_LEN;
        Some(Block(block))
    }
}

/// Single-pass iterator over the padded blocks of one message.
pub struct Blocks<'a> {
    /// Input not yet emitted as a full data block.
    data: &'a [u8],
    bit_len: u64,
    remaining: usize,
    tail: Option<Tail>,
}

impl Iterator for Blocks<'_> {
    type Item = Block;

    fn next(&mut self) -> Option<Block> {
        if self.tail.is_none() {
            if self.data.len() >= BLOCK_LEN {
                let (head, rest) = self.data.split_at(BLOCK_LEN);
                self.data = rest;
                self.remaining -= 1;

                let mut block = [0u8; BLOCK_LEN];
                block.copy_from_slice(head);
                return Some(Block(block));
            }
            self.tail = Some(Tail::new(self.data, self.bit_len));
            self.data = &[];
        }

        let block = self.tail.as_mut()?.next_block()?;
        self.remaining -= 1;
        Some(block)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Blocks<'_> {}

impl FusedIterator for Blocks<'_> {}
