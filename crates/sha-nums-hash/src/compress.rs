//! SHA-256 compression function (FIPS 180-4 section 6.2.2).

#![forbid(unsafe_code)]

use crate::constants::{RoundConstants, Word};
use crate::padding::Block;

/// Running hash value: 8 words, replaced after every block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HashState([Word; 8]);

impl HashState {
    pub const fn new(words: [Word; 8]) -> Self {
        Self(words)
    }

    pub fn words(&self) -> &[Word; 8] {
        &self.0
    }

    /// Serialize the 8 words big-endian.
    pub fn to_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        for (chunk, word) in out.chunks_exact_mut(4).zip(self.0.iter()) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }
        out
    }
}

/// The 64 expanded words W[0..63] for one block.
pub type MessageSchedule = [Word; 64];

#[inline(always)]
fn small_sigma0(x: Word) -> Word {
    x.rotate_right(7) ^ x.rotate_right(18) ^ (x >> 3)
}

#[inline(always)]
fn small_sigma1(x: Word) -> Word {
    x.rotate_right(17) ^ x.rotate_right(19) ^ (x >> 10)
}

#[inline(always)]
fn big_sigma0(x: Word) -> Word {
    x.rotate_right(2) ^ x.rotate_right(13) ^ x.rotate_right(22)
}

#[inline(always)]
fn big_sigma1(x: Word) -> Word {
    x.rotate_right(6) ^ x.rotate_right(11) ^ x.rotate_right(25)
}

#[inline(always)]
fn ch(x: Word, y: Word, z: Word) -> Word {
    (x & y) ^ (!x & z)
}

#[inline(always)]
fn maj(x: Word, y: Word, z: Word) -> Word {
    (x & y) ^ (x & z) ^ (y & z)
}

/// Expand one block into its message schedule.
pub fn expand(block: &Block) -> MessageSchedule {
    let mut w = [0; 64];
    w[..16].copy_from_slice(&block.words());

    for t in 16..64 {
        w[t] = small_sigma1(w[t - 2])
            .wrapping_add(w[t - 7])
            .wrapping_add(small_sigma0(w[t - 15]))
            .wrapping_add(w[t - 16]);
    }
    w
}

/// Fold one block into `state`, returning the next state.
pub fn compress(state: &HashState, block: &Block, k: &RoundConstants) -> HashState {
    let w = expand(block);

    let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = state.0;

    for t in 0..64 {
        let t1 = h
            .wrapping_add(big_sigma1(e))
            .wrapping_add(ch(e, f, g))
            .wrapping_add(k[t])
            .wrapping_add(w[t]);
        let t2 = big_sigma0(a).wrapping_add(maj(a, b, c));

        h = g;
        g = f;
        f = e;
        e = d.wrapping_add(t1);
        d = c;
        c = b;
        b = a;
        a = t1.wrapping_add(t2);
    }

    // Feed-forward
    let mut next = state.0;
    for (word, v) in next.iter_mut().zip([a, b, c, d, e, f, g, h]) {
        *word = word.wrapping_add(v);
    }
    HashState(next)
}
