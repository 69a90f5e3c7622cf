//! Round constants and initial hash values, derived from roots of primes.
//!
//! K[i]  = first 32 bits of the fractional part of cbrt(p_i), i in 0..64
//! H0[i] = first 32 bits of the fractional part of sqrt(p_i), i in 0..8
//!
//! Roots are taken exactly over integers: floor(root(p) * 2^32) equals the
//! integer n-th root of p * 2^(32n), and its low 32 bits are the fractional
//! part. The derived tables are checked once against the published FIPS 180-4
//! values before any digest is computed.

#![forbid(unsafe_code)]

use sha_nums_core::{Error, Result};
use std::sync::OnceLock;

/// A 32-bit word. All additions on words wrap modulo 2^32.
pub type Word = u32;

/// The 64 per-round constants.
pub type RoundConstants = [Word; 64];

/// The 8 words every digest starts from.
pub type InitialState = [Word; 8];

/// Published initial hash values (FIPS 180-4 section 5.3.3).
pub const REFERENCE_H0: InitialState = [
    0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a,
    0x510e527f, 0x9b05688c, 0x1f83d9ab, 0x5be0cd19,
];

/// Published round constants (FIPS 180-4 section 4.2.2).
pub const REFERENCE_K: RoundConstants = [
    0x428a2f98, 0x71374491, 0xb5c0fbcf, 0xe9b5dba5,
    0x3956c25b, 0x59f111f1, 0x923f82a4, 0xab1c5ed5,
    0xd807aa98, 0x12835b01, 0x243185be, 0x550c7dc3,
    0x72be5d74, 0x80deb1fe, 0x9bdc06a7, 0xc19bf174,
    0xe49b69c1, 0xefbe4786, 0x0fc19dc6, 0x240ca1cc,
    0x2de92c6f, 0x4a7484aa, 0x5cb0a9dc, 0x76f988da,
    0x983e5152, 0xa831c66d, 0xb00327c8, 0xbf597fc7,
    0xc6e00bf3, 0xd5a79147, 0x06ca6351, 0x14292967,
    0x27b70a85, 0x2e1b2138, 0x4d2c6dfc, 0x53380d13,
    0x650a7354, 0x766a0abb, 0x81c2c92e, 0x92722c85,
    0xa2bfe8a1, 0xa81a664b, 0xc24b8b70, 0xc76c51a3,
    0xd192e819, 0xd6990624, 0xf40e3585, 0x106aa070,
    0x19a4c116, 0x1e376c08, 0x2748774c, 0x34b0bcb5,
    0x391c0cb3, 0x4ed8aa4a, 0x5b9cca4f, 0x682e6ff3,
    0x748f82ee, 0x78a5636f, 0x84c87814, 0x8cc70208,
    0x90befffa, 0xa4506ceb, 0xbef9a3f7, 0xc67178f2,
];

/// Verified constant tables, shared read-only by every digest computation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tables {
    pub k: RoundConstants,
    pub h0: InitialState,
}

static TABLES: OnceLock<Result<Tables>> = OnceLock::new();

/// Get the process-wide constant tables.
///
/// The first call derives and verifies both tables; concurrent first callers
/// wait on the same initialization. Every later call returns the cached
/// outcome, including a cached [`Error::InitializationFault`].
pub fn tables() -> Result<&'static Tables> {
    TABLES.get_or_init(initialize).as_ref().map_err(Clone::clone)
}

fn initialize() -> Result<Tables> {
    let k = derive_k();
    let h0 = derive_h0();

    let checked = verify("K", &k, &REFERENCE_K).and_then(|()| verify("H0", &h0, &REFERENCE_H0));
    match checked {
        Ok(()) => {
            tracing::debug!(k = k.len(), h0 = h0.len(), "derived and verified constant tables");
            Ok(Tables { k, h0 })
        }
        Err(e) => {
            tracing::error!(error = %e, "constant derivation does not match reference tables");
            Err(e)
        }
    }
}

/// First `n` primes by trial division.
pub fn generate_primes(n: usize) -> Vec<u64> {
    let mut primes = Vec::with_capacity(n);
    let mut candidate = 2u64;

    while primes.len() < n {
        if is_prime(candidate) {
            primes.push(candidate);
        }
        candidate += 1;
    }

    primes
}

fn is_prime(candidate: u64) -> bool {
    if candidate < 2 {
        return false;
    }
    let mut d = 2u64;
    while d * d <= candidate {
        if candidate % d == 0 {
            return false;
        }
        d += 1;
    }
    true
}

/// Derive K from the cube roots of the first 64 primes.
pub fn derive_k() -> RoundConstants {
    let mut k = [0; 64];
    for (slot, p) in k.iter_mut().zip(generate_primes(64)) {
        *slot = fractional_word(integer_cbrt(u128::from(p) << 96));
    }
    k
}

/// Derive H0 from the square roots of the first 8 primes.
pub fn derive_h0() -> InitialState {
    let mut h0 = [0; 8];
    for (slot, p) in h0.iter_mut().zip(generate_primes(8)) {
        *slot = fractional_word(integer_sqrt(u128::from(p) << 64));
    }
    h0
}

/// Compare a derived table against its reference, reporting the first
/// mismatching entry as an initialization fault.
pub fn verify<const N: usize>(
    table: &'static str,
    derived: &[Word; N],
    reference: &[Word; N],
) -> Result<()> {
    match derived.iter().zip(reference).position(|(d, r)| d != r) {
        None => Ok(()),
        Some(index) => Err(Error::InitializationFault {
            table,
            index,
            derived: derived[index],
            expected: reference[index],
        }),
    }
}

/// `root` is floor(x * 2^32); drop the integer part of x.
fn fractional_word(root: u128) -> Word {
    root as Word
}

/// floor(sqrt(n)).
fn integer_sqrt(n: u128) -> u128 {
    integer_root(n, 2)
}

/// floor(cbrt(n)).
fn integer_cbrt(n: u128) -> u128 {
    integer_root(n, 3)
}

/// Largest r with r^degree <= n, by bisection.
fn integer_root(n: u128, degree: u32) -> u128 {
    let bits = 128 - n.leading_zeros();
    let mut lo = 0u128;
    let mut hi = 1u128 << (bits / degree + 1);

    // Invariant: lo^degree <= n < hi^degree
    while hi - lo > 1 {
        let mid = lo + (hi - lo) / 2;
        match mid.checked_pow(degree) {
            Some(v) if v <= n => lo = mid,
            _ => hi = mid,
        }
    }
    lo
}
