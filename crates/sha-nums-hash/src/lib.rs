//! SHA-256 (FIPS 180-4), built from first principles.
//!
//! Round constants and initial hash values are derived from roots of primes
//! and checked against the published tables once per process. Reference
//! crates (sha2) are dev-dependencies only.

#![forbid(unsafe_code)]

pub mod compress;
pub mod constants;
pub mod padding;
pub mod pipeline;

pub use compress::{compress, expand, HashState, MessageSchedule};
pub use constants::{
    derive_h0, derive_k, generate_primes, tables, InitialState, RoundConstants, Tables, Word,
};
pub use padding::{block_count, blocks, Block, Blocks, BLOCK_LEN};
pub use pipeline::{digest, digest_hex, Sha256};
pub use sha_nums_core::{Digest, Error, Result};
