//! Core error and digest types for sha-nums.

#![forbid(unsafe_code)]

mod digest;
mod error;

pub use digest::{Digest, DIGEST_LEN};
pub use error::Error;

pub type Result<T> = std::result::Result<T, Error>;
