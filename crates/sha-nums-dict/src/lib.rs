//! Dictionary attack demonstration for unsalted SHA-256 password digests.
//!
//! A pure consumer of the `sha-nums-hash` digest API: plain SHA-256 is fast,
//! so hashing a wordlist in a tight loop recovers weak passwords directly.

#![forbid(unsafe_code)]

pub mod attack;
pub mod wordlist;

pub use attack::{crack_one, AttackReport, CrackConfig, DictionaryAttack, Recovered};
pub use wordlist::{Wordlist, COMMON_PASSWORDS};
