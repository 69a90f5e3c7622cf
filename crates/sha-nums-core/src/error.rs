use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(
        "initialization fault: derived {table}[{index}] = {derived:#010x}, expected {expected:#010x}"
    )]
    InitializationFault {
        table: &'static str,
        index: usize,
        derived: u32,
        expected: u32,
    },

    #[error("message too long: {len} bytes does not fit a 64-bit bit length")]
    MessageTooLong { len: usize },

    #[error("invalid digest: {0}")]
    InvalidDigest(String),

    #[error("wordlist is empty")]
    EmptyWordlist,
}
