//! Candidate password lists.

#![forbid(unsafe_code)]

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Built-in list of frequently used passwords.
pub const COMMON_PASSWORDS: &[&str] = &[
    "123456", "password", "123456789", "12345678", "12345", "qwerty",
    "1234567", "111111", "1234567890", "123123", "abc123", "1234",
    "password1", "iloveyou", "1q2w3e4r", "000000", "qwerty123", "zaq12wsx",
    "dragon", "sunshine", "princess", "letmein", "654321", "monkey",
    "27653", "1qaz2wsx", "123321", "qwertyuiop", "superman", "asdfghjkl",
    "football", "baseball", "welcome", "admin", "login", "master",
    "hello", "freedom", "whatever", "qazwsx", "trustno1", "shadow",
    "michael", "jennifer", "charlie", "donald", "password123", "starwars",
    "passw0rd", "mustang", "access", "batman", "hunter2", "solo",
    "secret", "flower", "cheese", "computer", "ninja", "azerty",
];

/// An ordered list of candidate passwords.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Wordlist {
    words: Vec<String>,
}

impl Wordlist {
    /// Build from any sequence of candidates. Empty candidates are dropped.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words
                .into_iter()
                .map(Into::into)
                .filter(|w: &String| !w.is_empty())
                .collect(),
        }
    }

    /// The built-in common password list.
    pub fn common() -> Self {
        Self::new(COMMON_PASSWORDS.iter().copied())
    }

    /// Read one candidate per line. Line endings (`\n` or `\r\n`) are
    /// stripped; other whitespace is part of the candidate. Blank lines are
    /// skipped, and so are lines that are not valid UTF-8 (leaked lists often
    /// mix in Latin-1); the skipped count is logged.
    pub fn from_reader<R: BufRead>(reader: R) -> io::Result<Self> {
        let mut words = Vec::new();
        let mut skipped = 0usize;
        for line in reader.split(b'\n') {
            let line = line?;
            let raw = line.strip_suffix(b"\r").unwrap_or(&line);
            if raw.is_empty() {
                continue;
            }
            match std::str::from_utf8(raw) {
                Ok(word) => words.push(word.to_string()),
                Err(_) => skipped += 1,
            }
        }
        if skipped > 0 {
            tracing::warn!(skipped, "skipped wordlist lines that are not valid UTF-8");
        }
        Ok(Self { words })
    }

    /// Load a wordlist file.
    pub fn load(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let list = Self::from_reader(BufReader::new(File::open(path)?))?;
        tracing::info!(path = %path.display(), words = list.len(), "loaded wordlist");
        Ok(list)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}
