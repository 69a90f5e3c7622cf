//! Multi-threaded dictionary attack.
//!
//! Hashes every candidate with plain SHA-256 and compares against a set of
//! target digests. Unsalted fast hashes fall to this in seconds, which is the
//! point of the demonstration.

#![forbid(unsafe_code)]

use crate::wordlist::Wordlist;
use rayon::prelude::*;
use serde::Serialize;
use sha_nums_core::{Digest, Error, Result};
use sha_nums_hash::Sha256;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Attack configuration.
#[derive(Debug, Clone)]
pub struct CrackConfig {
    /// Candidates hashed per parallel batch; the stop flag is checked between
    /// batches and between candidates.
    pub batch_size: usize,
}

impl Default for CrackConfig {
    fn default() -> Self {
        Self { batch_size: 4096 }
    }
}

/// A target digest together with the plaintext that produced it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Recovered {
    pub digest: Digest,
    pub plaintext: String,
}

/// Outcome of a dictionary attack.
#[derive(Clone, Debug, Default, Serialize)]
pub struct AttackReport {
    /// Recovered targets, in the order the targets were given.
    pub recovered: Vec<Recovered>,
    /// Targets with no match in the wordlist.
    pub missing: Vec<Digest>,
    /// Candidates hashed (batch-granular).
    pub attempts: u64,
    /// True when the run ended because `stop` was raised externally.
    pub interrupted: bool,
}

/// Dictionary attack against a fixed set of target digests.
#[derive(Clone, Debug)]
pub struct DictionaryAttack {
    targets: Vec<Digest>,
    lookup: HashSet<Digest>,
    config: CrackConfig,
    sha: Sha256,
}

impl DictionaryAttack {
    /// Fails if the digest tables fail their self-check.
    pub fn new(targets: impl IntoIterator<Item = Digest>, config: CrackConfig) -> Result<Self> {
        let mut lookup = HashSet::new();
        let targets: Vec<Digest> = targets.into_iter().filter(|d| lookup.insert(*d)).collect();

        Ok(Self {
            targets,
            lookup,
            config,
            sha: Sha256::new()?,
        })
    }

    pub fn targets(&self) -> &[Digest] {
        &self.targets
    }

    /// Hash candidates until every target is recovered, the wordlist is
    /// exhausted, or `stop` is raised. `progress` is advanced by the number
    /// of candidates hashed.
    pub fn run(
        &self,
        wordlist: &Wordlist,
        stop: &AtomicBool,
        progress: &AtomicU64,
    ) -> Result<AttackReport> {
        if wordlist.is_empty() {
            return Err(Error::EmptyWordlist);
        }

        tracing::info!(
            targets = self.targets.len(),
            candidates = wordlist.len(),
            batch_size = self.config.batch_size,
            "starting dictionary attack"
        );

        let mut found: HashMap<Digest, String> = HashMap::new();
        let mut attempts = 0u64;
        let mut interrupted = false;

        for batch in wordlist.words().chunks(self.config.batch_size.max(1)) {
            if stop.load(Ordering::Relaxed) {
                interrupted = true;
                break;
            }

            let hits: Vec<(Digest, &str)> = batch
                .par_iter()
                .filter_map(|candidate| {
                    if stop.load(Ordering::Relaxed) {
                        return None;
                    }
                    // in-memory candidates are far below the length limit
                    let digest = self.sha.hash(candidate.as_bytes()).ok()?;
                    self.lookup
                        .contains(&digest)
                        .then_some((digest, candidate.as_str()))
                })
                .collect();

            attempts = attempts.saturating_add(batch.len() as u64);
            progress.fetch_add(batch.len() as u64, Ordering::Relaxed);

            for (digest, plaintext) in hits {
                found.entry(digest).or_insert_with(|| {
                    tracing::debug!(%digest, "recovered target");
                    plaintext.to_string()
                });
            }

            if found.len() == self.targets.len() {
                break;
            }
        }

        let mut report = AttackReport {
            attempts,
            interrupted,
            ..AttackReport::default()
        };
        for target in &self.targets {
            match found.remove(target) {
                Some(plaintext) => report.recovered.push(Recovered {
                    digest: *target,
                    plaintext,
                }),
                None => report.missing.push(*target),
            }
        }

        tracing::info!(
            recovered = report.recovered.len(),
            missing = report.missing.len(),
            attempts = report.attempts,
            interrupted = report.interrupted,
            "dictionary attack finished"
        );
        Ok(report)
    }
}

/// Search `wordlist` for the plaintext of a single digest, stopping at the
/// first hit found by any thread.
pub fn crack_one(target: &Digest, wordlist: &Wordlist) -> Result<Option<String>> {
    if wordlist.is_empty() {
        return Err(Error::EmptyWordlist);
    }
    let sha = Sha256::new()?;

    Ok(wordlist
        .words()
        .par_iter()
        .find_map_any(|candidate| {
            // in-memory candidates are far below the length limit
            let digest = sha.hash(candidate.as_bytes()).ok()?;
            (digest == *target).then(|| candidate.clone())
        }))
}
