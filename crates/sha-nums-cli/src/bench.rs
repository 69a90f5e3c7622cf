//! Throughput benchmark over random messages.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use sha_nums_core::Result;
use sha_nums_hash::Sha256;
use std::hint::black_box;
use std::time::Instant;

/// Distinct random messages generated up front and cycled through.
const MESSAGE_POOL: usize = 64;

/// Benchmark configuration.
#[derive(Debug, Clone)]
pub struct BenchConfig {
    /// Number of timed digests.
    pub iters: u32,
    /// Message size in bytes.
    pub size: usize,
    /// Untimed digests before measuring.
    pub warmup: u32,
    /// Fixed RNG seed for reproducible inputs.
    pub seed: Option<u64>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            iters: 10_000,
            size: 64,
            warmup: 100,
            seed: None,
        }
    }
}

/// Timing results.
#[derive(Debug, Clone, Default)]
pub struct BenchStats {
    /// Total timed nanoseconds.
    pub total_ns: u64,
    /// Digests computed in the timed section.
    pub hashes: u64,
    /// Message bytes hashed in the timed section.
    pub bytes: u64,
    /// XOR of all timed digests, so the work cannot be skipped.
    pub checksum: [u8; 32],
}

impl BenchStats {
    pub fn hashes_per_sec(&self) -> f64 {
        self.hashes as f64 / self.secs()
    }

    pub fn mib_per_sec(&self) -> f64 {
        self.bytes as f64 / (1024.0 * 1024.0) / self.secs()
    }

    pub fn ns_per_hash(&self) -> f64 {
        self.total_ns as f64 / self.hashes.max(1) as f64
    }

    fn secs(&self) -> f64 {
        (self.total_ns as f64 / 1e9).max(1e-9)
    }
}

pub fn run_bench(cfg: &BenchConfig) -> Result<BenchStats> {
    let sha = Sha256::new()?;

    let mut rng = match cfg.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let pool: Vec<Vec<u8>> = (0..MESSAGE_POOL)
        .map(|_| {
            let mut msg = vec![0u8; cfg.size];
            rng.fill_bytes(&mut msg);
            msg
        })
        .collect();

    for msg in pool.iter().cycle().take(cfg.warmup as usize) {
        black_box(sha.digest(black_box(msg))?);
    }

    let mut checksum = [0u8; 32];
    let start = Instant::now();
    for msg in pool.iter().cycle().take(cfg.iters as usize) {
        let d = sha.digest(black_box(msg))?;
        for (c, b) in checksum.iter_mut().zip(d) {
            *c ^= b;
        }
    }
    let elapsed = start.elapsed();

    tracing::debug!(iters = cfg.iters, size = cfg.size, ?elapsed, "benchmark finished");

    Ok(BenchStats {
        total_ns: elapsed.as_nanos() as u64,
        hashes: cfg.iters as u64,
        bytes: cfg.iters as u64 * cfg.size as u64,
        checksum,
    })
}

pub fn print_bench_results(stats: &BenchStats, cfg: &BenchConfig) {
    println!(
        "\nSHA-256 bench, size={} B, iters={}, warmup={}\n",
        cfg.size, cfg.iters, cfg.warmup
    );
    println!("{:<12} {:>12.1} ms", "total:", stats.total_ns as f64 / 1_000_000.0);
    println!("{:<12} {:>12.0} ns", "per hash:", stats.ns_per_hash());
    println!("{:<12} {:>12.0} H/s", "rate:", stats.hashes_per_sec());
    println!("{:<12} {:>12.2} MiB/s", "throughput:", stats.mib_per_sec());
    println!("{:<12} {}", "checksum:", sha_nums_core::Digest::new(stats.checksum));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_bench_is_reproducible() {
        let cfg = BenchConfig {
            iters: 50,
            size: 100,
            warmup: 0,
            seed: Some(9),
        };
        let a = run_bench(&cfg).unwrap();
        let b = run_bench(&cfg).unwrap();

        assert_eq!(a.checksum, b.checksum);
        assert_eq!(a.hashes, 50);
        assert_eq!(a.bytes, 5000);
    }

    #[test]
    fn test_zero_iters() {
        let cfg = BenchConfig {
            iters: 0,
            size: 8,
            warmup: 0,
            seed: Some(1),
        };
        let stats = run_bench(&cfg).unwrap();
        assert_eq!(stats.hashes, 0);
        assert_eq!(stats.checksum, [0u8; 32]);
        assert!(stats.ns_per_hash().is_finite());
    }
}
