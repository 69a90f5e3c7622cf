mod bench;

use anyhow::Context;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use sha_nums_core::Digest;
use sha_nums_dict::{AttackReport, CrackConfig, DictionaryAttack, Wordlist};
use sha_nums_hash::{generate_primes, tables, Sha256};
use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread;
use std::time::{Duration, Instant};

/// Printed after every dictionary attack.
const PASSWORD_CAVEAT: &str = "Plain SHA-256 is fast and unsalted: never use it to store passwords. \
     Use a memory-hard, salted, iterated scheme instead.";

/// Maximum number of target digests per run
const MAX_TARGETS: usize = 1024;

#[derive(Parser, Debug)]
#[command(
    name = "sha-nums",
    version,
    about = "SHA-256 from first principles: hashing, dictionary attacks, and benchmarks"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Hash text arguments, files, or stdin
    Hash(HashArgs),
    /// Recover plaintexts of SHA-256 digests from a wordlist
    Crack(CrackArgs),
    /// Measure digest throughput on random messages
    Bench(BenchArgs),
    /// Print the derived initial hash values and round constants
    Constants,
}

#[derive(clap::Args, Debug)]
struct HashArgs {
    /// Text to hash (UTF-8 bytes, no trailing newline)
    #[arg()]
    text: Vec<String>,

    /// File to hash (repeatable)
    #[arg(short = 'f', long = "file")]
    files: Vec<PathBuf>,

    /// Emit JSON instead of `<digest>  <input>` lines
    #[arg(long = "json", default_value_t = false)]
    json: bool,
}

#[derive(clap::Args, Debug)]
struct CrackArgs {
    /// Target digest(s) as 64 hex chars (comma-separated or repeated)
    #[arg(short = 't', long = "target", value_delimiter = ',', required = true)]
    targets: Vec<String>,

    /// Wordlist file, one candidate per line (default: built-in common passwords)
    #[arg(short = 'w', long = "wordlist")]
    wordlist: Option<PathBuf>,

    /// Worker threads (default: one per core)
    #[arg(long = "threads")]
    threads: Option<usize>,

    /// Candidates per parallel batch
    #[arg(long = "batch-size", default_value_t = 4096)]
    batch_size: usize,

    /// Maximum duration to run before stopping (seconds)
    #[arg(long = "duration-secs")]
    duration_secs: Option<u64>,

    /// Emit the report as JSON
    #[arg(long = "json", default_value_t = false)]
    json: bool,
}

#[derive(clap::Args, Debug)]
struct BenchArgs {
    /// Number of timed digests
    #[arg(long = "iters", default_value_t = 10_000)]
    iters: u32,

    /// Message size in bytes
    #[arg(long = "size", default_value_t = 64)]
    size: usize,

    /// Untimed digests before measuring
    #[arg(long = "warmup", default_value_t = 100)]
    warmup: u32,

    /// RNG seed for reproducible messages
    #[arg(long = "seed")]
    seed: Option<u64>,
}

#[derive(Serialize)]
struct HashRecord {
    input: String,
    digest: Digest,
}

/// Invalid command-line input (exit code 2).
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct UsageError(String);

fn usage(msg: impl Into<String>) -> anyhow::Error {
    UsageError(msg.into()).into()
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Parse and deduplicate target digests, rejecting any malformed entry.
fn parse_targets(raw: &[String]) -> Result<Vec<Digest>, String> {
    let mut targets: Vec<Digest> = Vec::new();

    for entry in raw {
        let trimmed = entry.trim();
        if trimmed.is_empty() {
            continue;
        }
        let digest: Digest = trimmed
            .parse()
            .map_err(|e| format!("target '{}': {}", trimmed, e))?;
        if !targets.contains(&digest) {
            targets.push(digest);
        }
    }

    if targets.is_empty() {
        return Err("at least one target digest is required".to_string());
    }
    if targets.len() > MAX_TARGETS {
        return Err(format!(
            "too many targets: {} exceeds {} limit",
            targets.len(),
            MAX_TARGETS
        ));
    }
    Ok(targets)
}

/// Collect `(label, bytes)` pairs for the hash command.
fn hash_inputs(args: &HashArgs) -> anyhow::Result<Vec<(String, Vec<u8>)>> {
    let mut inputs: Vec<(String, Vec<u8>)> = args
        .text
        .iter()
        .map(|t| (format!("{:?}", t), t.as_bytes().to_vec()))
        .collect();

    for path in &args.files {
        let bytes =
            std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        inputs.push((path.display().to_string(), bytes));
    }

    if inputs.is_empty() {
        let mut bytes = Vec::new();
        io::stdin()
            .read_to_end(&mut bytes)
            .context("reading stdin")?;
        inputs.push(("-".to_string(), bytes));
    }
    Ok(inputs)
}

fn run_hash(args: &HashArgs) -> anyhow::Result<()> {
    let sha = Sha256::new()?;

    let mut records = Vec::new();
    for (label, bytes) in hash_inputs(args)? {
        let digest = sha.hash(&bytes)?;
        records.push(HashRecord {
            input: label,
            digest,
        });
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        for r in &records {
            println!("{}  {}", r.digest, r.input);
        }
    }
    Ok(())
}

fn progress_bar(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner} [{elapsed_precise}] {bar:40} {pos}/{len} candidates ({per_sec})",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    pb
}

fn run_crack(args: &CrackArgs) -> anyhow::Result<bool> {
    let targets = parse_targets(&args.targets).map_err(usage)?;

    if args.batch_size == 0 {
        return Err(usage("--batch-size must be at least 1"));
    }
    if let Some(threads) = args.threads {
        if threads == 0 {
            return Err(usage("--threads must be at least 1"));
        }
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("configuring worker threads")?;
    }

    let wordlist = match &args.wordlist {
        Some(path) => Wordlist::load(path)
            .with_context(|| format!("loading wordlist {}", path.display()))?,
        None => Wordlist::common(),
    };
    if wordlist.is_empty() {
        return Err(usage("wordlist contains no candidates"));
    }

    let attack = DictionaryAttack::new(
        targets,
        CrackConfig {
            batch_size: args.batch_size,
        },
    )?;

    eprintln!(
        "Cracking {} target(s) against {} candidate(s)",
        attack.targets().len(),
        wordlist.len()
    );
    if let Some(secs) = args.duration_secs {
        eprintln!("Duration limit: {}s", secs);
    }

    let stop = AtomicBool::new(false);
    let progress = AtomicU64::new(0);
    let deadline = args
        .duration_secs
        .map(|secs| Instant::now() + Duration::from_secs(secs));
    let pb = progress_bar(wordlist.len());

    let report: AttackReport = thread::scope(|s| {
        let worker = s.spawn(|| attack.run(&wordlist, &stop, &progress));

        while !worker.is_finished() {
            pb.set_position(progress.load(Ordering::Relaxed));
            if deadline.is_some_and(|d| Instant::now() >= d) {
                stop.store(true, Ordering::Relaxed);
            }
            thread::sleep(Duration::from_millis(100));
        }

        worker
            .join()
            .map_err(|_| anyhow::anyhow!("dictionary attack worker panicked"))
    })??;
    pb.finish_and_clear();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for r in &report.recovered {
            println!("{}  {}", r.digest, r.plaintext);
        }
        for d in &report.missing {
            println!("{}  (not found)", d);
        }
    }

    eprintln!();
    eprintln!(
        "Recovered {}/{} target(s) after {} candidate(s){}",
        report.recovered.len(),
        report.recovered.len() + report.missing.len(),
        report.attempts,
        if report.interrupted { " (stopped early)" } else { "" }
    );
    eprintln!("{}", PASSWORD_CAVEAT);

    Ok(!report.recovered.is_empty())
}

fn run_bench(args: &BenchArgs) -> anyhow::Result<()> {
    if args.iters == 0 {
        return Err(usage("--iters must be at least 1"));
    }

    let cfg = bench::BenchConfig {
        iters: args.iters,
        size: args.size,
        warmup: args.warmup,
        seed: args.seed,
    };
    let stats = bench::run_bench(&cfg)?;
    bench::print_bench_results(&stats, &cfg);
    Ok(())
}

fn run_constants() -> anyhow::Result<()> {
    let t = tables()?;
    let primes = generate_primes(t.k.len());

    println!("Initial hash values (fractional part of sqrt(p)):");
    for (i, (h, p)) in t.h0.iter().zip(&primes).enumerate() {
        println!("  H0[{}]  p={:<3} {:#010x}", i, p, h);
    }

    println!();
    println!("Round constants (fractional part of cbrt(p)):");
    for (i, (k, p)) in t.k.iter().zip(&primes).enumerate() {
        println!("  K[{:>2}]  p={:<3} {:#010x}", i, p, k);
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match &cli.command {
        Command::Hash(args) => run_hash(args).map(|()| true),
        Command::Crack(args) => run_crack(args),
        Command::Bench(args) => run_bench(args).map(|()| true),
        Command::Constants => run_constants().map(|()| true),
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            let code = if err.downcast_ref::<UsageError>().is_some() {
                2
            } else {
                1
            };
            std::process::exit(code);
        }
    }
}
