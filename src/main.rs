//! FolderHash CLI - Deterministic Digests of Directory Trees

use anyhow::Context;
use clap::Parser;
use folderhash::config::{CliArgs, Commands, HashAlgorithm, HashArgs, HashOptions, OutputFormat};
use folderhash::diagnostics::{CollectingSink, TeeSink};
use folderhash::fs::get_folder_stats;
use folderhash::hash::{hash_folder_with, hash_folders_parallel, hash_single_file};
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

fn main() {
    // Parse CLI arguments
    let args = CliArgs::parse();

    // Initialize logging; RUST_LOG wins over -v/-q
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_level(args.verbose, args.quiet)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Handle result
    if let Err(e) = run(args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn default_log_level(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn run(args: CliArgs) -> anyhow::Result<()> {
    let format = args.output_format;

    match &args.command {
        Commands::Hash { paths, opts } => cmd_hash(paths, opts, format),
        Commands::Verify { path, expected, opts } => cmd_verify(path, expected, opts, format),
        Commands::Stats { path } => cmd_stats(path, format),
        Commands::File { path, algorithm } => cmd_file(path, *algorithm, format),
        Commands::Algorithms => cmd_algorithms(format),
    }
}

fn cmd_hash(paths: &[PathBuf], opts: &HashArgs, format: OutputFormat) -> anyhow::Result<()> {
    let options = HashOptions::from_args(opts)?;
    tracing::info!(
        algorithm = %options.algorithm,
        mode = ?options.mode,
        roots = paths.len(),
        "hashing"
    );

    let results = hash_folders_parallel(paths, &options);
    let mut failures = 0usize;

    match format {
        OutputFormat::Text => {
            for (path, result) in paths.iter().zip(&results) {
                match result {
                    Ok(digest) => {
                        println!("{}  {}", digest.digest, path.display());
                        if digest.skipped > 0 {
                            eprintln!(
                                "warning: {} entries under {} were skipped",
                                digest.skipped,
                                path.display()
                            );
                        }
                    }
                    Err(e) => {
                        failures += 1;
                        eprintln!("Error: {}", e);
                    }
                }
            }
        }
        OutputFormat::Json => {
            let entries: Vec<_> = paths
                .iter()
                .zip(&results)
                .map(|(path, result)| match result {
                    Ok(digest) => serde_json::to_value(digest).unwrap_or_default(),
                    Err(e) => {
                        failures += 1;
                        json!({ "root": path, "error": e.to_string() })
                    }
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }

    if failures > 0 {
        std::process::exit(1);
    }

    Ok(())
}

fn cmd_verify(path: &Path, expected: &str, opts: &HashArgs, format: OutputFormat) -> anyhow::Result<()> {
    let options = HashOptions::from_args(opts)?;
    let collected = CollectingSink::new();
    let sink = TeeSink::new(&collected);

    let result = hash_folder_with(path, &options, &sink)
        .with_context(|| format!("failed to hash {}", path.display()))?;
    let matches = result.digest.eq_ignore_ascii_case(expected.trim());

    match format {
        OutputFormat::Text => {
            println!("Expected: {}", expected.trim());
            println!("Actual:   {}", result.digest);
            println!("Match: {}", if matches { "YES ✓" } else { "NO ✗" });

            let skipped = collected.skipped();
            if !skipped.is_empty() {
                println!("\nSkipped entries:");
                for event in &skipped {
                    println!("  {}", event);
                }
            }
        }
        OutputFormat::Json => {
            let report = json!({
                "root": path,
                "algorithm": result.algorithm,
                "mode": result.mode,
                "expected": expected.trim(),
                "actual": result.digest,
                "matches": matches,
                "skipped": collected.skipped(),
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    if !matches {
        std::process::exit(1);
    }

    Ok(())
}

fn cmd_stats(path: &Path, format: OutputFormat) -> anyhow::Result<()> {
    let stats = get_folder_stats(path)?;

    match format {
        OutputFormat::Text => {
            println!("=== Folder Statistics ===");
            println!("Path:       {}", path.display());
            println!("Files:      {}", stats.file_count);
            println!("Total size: {} ({:.2} MB)", stats.human_size(), stats.total_size_mb);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }

    Ok(())
}

fn cmd_file(path: &Path, algorithm: HashAlgorithm, format: OutputFormat) -> anyhow::Result<()> {
    let digest = hash_single_file(path, algorithm)?;

    match format {
        OutputFormat::Text => println!("{}  {}", digest, path.display()),
        OutputFormat::Json => {
            let report = json!({ "path": path, "algorithm": algorithm, "digest": digest });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

fn cmd_algorithms(format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            for algorithm in HashAlgorithm::all() {
                println!(
                    "{:8} {:10} {:>4} bits",
                    algorithm.as_str(),
                    algorithm.name(),
                    algorithm.output_size() * 8
                );
            }
        }
        OutputFormat::Json => {
            let entries: Vec<_> = HashAlgorithm::all()
                .iter()
                .map(|a| json!({ "name": a.as_str(), "bits": a.output_size() * 8 }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_level() {
        assert_eq!(default_log_level(0, false), "warn");
        assert_eq!(default_log_level(1, false), "info");
        assert_eq!(default_log_level(2, false), "debug");
        assert_eq!(default_log_level(5, false), "trace");
        assert_eq!(default_log_level(3, true), "error");
    }
}
