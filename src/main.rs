//! dewdrops - dump a source tree into one Markdown context document.
//!
//! Usage:
//!   dewdrops <REPOSITORY_ROOT>              Write dewdrops_context.md
//!   dewdrops -o ctx.md <REPOSITORY_ROOT>    Write to a chosen path
//!   dewdrops --json <REPOSITORY_ROOT>       Print the run summary as JSON
//!   dewdrops --help                         Show help

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use color_eyre::eyre::{Context, Result};
use tracing_subscriber::EnvFilter;

use dewdrops_core::DEFAULT_OUTPUT_FILE_NAME;
use dewdrops_render::{DumpConfig, DumpReport, Dumper};

/// Environment variable holding the log filter.
const LOG_ENV: &str = "DEWDROPS_LOG";

#[derive(Parser)]
#[command(
    name = "dewdrops",
    version,
    about = "Dump a source tree into a single Markdown context document",
    long_about = "dewdrops walks a repository, honours its root .gitignore, and writes \
                  a directory listing followed by the contents of every text file \
                  into one deterministic document."
)]
struct Cli {
    /// Repository root to snapshot
    repository_root: PathBuf,

    /// Where to write the document (its file name is never scanned)
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE_NAME)]
    output: PathBuf,

    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,

    /// Log traversal and rendering decisions to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return ExitCode::from(parse_failure_status(&err));
        }
    };

    init_logging(cli.verbose);

    let result = color_eyre::install().and_then(|()| run(&cli));
    if let Err(ref err) = result {
        eprintln!("Error: {err:#}");
    }
    ExitCode::from(run_status(&result))
}

/// Exit status after clap rejects the arguments. Help and version output
/// are not failures.
fn parse_failure_status(err: &clap::Error) -> u8 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}

/// Exit status for a finished run: any fatal error is 1.
fn run_status(result: &Result<()>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(_) => 1,
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Run a dump and print its summary.
fn run(cli: &Cli) -> Result<()> {
    let config = DumpConfig::builder()
        .root(cli.repository_root.clone())
        .output_path(cli.output.clone())
        .build()
        .context("Invalid arguments")?;

    if !cli.json {
        println!("dewdrops: Scanning '{}'...", config.root.display());
    }

    let report = Dumper::new(config).run()?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }

    Ok(())
}

/// Print the human-readable run summary.
fn print_summary(report: &DumpReport) {
    println!();
    println!("{}", "─".repeat(48));
    println!(" Dump Summary");
    println!("{}", "─".repeat(48));
    println!("Files Processed     : {}", report.stats.files_rendered);
    println!("Max Directory Depth : {}", report.stats.max_depth);
    println!(
        "Dump Size           : {} ({})",
        format_size(report.output_bytes),
        report.output_path.display()
    );
    println!();

    println!("File Types:");
    for (ext, count) in &report.stats.extension_counts {
        println!("  .{:<10} : {}", ext.as_str(), count);
    }
    println!("{}", "─".repeat(48));
}

/// Format size in human-readable form.
fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dewdrops_render::DumpError;
    use std::ffi::OsString;
    use std::fs;
    use tempfile::TempDir;

    fn cli_for(root: &std::path::Path, out: &std::path::Path) -> Cli {
        let args: Vec<OsString> = vec![
            "dewdrops".into(),
            "-o".into(),
            out.join("ctx.md").into(),
            root.into(),
        ];
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_missing_root_is_usage_error() {
        let err = Cli::try_parse_from(["dewdrops"]).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        assert_eq!(parse_failure_status(&err), 1);
    }

    #[test]
    fn test_help_and_version_exit_zero() {
        let err = Cli::try_parse_from(["dewdrops", "--help"]).err().unwrap();
        assert_eq!(parse_failure_status(&err), 0);

        let err = Cli::try_parse_from(["dewdrops", "--version"]).err().unwrap();
        assert_eq!(parse_failure_status(&err), 0);
    }

    #[test]
    fn test_everything_excluded_exits_one() {
        let root = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        fs::write(root.path().join(".gitignore"), "*\n").unwrap();
        fs::write(root.path().join("a.go"), "package a").unwrap();

        let result = run(&cli_for(root.path(), out.path()));
        let err = result.as_ref().err().unwrap();
        assert!(matches!(
            err.downcast_ref::<DumpError>(),
            Some(DumpError::EmptyResult { .. })
        ));
        assert_eq!(run_status(&result), 1);
    }

    #[test]
    fn test_invalid_root_exits_one() {
        let out = TempDir::new().unwrap();
        let missing = out.path().join("missing");

        let result = run(&cli_for(&missing, out.path()));
        assert_eq!(run_status(&result), 1);
    }

    #[test]
    fn test_successful_run_exits_zero() {
        let root = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        fs::write(root.path().join("main.go"), "package main\n").unwrap();

        let result = run(&cli_for(root.path(), out.path()));
        assert_eq!(run_status(&result), 0);
        assert!(out.path().join("ctx.md").exists());
    }
}
