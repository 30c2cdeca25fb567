//! Registry publisher CLI entrypoint.
//!
//! This binary scans a website tree for released provider binaries and
//! writes the provider registry API documents that describe them.

use clap::Parser;
use registry_publisher::cli::Cli;
use registry_publisher::config::PublishConfig;
use registry_publisher::error::Result;
use registry_publisher::publish::{PublishSummary, publish};
use registry_publisher::signing_key::{SystemCommandExecutor, export_public_key};
use registry_publisher::store::DirectoryStore;
use std::io::Write;

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);
    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn init_logging(cli: &Cli) {
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn run(cli: &Cli, stderr: &mut dyn Write) -> Result<()> {
    let config = PublishConfig::from_cli(cli)?;
    let signing_key = export_public_key(&SystemCommandExecutor, &config.fingerprint)?;
    let store = DirectoryStore::new(config.store_dir.clone());

    if config.dry_run && !cli.quiet {
        write_stderr_line(stderr, "Dry run - no files will be modified");
    }

    let summary = publish(&store, &config, &signing_key)?;
    report_summary(&summary, &config, cli.quiet, stderr);
    Ok(())
}

fn report_summary(
    summary: &PublishSummary,
    config: &PublishConfig,
    quiet: bool,
    stderr: &mut dyn Write,
) {
    if quiet {
        return;
    }
    let verb = if config.dry_run { "Would publish" } else { "Published" };
    write_stderr_line(
        stderr,
        format!("{verb} {} under {}: {summary}", config.namespace, config.store_dir),
    );
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, format!("ERROR: {err}"));
            1
        }
    }
}

fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort logging; ignore write failures.
    }
}
