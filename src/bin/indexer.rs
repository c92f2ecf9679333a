use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use achei::build::BuildOrchestrator;
use achei::core::config::Config;

/// Builds an external-memory inverted index over a ZIP of WARC records
/// under a resident-memory ceiling (§6 Indexer CLI).
#[derive(Parser, Debug)]
#[command(name = "achei-index")]
struct Args {
    /// ZIP archive whose `.kaggle` entries are WARC streams.
    archive: PathBuf,

    /// Root directory under which `cache/` and `final/` are created.
    #[arg(short = 's', long = "storage", default_value = "./data")]
    storage: PathBuf,

    /// Resident-memory ceiling, in megabytes.
    #[arg(short = 'm', long = "memory-mb")]
    memory_mb: usize,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let config = Config::new(args.storage, args.memory_mb);
    let orchestrator = BuildOrchestrator::new(config);

    match orchestrator.run(&args.archive) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("achei-index: {}", err);
            ExitCode::FAILURE
        }
    }
}
