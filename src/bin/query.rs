use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use achei::core::types::RankingFunction;
use achei::query::engine::QueryEngine;

/// Answers queries against a built inverted index (§6 Query CLI). The
/// count file is assumed to sit alongside the index file, matching
/// `BuildOrchestrator`'s `final/index` + `final/count` layout.
#[derive(Parser, Debug)]
#[command(name = "achei-query")]
struct Args {
    /// Path to the final index file.
    #[arg(short = 'i', long = "index")]
    index: PathBuf,

    /// Path to the query file, one query per line.
    #[arg(short = 'q', long = "queries")]
    queries: PathBuf,

    /// Ranking function: TFIDF or BM25.
    #[arg(short = 'r', long = "ranking")]
    ranking: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let ranking: RankingFunction = match args.ranking.parse() {
        Ok(ranking) => ranking,
        Err(err) => {
            eprintln!("achei-query: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let count_path = args.index.with_file_name("count");
    let engine = match QueryEngine::open(&args.index, &count_path) {
        Ok(engine) => engine,
        Err(err) => {
            eprintln!("achei-query: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let queries_file = match File::open(&args.queries) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("achei-query: {}", err);
            return ExitCode::FAILURE;
        }
    };

    for line in BufReader::new(queries_file).lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                eprintln!("achei-query: {}", err);
                continue;
            }
        };
        if line.is_empty() {
            continue;
        }

        let started = Instant::now();
        match engine.query(&line, ranking) {
            Ok(results) => {
                for scored in &results {
                    println!("{}\t{:.6}", scored.doc_id, scored.score);
                }
                eprintln!(
                    "query {:?}: {} result(s) in {:.3}ms",
                    line,
                    results.len(),
                    started.elapsed().as_secs_f64() * 1000.0
                );
            }
            Err(err) => {
                eprintln!("achei-query: skipping malformed query {:?}: {}", line, err);
            }
        }
    }

    ExitCode::SUCCESS
}
