//! oddsboard - structured match records from OCR'd betting screens
//!
//! CLI entry point

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::Level;

use oddsboard::{
    exit_codes,
    // CLI
    ClassifyArgs, Cli, Commands, DedupeArgs, ParseArgs, StatsArgs,
    // Config
    Config, ConfigError,
    // Pipeline
    CaptureOutcome, CapturePipeline, RunSummary,
    // Classification
    LineClassifier,
    // Store
    remove_duplicates, dedupe_rows, find_duplicate_rows, sheet_stats, ColumnLayout, JsonFileSink, MemorySink, RowSink,
    // Text
    split_captures,
};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(exit_codes::CONFIG_ERROR);
        }
    };

    let result = match &cli.command {
        Commands::Parse(args) => run_parse(args, &config, cli.quiet),
        Commands::Classify(args) => run_classify(args, &config),
        Commands::Dedupe(args) => run_dedupe(args, &config),
        Commands::Stats(args) => run_stats(args, &config),
        Commands::Clear => run_clear(&config),
    };

    std::process::exit(match result {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            if e.downcast_ref::<InputNotFound>().is_some() {
                exit_codes::INPUT_NOT_FOUND
            } else {
                exit_codes::GENERAL_ERROR
            }
        }
    });
}

// ============ Setup ============

/// Missing input file, mapped to its own exit code
#[derive(Debug, thiserror::Error)]
#[error("input file does not exist: {0}")]
struct InputNotFound(PathBuf);

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::WARN,
        (false, 0) => Level::INFO,
        (false, 1) => Level::DEBUG,
        (false, _) => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Explicit `--config` must load; the default location may be absent
fn load_config(cli: &Cli) -> Result<Config, ConfigError> {
    let file_config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    Ok(file_config.merge_with_cli(&cli.overrides()))
}

fn read_input(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(InputNotFound(path.to_path_buf()).into());
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn open_store(config: &Config) -> Result<JsonFileSink> {
    let path = config.store_path();
    JsonFileSink::open(&path).with_context(|| format!("failed to open store {}", path.display()))
}

// ============ Parse Command ============

fn run_parse(args: &ParseArgs, config: &Config, quiet: bool) -> Result<()> {
    let start_time = Instant::now();

    let sink: Box<dyn RowSink> = if args.dry_run {
        Box::new(MemorySink::new())
    } else {
        Box::new(open_store(config)?)
    };
    let mut pipeline = CapturePipeline::new(sink, config.pipeline_options());
    let mut summary = RunSummary::default();

    let progress = if quiet || args.json || args.inputs.len() < 2 {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(args.inputs.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("[{bar:40}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        bar
    };

    for input in &args.inputs {
        progress.set_message(input.display().to_string());
        let content = read_input(input)?;

        for lines in split_captures(&content) {
            let outcome = pipeline.process_now(&lines);
            summary.record(&outcome);
            report_outcome(&outcome, args.json)?;
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    if !quiet && !args.json {
        print_summary(&summary, args.dry_run);
        println!("Total time: {:.2}s", start_time.elapsed().as_secs_f64());
    }

    if summary.failed > 0 {
        anyhow::bail!("{} record(s) could not be written", summary.failed);
    }
    Ok(())
}

fn report_outcome(outcome: &CaptureOutcome, json: bool) -> Result<()> {
    match outcome {
        CaptureOutcome::Persisted(record) if json => {
            println!("{}", serde_json::to_string(record)?);
        }
        CaptureOutcome::Persisted(record) => {
            println!(
                "{} | {} | {} | {} odds",
                record.teams, record.full_time_score, record.timestamp(), record.detected_odds
            );
        }
        CaptureOutcome::SinkFailed { .. } => eprintln!("Warning: {}", outcome),
        _ => tracing::info!("{}", outcome),
    }
    Ok(())
}

fn print_summary(summary: &RunSummary, dry_run: bool) {
    println!();
    println!("=== Summary{} ===", if dry_run { " (dry run)" } else { "" });
    println!("  Captures:     {}", summary.captures);
    println!("  Persisted:    {}", summary.persisted);
    println!("  Duplicates:   {}", summary.duplicates);
    println!("  Insufficient: {}", summary.insufficient);
    println!("  Failed:       {}", summary.failed);
}

// ============ Classify Command ============

fn run_classify(args: &ClassifyArgs, config: &Config) -> Result<()> {
    let content = read_input(&args.input)?;
    let options = config.assembler_options();
    let classifier = LineClassifier::new(&options.classifier);
    let lines: Vec<&str> = content.lines().collect();
    let classified = classifier.classify_all(&lines);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&classified)?);
    } else {
        for line in &classified {
            println!("{:<14} {}", line.category(), line.text());
        }
    }
    Ok(())
}

// ============ Dedupe Command ============

fn run_dedupe(args: &DedupeArgs, config: &Config) -> Result<()> {
    let layout = if args.positional {
        ColumnLayout::default()
    } else {
        ColumnLayout::record_rows()
    };
    let options = config.dedup_options(layout);
    let mut store = open_store(config)?;

    if let Some(teams) = &args.find {
        let rows = store.read_all_rows().context("failed to read store")?;
        let numbers = find_duplicate_rows(&rows, teams, args.date.as_deref(), &layout);
        if numbers.is_empty() {
            println!("No rows hold {}", teams);
        } else {
            let listed: Vec<String> = numbers.iter().map(usize::to_string).collect();
            println!("Rows holding {}: {}", teams, listed.join(", "));
        }
        return Ok(());
    }

    let report = if args.check {
        let rows = store.read_all_rows().context("failed to read store")?;
        dedupe_rows(&rows, &options).1
    } else {
        remove_duplicates(&mut store, &options).context("cleanup failed")?
    };

    println!(
        "Scanned {} row(s), {} duplicate(s){}",
        report.scanned,
        report.removed,
        if args.check { " found" } else { " removed" }
    );
    Ok(())
}

// ============ Stats Command ============

fn run_stats(args: &StatsArgs, config: &Config) -> Result<()> {
    let store = open_store(config)?;
    let stats = sheet_stats(&store, config.sink.has_header).context("failed to read store")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("Store:         {}", store.path().display());
    println!("Total matches: {}", stats.total_matches);
    println!("Columns:       {}", stats.columns);
    match stats.last_update {
        Some(at) => println!("Last update:   {}", at.format("%Y-%m-%d %H:%M:%S UTC")),
        None => println!("Last update:   never"),
    }
    Ok(())
}

// ============ Clear Command ============

fn run_clear(config: &Config) -> Result<()> {
    let mut store = open_store(config)?;
    let removed = store.len();
    store.clear().context("failed to clear store")?;
    println!("Removed {} row(s) from {}", removed, store.path().display());
    Ok(())
}
