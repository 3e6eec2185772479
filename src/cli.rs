//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_price_adapter::CsvPriceAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::markdown_report::MarkdownReportAdapter;
use crate::adapters::observations_csv::load_observations;
use crate::domain::batch::{batch_span, evaluate, unique_symbols};
use crate::domain::config_validation::{
    validate_scan_config, DEFAULT_MAX_DAYS, DEFAULT_MIN_DAYS, DEFAULT_TARGET_RETURN_PCT,
};
use crate::domain::error::RallyscanError;
use crate::domain::scan::ScanParameters;
use crate::domain::stats::BatchStats;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::PriceDataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "rallyscan", about = "Batch scanner for intraday rally targets")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Evaluate a batch of observations and write a report
    Scan {
        /// CSV file with symbol and date columns
        #[arg(short = 'i', long)]
        observations: PathBuf,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
        /// Directory of per-symbol price CSV files
        #[arg(long)]
        data_dir: Option<PathBuf>,
        /// Target return percentage, e.g. 3.0
        #[arg(long)]
        target_return: Option<f64>,
        #[arg(long)]
        min_days: Option<u32>,
        #[arg(long)]
        max_days: Option<u32>,
        /// Validate inputs and show the plan without scanning
        #[arg(long)]
        dry_run: bool,
    },
    /// Validate an observations CSV file
    Validate {
        #[arg(short = 'i', long)]
        observations: PathBuf,
    },
    /// List symbols available in the price data directory
    ListSymbols {
        #[arg(long)]
        data_dir: Option<PathBuf>,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Show price data coverage for symbol(s)
    Info {
        #[arg(long)]
        symbol: Option<String>,
        #[arg(long)]
        data_dir: Option<PathBuf>,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// CLI flag overrides applied on top of config values.
#[derive(Debug, Default, Clone)]
pub struct ParameterOverrides {
    pub target_return: Option<f64>,
    pub min_days: Option<u32>,
    pub max_days: Option<u32>,
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Scan {
            observations,
            config,
            output,
            data_dir,
            target_return,
            min_days,
            max_days,
            dry_run,
        } => run_scan(
            &observations,
            config.as_ref(),
            output.as_ref(),
            data_dir,
            ParameterOverrides {
                target_return,
                min_days,
                max_days,
            },
            dry_run,
        ),
        Command::Validate { observations } => run_validate(&observations),
        Command::ListSymbols { data_dir, config } => run_list_symbols(data_dir, config.as_ref()),
        Command::Info {
            symbol,
            data_dir,
            config,
        } => run_info(symbol.as_deref(), data_dir, config.as_ref()),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = RallyscanError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

fn empty_config() -> FileConfigAdapter {
    // Every lookup on an empty config falls to the built-in defaults.
    FileConfigAdapter::default()
}

/// Resolve scan parameters: CLI flags win over config keys, config keys win
/// over the built-in defaults.
pub fn build_scan_parameters(
    config: &dyn ConfigPort,
    overrides: &ParameterOverrides,
) -> Result<ScanParameters, RallyscanError> {
    let target_return = overrides
        .target_return
        .unwrap_or_else(|| config.get_double("scan", "target_return", DEFAULT_TARGET_RETURN_PCT));

    let min_days = match overrides.min_days {
        Some(v) => v,
        None => {
            let v = config.get_int("scan", "min_days", DEFAULT_MIN_DAYS);
            u32::try_from(v).map_err(|_| RallyscanError::ConfigInvalid {
                section: "scan".to_string(),
                key: "min_days".to_string(),
                reason: "min_days must be non-negative".to_string(),
            })?
        }
    };

    let max_days = match overrides.max_days {
        Some(v) => v,
        None => {
            let v = config.get_int("scan", "max_days", DEFAULT_MAX_DAYS);
            u32::try_from(v).map_err(|_| RallyscanError::ConfigInvalid {
                section: "scan".to_string(),
                key: "max_days".to_string(),
                reason: "max_days must be non-negative".to_string(),
            })?
        }
    };

    ScanParameters::new(target_return, min_days, max_days)
}

pub fn resolve_data_dir(
    data_dir: Option<PathBuf>,
    config: &dyn ConfigPort,
) -> Result<PathBuf, RallyscanError> {
    if let Some(dir) = data_dir {
        return Ok(dir);
    }
    config
        .get_string("data", "prices_dir")
        .map(PathBuf::from)
        .ok_or_else(|| RallyscanError::ConfigMissing {
            section: "data".to_string(),
            key: "prices_dir".to_string(),
        })
}

pub fn resolve_output(output: Option<&PathBuf>, config: &dyn ConfigPort) -> PathBuf {
    output
        .cloned()
        .or_else(|| config.get_string("report", "output").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("rallyscan_report.md"))
}

fn run_scan(
    observations_path: &PathBuf,
    config_path: Option<&PathBuf>,
    output_path: Option<&PathBuf>,
    data_dir: Option<PathBuf>,
    overrides: ParameterOverrides,
    dry_run: bool,
) -> ExitCode {
    // Stage 1: Load observations
    eprintln!(
        "Loading observations from {}",
        observations_path.display()
    );
    let observations = match load_observations(observations_path) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    if observations.is_empty() {
        eprintln!("error: no observations found in {}", observations_path.display());
        return ExitCode::from(3);
    }

    // Stage 2: Load config and build parameters
    let adapter = match config_path {
        Some(path) => {
            eprintln!("Loading config from {}", path.display());
            match load_config(path) {
                Ok(a) => a,
                Err(code) => return code,
            }
        }
        None => empty_config(),
    };

    if let Err(e) = validate_scan_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let params = match build_scan_parameters(&adapter, &overrides) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let symbols = unique_symbols(&observations);
    let Some(span) = batch_span(&observations, params.max_days) else {
        eprintln!("error: no observations to scan");
        return ExitCode::from(3);
    };

    eprintln!(
        "Scanning {} observations across {} symbols, {} to {}",
        observations.len(),
        symbols.len(),
        span.start,
        span.end,
    );
    eprintln!(
        "  Target: {:.2}% within {}-{} days",
        params.target_return_pct, params.min_days, params.max_days,
    );

    // Stage 3: Dry run stops before touching price data
    if dry_run {
        eprintln!("\nSymbols to fetch:");
        for symbol in &symbols {
            eprintln!("  {}", symbol);
        }
        eprintln!("\nDry run complete: inputs are valid");
        return ExitCode::SUCCESS;
    }

    // Stage 4: Resolve the price data source
    let prices_dir = match resolve_data_dir(data_dir, &adapter) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let data_port = CsvPriceAdapter::new(prices_dir);

    // Stage 5: Evaluate the batch
    let results = match evaluate(&data_port, &observations, &params) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 6: Console summary to stderr
    let stats = BatchStats::compute(&results);
    eprintln!("\n=== Batch Summary ===");
    eprintln!("Observations:     {}", stats.total);
    eprintln!("Targets Hit:      {}", stats.met);
    eprintln!("Targets Missed:   {}", stats.unmet);
    eprintln!("Unresolved:       {}", stats.unresolved);
    eprintln!("Success Rate:     {}", fmt_opt_pct(stats.success_rate));
    eprintln!("Avg Return:       {}", fmt_opt_pct(stats.avg_return_pct));
    eprintln!(
        "Avg Days to Hit:  {}",
        stats
            .avg_days_taken
            .map(|d| format!("{:.1}", d))
            .unwrap_or_else(|| "N/A".to_string())
    );

    // Stage 7: Write the report
    let output = resolve_output(output_path, &adapter);
    match MarkdownReportAdapter.write(&results, &stats, &params, &output) {
        Ok(()) => {
            eprintln!("\nReport written to: {}", output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn fmt_opt_pct(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.2}%", v))
        .unwrap_or_else(|| "N/A".to_string())
}

fn run_validate(observations_path: &PathBuf) -> ExitCode {
    eprintln!("Validating {}", observations_path.display());
    let observations = match load_observations(observations_path) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let symbols = unique_symbols(&observations);
    eprintln!(
        "{} observations, {} unique symbols",
        observations.len(),
        symbols.len()
    );
    if let (Some(min), Some(max)) = (
        observations.iter().map(|o| o.entry_date).min(),
        observations.iter().map(|o| o.entry_date).max(),
    ) {
        eprintln!("Entry dates: {} to {}", min, max);
    }
    eprintln!("Observations file is valid.");
    ExitCode::SUCCESS
}

fn run_list_symbols(data_dir: Option<PathBuf>, config_path: Option<&PathBuf>) -> ExitCode {
    let adapter = match config_path {
        Some(path) => match load_config(path) {
            Ok(a) => a,
            Err(code) => return code,
        },
        None => empty_config(),
    };

    let prices_dir = match resolve_data_dir(data_dir, &adapter) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let data_port = CsvPriceAdapter::new(prices_dir);
    let symbols = match data_port.list_symbols() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if symbols.is_empty() {
        eprintln!("No symbols found");
    } else {
        for symbol in &symbols {
            println!("{}", symbol);
        }
        eprintln!("{} symbols found", symbols.len());
    }
    ExitCode::SUCCESS
}

fn run_info(
    symbol: Option<&str>,
    data_dir: Option<PathBuf>,
    config_path: Option<&PathBuf>,
) -> ExitCode {
    let adapter = match config_path {
        Some(path) => match load_config(path) {
            Ok(a) => a,
            Err(code) => return code,
        },
        None => empty_config(),
    };

    let prices_dir = match resolve_data_dir(data_dir, &adapter) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let data_port = CsvPriceAdapter::new(prices_dir);

    let symbols = match symbol {
        Some(s) => vec![s.to_string()],
        None => match data_port.list_symbols() {
            Ok(s) => s,
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        },
    };

    for s in &symbols {
        match data_port.series_range(s) {
            Ok(Some((first, last, count))) => {
                println!("{}: {} points, {} to {}", s, count, first, last);
            }
            Ok(None) => {
                eprintln!("{}: no data found", s);
            }
            Err(e) => {
                eprintln!("error querying {}: {}", s, e);
            }
        }
    }
    ExitCode::SUCCESS
}
