//! `grid-expand` command line tool.
//!
//! Reads a JSON grid (`[[1, 2], [3, 4]]`), expands it to the requested shape
//! and writes `{ data, mask, step_rows, step_cols }` as JSON.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use grid_expand::{expand_with_params, ExpandError, ExpandParams, Grid, GridError};
use log::{debug, info, LevelFilter};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(
    name = "grid-expand",
    version,
    about = "Scatter a JSON grid into a larger zero-filled grid with a presence mask"
)]
struct Cli {
    /// JSON file holding the source grid as an array of rows.
    #[arg(long, short)]
    input: PathBuf,
    /// JSON file with `ExpandParams`; flags below override its fields.
    #[arg(long)]
    params: Option<PathBuf>,
    /// Target number of rows.
    #[arg(long)]
    rows: Option<usize>,
    /// Target number of columns.
    #[arg(long)]
    cols: Option<usize>,
    /// Row stride override (derived when omitted).
    #[arg(long)]
    step_rows: Option<usize>,
    /// Column stride override (derived when omitted).
    #[arg(long)]
    step_cols: Option<usize>,
    /// Output file; stdout when omitted.
    #[arg(long, short)]
    output: Option<PathBuf>,
    /// Log verbosity on stderr. In `tracing` builds `RUST_LOG` takes
    /// precedence when set.
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("missing target {0}: pass --{0} or set it in --params")]
    MissingTarget(&'static str),
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Expand(#[from] ExpandError),
    #[cfg(not(feature = "tracing"))]
    #[error(transparent)]
    Logger(#[from] log::SetLoggerError),
}

#[derive(Debug, Serialize)]
struct ExpandReport {
    data: Vec<Vec<f64>>,
    mask: Vec<Vec<u8>>,
    step_rows: usize,
    step_cols: usize,
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn resolve_params(cli: &Cli) -> Result<ExpandParams, CliError> {
    let base = cli
        .params
        .as_deref()
        .map(read_json::<ExpandParams>)
        .transpose()?;

    let target_rows = cli
        .rows
        .or(base.map(|p| p.target_rows))
        .ok_or(CliError::MissingTarget("rows"))?;
    let target_cols = cli
        .cols
        .or(base.map(|p| p.target_cols))
        .ok_or(CliError::MissingTarget("cols"))?;

    Ok(ExpandParams {
        target_rows,
        target_cols,
        step_rows: cli.step_rows.or(base.and_then(|p| p.step_rows)),
        step_cols: cli.step_cols.or(base.and_then(|p| p.step_cols)),
    })
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let params = resolve_params(cli)?;
    let rows: Vec<Vec<f64>> = read_json(&cli.input)?;
    let src = Grid::from_rows(&rows)?;
    info!(
        "loaded {}x{} grid from {}",
        src.rows(),
        src.cols(),
        cli.input.display()
    );
    debug!("params: {params:?}");

    let out = expand_with_params(&src.view(), &params)?;
    let report = ExpandReport {
        data: out.data.to_rows(),
        mask: out.mask.to_rows(),
        step_rows: out.strides.rows,
        step_cols: out.strides.cols,
    };
    let json = serde_json::to_string_pretty(&report)?;

    match &cli.output {
        Some(path) => {
            fs::write(path, json).map_err(|source| CliError::Write {
                path: path.clone(),
                source,
            })?;
            info!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

#[cfg(not(feature = "tracing"))]
fn init_logging(cli: &Cli) -> Result<(), CliError> {
    grid_expand::init_with_level(cli.log_level.into())?;
    Ok(())
}

#[cfg(feature = "tracing")]
fn init_logging(cli: &Cli) -> Result<(), CliError> {
    grid_expand::init_tracing(cli.log_level.into());
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = init_logging(&cli).and_then(|()| run(&cli)) {
        eprintln!("error: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
