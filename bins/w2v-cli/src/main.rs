//! w2v-cli: sample series for the sigmoid table and frequency subsampling.
//!
//! Every subcommand writes one table of rows to stdout (CSV or JSON) for a
//! plotting tool to render. Logs go to stderr.

mod config;
mod output;

use std::io::{self, BufWriter};
use std::process;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, error, info};
use w2v_core::config::NumericsConfig;
use w2v_core::constants::{LCG_LOW_MASK, SWEEP_SAMPLING_RATES};
use w2v_math::sigmoid::{sigmoid, SigmoidTable};
use w2v_math::subsampling::{SubsamplingMode, SubsamplingPolicy};
use w2v_math::sweep::{frequency_grid, sigmoid_grid, sigmoid_sweep, subsampling_sweep};

use crate::config::ConfigArgs;
use crate::output::{write_rows, DecisionRow, Format, LookupRow, TableRow};

#[derive(Parser, Debug)]
#[command(
    name = "w2v-cli",
    version,
    about = "Sigmoid lookup table and frequency subsampling sample series"
)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = Format::Csv)]
    format: Format,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Log output format ("text" or "json")
    #[arg(long, global = true, default_value = "text")]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Dump every bucket of the sigmoid table.
    Table,
    /// Look up individual activations in the sigmoid table.
    Lookup(LookupArgs),
    /// Compare table and exact sigmoid over a grid of activations.
    SigmoidSweep(SigmoidSweepArgs),
    /// Score a grid of frequencies under several sampling rates.
    SubsampleSweep(SubsampleSweepArgs),
    /// Make random keep/discard decisions for frequencies, in order.
    Decide(DecideArgs),
}

#[derive(Args, Debug)]
struct LookupArgs {
    /// Activations to look up
    #[arg(required = true, allow_negative_numbers = true)]
    xs: Vec<f64>,
}

#[derive(Args, Debug)]
struct SigmoidSweepArgs {
    /// Activations to evaluate (default: -6.0, -5.9, ..., 5.9)
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    xs: Vec<f64>,
}

#[derive(Args, Debug)]
struct SubsampleSweepArgs {
    /// Scoring mode (linear, quadratic, ratio, random)
    #[arg(long, default_value = "ratio")]
    mode: SubsamplingMode,

    /// Sampling rates to compare (default: 1e-3, 1e-4, 1e-5, 1e-6)
    #[arg(long, value_delimiter = ',')]
    rates: Vec<f64>,

    /// Frequencies to score (default: 0.001, 0.002, ..., 0.099)
    #[arg(long, value_delimiter = ',')]
    freqs: Vec<f64>,
}

#[derive(Args, Debug)]
struct DecideArgs {
    /// Relative token frequencies, decided in the given order
    #[arg(required = true)]
    freqs: Vec<f64>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level, &cli.log_format);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    if let Err(e) = run(cli, &mut out) {
        error!("{e:#}");
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli, out: &mut impl io::Write) -> Result<()> {
    let cfg = cli.config.resolve()?;
    debug!(?cfg, "resolved configuration");

    match cli.command {
        Commands::Table => cmd_table(&cfg, cli.format, out),
        Commands::Lookup(args) => cmd_lookup(&cfg, &args, cli.format, out),
        Commands::SigmoidSweep(args) => cmd_sigmoid_sweep(&cfg, &args, cli.format, out),
        Commands::SubsampleSweep(args) => cmd_subsample_sweep(&cfg, &args, cli.format, out),
        Commands::Decide(args) => cmd_decide(&cfg, &args, cli.format, out),
    }
}

fn build_table(cfg: &NumericsConfig) -> Result<SigmoidTable> {
    SigmoidTable::from_config(&cfg.sigmoid).context("failed to build sigmoid table")
}

fn cmd_table(cfg: &NumericsConfig, format: Format, out: &mut impl io::Write) -> Result<()> {
    let table = build_table(cfg)?;
    let n = table.size() as f64;
    let rows: Vec<TableRow> = table
        .as_slice()
        .iter()
        .enumerate()
        .map(|(index, &value)| TableRow {
            index,
            x: (index as f64 / n * 2.0 - 1.0) * table.max_exp(),
            value,
        })
        .collect();
    write_rows(out, format, &rows)
}

fn cmd_lookup(
    cfg: &NumericsConfig,
    args: &LookupArgs,
    format: Format,
    out: &mut impl io::Write,
) -> Result<()> {
    let table = build_table(cfg)?;
    let rows: Vec<LookupRow> = args
        .xs
        .iter()
        .map(|&x| LookupRow {
            x,
            bucket: table.bucket_index(x),
            approx: table.lookup(x),
            exact: sigmoid(x),
        })
        .collect();
    write_rows(out, format, &rows)
}

fn cmd_sigmoid_sweep(
    cfg: &NumericsConfig,
    args: &SigmoidSweepArgs,
    format: Format,
    out: &mut impl io::Write,
) -> Result<()> {
    let table = build_table(cfg)?;
    let xs = if args.xs.is_empty() { sigmoid_grid() } else { args.xs.clone() };
    let points = sigmoid_sweep(&table, &xs);
    info!(
        points = points.len(),
        max_abs_error = table.max_abs_error(&xs),
        "sigmoid sweep"
    );
    write_rows(out, format, &points)
}

fn cmd_subsample_sweep(
    cfg: &NumericsConfig,
    args: &SubsampleSweepArgs,
    format: Format,
    out: &mut impl io::Write,
) -> Result<()> {
    let rates = if args.rates.is_empty() {
        SWEEP_SAMPLING_RATES.to_vec()
    } else {
        args.rates.clone()
    };
    let freqs = if args.freqs.is_empty() { frequency_grid() } else { args.freqs.clone() };
    let points = subsampling_sweep(&freqs, &rates, args.mode, cfg.subsampling.seed)
        .context("subsampling sweep failed")?;
    info!(points = points.len(), mode = %args.mode, "subsampling sweep");
    write_rows(out, format, &points)
}

fn cmd_decide(
    cfg: &NumericsConfig,
    args: &DecideArgs,
    format: Format,
    out: &mut impl io::Write,
) -> Result<()> {
    let mut policy =
        SubsamplingPolicy::from_config(&cfg.subsampling).context("failed to build policy")?;
    // Fail before the first draw if any frequency is invalid.
    let ratios = args
        .freqs
        .iter()
        .map(|&f| policy.ratio(f))
        .collect::<Result<Vec<_>, _>>()
        .context("invalid frequency")?;

    let mut rows = Vec::with_capacity(args.freqs.len());
    for (&freq, ratio) in args.freqs.iter().zip(ratios) {
        let decision = policy.decide(freq)?;
        let state = policy.state();
        rows.push(DecisionRow {
            freq,
            ratio,
            state,
            draw: (state & LCG_LOW_MASK) as u16,
            decision,
        });
    }
    let kept = rows.iter().filter(|r| r.decision.is_keep()).count();
    info!(decisions = rows.len(), kept, "subsampling decisions");
    write_rows(out, format, &rows)
}

/// Initialize tracing subscriber with the given log level and output format.
///
/// `RUST_LOG` takes precedence over `level_str`. Output goes to stderr so
/// stdout carries only data rows.
fn init_logging(level_str: &str, format: &str) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_str));

    if format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(io::stderr),
            )
            .init();
    }
}
