//! Example: resample a synthetic tone through a filter bank.
//!
//! Builds a bank for the chosen kernel, samples `sin(2 pi f n)` on an integer
//! grid, evaluates it (or its derivative) at fractional positions spaced
//! `--step` apart and reports the worst deviation from the analytic curve.
//!
//! Results are written as JSON to `--out`, or stdout when omitted.
//!
//! Run from the workspace root:
//!   cargo run -p filterbank-interp --example resample -- --help
//!   RUST_LOG=debug cargo run -p filterbank-interp --example resample -- --kernel sinc8

use std::f64::consts::PI;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use filterbank_interp::{
    BSpline, Extrapolation, FilterGenerator, ISpline, InterpolatorConfig, Sinc, SincDerivative,
    UniversalInterpolator, View,
};
use serde::Serialize;
use tracing::info;

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
enum KernelChoice {
    Sinc8,
    SincDerivative8,
    Bspline3,
    Ispline3,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeChoice {
    Zero,
    LastValue,
    Cyclic,
}

impl From<ModeChoice> for Extrapolation {
    fn from(mode: ModeChoice) -> Self {
        match mode {
            ModeChoice::Zero => Extrapolation::ByZero,
            ModeChoice::LastValue => Extrapolation::ByLastValue,
            ModeChoice::Cyclic => Extrapolation::Cyclic,
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Resample a synthetic tone through a precomputed filter bank")]
struct Args {
    #[arg(long, value_enum, default_value_t = KernelChoice::Sinc8)]
    kernel: KernelChoice,

    /// Tone frequency in cycles per sample
    #[arg(long, default_value_t = 0.05)]
    frequency: f64,

    /// Number of input samples
    #[arg(long, default_value_t = 256)]
    len: usize,

    /// Spacing of the output positions, in samples
    #[arg(long, default_value_t = 0.37)]
    step: f64,

    /// Kernels per unit offset
    #[arg(long, default_value_t = 128)]
    divisions: usize,

    #[arg(long, value_enum, default_value_t = ModeChoice::LastValue)]
    extrapolation: ModeChoice,

    /// Output JSON path (default: stdout)
    #[arg(long)]
    out: Option<String>,
}

// ── JSON DTOs ─────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct PointDto {
    x: f64,
    value: f64,
    expected: f64,
}

#[derive(Serialize)]
struct Report {
    kernel: KernelChoice,
    filter_order: usize,
    normalizer: f64,
    /// Bank construction time, in milliseconds.
    build_ms: f64,
    /// Worst deviation over positions whose kernel stays inside the signal.
    max_interior_error: f64,
    points: Vec<PointDto>,
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn build<G: FilterGenerator<Tap = f64>>(
    generator: &G,
    config: &InterpolatorConfig,
) -> Result<UniversalInterpolator<f64>> {
    UniversalInterpolator::with_config(generator, config).context("building filter bank")
}

fn make_bank(kernel: KernelChoice, config: &InterpolatorConfig) -> Result<UniversalInterpolator<f64>> {
    match kernel {
        KernelChoice::Sinc8 => build(&Sinc::new(8)?, config),
        KernelChoice::SincDerivative8 => build(&SincDerivative::new(8)?, config),
        KernelChoice::Bspline3 => build(&BSpline::new(3)?, config),
        KernelChoice::Ispline3 => build(&ISpline::new(3)?, config),
    }
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    if args.step <= 0.0 || !args.step.is_finite() {
        bail!("--step must be positive, got {}", args.step);
    }
    if args.len < 2 {
        bail!("--len must be at least 2, got {}", args.len);
    }

    let config = InterpolatorConfig {
        divisions: args.divisions,
        extrapolation: args.extrapolation.into(),
        ..InterpolatorConfig::default()
    };

    let t0 = Instant::now();
    let bank = make_bank(args.kernel, &config)?;
    let build_ms = t0.elapsed().as_secs_f64() * 1e3;
    info!(
        kernel = ?args.kernel,
        filter_order = bank.filter_order(),
        n_filters = bank.n_filters(),
        build_ms,
        "bank ready"
    );

    let w = 2.0 * PI * args.frequency;
    let derivative = matches!(args.kernel, KernelChoice::SincDerivative8);
    let samples: Vec<f64> = (0..args.len).map(|n| (w * n as f64).sin()).collect();
    let signal: View<'_, f64> = View::from_slice(&samples);

    let margin = bank.filter_order() as f64;
    let last = (args.len - 1) as f64;
    let mut points = Vec::new();
    let mut max_interior_error = 0.0f64;
    let mut x = 0.0;
    while x <= last {
        let value = bank
            .interpolate(&signal, x)
            .with_context(|| format!("evaluating at x = {x}"))?;
        let expected = if derivative {
            w * (w * x).cos()
        } else {
            (w * x).sin()
        };
        if x >= margin && x <= last - margin {
            max_interior_error = max_interior_error.max((value - expected).abs());
        }
        points.push(PointDto { x, value, expected });
        x += args.step;
    }
    info!(points = points.len(), max_interior_error, "resampling done");

    let report = Report {
        kernel: args.kernel,
        filter_order: bank.filter_order(),
        normalizer: bank.normalizer(),
        build_ms,
        max_interior_error,
        points,
    };

    match &args.out {
        Some(path) => {
            let file =
                std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
            serde_json::to_writer_pretty(file, &report)
                .with_context(|| format!("writing JSON to {path}"))?;
            println!("results written to {path}");
        }
        None => {
            let stdout = std::io::stdout().lock();
            serde_json::to_writer_pretty(stdout, &report).context("writing JSON to stdout")?;
            println!();
        }
    }
    Ok(())
}
