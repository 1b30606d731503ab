//! Fama-French three-factor regression CLI.
//!
//! Fetches daily adjusted closes and the daily Fama-French factors, regresses
//! the asset's excess return on `MKT_RF`, `SMB` and `HML` with Newey-West
//! standard errors, prints a one-row summary and saves two CSV reports.
//!
//! Usage: `ff3 --ticker AAPL --start 2020-01-01 --end 2025-08-01`
//!
//! When a download fails the tool falls back to `data/asset_prices.csv`
//! (`Date, Adj Close`) and `data/ff_factors.csv` (`Date, Mkt-RF, SMB, HML,
//! RF`, in decimals). `--offline` skips the downloads entirely.

use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use famafrench::{
    data::{
        Fallback, FrenchFactorSource, LocalFactorCsv, LocalPriceCsv, ReportWriter,
        YahooPriceSource,
    },
    math::{NeweyWestConfig, ReferenceDistribution},
    model::{CovarianceType, Ff3Config, Ff3Pipeline, RegressionConfig},
    primitives::{DateRange, Symbol},
    traits::{FactorSource, PriceSource},
};
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CovarianceArg {
    /// Newey-West heteroskedasticity and autocorrelation consistent
    Hac,
    /// Classical homoskedastic OLS
    Nonrobust,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DistributionArg {
    /// Standard normal
    Normal,
    /// Student-t with residual degrees of freedom
    StudentT,
}

/// Fama-French three-factor model with Newey-West (HAC) errors.
#[derive(Debug, Parser)]
#[command(name = "ff3", version)]
#[command(about = "Fama-French 3-factor regression with Newey-West standard errors")]
struct Cli {
    /// Ticker symbol
    #[arg(long, default_value = "AAPL")]
    ticker: String,

    /// First date of the sample (YYYY-MM-DD)
    #[arg(long, default_value = "2020-01-01")]
    start: NaiveDate,

    /// End of the sample (YYYY-MM-DD)
    #[arg(long, default_value = "2025-08-01")]
    end: NaiveDate,

    /// Directory holding the offline CSV files
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Directory the reports are written to
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    /// Newey-West lag truncation
    #[arg(long, default_value_t = 5)]
    max_lags: usize,

    /// Scale the HAC covariance by n / (n - k)
    #[arg(long)]
    small_sample_correction: bool,

    /// Trading days used to annualize alpha
    #[arg(long, default_value_t = 252)]
    trading_days: u32,

    /// Standard error estimator
    #[arg(long, value_enum, default_value_t = CovarianceArg::Hac)]
    covariance: CovarianceArg,

    /// Reference distribution for p-values
    #[arg(long, value_enum, default_value_t = DistributionArg::Normal)]
    distribution: DistributionArg,

    /// Use the local CSV files only
    #[arg(long)]
    offline: bool,
}

impl Cli {
    fn config(&self) -> Ff3Config {
        let covariance = match self.covariance {
            CovarianceArg::Hac => CovarianceType::Hac(NeweyWestConfig {
                max_lags: self.max_lags,
                small_sample_correction: self.small_sample_correction,
            }),
            CovarianceArg::Nonrobust => CovarianceType::NonRobust,
        };
        let distribution = match self.distribution {
            DistributionArg::Normal => ReferenceDistribution::Normal,
            DistributionArg::StudentT => ReferenceDistribution::StudentT,
        };
        Ff3Config {
            regression: RegressionConfig { covariance, distribution },
            trading_days: self.trading_days,
        }
    }

    fn price_source(&self) -> Box<dyn PriceSource> {
        let local = LocalPriceCsv::in_dir(&self.data_dir);
        if self.offline {
            return Box::new(local);
        }
        match YahooPriceSource::new() {
            Ok(remote) => Box::new(Fallback::new(remote, local)),
            Err(e) => {
                warn!(error = %e, "Yahoo Finance unavailable, using local prices");
                Box::new(local)
            }
        }
    }

    fn factor_source(&self) -> Box<dyn FactorSource> {
        let local = LocalFactorCsv::in_dir(&self.data_dir);
        if self.offline {
            return Box::new(local);
        }
        match FrenchFactorSource::new() {
            Ok(remote) => Box::new(Fallback::new(remote, local)),
            Err(e) => {
                warn!(error = %e, "factor download unavailable, using local factors");
                Box::new(local)
            }
        }
    }
}

fn main() -> ExitCode {
    if let Err(e) = init_tracing() {
        eprintln!("failed to initialize logging: {e}");
    }

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("famafrench=info".parse()?)
                .add_directive("ff3=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let symbol = Symbol::new(&cli.ticker);
    let range = DateRange::new(cli.start, cli.end);
    if range.is_empty() {
        bail!("start date {} is after end date {}", cli.start, cli.end);
    }
    info!(%symbol, %range, offline = cli.offline, "starting three-factor run");

    let prices = cli
        .price_source()
        .fetch_prices(&symbol, &range)
        .with_context(|| format!("loading prices for {symbol}"))?;
    let factors = cli.factor_source().fetch_factors(&range).context("loading factor data")?;

    let estimate = Ff3Pipeline::new(cli.config())
        .run(&prices, &factors)
        .with_context(|| format!("estimating three-factor model for {symbol}"))?;

    println!("\n=== Fama-French 3-Factor Results ===");
    println!("{}", estimate.summary);

    let paths = ReportWriter::new(&cli.output_dir)
        .write(&symbol, &estimate)
        .context("saving reports")?;

    println!("\nSaved summary  -> {}", paths.summary.display());
    println!("Saved dataset  -> {}", paths.merged.display());

    Ok(())
}
