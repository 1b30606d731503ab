//! # famafrench
//!
//! Fama-French three-factor regression for a single instrument, with
//! Newey-West (HAC) standard errors.
//!
//! This crate provides a unified interface to the workspace crates.
//! Individual components can be enabled via feature flags.
//!
//! ## Features
//!
//! - `full` (default): Enables all components
//! - `primitives`: Core type definitions
//! - `traits`: Data source abstractions
//! - `math`: Least squares and covariance estimators
//! - `model`: Returns, alignment, regression and summary
//! - `data`: Yahoo Finance, Ken French and local CSV sources, report export
//! - `cli`: The `ff3` binary
//!
//! ## Example
//!
//! ```rust,ignore
//! use famafrench::{
//!     data::{LocalFactorCsv, LocalPriceCsv},
//!     model::Ff3Pipeline,
//!     primitives::{Date, DateRange, Symbol},
//!     traits::{FactorSource, PriceSource},
//! };
//!
//! let range = DateRange::new(Date::from_ymd_opt(2020, 1, 1)?, Date::from_ymd_opt(2025, 8, 1)?);
//! let prices = LocalPriceCsv::in_dir("data").fetch_prices(&Symbol::new("AAPL"), &range)?;
//! let factors = LocalFactorCsv::in_dir("data").fetch_factors(&range)?;
//! let estimate = Ff3Pipeline::default().run(&prices, &factors)?;
//! println!("{}", estimate.summary);
//! ```

#![doc(issue_tracker_base_url = "https://github.com/factordynamics/famafrench-rs/issues/")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[cfg(feature = "primitives")]
#[doc(inline)]
pub use famafrench_primitives as primitives;
#[cfg(feature = "traits")]
#[doc(inline)]
pub use famafrench_traits as traits;
#[cfg(feature = "math")]
#[doc(inline)]
pub use famafrench_math as math;
#[cfg(feature = "model")]
#[doc(inline)]
pub use famafrench_model as model;
#[cfg(feature = "data")]
#[doc(inline)]
pub use famafrench_data as data;
