#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/famafrench-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod asset;
pub use asset::{DateRange, Symbol};

mod factor;
pub use factor::{Factor, FactorPanel};

mod returns;
pub use returns::{PriceSeries, ReturnSeries};

mod panel;
pub use panel::{AlignedPanel, AlignedRow};

/// Re-export common date type.
pub type Date = chrono::NaiveDate;
