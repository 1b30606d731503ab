#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/famafrench-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod local;
pub use local::{
    DEFAULT_FACTOR_FILE, DEFAULT_PRICE_FILE, LocalFactorCsv, LocalPriceCsv, parse_date,
};

mod french;
pub use french::{FRENCH_FACTORS_URL, FrenchFactorSource, parse_french_factors};

mod yahoo;
pub use yahoo::YahooPriceSource;

mod fallback;
pub use fallback::Fallback;

mod export;
pub use export::{ExportError, ReportPaths, ReportWriter};

mod runtime;
