#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/famafrench-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod returns;
pub use returns::simple_returns;

mod align;
pub use align::{ASSET_RETURN_COLUMN, DATE_COLUMN, align_panel};

mod regression;
pub use regression::{
    Coefficient, CovarianceType, FittedModel, N_PARAMS, RegressionConfig, Term,
    ThreeFactorRegression,
};

mod summary;
pub use summary::{SummaryRecord, TRADING_DAYS_PER_YEAR, annualize_alpha};

mod pipeline;
pub use pipeline::{Ff3Config, Ff3Estimate, Ff3Pipeline};

mod error;
pub use error::ModelError;

/// Re-export commonly used types.
pub mod prelude {
    pub use famafrench_math::{NeweyWestConfig, ReferenceDistribution};

    pub use super::{
        CovarianceType, Ff3Config, Ff3Pipeline, ModelError, RegressionConfig, SummaryRecord,
    };
}
