#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/famafrench-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod linalg;
pub use linalg::{OlsResult, ordinary_least_squares, pseudo_inverse_symmetric, symmetric_eigen};

mod covariance;
pub use covariance::{
    CovarianceEstimator, HomoskedasticCovariance, NeweyWestConfig, NeweyWestCovariance,
    bartlett_weight,
};

mod distribution;
pub use distribution::ReferenceDistribution;

mod error;
pub use error::MathError;
