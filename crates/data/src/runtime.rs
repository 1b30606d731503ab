//! Blocking bridge for async clients.

use std::future::Future;

use famafrench_traits::SourceError;
use tokio::runtime::{Builder, Runtime};

/// A current-thread runtime owned by one remote source.
#[derive(Debug)]
pub(crate) struct BlockingRuntime {
    runtime: Runtime,
}

impl BlockingRuntime {
    pub(crate) fn new(source_name: &str) -> Result<Self, SourceError> {
        let runtime = Builder::new_current_thread().enable_all().build().map_err(|e| {
            SourceError::Remote {
                source_name: source_name.to_string(),
                reason: format!("failed to start runtime: {e}"),
            }
        })?;
        Ok(Self { runtime })
    }

    pub(crate) fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}
