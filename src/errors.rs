//! Error handling module
//!
//! Unifies the errors of the query layer crates for embedding applications.

use action_locator::LocatorError;
use action_primitives::ActionError;
use node_driver::DriverError;
use thiserror::Error;

use crate::config::ConfigError;

/// Top-level error of the query layer
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Locator(#[from] LocatorError),

    #[error(transparent)]
    Action(#[from] ActionError),

    #[error(transparent)]
    Driver(#[from] DriverError),

    #[error("failed to initialise tracing: {0}")]
    Telemetry(String),
}

impl QueryError {
    /// Nothing matched within the wait budget, whichever layer reported it.
    pub fn is_element_not_found(&self) -> bool {
        match self {
            QueryError::Locator(err) => matches!(err, LocatorError::ElementNotFound { .. }),
            QueryError::Action(err) => err.is_element_not_found(),
            _ => false,
        }
    }

    /// Match count never settled on the requested count.
    pub fn is_ambiguous(&self) -> bool {
        match self {
            QueryError::Locator(err) => matches!(err, LocatorError::AmbiguousMatch { .. }),
            QueryError::Action(err) => err.is_ambiguous(),
            _ => false,
        }
    }
}
