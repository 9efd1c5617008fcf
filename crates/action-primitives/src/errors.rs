//! Error types for action primitives

use action_locator::LocatorError;
use node_driver::DriverError;
use thiserror::Error;

/// Errors surfaced by node actions
#[derive(Debug, Error, Clone)]
pub enum ActionError {
    /// Target could not be resolved (not found or ambiguous after waiting)
    #[error(transparent)]
    Locator(#[from] LocatorError),

    /// Driver failure while acting on a resolved node
    #[error(transparent)]
    Driver(#[from] DriverError),
}

impl ActionError {
    /// Nothing matched the target within the wait budget
    pub fn is_element_not_found(&self) -> bool {
        matches!(self, ActionError::Locator(LocatorError::ElementNotFound { .. }))
    }

    /// Too many (or too few, but not zero) targets matched
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, ActionError::Locator(LocatorError::AmbiguousMatch { .. }))
    }

    /// Get error severity level (0=low, 1=medium, 2=high, 3=critical)
    pub fn severity(&self) -> u8 {
        match self {
            ActionError::Locator(err) => err.severity(),
            ActionError::Driver(_) => 2,
        }
    }
}
