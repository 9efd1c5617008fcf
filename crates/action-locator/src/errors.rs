//! Error types for locator system

use node_driver::DriverError;
use soulbrowser_core_types::CountExpectation;
use thiserror::Error;

/// Locator error enumeration
#[derive(Debug, Error, Clone)]
pub enum LocatorError {
    /// Nothing matched while at least one element was required
    #[error("Element not found: {query}")]
    ElementNotFound { query: String },

    /// Non-zero number of matches that differs from the requested count
    #[error("Ambiguous match for {query}: expected {expected}, found {found}")]
    AmbiguousMatch {
        query: String,
        expected: CountExpectation,
        found: usize,
    },

    /// Driver failure, never retried
    #[error(transparent)]
    Driver(#[from] DriverError),
}

impl LocatorError {
    /// Check if the retry engine may attempt again
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            LocatorError::ElementNotFound { .. } | LocatorError::AmbiguousMatch { .. }
        )
    }

    /// Number of elements seen by the failing attempt, when known.
    pub fn found_count(&self) -> Option<usize> {
        match self {
            LocatorError::ElementNotFound { .. } => Some(0),
            LocatorError::AmbiguousMatch { found, .. } => Some(*found),
            LocatorError::Driver(_) => None,
        }
    }

    /// Get error severity (0=low, 1=medium, 2=high, 3=critical)
    pub fn severity(&self) -> u8 {
        match self {
            LocatorError::Driver(_) => 2,
            LocatorError::ElementNotFound { .. } | LocatorError::AmbiguousMatch { .. } => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use node_driver::DriverErrorKind;

    #[test]
    fn only_cardinality_failures_are_retryable() {
        let missing = LocatorError::ElementNotFound {
            query: "css(#a)".to_string(),
        };
        let ambiguous = LocatorError::AmbiguousMatch {
            query: "css(li)".to_string(),
            expected: CountExpectation::Exactly(1),
            found: 3,
        };
        let fatal = LocatorError::from(DriverError::new(DriverErrorKind::SessionNotFound));

        assert!(missing.is_retryable());
        assert!(ambiguous.is_retryable());
        assert!(!fatal.is_retryable());
        assert_eq!(ambiguous.found_count(), Some(3));
        assert_eq!(fatal.found_count(), None);
    }

    #[test]
    fn driver_errors_display_unchanged() {
        let inner = DriverError::new(DriverErrorKind::Transport).with_hint("socket closed");
        let err = LocatorError::from(inner.clone());
        assert_eq!(err.to_string(), inner.to_string());
    }
}
