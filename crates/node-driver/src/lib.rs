//! Driver port for the node/query layer.
//!
//! The driver owns the wire transport to the browser. Higher layers only see
//! the [`Driver`] trait: a single polymorphic `find_elements` entry point that
//! accepts any [`Locator`] scope, plus single-shot element primitives. None of
//! these calls retry; polling is the locator layer's job.

use async_trait::async_trait;
use soulbrowser_core_types::{Locator, Node, Query};

pub use error::{DriverError, DriverErrorKind};

#[cfg(any(test, feature = "stub"))]
pub mod stub;

pub mod error {
    use serde::{Deserialize, Serialize};
    use std::fmt;
    use thiserror::Error;

    /// High-level error categories surfaced by a driver.
    #[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
    pub enum DriverErrorKind {
        #[error("session not found")]
        SessionNotFound,
        #[error("stale element reference")]
        StaleElement,
        #[error("invalid selector")]
        InvalidSelector,
        #[error("driver transport failure")]
        Transport,
        #[error("internal error")]
        Internal,
    }

    /// Error returned by any driver call. Always fatal to the caller.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct DriverError {
        pub kind: DriverErrorKind,
        pub hint: Option<String>,
        pub data: Option<serde_json::Value>,
    }

    impl fmt::Display for DriverError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.kind)?;
            if let Some(hint) = &self.hint {
                write!(f, ": {}", hint)?;
            }
            Ok(())
        }
    }

    impl std::error::Error for DriverError {}

    impl DriverError {
        pub fn new(kind: DriverErrorKind) -> Self {
            Self {
                kind,
                hint: None,
                data: None,
            }
        }

        pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
            self.hint = Some(hint.into());
            self
        }

        pub fn with_data(mut self, data: serde_json::Value) -> Self {
            self.data = Some(data);
            self
        }
    }
}

/// Browser driver consumed by the finder and the action primitives.
#[async_trait]
pub trait Driver: Send + Sync {
    /// Resolve `query` within `scope`. Zero matches is `Ok(vec![])`, never an error.
    async fn find_elements(&self, scope: &Locator, query: &Query)
        -> Result<Vec<Node>, DriverError>;

    async fn click(&self, node: &Node) -> Result<(), DriverError>;

    async fn set_value(&self, node: &Node, value: &str) -> Result<(), DriverError>;

    async fn clear(&self, node: &Node) -> Result<(), DriverError>;

    async fn text(&self, node: &Node) -> Result<String, DriverError>;

    /// Attribute value, or `None` when the element does not carry it.
    async fn attribute(&self, node: &Node, name: &str) -> Result<Option<String>, DriverError>;

    async fn selected(&self, node: &Node) -> Result<bool, DriverError>;
}
