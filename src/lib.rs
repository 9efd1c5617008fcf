//! SoulBrowser query layer
//!
//! Resolves CSS/XPath queries against a browser session into node handles,
//! polling while the page renders, and exposes actions on those nodes.
//!
//! The member crates carry the pieces:
//! - `soulbrowser-core-types`: sessions, nodes, locators, queries
//! - `node-driver`: the driver port
//! - `action-locator`: retry engine, finder, XPath rules
//! - `action-primitives`: click, fill, check and read actions

pub mod config;
pub mod errors;
pub mod layer;
pub mod telemetry;

pub use config::{load_configuration, QueryConfig};
pub use errors::QueryError;
pub use layer::QueryLayer;
pub use telemetry::{init_tracing, LogFormat};

pub use action_locator::{FindOptions, Finder, Found, LocatorError, RetryConfig};
pub use action_primitives::{ActionError, ActionPrimitives, DefaultActionPrimitives};
pub use node_driver::{Driver, DriverError, DriverErrorKind};
pub use soulbrowser_core_types::{
    CountExpectation, Locator, Node, NodeId, Query, Session, SessionId,
};
