//! L3 Action Primitives - actions on resolved nodes
//!
//! This crate provides the node action surface of the query layer:
//! - click, fill_in, clear, choose, check and uncheck
//! - passthrough reads: text, attributes, selection state
//! - label/name based resolution through the locator's finder and XPath rules

pub mod errors;
mod primitives;

pub use errors::*;
pub use primitives::*;
