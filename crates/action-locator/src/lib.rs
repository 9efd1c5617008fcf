//! L3 Locator - bounded-retry element resolution
//!
//! This crate turns declarative queries into concrete nodes:
//! - Retry engine polling the driver on a monotonic clock
//! - Finder applying the count-matching policy per attempt
//! - XPath translation for form fields, radio buttons and checkboxes

pub mod errors;
pub mod finder;
pub mod retry;
pub mod types;
pub mod xpath;

pub use errors::*;
pub use finder::*;
pub use retry::*;
pub use types::*;
pub use xpath::*;
