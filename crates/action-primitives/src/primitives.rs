//! Action primitives implementation
//!
//! Node actions grouped by concern:
//! 1. click - click a node or the single match of a query
//! 2. fill - set or clear the value of a fillable field
//! 3. toggle - choose radio buttons, check and uncheck checkboxes
//! 4. read - text, attributes and selection state
//!
//! Actions given a human-readable locator resolve it through the finder, so
//! they wait for the target like any other find. Actions given a node call
//! the driver once and never retry.

mod click;
mod fill;
mod read;
mod toggle;

pub use click::*;
pub use fill::*;
pub use read::*;
pub use toggle::*;

use action_locator::{Finder, HtmlXPath, XPathTranslator};
use async_trait::async_trait;
use node_driver::Driver;
use soulbrowser_core_types::{Locator, Node, Query, Session};
use std::sync::Arc;

use crate::errors::ActionError;

/// Action primitives trait
///
/// Query-based actions resolve exactly one node before acting; node-based
/// actions act on the handle directly.
#[async_trait]
pub trait ActionPrimitives: Send + Sync {
    /// Fill the field identified by id, name, placeholder or label
    async fn fill_in(&self, scope: &Locator, field: &str, value: &str)
        -> Result<Session, ActionError>;

    /// Fill an already resolved field
    async fn fill_in_node(&self, node: &Node, value: &str) -> Result<Session, ActionError>;

    /// Clear the field identified by id, name, placeholder or label
    async fn clear(&self, scope: &Locator, field: &str) -> Result<(), ActionError>;

    /// Click the radio button identified by id, name, value or label
    async fn choose(&self, scope: &Locator, radio: &str) -> Result<(), ActionError>;

    /// Check a checkbox unless it already is
    async fn check(&self, node: &Node) -> Result<(), ActionError>;

    /// Uncheck a checkbox unless it already is
    async fn uncheck(&self, node: &Node) -> Result<(), ActionError>;

    /// Check the checkbox identified by id, name, value or label
    async fn check_field(&self, scope: &Locator, checkbox: &str) -> Result<(), ActionError>;

    /// Uncheck the checkbox identified by id, name, value or label
    async fn uncheck_field(&self, scope: &Locator, checkbox: &str) -> Result<(), ActionError>;

    /// Click the single node matching `query`
    async fn click(&self, scope: &Locator, query: &Query) -> Result<Session, ActionError>;

    /// Click a resolved node
    async fn click_node(&self, node: &Node) -> Result<(), ActionError>;

    async fn text(&self, node: &Node) -> Result<String, ActionError>;

    async fn attr(&self, node: &Node, name: &str) -> Result<Option<String>, ActionError>;

    async fn selected(&self, node: &Node) -> Result<bool, ActionError>;

    async fn has_value(&self, node: &Node, value: &str) -> Result<bool, ActionError>;

    async fn has_content(&self, node: &Node, content: &str) -> Result<bool, ActionError>;

    async fn is_checked(&self, node: &Node) -> Result<bool, ActionError>;
}

/// Default implementation of action primitives
pub struct DefaultActionPrimitives {
    /// Finder used for every locator-based resolution
    finder: Arc<Finder>,

    /// XPath rules for form controls
    xpath: Arc<dyn XPathTranslator>,
}

impl DefaultActionPrimitives {
    /// Create primitives using plain HTML form rules
    pub fn new(finder: Arc<Finder>) -> Self {
        Self::with_translator(finder, Arc::new(HtmlXPath))
    }

    /// Create primitives with a custom XPath translator
    pub fn with_translator(finder: Arc<Finder>, xpath: Arc<dyn XPathTranslator>) -> Self {
        Self { finder, xpath }
    }

    pub fn finder(&self) -> &Arc<Finder> {
        &self.finder
    }

    pub fn driver(&self) -> &Arc<dyn Driver> {
        self.finder.driver()
    }

    pub fn xpath(&self) -> &dyn XPathTranslator {
        self.xpath.as_ref()
    }
}

#[async_trait]
impl ActionPrimitives for DefaultActionPrimitives {
    async fn fill_in(
        &self,
        scope: &Locator,
        field: &str,
        value: &str,
    ) -> Result<Session, ActionError> {
        execute_fill_in(self, scope, field, value).await
    }

    async fn fill_in_node(&self, node: &Node, value: &str) -> Result<Session, ActionError> {
        execute_fill_in_node(self, node, value).await
    }

    async fn clear(&self, scope: &Locator, field: &str) -> Result<(), ActionError> {
        execute_clear(self, scope, field).await
    }

    async fn choose(&self, scope: &Locator, radio: &str) -> Result<(), ActionError> {
        execute_choose(self, scope, radio).await
    }

    async fn check(&self, node: &Node) -> Result<(), ActionError> {
        execute_set_checked(self, node, true).await
    }

    async fn uncheck(&self, node: &Node) -> Result<(), ActionError> {
        execute_set_checked(self, node, false).await
    }

    async fn check_field(&self, scope: &Locator, checkbox: &str) -> Result<(), ActionError> {
        execute_set_checked_field(self, scope, checkbox, true).await
    }

    async fn uncheck_field(&self, scope: &Locator, checkbox: &str) -> Result<(), ActionError> {
        execute_set_checked_field(self, scope, checkbox, false).await
    }

    async fn click(&self, scope: &Locator, query: &Query) -> Result<Session, ActionError> {
        execute_click(self, scope, query).await
    }

    async fn click_node(&self, node: &Node) -> Result<(), ActionError> {
        execute_click_node(self, node).await
    }

    async fn text(&self, node: &Node) -> Result<String, ActionError> {
        read_text(self, node).await
    }

    async fn attr(&self, node: &Node, name: &str) -> Result<Option<String>, ActionError> {
        read_attr(self, node, name).await
    }

    async fn selected(&self, node: &Node) -> Result<bool, ActionError> {
        read_selected(self, node).await
    }

    async fn has_value(&self, node: &Node, value: &str) -> Result<bool, ActionError> {
        Ok(read_attr(self, node, "value").await?.as_deref() == Some(value))
    }

    async fn has_content(&self, node: &Node, content: &str) -> Result<bool, ActionError> {
        Ok(read_text(self, node).await? == content)
    }

    async fn is_checked(&self, node: &Node) -> Result<bool, ActionError> {
        read_selected(self, node).await
    }
}
