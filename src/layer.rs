//! Query layer facade
//!
//! Wires one driver into a finder and the default action primitives using a
//! [`QueryConfig`]. Embedding applications normally hold one of these per
//! driver connection.

use std::sync::Arc;

use action_locator::{FindOptions, Finder, Found, HtmlXPath, LocatorError, XPathTranslator};
use action_primitives::DefaultActionPrimitives;
use node_driver::Driver;
use soulbrowser_core_types::{Locator, Node, Query};
use tracing::info;

use crate::config::QueryConfig;

/// Finder plus node actions over a single driver.
pub struct QueryLayer {
    finder: Arc<Finder>,
    actions: DefaultActionPrimitives,
}

impl QueryLayer {
    pub fn new(driver: Arc<dyn Driver>, config: &QueryConfig) -> Self {
        Self::with_translator(driver, config, Arc::new(HtmlXPath))
    }

    pub fn with_translator(
        driver: Arc<dyn Driver>,
        config: &QueryConfig,
        xpath: Arc<dyn XPathTranslator>,
    ) -> Self {
        let retry = config.retry_config();
        info!(
            max_wait_ms = retry.max_wait.as_millis() as u64,
            poll_interval_ms = retry.poll_interval.as_millis() as u64,
            "Building query layer"
        );
        let finder = Arc::new(Finder::new(driver, retry));
        let actions = DefaultActionPrimitives::with_translator(finder.clone(), xpath);
        Self { finder, actions }
    }

    pub fn finder(&self) -> &Finder {
        &self.finder
    }

    /// Node actions; bring [`action_primitives::ActionPrimitives`] into scope to call them.
    pub fn actions(&self) -> &DefaultActionPrimitives {
        &self.actions
    }

    pub async fn find(
        &self,
        scope: &Locator,
        query: &Query,
        options: FindOptions,
    ) -> Result<Found, LocatorError> {
        self.finder.find(scope, query, options).await
    }

    pub async fn find_one(&self, scope: &Locator, query: &Query) -> Result<Node, LocatorError> {
        self.finder.find_one(scope, query).await
    }

    pub async fn all(&self, scope: &Locator, query: &Query) -> Result<Vec<Node>, LocatorError> {
        self.finder.all(scope, query).await
    }
}
