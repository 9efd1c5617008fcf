//! Finder - count-matching element resolution on top of the retry engine

use crate::{
    errors::LocatorError,
    retry::{RetryConfig, RetryEngine},
    types::{FindOptions, Found},
};
use node_driver::Driver;
use soulbrowser_core_types::{CountExpectation, Locator, Node, Query};
use std::sync::Arc;
use tracing::{debug, info};

/// Resolves queries into nodes through a [`Driver`], polling until the
/// requested count is met or the retry budget runs out.
pub struct Finder {
    driver: Arc<dyn Driver>,
    retry: RetryEngine,
}

impl Finder {
    pub fn new(driver: Arc<dyn Driver>, config: RetryConfig) -> Self {
        Self {
            driver,
            retry: RetryEngine::new(config),
        }
    }

    pub fn driver(&self) -> &Arc<dyn Driver> {
        &self.driver
    }

    pub fn retry_config(&self) -> RetryConfig {
        self.retry.config()
    }

    /// Find nodes matching `query` within `scope`.
    ///
    /// Returns [`Found::One`] only when exactly one node was requested.
    pub async fn find(
        &self,
        scope: &Locator,
        query: &Query,
        options: FindOptions,
    ) -> Result<Found, LocatorError> {
        debug!(scope = %scope, query = %query, count = %options.count, "Finding elements");
        let found = self
            .retry
            .run(|| self.attempt(scope, query, options.count))
            .await?;
        info!(query = %query, matches = found.len(), "Resolved elements");
        Ok(found)
    }

    /// Find the single node matching `query`.
    pub async fn find_one(&self, scope: &Locator, query: &Query) -> Result<Node, LocatorError> {
        match self.find(scope, query, FindOptions::default()).await? {
            Found::One(node) => Ok(node),
            Found::Many(nodes) => Err(LocatorError::AmbiguousMatch {
                query: query.to_string(),
                expected: CountExpectation::Exactly(1),
                found: nodes.len(),
            }),
        }
    }

    /// First node once at least one matches.
    pub async fn first(&self, scope: &Locator, query: &Query) -> Result<Node, LocatorError> {
        self.find(scope, query, FindOptions::any())
            .await?
            .into_nodes()
            .into_iter()
            .next()
            .ok_or_else(|| LocatorError::ElementNotFound {
                query: query.to_string(),
            })
    }

    /// Whatever the driver reports right now. No polling, no count check.
    pub async fn all(&self, scope: &Locator, query: &Query) -> Result<Vec<Node>, LocatorError> {
        let nodes = self.driver.find_elements(scope, query).await?;
        debug!(query = %query, matches = nodes.len(), "Listed elements");
        Ok(nodes)
    }

    /// Whether anything matches within the retry budget.
    pub async fn exists(&self, scope: &Locator, query: &Query) -> Result<bool, LocatorError> {
        match self.find(scope, query, FindOptions::any()).await {
            Ok(_) => Ok(true),
            Err(LocatorError::ElementNotFound { .. }) => Ok(false),
            Err(err) => Err(err),
        }
    }

    async fn attempt(
        &self,
        scope: &Locator,
        query: &Query,
        count: CountExpectation,
    ) -> Result<Found, LocatorError> {
        let elements = self.driver.find_elements(scope, query).await?;
        match_count(query, count, elements)
    }
}

/// Apply the count policy to one driver answer.
pub fn match_count(
    query: &Query,
    count: CountExpectation,
    mut elements: Vec<Node>,
) -> Result<Found, LocatorError> {
    match count {
        CountExpectation::Any if !elements.is_empty() => return Ok(Found::Many(elements)),
        CountExpectation::Exactly(n) if elements.len() == n => {
            if n == 1 {
                if let Some(node) = elements.pop() {
                    return Ok(Found::One(node));
                }
            }
            return Ok(Found::Many(elements));
        }
        _ => {}
    }

    if elements.is_empty() {
        Err(LocatorError::ElementNotFound {
            query: query.to_string(),
        })
    } else {
        Err(LocatorError::AmbiguousMatch {
            query: query.to_string(),
            expected: count,
            found: elements.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soulbrowser_core_types::{Session, SessionId};

    fn nodes(ids: &[&str]) -> Vec<Node> {
        let session = Session::new(SessionId("s".to_string()));
        ids.iter().map(|id| Node::new(session.clone(), *id)).collect()
    }

    fn query() -> Query {
        Query::css("li")
    }

    #[test]
    fn exactly_one_unwraps() {
        let found = match_count(&query(), CountExpectation::Exactly(1), nodes(&["a"])).unwrap();
        assert_eq!(found, Found::One(nodes(&["a"]).remove(0)));
    }

    #[test]
    fn exactly_n_returns_list() {
        let found =
            match_count(&query(), CountExpectation::Exactly(2), nodes(&["a", "b"])).unwrap();
        assert_eq!(found, Found::Many(nodes(&["a", "b"])));
    }

    #[test]
    fn any_returns_list_even_for_one() {
        let found = match_count(&query(), CountExpectation::Any, nodes(&["a"])).unwrap();
        assert_eq!(found, Found::Many(nodes(&["a"])));
    }

    #[test]
    fn exactly_zero_accepts_empty() {
        let found = match_count(&query(), CountExpectation::Exactly(0), vec![]).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn empty_is_not_found() {
        let err = match_count(&query(), CountExpectation::Exactly(2), vec![]).unwrap_err();
        assert!(matches!(err, LocatorError::ElementNotFound { .. }));

        let err = match_count(&query(), CountExpectation::Any, vec![]).unwrap_err();
        assert!(matches!(err, LocatorError::ElementNotFound { .. }));
    }

    #[test]
    fn mismatch_is_ambiguous_with_actual_count() {
        let err = match_count(&query(), CountExpectation::Exactly(1), nodes(&["a", "b", "c"]))
            .unwrap_err();
        match err {
            LocatorError::AmbiguousMatch {
                expected, found, ..
            } => {
                assert_eq!(expected, CountExpectation::Exactly(1));
                assert_eq!(found, 3);
            }
            other => panic!("unexpected error: {other}"),
        }

        let err =
            match_count(&query(), CountExpectation::Exactly(3), nodes(&["a"])).unwrap_err();
        assert_eq!(err.found_count(), Some(1));
    }
}
