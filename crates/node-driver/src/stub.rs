//! In-memory scripted driver.
//!
//! Answers to `find_elements` follow a per-query script: either a timeline
//! keyed on elapsed monotonic time since the driver was built, or a sequence
//! keyed on how many times the query has been asked. Every call is recorded so
//! tests can assert on exactly what reached the driver.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use soulbrowser_core_types::{Locator, Node, NodeId, Query, Session};
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

use crate::{Driver, DriverError, DriverErrorKind};

/// A call that reached the driver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DriverCall {
    FindElements { scope: Locator, query: Query },
    Click(NodeId),
    SetValue(NodeId, String),
    Clear(NodeId),
    Text(NodeId),
    Attribute(NodeId, String),
    Selected(NodeId),
}

#[derive(Clone, Debug)]
enum Script {
    /// `(offset, ids)` steps; the latest step whose offset has elapsed wins.
    Timeline(Vec<(Duration, Vec<String>)>),
    /// One answer per call, repeating the last once exhausted.
    Sequence { answers: Vec<Vec<String>>, asked: usize },
}

impl Script {
    fn answer(&mut self, elapsed: Duration) -> Vec<String> {
        match self {
            Script::Timeline(steps) => steps
                .iter()
                .rev()
                .find(|(offset, _)| *offset <= elapsed)
                .map(|(_, ids)| ids.clone())
                .unwrap_or_default(),
            Script::Sequence { answers, asked } => {
                let idx = (*asked).min(answers.len().saturating_sub(1));
                *asked += 1;
                answers.get(idx).cloned().unwrap_or_default()
            }
        }
    }
}

#[derive(Default)]
struct State {
    scripts: HashMap<Query, Script>,
    fallback: Option<Script>,
    calls: Vec<DriverCall>,
    texts: HashMap<NodeId, String>,
    attributes: HashMap<(NodeId, String), String>,
    checkboxes: HashMap<NodeId, bool>,
    fatal: Option<DriverError>,
}

/// Scripted [`Driver`] for tests.
pub struct ScriptedDriver {
    session: Session,
    started: Instant,
    state: Mutex<State>,
}

impl ScriptedDriver {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            started: Instant::now(),
            state: Mutex::new(State::default()),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Always answer `query` with `ids`, replacing any earlier script.
    pub fn respond(mut self, query: impl Into<Query>, ids: &[&str]) -> Self {
        self.state
            .get_mut()
            .scripts
            .insert(query.into(), Script::Timeline(vec![(Duration::ZERO, owned(ids))]));
        self
    }

    /// Switch the answer for `query` to `ids` once `offset` has elapsed since
    /// construction. Earlier answers stay in effect until then.
    pub fn respond_after(
        mut self,
        query: impl Into<Query>,
        offset: Duration,
        ids: &[&str],
    ) -> Self {
        let scripts = &mut self.state.get_mut().scripts;
        let query = query.into();
        let step = (offset, owned(ids));
        match scripts.get_mut(&query) {
            Some(Script::Timeline(steps)) => {
                steps.push(step);
                steps.sort_by_key(|(offset, _)| *offset);
            }
            Some(script) => *script = Script::Timeline(vec![step]),
            None => {
                scripts.insert(query, Script::Timeline(vec![step]));
            }
        }
        self
    }

    /// Answer the n-th call for `query` with the n-th entry of `answers`.
    pub fn respond_sequence(mut self, query: impl Into<Query>, answers: &[&[&str]]) -> Self {
        let answers = answers.iter().map(|ids| owned(ids)).collect();
        self.state
            .get_mut()
            .scripts
            .insert(query.into(), Script::Sequence { answers, asked: 0 });
        self
    }

    /// Answer for any query without its own script.
    pub fn respond_to_any(mut self, ids: &[&str]) -> Self {
        self.state.get_mut().fallback =
            Some(Script::Timeline(vec![(Duration::ZERO, owned(ids))]));
        self
    }

    pub fn with_text(mut self, id: &str, text: &str) -> Self {
        self.state
            .get_mut()
            .texts
            .insert(NodeId(id.to_string()), text.to_string());
        self
    }

    pub fn with_attribute(mut self, id: &str, name: &str, value: &str) -> Self {
        self.state
            .get_mut()
            .attributes
            .insert((NodeId(id.to_string()), name.to_string()), value.to_string());
        self
    }

    /// Register a checkbox; clicking it flips its selected state.
    pub fn with_checkbox(mut self, id: &str, checked: bool) -> Self {
        self.state
            .get_mut()
            .checkboxes
            .insert(NodeId(id.to_string()), checked);
        self
    }

    /// Make every subsequent call fail with `error`.
    pub async fn fail_all(&self, error: DriverError) {
        self.state.lock().await.fatal = Some(error);
    }

    pub async fn calls(&self) -> Vec<DriverCall> {
        self.state.lock().await.calls.clone()
    }

    pub async fn find_count(&self) -> usize {
        self.state
            .lock()
            .await
            .calls
            .iter()
            .filter(|call| matches!(call, DriverCall::FindElements { .. }))
            .count()
    }

    pub async fn clicks(&self, id: &str) -> usize {
        self.state
            .lock()
            .await
            .calls
            .iter()
            .filter(|call| matches!(call, DriverCall::Click(node) if node.0 == id))
            .count()
    }

    fn node(&self, id: String) -> Node {
        Node::new(self.session.clone(), id)
    }

    async fn record(
        &self,
        call: DriverCall,
    ) -> Result<tokio::sync::MutexGuard<'_, State>, DriverError> {
        let mut state = self.state.lock().await;
        state.calls.push(call);
        if let Some(err) = &state.fatal {
            return Err(err.clone());
        }
        Ok(state)
    }
}

fn owned(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

#[async_trait]
impl Driver for ScriptedDriver {
    async fn find_elements(
        &self,
        scope: &Locator,
        query: &Query,
    ) -> Result<Vec<Node>, DriverError> {
        let elapsed = self.started.elapsed();
        let mut guard = self
            .record(DriverCall::FindElements {
                scope: scope.clone(),
                query: query.clone(),
            })
            .await?;
        let state = &mut *guard;

        let ids = match state.scripts.get_mut(query) {
            Some(script) => script.answer(elapsed),
            None => state
                .fallback
                .as_mut()
                .map(|script| script.answer(elapsed))
                .unwrap_or_default(),
        };
        debug!(query = %query, matches = ids.len(), "scripted find_elements");
        Ok(ids.into_iter().map(|id| self.node(id)).collect())
    }

    async fn click(&self, node: &Node) -> Result<(), DriverError> {
        let mut state = self.record(DriverCall::Click(node.id().clone())).await?;
        if let Some(checked) = state.checkboxes.get_mut(node.id()) {
            *checked = !*checked;
        }
        Ok(())
    }

    async fn set_value(&self, node: &Node, value: &str) -> Result<(), DriverError> {
        let mut state = self
            .record(DriverCall::SetValue(node.id().clone(), value.to_string()))
            .await?;
        state
            .attributes
            .insert((node.id().clone(), "value".to_string()), value.to_string());
        Ok(())
    }

    async fn clear(&self, node: &Node) -> Result<(), DriverError> {
        let mut state = self.record(DriverCall::Clear(node.id().clone())).await?;
        state
            .attributes
            .insert((node.id().clone(), "value".to_string()), String::new());
        Ok(())
    }

    async fn text(&self, node: &Node) -> Result<String, DriverError> {
        let state = self.record(DriverCall::Text(node.id().clone())).await?;
        Ok(state.texts.get(node.id()).cloned().unwrap_or_default())
    }

    async fn attribute(&self, node: &Node, name: &str) -> Result<Option<String>, DriverError> {
        let state = self
            .record(DriverCall::Attribute(node.id().clone(), name.to_string()))
            .await?;
        Ok(state
            .attributes
            .get(&(node.id().clone(), name.to_string()))
            .cloned())
    }

    async fn selected(&self, node: &Node) -> Result<bool, DriverError> {
        let state = self.record(DriverCall::Selected(node.id().clone())).await?;
        match state.checkboxes.get(node.id()) {
            Some(checked) => Ok(*checked),
            None => Err(DriverError::new(DriverErrorKind::StaleElement)
                .with_hint(format!("no selectable element {}", node.id()))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soulbrowser_core_types::SessionId;
    use tokio_test::{assert_err, assert_ok};

    fn session() -> Session {
        Session::new(SessionId("stub".to_string()))
    }

    #[tokio::test(start_paused = true)]
    async fn timeline_follows_elapsed_time() {
        let driver = ScriptedDriver::new(session())
            .respond("#late", &[])
            .respond_after("#late", Duration::from_millis(100), &["late"]);
        let scope = Locator::from(session());
        let query = Query::from("#late");

        assert!(driver.find_elements(&scope, &query).await.unwrap().is_empty());
        tokio::time::sleep(Duration::from_millis(100)).await;
        let found = driver.find_elements(&scope, &query).await.unwrap();
        assert_eq!(found, vec![Node::new(session(), "late")]);
    }

    #[tokio::test]
    async fn sequence_repeats_last_answer() {
        let driver = ScriptedDriver::new(session()).respond_sequence("li", &[&[], &["a", "b"]]);
        let scope = Locator::from(session());
        let query = Query::from("li");

        assert_eq!(driver.find_elements(&scope, &query).await.unwrap().len(), 0);
        assert_eq!(driver.find_elements(&scope, &query).await.unwrap().len(), 2);
        assert_eq!(driver.find_elements(&scope, &query).await.unwrap().len(), 2);
        assert_eq!(driver.find_count().await, 3);
    }

    #[tokio::test]
    async fn unknown_queries_return_empty() {
        let driver = ScriptedDriver::new(session());
        let found = driver
            .find_elements(&Locator::from(session()), &Query::xpath("//nothing"))
            .await;
        assert_eq!(assert_ok!(found), vec![]);
    }

    #[tokio::test]
    async fn clicking_a_checkbox_flips_it() {
        let driver = ScriptedDriver::new(session()).with_checkbox("agree", false);
        let node = Node::new(session(), "agree");

        assert!(!driver.selected(&node).await.unwrap());
        driver.click(&node).await.unwrap();
        assert!(driver.selected(&node).await.unwrap());
        assert_eq!(driver.clicks("agree").await, 1);
    }

    #[tokio::test]
    async fn fail_all_poisons_every_call() {
        let driver = ScriptedDriver::new(session()).respond("a", &["a"]);
        driver
            .fail_all(DriverError::new(DriverErrorKind::SessionNotFound))
            .await;
        let err = assert_err!(
            driver
                .find_elements(&Locator::from(session()), &Query::from("a"))
                .await
        );
        assert_eq!(err.kind, DriverErrorKind::SessionNotFound);
    }
}
