//! Shared primitives for the node/query layer.
//!
//! Sessions and nodes are opaque handles owned by the driver; this crate only
//! describes them so that locators and queries can be passed around by value.

use std::fmt;

use uuid::Uuid;

#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Driver-assigned element handle. Only meaningful within its session.
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub String);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reference to a live browser session.
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Session {
    pub id: SessionId,
}

impl Session {
    pub fn new(id: SessionId) -> Self {
        Self { id }
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session={}", self.id)
    }
}

/// Resolved DOM element handle.
///
/// Nodes are produced by the driver and never mutated afterwards; finding the
/// same element again yields a fresh value.
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Node {
    session: Session,
    id: NodeId,
}

impl Node {
    pub fn new(session: Session, id: impl Into<String>) -> Self {
        Self {
            session,
            id: NodeId(id.into()),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} node={}", self.session, self.id)
    }
}

/// Scope a query is evaluated against: the whole page or a node's subtree.
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Locator {
    Session(Session),
    Node(Node),
}

impl Locator {
    /// Session enclosing this scope.
    pub fn session(&self) -> &Session {
        match self {
            Locator::Session(session) => session,
            Locator::Node(node) => node.session(),
        }
    }
}

impl From<Session> for Locator {
    fn from(session: Session) -> Self {
        Locator::Session(session)
    }
}

impl From<Node> for Locator {
    fn from(node: Node) -> Self {
        Locator::Node(node)
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Session(session) => session.fmt(f),
            Locator::Node(node) => node.fmt(f),
        }
    }
}

/// Selector submitted to the driver.
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Query {
    Css(String),
    XPath(String),
}

impl Query {
    pub fn css(selector: impl Into<String>) -> Self {
        Query::Css(selector.into())
    }

    pub fn xpath(expression: impl Into<String>) -> Self {
        Query::XPath(expression.into())
    }

    pub fn as_str(&self) -> &str {
        match self {
            Query::Css(text) | Query::XPath(text) => text,
        }
    }

    pub fn is_xpath(&self) -> bool {
        matches!(self, Query::XPath(_))
    }
}

impl From<&str> for Query {
    fn from(selector: &str) -> Self {
        Query::Css(selector.to_string())
    }
}

impl From<String> for Query {
    fn from(selector: String) -> Self {
        Query::Css(selector)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::Css(text) => write!(f, "css({})", text),
            Query::XPath(text) => write!(f, "xpath({})", text),
        }
    }
}

/// How many matches a find requires before it succeeds.
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum CountExpectation {
    Exactly(usize),
    /// Any non-zero number of matches.
    Any,
}

impl Default for CountExpectation {
    fn default() -> Self {
        CountExpectation::Exactly(1)
    }
}

impl fmt::Display for CountExpectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountExpectation::Exactly(n) => write!(f, "{}", n),
            CountExpectation::Any => f.write_str("any"),
        }
    }
}
