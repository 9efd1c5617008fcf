//! Find options and results

use soulbrowser_core_types::{CountExpectation, Node};

/// Options for [`Finder::find`](crate::Finder::find).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FindOptions {
    pub count: CountExpectation,
}

impl FindOptions {
    pub fn exactly(count: usize) -> Self {
        Self {
            count: CountExpectation::Exactly(count),
        }
    }

    pub fn any() -> Self {
        Self {
            count: CountExpectation::Any,
        }
    }
}

/// Successful find.
///
/// The shape follows the requested count: `Exactly(1)` yields [`Found::One`],
/// every other expectation yields [`Found::Many`], even when it holds a single
/// node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Found {
    One(Node),
    Many(Vec<Node>),
}

impl Found {
    pub fn len(&self) -> usize {
        match self {
            Found::One(_) => 1,
            Found::Many(nodes) => nodes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The unwrapped node of a single-element find.
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Found::One(node) => Some(node),
            Found::Many(_) => None,
        }
    }

    pub fn into_node(self) -> Option<Node> {
        match self {
            Found::One(node) => Some(node),
            Found::Many(_) => None,
        }
    }

    pub fn into_nodes(self) -> Vec<Node> {
        match self {
            Found::One(node) => vec![node],
            Found::Many(nodes) => nodes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soulbrowser_core_types::{Session, SessionId};

    fn node(id: &str) -> Node {
        Node::new(Session::new(SessionId("s".to_string())), id)
    }

    #[test]
    fn test_find_options_default() {
        assert_eq!(FindOptions::default().count, CountExpectation::Exactly(1));
        assert_eq!(FindOptions::exactly(3).count, CountExpectation::Exactly(3));
        assert_eq!(FindOptions::any().count, CountExpectation::Any);
    }

    #[test]
    fn single_node_in_many_is_not_unwrapped() {
        let found = Found::Many(vec![node("a")]);
        assert_eq!(found.len(), 1);
        assert!(found.as_node().is_none());
        assert_eq!(found.into_nodes(), vec![node("a")]);
    }
}
