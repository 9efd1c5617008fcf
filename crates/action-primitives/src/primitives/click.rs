//! Click primitive - click a node or the single match of a query

use crate::{errors::ActionError, primitives::DefaultActionPrimitives};
use soulbrowser_core_types::{Locator, Node, Query, Session};
use tracing::{debug, info};

/// Execute click primitive
///
/// Steps:
/// 1. Resolve exactly one node for `query` within `scope` (waits for it)
/// 2. Click it through the driver
/// 3. Return the enclosing session for chaining
pub async fn execute_click(
    primitives: &DefaultActionPrimitives,
    scope: &Locator,
    query: &Query,
) -> Result<Session, ActionError> {
    info!(scope = %scope, query = %query, "Executing click primitive");

    let node = primitives.finder().find_one(scope, query).await?;
    execute_click_node(primitives, &node).await?;

    Ok(scope.session().clone())
}

/// Click a resolved node. Single driver call, no retry.
pub async fn execute_click_node(
    primitives: &DefaultActionPrimitives,
    node: &Node,
) -> Result<(), ActionError> {
    debug!(node = %node, "Clicking node");
    primitives.driver().click(node).await?;
    Ok(())
}
