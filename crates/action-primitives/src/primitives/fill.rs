//! Fill primitive - set or clear the value of a fillable field

use crate::{errors::ActionError, primitives::DefaultActionPrimitives};
use action_locator::fillable_field_query;
use soulbrowser_core_types::{Locator, Node, Session};
use tracing::{debug, info};

/// Execute fill_in primitive
///
/// Resolves the field by id, name, placeholder or label text, sets its value
/// and returns the enclosing session.
pub async fn execute_fill_in(
    primitives: &DefaultActionPrimitives,
    scope: &Locator,
    field: &str,
    value: &str,
) -> Result<Session, ActionError> {
    info!(scope = %scope, field = field, "Executing fill_in primitive");

    let query = fillable_field_query(primitives.xpath(), field);
    let node = primitives.finder().find_one(scope, &query).await?;
    execute_fill_in_node(primitives, &node, value).await
}

/// Set the value of a resolved field.
pub async fn execute_fill_in_node(
    primitives: &DefaultActionPrimitives,
    node: &Node,
    value: &str,
) -> Result<Session, ActionError> {
    debug!(node = %node, len = value.len(), "Setting field value");
    primitives.driver().set_value(node, value).await?;
    Ok(node.session().clone())
}

/// Execute clear primitive on the field identified by `field`.
pub async fn execute_clear(
    primitives: &DefaultActionPrimitives,
    scope: &Locator,
    field: &str,
) -> Result<(), ActionError> {
    info!(scope = %scope, field = field, "Executing clear primitive");

    let query = fillable_field_query(primitives.xpath(), field);
    let node = primitives.finder().find_one(scope, &query).await?;
    primitives.driver().clear(&node).await?;
    Ok(())
}
