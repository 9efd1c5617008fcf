//! Read primitives - passthrough accessors on resolved nodes

use crate::{errors::ActionError, primitives::DefaultActionPrimitives};
use soulbrowser_core_types::Node;

pub async fn read_text(
    primitives: &DefaultActionPrimitives,
    node: &Node,
) -> Result<String, ActionError> {
    Ok(primitives.driver().text(node).await?)
}

pub async fn read_attr(
    primitives: &DefaultActionPrimitives,
    node: &Node,
    name: &str,
) -> Result<Option<String>, ActionError> {
    Ok(primitives.driver().attribute(node, name).await?)
}

pub async fn read_selected(
    primitives: &DefaultActionPrimitives,
    node: &Node,
) -> Result<bool, ActionError> {
    Ok(primitives.driver().selected(node).await?)
}
