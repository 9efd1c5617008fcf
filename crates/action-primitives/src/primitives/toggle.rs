//! Toggle primitives - radio buttons and checkboxes

use crate::{errors::ActionError, primitives::DefaultActionPrimitives};
use action_locator::{checkbox_query, radio_button_query};
use soulbrowser_core_types::{Locator, Node};
use tracing::{debug, info};

use super::{execute_click_node, read_selected};

/// Execute choose primitive: click the radio button identified by `radio`.
pub async fn execute_choose(
    primitives: &DefaultActionPrimitives,
    scope: &Locator,
    radio: &str,
) -> Result<(), ActionError> {
    info!(scope = %scope, radio = radio, "Executing choose primitive");

    let query = radio_button_query(primitives.xpath(), radio);
    let node = primitives.finder().find_one(scope, &query).await?;
    execute_click_node(primitives, &node).await
}

/// Bring a checkbox into the `checked` state.
///
/// Reads the current state first and clicks only when it differs, so calling
/// this repeatedly clicks at most once.
pub async fn execute_set_checked(
    primitives: &DefaultActionPrimitives,
    node: &Node,
    checked: bool,
) -> Result<(), ActionError> {
    if read_selected(primitives, node).await? == checked {
        debug!(node = %node, checked = checked, "Checkbox already in requested state");
        return Ok(());
    }
    execute_click_node(primitives, node).await
}

/// Resolve the checkbox identified by `checkbox`, then toggle as needed.
pub async fn execute_set_checked_field(
    primitives: &DefaultActionPrimitives,
    scope: &Locator,
    checkbox: &str,
    checked: bool,
) -> Result<(), ActionError> {
    info!(
        scope = %scope,
        checkbox = checkbox,
        checked = checked,
        "Executing check primitive"
    );

    let query = checkbox_query(primitives.xpath(), checkbox);
    let node = primitives.finder().find_one(scope, &query).await?;
    execute_set_checked(primitives, &node, checked).await
}
