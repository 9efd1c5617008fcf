//! End-to-end flows through the query layer facade.
//!
//! Run with: cargo test --test query_layer

use std::sync::Arc;
use std::time::Duration;

use action_locator::{HtmlXPath, XPathTranslator};
use anyhow::Result;
use node_driver::stub::{DriverCall, ScriptedDriver};
use soulbrowser_query::{
    ActionPrimitives, CountExpectation, FindOptions, Found, Locator, Node, NodeId, Query,
    QueryConfig, QueryError, QueryLayer, Session, SessionId,
};
use tokio::time::Instant;
use tokio_test::{assert_err, assert_ok};

fn session() -> Session {
    Session::new(SessionId("layer".to_string()))
}

fn config(max_wait_time_ms: i64) -> QueryConfig {
    QueryConfig {
        max_wait_time_ms,
        ..QueryConfig::default()
    }
}

#[tokio::test(start_paused = true)]
async fn login_form_flow() -> Result<()> {
    let username = Query::xpath(HtmlXPath.fillable_field("Username"));
    let password = Query::xpath(HtmlXPath.fillable_field("Password"));
    let remember = Query::xpath(HtmlXPath.checkbox("Remember me"));
    let driver = Arc::new(
        ScriptedDriver::new(session())
            .respond(username.clone(), &[])
            .respond_after(username, Duration::from_millis(60), &["user"])
            .respond(password, &["pass"])
            .respond(remember, &["remember"])
            .with_checkbox("remember", false)
            .respond("button[type=submit]", &["submit"]),
    );
    let layer = QueryLayer::new(driver.clone(), &config(1_000));
    let page: Locator = session().into();

    let returned = layer.actions().fill_in(&page, "Username", "alice").await?;
    assert_eq!(returned, session());
    layer.actions().fill_in(&page, "Password", "s3cret").await?;
    layer.actions().check_field(&page, "Remember me").await?;
    layer
        .actions()
        .click(&page, &Query::css("button[type=submit]"))
        .await?;

    let calls = driver.calls().await;
    assert!(calls.contains(&DriverCall::SetValue(
        NodeId("user".to_string()),
        "alice".to_string()
    )));
    assert!(calls.contains(&DriverCall::SetValue(
        NodeId("pass".to_string()),
        "s3cret".to_string()
    )));
    assert_eq!(driver.clicks("remember").await, 1);
    assert_eq!(driver.clicks("submit").await, 1);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn configured_budget_bounds_the_wait() -> Result<()> {
    let driver = Arc::new(ScriptedDriver::new(session()));
    let layer = QueryLayer::new(driver.clone(), &config(400));
    let started = Instant::now();

    let err = assert_err!(layer.find_one(&session().into(), &Query::css("#never")).await);

    assert!(QueryError::from(err).is_element_not_found());
    assert!(started.elapsed() >= Duration::from_millis(400));
    assert!(started.elapsed() < Duration::from_millis(425));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn negative_budget_is_single_attempt() -> Result<()> {
    let driver = Arc::new(ScriptedDriver::new(session()));
    let layer = QueryLayer::new(driver.clone(), &config(-1));

    assert_eq!(layer.finder().retry_config().max_wait, Duration::ZERO);
    let err = assert_err!(
        layer
            .find(&session().into(), &Query::css("li"), FindOptions::any())
            .await
    );

    assert!(QueryError::from(err).is_element_not_found());
    assert_eq!(driver.find_count().await, 1);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn return_shape_follows_requested_count() -> Result<()> {
    let driver = Arc::new(
        ScriptedDriver::new(session())
            .respond("h1", &["title"])
            .respond("li", &["a", "b"]),
    );
    let layer = QueryLayer::new(driver.clone(), &config(100));
    let page: Locator = session().into();

    let one = layer.find(&page, &Query::css("h1"), FindOptions::default()).await?;
    assert_eq!(one.into_node(), Some(Node::new(session(), "title")));

    let any = layer.find(&page, &Query::css("h1"), FindOptions::any()).await?;
    assert_eq!(any, Found::Many(vec![Node::new(session(), "title")]));
    assert_eq!(any.into_node(), None);

    let two = layer
        .find(
            &page,
            &Query::css("li"),
            FindOptions {
                count: CountExpectation::Exactly(2),
            },
        )
        .await?;
    assert_eq!(two.into_nodes().len(), 2);

    assert!(assert_ok!(layer.all(&page, &Query::css("p")).await).is_empty());
    Ok(())
}
