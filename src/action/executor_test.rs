use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use super::*;
use crate::dispatch::Binding;
use crate::dispatch::CapturedResponse;
use crate::dispatch::MockHttpSender;
use crate::model::Action;
use crate::test_utils::fake_cluster_handle;
use crate::ActionError;

fn ok_response() -> CapturedResponse {
    CapturedResponse {
        status: 200,
        ..CapturedResponse::default()
    }
}

fn context_with(
    sender: MockHttpSender,
    binding: Binding,
) -> ActionContext {
    ActionContext::new(
        fake_cluster_handle(),
        binding,
        Arc::new(sender),
        Duration::from_millis(500),
    )
}

#[tokio::test]
async fn run_should_post_statement_to_statement_endpoint() {
    let mut sender = MockHttpSender::new();
    sender
        .expect_send()
        .withf(|call, _| {
            call.url.ends_with("/v1/statement")
                && call.body.as_deref() == Some(r#"{"sql":"CREATE TABLE t1 (id int)"}"#)
        })
        .times(1)
        .returning(|_, _| Ok(ok_response()));

    let actions = vec![Action::Execute {
        statement: "CREATE TABLE t1 (id int)".into(),
    }];
    let context = context_with(sender, Binding::default());

    run_actions(&actions, &context).await.unwrap();
}

#[tokio::test]
async fn run_should_substitute_binding_into_statements() {
    let mut sender = MockHttpSender::new();
    sender
        .expect_send()
        .withf(|call, _| call.body.as_deref() == Some(r#"{"sql":"DROP TABLE t42"}"#))
        .times(1)
        .returning(|_, _| Ok(ok_response()));

    let mut binding = Binding::default();
    binding.set("id", "42");
    let actions = vec![Action::Execute {
        statement: "DROP TABLE t{id}".into(),
    }];
    let context = context_with(sender, binding);

    run_actions(&actions, &context).await.unwrap();
}

#[tokio::test]
async fn run_should_stop_at_first_failure_and_report_its_index() {
    let mut sender = MockHttpSender::new();
    let mut calls = 0;
    sender.expect_send().times(2).returning(move |_, _| {
        calls += 1;
        if calls == 2 {
            Ok(CapturedResponse {
                status: 500,
                body: "table exists".into(),
                ..CapturedResponse::default()
            })
        } else {
            Ok(ok_response())
        }
    });

    let actions = vec![
        Action::Execute { statement: "s0".into() },
        Action::Execute { statement: "s1".into() },
        // never reached, send expectation above stays at 2
        Action::Execute { statement: "s2".into() },
    ];
    let context = context_with(sender, Binding::default());

    let err = run_actions(&actions, &context).await.unwrap_err();

    assert_eq!(err.index(), 1);
    assert!(matches!(err, ActionError::Failed { .. }));
}

#[tokio::test]
async fn insert_should_target_the_table_endpoint_with_rows() {
    let mut sender = MockHttpSender::new();
    sender
        .expect_send()
        .withf(|call, _| {
            call.url.ends_with("/v1/tables/users/rows") && call.body.as_deref() == Some(r#"[[1,"alice"]]"#)
        })
        .times(1)
        .returning(|_, _| Ok(ok_response()));

    let actions = vec![Action::Insert {
        table: "users".into(),
        rows: json!([[1, "alice"]]),
    }];
    let context = context_with(sender, Binding::default());

    run_actions(&actions, &context).await.unwrap();
}

#[tokio::test]
async fn sleep_should_not_touch_the_network() {
    let sender = MockHttpSender::new();
    let actions = vec![Action::Sleep { millis: 5 }];
    let context = context_with(sender, Binding::default());

    run_actions(&actions, &context).await.unwrap();
}

#[tokio::test]
async fn nested_http_action_should_resolve_relative_uri() {
    let mut sender = MockHttpSender::new();
    sender
        .expect_send()
        .withf(|call, _| call.url == "http://127.0.0.1:19527/v1/refresh")
        .times(1)
        .returning(|_, _| Ok(ok_response()));

    let actions = vec![Action::Http {
        method: crate::model::Method::Post,
        uri: "/v1/refresh".into(),
        body: None,
    }];
    let context = context_with(sender, Binding::default());

    run_actions(&actions, &context).await.unwrap();
}

#[tokio::test]
async fn transport_failure_should_surface_as_dispatch_action_error() {
    let mut sender = MockHttpSender::new();
    sender.expect_send().returning(|call, _| {
        Err(crate::DispatchError::Timeout {
            url: call.url.clone(),
            duration: Duration::from_millis(500),
        })
    });

    let actions = vec![Action::Execute { statement: "s0".into() }];
    let context = context_with(sender, Binding::default());

    let err = run_actions(&actions, &context).await.unwrap_err();

    assert!(matches!(err, ActionError::Dispatch { index: 0, .. }));
}
