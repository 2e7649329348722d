use std::collections::BTreeMap;
use std::time::Duration;

use tokio::time::sleep;
use tracing::debug;

use super::ActionContext;
use crate::dispatch::substitute;
use crate::dispatch::CapturedResponse;
use crate::dispatch::HttpCall;
use crate::model::Action;
use crate::model::Method;
use crate::ActionError;

/// Execute an ordered action sequence, stopping at the first failure.
///
/// Each primitive either succeeds silently or fails with the primitive's
/// index and cause. Already-produced side effects are left in place;
/// tearDown is the only mechanism trusted to undo state.
pub async fn run_actions(
    actions: &[Action],
    context: &ActionContext,
) -> std::result::Result<(), ActionError> {
    for (index, action) in actions.iter().enumerate() {
        debug!("running action #{} ({})", index, action.kind());
        run_one(index, action, context).await?;
    }
    Ok(())
}

async fn run_one(
    index: usize,
    action: &Action,
    context: &ActionContext,
) -> std::result::Result<(), ActionError> {
    let kind = action.kind();
    match action {
        Action::Execute { statement } => {
            let statement = resolve_template(index, kind, statement, context)?;
            let body = serde_json::json!({ "sql": statement }).to_string();
            let response = post_json(context, context.handle.statement_url(), body, index, kind).await?;
            ensure_success(index, kind, &response)
        }

        Action::Insert { table, rows } => {
            let table = resolve_template(index, kind, table, context)?;
            let body = resolve_template(index, kind, &rows.to_string(), context)?;
            let response =
                post_json(context, context.handle.insert_url(&table), body, index, kind).await?;
            ensure_success(index, kind, &response)
        }

        Action::Sleep { millis } => {
            sleep(Duration::from_millis(*millis)).await;
            Ok(())
        }

        Action::Http { method, uri, body } => {
            let uri = resolve_template(index, kind, uri, context)?;
            let body = match body {
                Some(template) => Some(resolve_template(index, kind, template, context)?),
                None => None,
            };
            let call = HttpCall {
                method: *method,
                url: context.handle.resolve_url(&uri),
                headers: BTreeMap::new(),
                body,
            };
            let response = send(context, call, index, kind).await?;
            ensure_success(index, kind, &response)
        }
    }
}

async fn post_json(
    context: &ActionContext,
    url: String,
    body: String,
    index: usize,
    kind: &'static str,
) -> std::result::Result<CapturedResponse, ActionError> {
    let call = HttpCall {
        method: Method::Post,
        url,
        headers: [("content-type".to_string(), "application/json".to_string())]
            .into_iter()
            .collect(),
        body: Some(body),
    };
    send(context, call, index, kind).await
}

async fn send(
    context: &ActionContext,
    call: HttpCall,
    index: usize,
    kind: &'static str,
) -> std::result::Result<CapturedResponse, ActionError> {
    context
        .sender
        .send(&call, context.timeout)
        .await
        .map_err(|source| ActionError::Dispatch {
            index,
            kind,
            source,
        })
}

fn resolve_template(
    index: usize,
    kind: &'static str,
    template: &str,
    context: &ActionContext,
) -> std::result::Result<String, ActionError> {
    substitute(template, &context.binding).map_err(|name| ActionError::Failed {
        index,
        kind,
        cause: format!("no binding for placeholder `{{{}}}`", name),
    })
}

fn ensure_success(
    index: usize,
    kind: &'static str,
    response: &CapturedResponse,
) -> std::result::Result<(), ActionError> {
    if response.status >= 300 {
        return Err(ActionError::Failed {
            index,
            kind,
            cause: format!("status {}: {}", response.status, response.body),
        });
    }
    Ok(())
}
