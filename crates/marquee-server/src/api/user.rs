//! User profile endpoints.

use axum::extract::{Query, State};
use axum::routing::{get, put};
use axum::{Json, Router};
use marquee_core::mailer::Mailer;
use marquee_core::models::account::PublicAccount;
use marquee_core::repository::{AccountRepository, Pagination};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::ApiError;
use crate::extract::AuthSession;
use crate::state::AppState;

pub fn routes<R, M>() -> Router<AppState<R, M>>
where
    R: AccountRepository + 'static,
    M: Mailer + 'static,
{
    Router::new()
        .route("/data", get(data::<R, M>))
        .route("/update-name", put(update_name::<R, M>))
        .route("/all", get(all::<R, M>))
        .route("/count", get(count::<R, M>))
}

/// Also mounted as `GET /api/auth/get-user`.
pub async fn data<R, M>(
    State(state): State<AppState<R, M>>,
    session: AuthSession,
) -> Result<Json<Value>, ApiError>
where
    R: AccountRepository + 'static,
    M: Mailer + 'static,
{
    let account = state.service.account_data(session.account_id).await?;
    Ok(Json(json!({
        "success": true,
        "userData": PublicAccount::from(account),
    })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateNameRequest {
    #[serde(default)]
    new_name: String,
}

async fn update_name<R, M>(
    State(state): State<AppState<R, M>>,
    session: AuthSession,
    Json(body): Json<UpdateNameRequest>,
) -> Result<Json<Value>, ApiError>
where
    R: AccountRepository + 'static,
    M: Mailer + 'static,
{
    let account = state
        .service
        .update_name(session.account_id, &body.new_name)
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Name updated successfully",
        "userData": PublicAccount::from(account),
    })))
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    #[serde(default)]
    offset: u64,
    #[serde(default = "default_limit")]
    limit: u64,
}

fn default_limit() -> u64 {
    Pagination::default().limit
}

async fn all<R, M>(
    State(state): State<AppState<R, M>>,
    _session: AuthSession,
    Query(query): Query<ListQuery>,
) -> Result<Json<Value>, ApiError>
where
    R: AccountRepository + 'static,
    M: Mailer + 'static,
{
    let page = state
        .service
        .list_accounts(Pagination {
            offset: query.offset,
            limit: query.limit,
        })
        .await?;

    let users: Vec<PublicAccount> = page.items.into_iter().map(PublicAccount::from).collect();
    Ok(Json(json!({
        "success": true,
        "count": page.total,
        "users": users,
    })))
}

async fn count<R, M>(
    State(state): State<AppState<R, M>>,
    _session: AuthSession,
) -> Result<Json<Value>, ApiError>
where
    R: AccountRepository + 'static,
    M: Mailer + 'static,
{
    let count = state.service.count_accounts().await?;
    Ok(Json(json!({
        "success": true,
        "count": count,
    })))
}
