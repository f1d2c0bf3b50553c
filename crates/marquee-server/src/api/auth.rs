//! Authentication and session endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_extra::extract::cookie::CookieJar;
use marquee_auth::service::{LoginInput, RegisterInput};
use marquee_core::mailer::Mailer;
use marquee_core::models::account::PublicAccount;
use marquee_core::repository::AccountRepository;
use serde::Deserialize;
use serde_json::{Value, json};

use super::user;
use crate::cookies::{clear_session_cookie, session_cookie};
use crate::error::ApiError;
use crate::extract::AuthSession;
use crate::state::AppState;

pub fn routes<R, M>() -> Router<AppState<R, M>>
where
    R: AccountRepository + 'static,
    M: Mailer + 'static,
{
    Router::new()
        .route("/register", post(register::<R, M>))
        .route("/login", post(login::<R, M>))
        .route("/logout", post(logout::<R, M>))
        .route("/send-verify-otp", post(send_verify_otp::<R, M>))
        .route("/verify-account", post(verify_account::<R, M>))
        .route("/is-auth", get(is_auth))
        .route("/send-reset-otp", post(send_reset_otp::<R, M>))
        .route("/reset-password", post(reset_password::<R, M>))
        .route("/get-user", get(user::data::<R, M>))
}

#[derive(Debug, Deserialize)]
struct RegisterRequest {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

async fn register<R, M>(
    State(state): State<AppState<R, M>>,
    jar: CookieJar,
    Json(body): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    R: AccountRepository + 'static,
    M: Mailer + 'static,
{
    let name = body.name.trim().to_string();
    let email = body.email.trim().to_string();
    if name.is_empty() || email.is_empty() || body.password.is_empty() {
        return Err(ApiError::bad_request("Missing details"));
    }

    let out = state
        .service
        .register(RegisterInput {
            name,
            email,
            password: body.password,
        })
        .await?;

    let jar = jar.add(session_cookie(
        out.token.clone(),
        state.service.config().session_lifetime_secs,
        state.config.production,
    ));

    Ok((
        StatusCode::CREATED,
        jar,
        Json(json!({
            "success": true,
            "user": PublicAccount::from(out.account),
            "token": out.token,
        })),
    ))
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

async fn login<R, M>(
    State(state): State<AppState<R, M>>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    R: AccountRepository + 'static,
    M: Mailer + 'static,
{
    let email = body.email.trim().to_string();
    if email.is_empty() || body.password.is_empty() {
        return Err(ApiError::bad_request("Missing email or password"));
    }

    let out = state
        .service
        .login(LoginInput {
            email,
            password: body.password,
        })
        .await?;

    let jar = jar.add(session_cookie(
        out.token.clone(),
        state.service.config().session_lifetime_secs,
        state.config.production,
    ));

    Ok((
        jar,
        Json(json!({
            "success": true,
            "message": "Logged in successfully",
            "user": PublicAccount::from(out.account),
            "token": out.token,
        })),
    ))
}

/// Sessions are stateless, so logout only clears the cookie. The old
/// token stays technically valid until it expires.
async fn logout<R, M>(State(state): State<AppState<R, M>>, jar: CookieJar) -> impl IntoResponse
where
    R: AccountRepository + 'static,
    M: Mailer + 'static,
{
    let jar = jar.add(clear_session_cookie(state.config.production));
    (
        jar,
        Json(json!({
            "success": true,
            "message": "Logged out",
        })),
    )
}

async fn send_verify_otp<R, M>(
    State(state): State<AppState<R, M>>,
    session: AuthSession,
) -> Result<Json<Value>, ApiError>
where
    R: AccountRepository + 'static,
    M: Mailer + 'static,
{
    state.service.send_verify_otp(session.account_id).await?;
    Ok(Json(json!({
        "success": true,
        "message": "OTP sent to your email",
    })))
}

#[derive(Debug, Deserialize)]
struct VerifyAccountRequest {
    #[serde(default)]
    otp: String,
}

async fn verify_account<R, M>(
    State(state): State<AppState<R, M>>,
    session: AuthSession,
    Json(body): Json<VerifyAccountRequest>,
) -> Result<Json<Value>, ApiError>
where
    R: AccountRepository + 'static,
    M: Mailer + 'static,
{
    let otp = body.otp.trim().to_string();
    if otp.is_empty() {
        return Err(ApiError::bad_request("Missing details"));
    }

    state
        .service
        .verify_account(session.account_id, &otp)
        .await?;
    Ok(Json(json!({
        "success": true,
        "message": "Email verified successfully",
    })))
}

async fn is_auth(_session: AuthSession) -> Json<Value> {
    Json(json!({ "success": true }))
}

#[derive(Debug, Deserialize)]
struct SendResetOtpRequest {
    #[serde(default)]
    email: String,
}

async fn send_reset_otp<R, M>(
    State(state): State<AppState<R, M>>,
    Json(body): Json<SendResetOtpRequest>,
) -> Result<Json<Value>, ApiError>
where
    R: AccountRepository + 'static,
    M: Mailer + 'static,
{
    let email = body.email.trim().to_string();
    if email.is_empty() {
        return Err(ApiError::bad_request("Email is required"));
    }

    state.service.send_reset_otp(&email).await?;
    Ok(Json(json!({
        "success": true,
        "message": "OTP sent to your email",
    })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResetPasswordRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    otp: String,
    #[serde(default)]
    new_password: String,
}

async fn reset_password<R, M>(
    State(state): State<AppState<R, M>>,
    Json(body): Json<ResetPasswordRequest>,
) -> Result<Json<Value>, ApiError>
where
    R: AccountRepository + 'static,
    M: Mailer + 'static,
{
    let email = body.email.trim().to_string();
    let otp = body.otp.trim().to_string();
    if email.is_empty() || otp.is_empty() || body.new_password.is_empty() {
        return Err(ApiError::bad_request("Missing fields"));
    }

    state
        .service
        .reset_password(&email, &otp, &body.new_password)
        .await?;
    Ok(Json(json!({
        "success": true,
        "message": "Password reset successfully",
    })))
}
