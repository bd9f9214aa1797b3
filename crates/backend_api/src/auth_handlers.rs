use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use utils::verify_password;

use crate::{
    error::ApiError,
    extract::ApiJson,
    session::{clear_session_cookie, session_cookie, Identity, SessionContext},
    state::AppState,
    Result,
};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    fn validate(&self) -> Result<()> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(ApiError::BadRequest("email and password are required".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub identity: Identity,
}

async fn open_session(state: &AppState, identity: Identity) -> Result<impl IntoResponse> {
    let token = state.sessions.create(identity.clone()).await;
    let active = state.sessions.active_sessions().await;
    tracing::debug!(active, "session opened");
    let cookie = HeaderValue::from_str(&session_cookie(&token))
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    let mut headers = HeaderMap::new();
    headers.insert(header::SET_COOKIE, cookie);
    Ok((headers, Json(LoginResponse { token, identity })))
}

/// POST /api/auth/client/login
pub async fn client_login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<impl IntoResponse> {
    request.validate()?;

    let login = match state.ledger.find_client_login(&request.email).await? {
        Some(login) if verify_password(&request.password, &login.password_hash) => login,
        _ => {
            tracing::warn!(email = %request.email.trim(), "client login rejected");
            return Err(ApiError::InvalidCredentials);
        }
    };

    // A login whose client record is gone cannot be used.
    let client = state
        .ledger
        .fetch_client(login.client_id)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    tracing::info!(client_id = client.id, "client logged in");
    open_session(
        &state,
        Identity::Client {
            client_id: client.id,
            email: login.email,
            name: client.full_name(),
        },
    )
    .await
}

/// POST /api/auth/admin/login
pub async fn admin_login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<impl IntoResponse> {
    request.validate()?;

    let admin = match state.ledger.find_administrator(&request.email).await? {
        Some(admin) if verify_password(&request.password, &admin.password_hash) => admin,
        _ => {
            tracing::warn!(email = %request.email.trim(), "admin login rejected");
            return Err(ApiError::InvalidCredentials);
        }
    };

    tracing::info!(admin_id = admin.id, "administrator logged in");
    open_session(
        &state,
        Identity::Admin {
            admin_id: admin.id,
            email: admin.email,
            name: admin.name,
        },
    )
    .await
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    session: SessionContext,
) -> Result<impl IntoResponse> {
    state.sessions.remove(&session.token).await;
    let active = state.sessions.active_sessions().await;
    tracing::debug!(active, "session closed");

    let cookie = HeaderValue::from_str(&clear_session_cookie())
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    let mut headers = HeaderMap::new();
    headers.insert(header::SET_COOKIE, cookie);

    Ok((headers, Json(serde_json::json!({ "status": "logged_out" }))))
}

/// GET /api/auth/me
pub async fn me(session: SessionContext) -> Json<Identity> {
    Json(session.identity)
}
