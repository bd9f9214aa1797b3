use async_trait::async_trait;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts, HeaderMap},
};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::ApiError;

pub const SESSION_COOKIE: &str = "bank_session";

/// Who is behind a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Identity {
    Client {
        client_id: i64,
        email: String,
        name: String,
    },
    Admin {
        admin_id: i64,
        email: String,
        name: String,
    },
}

/// Opaque server-side sessions keyed by a random token.
/// No expiry: a session lives until logout or restart.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, Identity>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self, identity: Identity) -> String {
        let token = Uuid::new_v4().simple().to_string();
        self.sessions.write().await.insert(token.clone(), identity);
        token
    }

    pub async fn get(&self, token: &str) -> Option<Identity> {
        self.sessions.read().await.get(token).cloned()
    }

    pub async fn remove(&self, token: &str) -> Option<Identity> {
        self.sessions.write().await.remove(token)
    }

    pub async fn active_sessions(&self) -> usize {
        self.sessions.read().await.len()
    }
}

pub fn session_cookie(token: &str) -> String {
    format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, token)
}

pub fn clear_session_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", SESSION_COOKIE)
}

/// Token from the session cookie, or from an `Authorization: Bearer` header.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let from_cookie = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, token)| token.trim().to_string());

    from_cookie.filter(|t| !t.is_empty()).or_else(|| {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(|token| token.trim().to_string())
            .filter(|t| !t.is_empty())
    })
}

/// Identity of the caller, resolved per request.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub token: String,
    pub identity: Identity,
}

#[async_trait]
impl<S> FromRequestParts<S> for SessionContext
where
    SessionStore: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = session_token(&parts.headers).ok_or(ApiError::Unauthorized)?;
        let store = SessionStore::from_ref(state);
        let identity = store.get(&token).await.ok_or(ApiError::Unauthorized)?;
        Ok(SessionContext { token, identity })
    }
}

/// A logged-in client.
#[derive(Debug, Clone)]
pub struct ClientSession {
    pub client_id: i64,
    pub email: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for ClientSession
where
    SessionStore: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match SessionContext::from_request_parts(parts, state).await?.identity {
            Identity::Client {
                client_id, email, ..
            } => Ok(ClientSession { client_id, email }),
            Identity::Admin { .. } => Err(ApiError::Forbidden("client session required".to_string())),
        }
    }
}

/// A logged-in administrator.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub admin_id: i64,
    pub email: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminSession
where
    SessionStore: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match SessionContext::from_request_parts(parts, state).await?.identity {
            Identity::Admin { admin_id, email, .. } => Ok(AdminSession { admin_id, email }),
            Identity::Client { .. } => {
                Err(ApiError::Forbidden("administrator session required".to_string()))
            }
        }
    }
}
