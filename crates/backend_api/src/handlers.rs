use assistant::AssistantReply;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use ledger_engine::{category_averages, monthly_rollup, score_client, TransactionFilter};
use models::{CategoryAverage, Client, MonthlyAggregate, ScoreResult, Transaction};
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, extract::ApiJson, state::AppState, Result};

/// Query string shared by the ledger analytics endpoints.
/// Values stay raw strings so malformed input gets our own validation error.
#[derive(Debug, Default, Deserialize)]
pub struct LedgerQuery {
    pub start: Option<String>,
    pub end: Option<String>,
    pub client_id: Option<String>,
}

impl LedgerQuery {
    pub fn to_filter(&self) -> Result<TransactionFilter> {
        Ok(TransactionFilter::from_params(
            self.start.as_deref(),
            self.end.as_deref(),
            self.client_id.as_deref(),
        )?)
    }
}

/// Date range for endpoints already scoped to one client.
#[derive(Debug, Default, Deserialize)]
pub struct DateRangeQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl DateRangeQuery {
    pub fn to_filter(&self, client_id: i64) -> Result<TransactionFilter> {
        let filter =
            TransactionFilter::from_params(self.start.as_deref(), self.end.as_deref(), None)?;
        Ok(filter.for_client(client_id))
    }
}

#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

/// GET /api/transactions/monthly
/// Income, expense and net per month, optionally filtered by date range and client
pub async fn monthly_comparison(
    State(state): State<AppState>,
    Query(query): Query<LedgerQuery>,
) -> Result<Json<DataResponse<Vec<MonthlyAggregate>>>> {
    let filter = query.to_filter()?;
    let transactions = state.ledger.fetch_transactions(&filter).await?;
    let data = monthly_rollup(&transactions, &filter);

    tracing::debug!(
        transactions = transactions.len(),
        months = data.len(),
        "monthly comparison computed"
    );
    Ok(Json(DataResponse { data }))
}

/// GET /api/transactions/category-averages
/// Mean signed amount per category
pub async fn category_average_amounts(
    State(state): State<AppState>,
    Query(query): Query<LedgerQuery>,
) -> Result<Json<DataResponse<Vec<CategoryAverage>>>> {
    let filter = query.to_filter()?;
    let transactions = state.ledger.fetch_transactions(&filter).await?;
    let data = category_averages(&transactions, &filter);

    tracing::debug!(categories = data.len(), "category averages computed");
    Ok(Json(DataResponse { data }))
}

/// GET /health
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok"
    }))
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// POST /api/chat
/// Canned assistant answer for a free-text message
pub async fn chat(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ChatRequest>,
) -> Json<AssistantReply> {
    let reply = state.assistant.reply(&request.message);
    tracing::debug!(topic = %reply.topic, "assistant replied");
    Json(reply)
}

/// Score of one client together with who it belongs to.
#[derive(Debug, Serialize)]
pub struct ClientScore {
    pub client_id: i64,
    pub name: String,
    pub balance: f64,
    #[serde(flatten)]
    pub score: ScoreResult,
}

impl ClientScore {
    pub fn new(client: &Client, transactions: &[Transaction]) -> Self {
        Self {
            client_id: client.id,
            name: client.full_name(),
            balance: client.initial_balance,
            score: score_client(client.initial_balance, transactions),
        }
    }
}

/// Loads the client and its full history, then scores it.
pub async fn score_for_client(state: &AppState, client_id: i64) -> Result<ClientScore> {
    let client = state
        .ledger
        .fetch_client(client_id)
        .await?
        .ok_or(ApiError::ClientNotFound(client_id))?;
    let history = state
        .ledger
        .fetch_transactions(&TransactionFilter::default().for_client(client_id))
        .await?;

    Ok(ClientScore::new(&client, &history))
}

/// Transactions sorted by date, then id.
pub fn sort_by_date(mut transactions: Vec<Transaction>) -> Vec<Transaction> {
    transactions.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));
    transactions
}
