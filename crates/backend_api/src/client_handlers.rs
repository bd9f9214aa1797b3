use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use ledger_engine::monthly_rollup;
use models::{Client, MonthlyAggregate, Transaction};
use serde::Serialize;

use crate::{
    error::ApiError,
    handlers::{score_for_client, sort_by_date, ClientScore, DataResponse, DateRangeQuery},
    session::ClientSession,
    state::AppState,
    Result,
};

/// What a client may see about itself. The card is masked and the CVV never leaves the server.
#[derive(Debug, Serialize)]
pub struct ClientProfile {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub profession: String,
    pub balance: f64,
    pub iban: String,
    pub rib: String,
    pub account_number: String,
    pub card_number: String,
    pub card_expiry: String,
}

impl From<&Client> for ClientProfile {
    fn from(client: &Client) -> Self {
        Self {
            id: client.id,
            first_name: client.first_name.clone(),
            last_name: client.last_name.clone(),
            birth_date: client.birth_date,
            email: client.email.clone(),
            phone: client.phone.clone(),
            address: client.address.clone(),
            profession: client.profession.clone(),
            balance: client.initial_balance,
            iban: client.iban.clone(),
            rib: client.rib.clone(),
            account_number: client.account_number.clone(),
            card_number: client.masked_card_number(),
            card_expiry: client.card_expiry.clone(),
        }
    }
}

/// GET /api/client/profile
pub async fn profile(
    State(state): State<AppState>,
    session: ClientSession,
) -> Result<Json<ClientProfile>> {
    let client = state
        .ledger
        .fetch_client(session.client_id)
        .await?
        .ok_or(ApiError::ClientNotFound(session.client_id))?;
    Ok(Json(ClientProfile::from(&client)))
}

/// GET /api/client/transactions
pub async fn transactions(
    State(state): State<AppState>,
    session: ClientSession,
    Query(query): Query<DateRangeQuery>,
) -> Result<Json<DataResponse<Vec<Transaction>>>> {
    let filter = query.to_filter(session.client_id)?;
    let data = sort_by_date(state.ledger.fetch_transactions(&filter).await?);
    Ok(Json(DataResponse { data }))
}

/// GET /api/client/monthly
pub async fn monthly(
    State(state): State<AppState>,
    session: ClientSession,
    Query(query): Query<DateRangeQuery>,
) -> Result<Json<DataResponse<Vec<MonthlyAggregate>>>> {
    let filter = query.to_filter(session.client_id)?;
    let transactions = state.ledger.fetch_transactions(&filter).await?;
    Ok(Json(DataResponse {
        data: monthly_rollup(&transactions, &filter),
    }))
}

/// GET /api/client/score
pub async fn score(
    State(state): State<AppState>,
    session: ClientSession,
) -> Result<Json<ClientScore>> {
    Ok(Json(score_for_client(&state, session.client_id).await?))
}
