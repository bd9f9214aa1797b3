use axum::{
    extract::{Query, State},
    Json,
};
use ledger_engine::TransactionFilter;
use models::Transaction;

use crate::{
    error::ApiError,
    extract::ApiPath,
    handlers::{score_for_client, sort_by_date, ClientScore, DataResponse, DateRangeQuery},
    session::AdminSession,
    state::AppState,
    Result,
};

/// GET /api/admin/clients
/// Every client with its current score, ordered by id
pub async fn list_clients(
    State(state): State<AppState>,
    session: AdminSession,
) -> Result<Json<DataResponse<Vec<ClientScore>>>> {
    let mut clients = state.ledger.fetch_clients().await?;
    clients.sort_by_key(|c| c.id);

    let transactions = state
        .ledger
        .fetch_transactions(&TransactionFilter::default())
        .await?;

    let data: Vec<ClientScore> = clients
        .iter()
        .map(|client| {
            let history: Vec<Transaction> = transactions
                .iter()
                .filter(|t| t.client_id == client.id)
                .cloned()
                .collect();
            ClientScore::new(client, &history)
        })
        .collect();

    tracing::debug!(admin_id = session.admin_id, clients = data.len(), "client list served");
    Ok(Json(DataResponse { data }))
}

/// GET /api/admin/clients/:client_id/score
pub async fn client_score(
    State(state): State<AppState>,
    _session: AdminSession,
    ApiPath(client_id): ApiPath<i64>,
) -> Result<Json<ClientScore>> {
    Ok(Json(score_for_client(&state, client_id).await?))
}

/// GET /api/admin/clients/:client_id/transactions
pub async fn client_transactions(
    State(state): State<AppState>,
    _session: AdminSession,
    ApiPath(client_id): ApiPath<i64>,
    Query(query): Query<DateRangeQuery>,
) -> Result<Json<DataResponse<Vec<Transaction>>>> {
    let filter = query.to_filter(client_id)?;
    if state.ledger.fetch_client(client_id).await?.is_none() {
        return Err(ApiError::ClientNotFound(client_id));
    }

    let data = sort_by_date(state.ledger.fetch_transactions(&filter).await?);
    Ok(Json(DataResponse { data }))
}
