use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use murmur_types::api::AccountRequest;

use crate::error::status_for;
use crate::state::{AppState, run_blocking};

/// POST /register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<AccountRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    let account = run_blocking(&state, move |s| s.accounts.register(&req))
        .await?
        .map_err(|e| status_for(e, StatusCode::BAD_REQUEST))?;

    Ok(Json(account))
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<AccountRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    let account = run_blocking(&state, move |s| s.accounts.login(&req))
        .await?
        .map_err(|e| status_for(e, StatusCode::UNAUTHORIZED))?;

    Ok(Json(account))
}
