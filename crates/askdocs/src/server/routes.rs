//! API routes for the query server

use axum::{extract::State, routing::post, Json, Router};

use crate::error::Result;
use crate::server::state::AppState;
use crate::types::{AskRequest, AskResponse};

/// Build all API routes
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/ask", post(ask))
}

/// POST /api/ask - Answer a question from the indexed documents
async fn ask(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskResponse>> {
    tracing::info!("Question: \"{}\"", request.question);

    let answer = state.chain().answer(&request.question).await?;

    Ok(Json(AskResponse::new(answer)))
}
