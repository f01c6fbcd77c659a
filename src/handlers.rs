use crate::config::Config;
use crate::enrichment::{MISSING_PERSON_FIELDS, MISSING_SEARCH_FIELDS};
use crate::errors::{AppError, ResultExt};
use crate::models::*;
use crate::services::RelayService;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Relay operations against ZoomInfo.
    pub relay: RelayService,
}

impl AppState {
    /// The configuration is only read here; the relay keeps what it needs.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        Ok(Self {
            relay: RelayService::from_config(config)?,
        })
    }
}

/// Unreadable bodies are reported like missing fields.
fn read_body<T>(payload: Result<Json<T>, JsonRejection>, message: &str) -> Result<T, AppError> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        tracing::debug!("Rejected request body: {}", rejection);
        AppError::BadRequest(message.to_string())
    })
}

/// Health check endpoint.
pub async fn health() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "zoominfo-relay",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// GET /get-token
///
/// Mints a ZoomInfo access token through the PKI exchange.
pub async fn get_token(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TokenResponse>, AppError> {
    tracing::info!("GET /get-token");

    let access_token = state
        .relay
        .obtain_token()
        .await
        .context("Failed to generate access token")?;

    Ok(Json(TokenResponse { access_token }))
}

/// POST /enrich
///
/// Enriches a contact by first name, last name and company name. The body
/// is either `{enrichedProfile}` or `{employmentHistory}` depending on the
/// configured profile.
pub async fn enrich(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<EnrichRequest>, JsonRejection>,
) -> Result<Json<EnrichResponse>, AppError> {
    let request = read_body(payload, MISSING_PERSON_FIELDS)?;
    tracing::info!(
        "POST /enrich - company: {:?}, profile: {:?}",
        request.company_name,
        state.relay.profile()
    );

    let response = state
        .relay
        .enrich_contact(&request)
        .await
        .context("Failed to enrich contact")?;

    Ok(Json(response))
}

/// POST /search-candidates
///
/// Searches ZoomInfo contacts by department, management level, metro region
/// and industry codes; returns a single page of `rpp` results.
pub async fn search_candidates(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<CandidatesResponse>, AppError> {
    let request = read_body(payload, MISSING_SEARCH_FIELDS)?;
    tracing::info!("POST /search-candidates - rpp: {:?}", request.rpp);

    let candidates = state
        .relay
        .search_candidates(&request)
        .await
        .context("Failed to search for candidates")?;

    Ok(Json(CandidatesResponse { candidates }))
}

/// POST /query-person
///
/// Returns the raw ZoomInfo enrich response for one person.
pub async fn query_person(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<EnrichRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let request = read_body(payload, MISSING_PERSON_FIELDS)?;
    tracing::info!("POST /query-person - company: {:?}", request.company_name);

    let body = state
        .relay
        .query_person(&request)
        .await
        .context("Failed to query person")?;

    Ok(Json(body))
}
