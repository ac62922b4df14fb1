//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};

use currency_types::{
    AppError, ConvertCurrencyRequest, CreateCurrencyRequest, CurrencyId, CurrencyRepository,
    QuoteProvider,
};

use crate::CurrencyService;

/// Application state shared across handlers.
pub struct AppState<R: CurrencyRepository, Q: QuoteProvider> {
    pub service: CurrencyService<R, Q>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(AppError::BadRequest(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError(AppError::BadRequest(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::DuplicateCurrency(_) => StatusCode::CONFLICT,
            AppError::CurrencyNotFound(_) | AppError::ExchangeRateNotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            AppError::QuoteUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let message = match &self.0 {
            AppError::BadRequest(msg) | AppError::Internal(msg) => msg.clone(),
            other => other.to_string(),
        };

        let body = serde_json::json!({
            "error": message,
            "code": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

// ─────────────────────────────────────────────────────────────────────────────
// Catalog
// ─────────────────────────────────────────────────────────────────────────────

/// List all currencies as labels.
#[tracing::instrument(skip(state))]
pub async fn list_currencies<R: CurrencyRepository, Q: QuoteProvider>(
    State(state): State<Arc<AppState<R, Q>>>,
) -> Result<impl IntoResponse, ApiError> {
    let currencies = state.service.list().await?;
    Ok(Json(currencies))
}

/// Register a currency; the body of the response is the new id.
#[tracing::instrument(skip(state, payload), fields(name = tracing::field::Empty))]
pub async fn create_currency<R: CurrencyRepository, Q: QuoteProvider>(
    State(state): State<Arc<AppState<R, Q>>>,
    payload: Result<Json<CreateCurrencyRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    tracing::Span::current().record("name", req.name.as_str());
    tracing::debug!(rates = req.exchanges.len(), "Creating currency");
    let id = state.service.create(req).await?;
    Ok((StatusCode::CREATED, Json(id)))
}

#[tracing::instrument(skip(state), fields(currency_id = %id))]
pub async fn delete_currency<R: CurrencyRepository, Q: QuoteProvider>(
    State(state): State<Arc<AppState<R, Q>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let currency_id: CurrencyId = id
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid currency ID".into()))?;

    state.service.delete(currency_id).await?;
    Ok(StatusCode::OK)
}

// ─────────────────────────────────────────────────────────────────────────────
// Conversion
// ─────────────────────────────────────────────────────────────────────────────

/// Convert with the stored rate of the source currency.
#[tracing::instrument(
    skip(state, params),
    fields(from = tracing::field::Empty, to = tracing::field::Empty, amount = tracing::field::Empty)
)]
pub async fn convert<R: CurrencyRepository, Q: QuoteProvider>(
    State(state): State<Arc<AppState<R, Q>>>,
    params: Result<Query<ConvertCurrencyRequest>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(req) = params?;
    record_conversion(&req);
    let response = state.service.convert(req).await?;
    Ok(Json(response))
}

/// Convert with the live quote for the pair.
#[tracing::instrument(
    skip(state, params),
    fields(from = tracing::field::Empty, to = tracing::field::Empty, amount = tracing::field::Empty)
)]
pub async fn convert_live<R: CurrencyRepository, Q: QuoteProvider>(
    State(state): State<Arc<AppState<R, Q>>>,
    params: Result<Query<ConvertCurrencyRequest>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(req) = params?;
    record_conversion(&req);
    let response = state.service.convert_with_quotes(req).await?;
    Ok(Json(response))
}

fn record_conversion(req: &ConvertCurrencyRequest) {
    let span = tracing::Span::current();
    span.record("from", req.from.as_str());
    span.record("to", req.to.as_str());
    span.record("amount", tracing::field::display(req.amount));
}
