//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use currency_types::domain::CurrencyId;
use currency_types::dto::{
    ConvertCurrencyRequest, ConvertCurrencyResponse, CreateCurrencyRequest, CurrencyResponse,
};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// List all currencies
#[utoipa::path(
    get,
    path = "/currency",
    tag = "currencies",
    responses(
        (status = 200, description = "Currency labels, one per stored currency", body = Vec<CurrencyResponse>)
    )
)]
async fn list_currencies() {}

/// Register a currency with its fixed exchange rates
#[utoipa::path(
    post,
    path = "/currency",
    tag = "currencies",
    request_body = CreateCurrencyRequest,
    responses(
        (status = 201, description = "Currency created, body is the new id", body = CurrencyId),
        (status = 400, description = "Invalid request"),
        (status = 409, description = "A currency with this name already exists")
    )
)]
async fn create_currency() {}

/// Delete a currency by id
#[utoipa::path(
    delete,
    path = "/currency/{id}",
    tag = "currencies",
    params(
        ("id" = CurrencyId, Path, description = "Currency id")
    ),
    responses(
        (status = 200, description = "Currency deleted, or no currency had this id"),
        (status = 400, description = "Malformed id")
    )
)]
async fn delete_currency() {}

/// Convert an amount with the stored rate
#[utoipa::path(
    get,
    path = "/currency/convert",
    tag = "conversion",
    params(ConvertCurrencyRequest),
    responses(
        (status = 200, description = "Converted amount", body = ConvertCurrencyResponse),
        (status = 400, description = "Missing or non-positive amount"),
        (status = 404, description = "Source currency or its rate to the target is not stored")
    )
)]
async fn convert() {}

/// Convert an amount with the live quote
#[utoipa::path(
    get,
    path = "/currency/api-convert",
    tag = "conversion",
    params(ConvertCurrencyRequest),
    responses(
        (status = 200, description = "Converted amount", body = ConvertCurrencyResponse),
        (status = 400, description = "Missing or non-positive amount"),
        (status = 503, description = "Quote service unreachable or missing the pair")
    )
)]
async fn convert_live() {}

/// OpenAPI documentation for the Currency API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Currency Service API",
        version = "1.0.0",
        description = "Currency catalog with fixed exchange rates, plus conversion using either the stored rates or a live quote.",
        license(name = "MIT"),
    ),
    paths(
        health,
        list_currencies,
        create_currency,
        delete_currency,
        convert,
        convert_live,
    ),
    components(
        schemas(
            CreateCurrencyRequest,
            CurrencyResponse,
            ConvertCurrencyRequest,
            ConvertCurrencyResponse,
            CurrencyId,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "currencies", description = "Currency catalog management"),
        (name = "conversion", description = "Stored-rate and live-quote conversion"),
    )
)]
pub struct ApiDoc;
