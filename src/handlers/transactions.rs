use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::AppState;
use crate::db::queries;
use crate::error::AppError;
use crate::schemas::{Pagination, TransactionsResponse};
use crate::services::analytics;

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// 1-based page number, default 1.
    pub page: Option<String>,
    /// Page size, default 10.
    pub per_page: Option<String>,
    /// Substring filter across title, description and category; numeric
    /// values also match the exact price.
    pub search: Option<String>,
}

// Raw strings rather than numbers so a non-numeric value produces our 400
// body instead of the extractor's rejection.
fn parse_positive(raw: Option<&str>, name: &str, default: i64) -> Result<i64, AppError> {
    let Some(raw) = raw else {
        return Ok(default);
    };

    let value: i64 = raw.trim().parse().map_err(|_| {
        AppError::InvalidParameter(format!("{name} must be a positive integer, got {raw:?}"))
    })?;

    if value < 1 {
        return Err(AppError::InvalidParameter(format!(
            "{name} must be at least 1, got {value}"
        )));
    }

    Ok(value)
}

// page and perPage are validated individually, but their product can still
// overflow i64; treat that as a parameter error rather than a store error.
fn page_offset(page: i64, per_page: i64) -> Result<i64, AppError> {
    page.checked_sub(1)
        .and_then(|p| p.checked_mul(per_page))
        .ok_or_else(|| {
            AppError::InvalidParameter(format!(
                "page {page} with perPage {per_page} is out of range"
            ))
        })
}

#[utoipa::path(
    get,
    path = "/transactions",
    params(ListParams),
    responses(
        (status = 200, description = "One page of transactions with pagination metadata", body = TransactionsResponse),
        (status = 400, description = "Invalid page or perPage parameter")
    ),
    tag = "Transactions"
)]
pub async fn list_transactions(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<TransactionsResponse>, AppError> {
    let page = parse_positive(params.page.as_deref(), "page", 1)?;
    let per_page = parse_positive(params.per_page.as_deref(), "perPage", 10)?;
    let search = params.search.as_deref().unwrap_or("");

    let offset = page_offset(page, per_page)?;
    let (data, total_count) = queries::search_page(&state.db, search, per_page, offset).await?;

    Ok(Json(TransactionsResponse {
        data,
        pagination: Pagination {
            current_page: page,
            total_pages: analytics::total_pages(total_count, per_page),
            total_count,
            per_page,
        },
    }))
}
