use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::AppState;
use crate::db::queries;
use crate::error::AppError;
use crate::schemas::{CategoryCount, CombinedStats, PriceRangeCount, SaleStats};
use crate::services::analytics;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MonthParam {
    /// 1-based calendar month, matched across all years.
    pub month: Option<String>,
}

#[utoipa::path(
    get,
    path = "/statistics",
    params(MonthParam),
    responses(
        (status = 200, description = "Monthly sale totals", body = SaleStats),
        (status = 400, description = "Missing or invalid month")
    ),
    tag = "Statistics"
)]
pub async fn statistics(
    State(state): State<AppState>,
    Query(params): Query<MonthParam>,
) -> Result<Json<SaleStats>, AppError> {
    let month = analytics::parse_month(params.month.as_deref())?;
    let row = queries::sale_stats(&state.db, month).await?;

    Ok(Json(SaleStats {
        total_sale_amount: row.total_sale_amount,
        total_sold_items: row.total_sold_items,
        total_not_sold_items: row.total_not_sold_items,
    }))
}

#[utoipa::path(
    get,
    path = "/price-range-chart",
    params(MonthParam),
    responses(
        (status = 200, description = "Counts for the 10 fixed price buckets, ascending order", body = Vec<PriceRangeCount>),
        (status = 400, description = "Missing or invalid month")
    ),
    tag = "Statistics"
)]
pub async fn price_range_chart(
    State(state): State<AppState>,
    Query(params): Query<MonthParam>,
) -> Result<Json<Vec<PriceRangeCount>>, AppError> {
    let month = analytics::parse_month(params.month.as_deref())?;
    let prices = queries::monthly_prices(&state.db, month).await?;

    Ok(Json(analytics::price_histogram(&prices)))
}

#[utoipa::path(
    get,
    path = "/category-pie-chart",
    params(MonthParam),
    responses(
        (status = 200, description = "Count per distinct category in the month", body = Vec<CategoryCount>),
        (status = 400, description = "Missing or invalid month")
    ),
    tag = "Statistics"
)]
pub async fn category_pie_chart(
    State(state): State<AppState>,
    Query(params): Query<MonthParam>,
) -> Result<Json<Vec<CategoryCount>>, AppError> {
    let month = analytics::parse_month(params.month.as_deref())?;
    let counts = queries::category_counts(&state.db, month).await?;

    Ok(Json(
        counts
            .into_iter()
            .map(|(category, count)| CategoryCount { category, count })
            .collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/combined-stats",
    params(MonthParam),
    responses(
        (status = 200, description = "Sale totals, price histogram and category breakdown in one payload", body = CombinedStats),
        (status = 400, description = "Missing or invalid month")
    ),
    tag = "Statistics"
)]
pub async fn combined_stats(
    State(state): State<AppState>,
    Query(params): Query<MonthParam>,
) -> Result<Json<CombinedStats>, AppError> {
    let month = analytics::parse_month(params.month.as_deref())?;

    let stats = queries::sale_stats(&state.db, month).await?;
    let prices = queries::monthly_prices(&state.db, month).await?;
    let categories = queries::category_counts(&state.db, month).await?;

    Ok(Json(CombinedStats {
        sale_stats: SaleStats {
            total_sale_amount: stats.total_sale_amount,
            total_sold_items: stats.total_sold_items,
            total_not_sold_items: stats.total_not_sold_items,
        },
        price_range_chart: analytics::price_histogram(&prices),
        category_pie_chart: categories
            .into_iter()
            .map(|(category, count)| CategoryCount { category, count })
            .collect(),
    }))
}
