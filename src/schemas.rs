use serde::Serialize;
use utoipa::ToSchema;

use crate::db::models::Transaction;

#[derive(Debug, Serialize, ToSchema)]
pub struct TransactionsResponse {
    pub data: Vec<Transaction>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_count: i64,
    pub per_page: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleStats {
    pub total_sale_amount: f64,
    pub total_sold_items: i64,
    pub total_not_sold_items: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PriceRangeCount {
    pub price_range: String,
    pub count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryCount {
    pub category: String,
    pub count: i64,
}

/// The three monthly views merged into a single payload for the dashboard.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CombinedStats {
    pub sale_stats: SaleStats,
    pub price_range_chart: Vec<PriceRangeCount>,
    pub category_pie_chart: Vec<CategoryCount>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SeedResponse {
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub db: String,
    pub db_pool: DbPoolStats,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DbPoolStats {
    pub active_connections: u32,
    pub idle_connections: u32,
    pub max_connections: u32,
    pub usage_percent: f32,
}
