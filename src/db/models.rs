use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A single product transaction as served by the API.
///
/// Rows are created in bulk at seed time and never updated individually; the
/// only write path is a full reseed. `id` comes straight from the fixture and
/// is not guaranteed unique.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub date_of_sale: DateTime<Utc>,
    pub category: String,
    pub is_sold: bool,
}
