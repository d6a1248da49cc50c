use sqlx::{PgPool, Postgres, Result, Transaction as SqlxTransaction};

use crate::db::models::Transaction;
use crate::fixture::FixtureRecord;

// Month filtering matches the calendar month in ANY year (the fixture spans
// several years, so filtering by the current year only would silently drop
// everything older).
const MONTH_FILTER: &str = "EXTRACT(MONTH FROM date_of_sale)::int = $1";

/// Escapes ILIKE metacharacters so user input is matched literally.
pub fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Fetches one page of transactions matching `search`, newest sale first,
/// together with the total number of matching rows.
///
/// The search term matches case-insensitive substrings of title, description
/// and category; when it also parses as a number it matches the exact price.
/// An empty term imposes no filter.
pub async fn search_page(
    pool: &PgPool,
    search: &str,
    limit: i64,
    offset: i64,
) -> Result<(Vec<Transaction>, i64)> {
    if search.is_empty() {
        let rows = sqlx::query_as::<_, Transaction>(
            "SELECT * FROM transactions ORDER BY date_of_sale DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
            .fetch_one(pool)
            .await?;

        return Ok((rows, total));
    }

    let pattern = format!("%{}%", escape_like(search));
    let price: Option<f64> = search.trim().parse().ok();

    let rows = sqlx::query_as::<_, Transaction>(
        r#"
        SELECT * FROM transactions
        WHERE title ILIKE $1
           OR description ILIKE $1
           OR category ILIKE $1
           OR price = $2::float8
        ORDER BY date_of_sale DESC
        LIMIT $3 OFFSET $4
        "#,
    )
    .bind(&pattern)
    .bind(price)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    let total: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*) FROM transactions
        WHERE title ILIKE $1
           OR description ILIKE $1
           OR category ILIKE $1
           OR price = $2::float8
        "#,
    )
    .bind(&pattern)
    .bind(price)
    .fetch_one(pool)
    .await?;

    Ok((rows, total))
}

#[derive(Debug, sqlx::FromRow)]
pub struct SaleStatsRow {
    pub total_sale_amount: f64,
    pub total_sold_items: i64,
    pub total_not_sold_items: i64,
}

/// Monthly sale totals. The sale amount sums sold items only; unsold
/// inventory contributes to the counts but not to the amount.
pub async fn sale_stats(pool: &PgPool, month: u32) -> Result<SaleStatsRow> {
    sqlx::query_as::<_, SaleStatsRow>(&format!(
        r#"
        SELECT
            COALESCE(SUM(price) FILTER (WHERE is_sold), 0)::float8 AS total_sale_amount,
            COUNT(*) FILTER (WHERE is_sold) AS total_sold_items,
            COUNT(*) FILTER (WHERE NOT is_sold) AS total_not_sold_items
        FROM transactions
        WHERE {MONTH_FILTER}
        "#
    ))
    .bind(month as i32)
    .fetch_one(pool)
    .await
}

/// All prices in the month window; bucketing happens in
/// `services::analytics`.
pub async fn monthly_prices(pool: &PgPool, month: u32) -> Result<Vec<f64>> {
    sqlx::query_scalar(&format!(
        "SELECT price FROM transactions WHERE {MONTH_FILTER}"
    ))
    .bind(month as i32)
    .fetch_all(pool)
    .await
}

/// Count per distinct category in the month window. Ordered by count
/// descending for readability; callers must not rely on the order.
pub async fn category_counts(pool: &PgPool, month: u32) -> Result<Vec<(String, i64)>> {
    sqlx::query_as::<_, (String, i64)>(&format!(
        r#"
        SELECT category, COUNT(*) FROM transactions
        WHERE {MONTH_FILTER}
        GROUP BY category
        ORDER BY COUNT(*) DESC
        "#
    ))
    .bind(month as i32)
    .fetch_all(pool)
    .await
}

pub async fn count_all(pool: &PgPool) -> Result<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
        .fetch_one(pool)
        .await
}

pub async fn delete_all(executor: &mut SqlxTransaction<'_, Postgres>) -> Result<()> {
    sqlx::query("DELETE FROM transactions")
        .execute(&mut **executor)
        .await?;
    Ok(())
}

pub async fn insert_batch(
    executor: &mut SqlxTransaction<'_, Postgres>,
    records: &[FixtureRecord],
) -> Result<()> {
    for record in records {
        sqlx::query(
            r#"
            INSERT INTO transactions (
                id, title, description, price, date_of_sale, category, is_sold
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(&record.id)
        .bind(&record.title)
        .bind(&record.description)
        .bind(record.price)
        .bind(record.date_of_sale)
        .bind(&record.category)
        .bind(record.sold)
        .execute(&mut **executor)
        .await?;
    }
    Ok(())
}
