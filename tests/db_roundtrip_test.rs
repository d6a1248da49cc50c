//! Store-backed aggregation tests. Ignored by default; run with a disposable
//! database:
//!
//! ```sh
//! DATABASE_URL=postgres://... cargo test -- --ignored
//! ```

use chrono::{TimeZone, Utc};
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use std::path::Path;

use salescope::db::queries;
use salescope::services::analytics;

async fn setup_test_db() -> PgPool {
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");
    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to test DB");
    let migrator = Migrator::new(Path::new("./migrations"))
        .await
        .expect("Failed to load migrations");
    migrator
        .run(&pool)
        .await
        .expect("Failed to run migrations on test DB");

    sqlx::query("DELETE FROM transactions")
        .execute(&pool)
        .await
        .expect("Failed to clear table");

    pool
}

async fn insert(
    pool: &PgPool,
    id: &str,
    title: &str,
    price: f64,
    category: &str,
    is_sold: bool,
    (year, month, day): (i32, u32, u32),
) {
    sqlx::query(
        "INSERT INTO transactions (id, title, description, price, date_of_sale, category, is_sold)
         VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(id)
    .bind(title)
    .bind(format!("description of {title}"))
    .bind(price)
    .bind(Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap())
    .bind(category)
    .bind(is_sold)
    .execute(pool)
    .await
    .expect("Failed to insert row");
}

#[tokio::test]
#[ignore]
async fn worked_example_for_march() {
    let pool = setup_test_db().await;

    insert(&pool, "1", "widget", 50.0, "A", true, (2023, 3, 10)).await;
    insert(&pool, "2", "gadget", 150.0, "B", false, (2023, 3, 20)).await;

    let stats = queries::sale_stats(&pool, 3).await.unwrap();
    assert_eq!(stats.total_sale_amount, 50.0);
    assert_eq!(stats.total_sold_items, 1);
    assert_eq!(stats.total_not_sold_items, 1);

    let histogram = analytics::price_histogram(&queries::monthly_prices(&pool, 3).await.unwrap());
    assert_eq!(histogram[0].count, 1);
    assert_eq!(histogram[1].count, 1);
    assert!(histogram[2..].iter().all(|b| b.count == 0));

    let mut categories = queries::category_counts(&pool, 3).await.unwrap();
    categories.sort();
    assert_eq!(categories, vec![("A".to_string(), 1), ("B".to_string(), 1)]);
}

#[tokio::test]
#[ignore]
async fn month_window_matches_across_years() {
    let pool = setup_test_db().await;

    insert(&pool, "1", "old", 10.0, "A", true, (2021, 7, 1)).await;
    insert(&pool, "2", "new", 20.0, "A", true, (2023, 7, 15)).await;
    insert(&pool, "3", "other-month", 30.0, "A", true, (2023, 8, 1)).await;

    let stats = queries::sale_stats(&pool, 7).await.unwrap();
    assert_eq!(stats.total_sold_items, 2);
    assert_eq!(stats.total_sale_amount, 30.0);
}

#[tokio::test]
#[ignore]
async fn empty_month_returns_zeroed_structure() {
    let pool = setup_test_db().await;

    let stats = queries::sale_stats(&pool, 2).await.unwrap();
    assert_eq!(stats.total_sale_amount, 0.0);
    assert_eq!(stats.total_sold_items, 0);
    assert_eq!(stats.total_not_sold_items, 0);

    let histogram = analytics::price_histogram(&queries::monthly_prices(&pool, 2).await.unwrap());
    assert_eq!(histogram.len(), 10);
    assert!(histogram.iter().all(|b| b.count == 0));

    assert!(queries::category_counts(&pool, 2).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore]
async fn search_matches_substrings_and_exact_price() {
    let pool = setup_test_db().await;

    insert(&pool, "1", "WD Hard Drive", 329.85, "electronics", false, (2021, 11, 27)).await;
    insert(&pool, "2", "Slim Fit Shirt", 44.6, "men's clothing", true, (2022, 1, 20)).await;
    insert(&pool, "3", "Gold Ring", 329.85, "jewelery", true, (2022, 3, 10)).await;

    // case-insensitive substring on title
    let (rows, total) = queries::search_page(&pool, "hard drive", 10, 0).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(rows[0].id, "1");

    // numeric term matches the exact price on two rows
    let (_, total) = queries::search_page(&pool, "329.85", 10, 0).await.unwrap();
    assert_eq!(total, 2);

    // empty term returns everything
    let (rows, total) = queries::search_page(&pool, "", 10, 0).await.unwrap();
    assert_eq!(total, 3);
    assert_eq!(rows.len(), 3);

    // ILIKE wildcards in the term are literal, not wildcards
    let (_, total) = queries::search_page(&pool, "%", 10, 0).await.unwrap();
    assert_eq!(total, 0);
}

#[tokio::test]
#[ignore]
async fn listing_is_sorted_and_paginated() {
    let pool = setup_test_db().await;

    for i in 0..25 {
        insert(
            &pool,
            &i.to_string(),
            &format!("item {i}"),
            10.0 + i as f64,
            "misc",
            i % 2 == 0,
            (2022, 1 + (i % 12) as u32, 1 + i as u32 % 28),
        )
        .await;
    }

    let (page1, total) = queries::search_page(&pool, "", 10, 0).await.unwrap();
    assert_eq!(total, 25);
    assert_eq!(page1.len(), 10);
    assert!(
        page1
            .windows(2)
            .all(|w| w[0].date_of_sale >= w[1].date_of_sale),
        "newest sale first"
    );

    let (page3, _) = queries::search_page(&pool, "", 10, 20).await.unwrap();
    assert_eq!(page3.len(), 5);

    assert_eq!(analytics::total_pages(total, 10), 3);
}
