pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod fixture;
pub mod handlers;
pub mod schemas;
pub mod services;
pub mod startup;

use axum::{Router, routing::get};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::fixture::FixtureClient;

#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub fixture: FixtureClient,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::transactions::list_transactions,
        handlers::statistics::statistics,
        handlers::statistics::price_range_chart,
        handlers::statistics::category_pie_chart,
        handlers::statistics::combined_stats,
        handlers::seed::initialize_database,
    ),
    components(schemas(
        db::models::Transaction,
        schemas::TransactionsResponse,
        schemas::Pagination,
        schemas::SaleStats,
        schemas::PriceRangeCount,
        schemas::CategoryCount,
        schemas::CombinedStats,
        schemas::SeedResponse,
        schemas::HealthStatus,
        schemas::DbPoolStats,
    )),
    tags(
        (name = "Transactions", description = "Paginated, searchable transaction listing"),
        (name = "Statistics", description = "Monthly aggregation views"),
        (name = "Admin", description = "Seeding and maintenance"),
        (name = "Health", description = "Liveness and store connectivity")
    )
)]
pub struct ApiDoc;

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(handlers::health))
        .route("/transactions", get(handlers::transactions::list_transactions))
        .route("/statistics", get(handlers::statistics::statistics))
        .route("/price-range-chart", get(handlers::statistics::price_range_chart))
        .route("/category-pie-chart", get(handlers::statistics::category_pie_chart))
        .route("/combined-stats", get(handlers::statistics::combined_stats))
        .route("/initialize-database", get(handlers::seed::initialize_database))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
