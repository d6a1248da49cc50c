use axum::{Json, extract::State};

use crate::AppState;
use crate::error::AppError;
use crate::schemas::SeedResponse;
use crate::services::seeder;

#[utoipa::path(
    get,
    path = "/initialize-database",
    responses(
        (status = 200, description = "Store wiped and reseeded from the fixture", body = SeedResponse),
        (status = 500, description = "Fixture unreachable or store failure; existing data untouched")
    ),
    tag = "Admin"
)]
pub async fn initialize_database(
    State(state): State<AppState>,
) -> Result<Json<SeedResponse>, AppError> {
    let inserted = seeder::reseed(&state.db, &state.fixture).await?;

    Ok(Json(SeedResponse {
        message: format!("Database initialized with {inserted} seed records."),
    }))
}
