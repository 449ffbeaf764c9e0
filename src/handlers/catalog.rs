use axum::{response::IntoResponse, Json};

use crate::models::region_catalog;

pub async fn regions_get() -> impl IntoResponse {
    Json(region_catalog())
}
