use actix_web::{web, HttpResponse, Responder};

use crate::models::{HealthResponse, ReloadResponse};
use crate::routes::AppState;

/// Configure system routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/reload", web::post().to(reload_datasets));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let datasets = state.store.current();

    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        properties: datasets.properties.len(),
        matches: datasets.matches.len(),
        clients: datasets.clients.len(),
        property_source: datasets.property_source,
    })
}

/// Reload endpoint
///
/// POST /api/v1/reload
///
/// Re-fetches the three sources and swaps the snapshot in. Fetch failures
/// fall back per source, so this always succeeds.
async fn reload_datasets(state: web::Data<AppState>) -> impl Responder {
    tracing::info!("Reloading datasets on request");
    let datasets = state.store.reload().await;

    HttpResponse::Ok().json(ReloadResponse {
        properties: datasets.properties.len(),
        matches: datasets.matches.len(),
        clients: datasets.clients.len(),
        property_source: datasets.property_source,
        loaded_at: datasets.loaded_at,
    })
}
