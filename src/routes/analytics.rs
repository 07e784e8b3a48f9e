use actix_web::{web, HttpResponse, Responder};

use crate::core::MarketReport;
use crate::models::AnalyticsResponse;
use crate::routes::AppState;

/// Configure analytics routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/analytics", web::get().to(market_analytics));
}

/// Market analytics endpoint
///
/// GET /api/v1/analytics
///
/// `report` is null when no properties are loaded.
async fn market_analytics(state: web::Data<AppState>) -> impl Responder {
    let datasets = state.store.current();
    let report = MarketReport::compute(&datasets.properties, &state.zones);

    HttpResponse::Ok().json(AnalyticsResponse { report })
}
