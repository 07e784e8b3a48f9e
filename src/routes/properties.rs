use actix_web::{web, HttpResponse, Responder};
use chrono::Local;
use validator::Validate;

use crate::core::{filter_properties, paginate, sort_properties, Facets, MatchIndex};
use crate::models::{ErrorResponse, PropertyQueryRequest, PropertyQueryResponse};
use crate::routes::AppState;

/// Configure property routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/properties/query", web::post().to(query_properties));
}

/// Property query endpoint
///
/// POST /api/v1/properties/query
///
/// Applies the filter state, the optional sort key and pagination over the
/// loaded catalog and returns the requested page plus the filter facets.
async fn query_properties(
    state: web::Data<AppState>,
    req: web::Json<PropertyQueryRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for property query: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let datasets = state.store.current();
    let today = Local::now().date_naive();

    let filtered = filter_properties(&datasets.properties, &req.filters, today);
    let index = MatchIndex::build(&datasets.matches);
    let sorted = sort_properties(filtered, req.sort, req.direction, &index);

    let per_page = req.per_page.unwrap_or(state.per_page);
    let page = paginate(&sorted, req.page, per_page);

    tracing::debug!(
        "property query: {} of {} rows, page {}/{}",
        page.items.len(),
        page.total_items,
        page.page,
        page.total_pages
    );

    HttpResponse::Ok().json(PropertyQueryResponse {
        items: page.items,
        page: page.page,
        total_pages: page.total_pages,
        total_items: page.total_items,
        facets: Facets::collect(&datasets.properties),
    })
}
