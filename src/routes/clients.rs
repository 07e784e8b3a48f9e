use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::core::filters::client_matches_term;
use crate::core::paginate;
use crate::models::{ClientQueryRequest, ClientQueryResponse, ClientSummary, ErrorResponse};
use crate::routes::AppState;

/// Configure client routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/clients/query", web::post().to(query_clients));
}

/// Client search endpoint
///
/// POST /api/v1/clients/query
async fn query_clients(
    state: web::Data<AppState>,
    req: web::Json<ClientQueryRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let datasets = state.store.current();

    let filtered: Vec<_> = datasets
        .clients
        .iter()
        .filter(|c| client_matches_term(c, &req.search))
        .cloned()
        .collect();

    let summary = ClientSummary::compute(&filtered);
    let per_page = req.per_page.unwrap_or(state.per_page);
    let page = paginate(&filtered, req.page, per_page);

    HttpResponse::Ok().json(ClientQueryResponse {
        items: page.items,
        page: page.page,
        total_pages: page.total_pages,
        total_items: page.total_items,
        summary,
    })
}
