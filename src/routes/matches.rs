use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::core::filters::match_matches_term;
use crate::core::{group_by_client, summarize};
use crate::models::{ErrorResponse, MatchGroupsRequest, MatchGroupsResponse};
use crate::routes::AppState;

/// Configure match routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/matches/groups", web::post().to(match_groups));
}

/// Client match groups endpoint
///
/// POST /api/v1/matches/groups
///
/// Filters the match collection by free text and score window, partitions it
/// by client, ranks each group and returns the aggregates the dashboard
/// renders as KPI cards.
async fn match_groups(
    state: web::Data<AppState>,
    req: web::Json<MatchGroupsRequest>,
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
        .matches
        .iter()
        .filter(|m| match_matches_term(m, &req.search))
        .filter(|m| req.score.contains(m.score))
        .cloned()
        .collect();

    let groups = group_by_client(&filtered, &state.brands);
    let summary = summarize(&groups);

    tracing::debug!(
        "match groups: {} clients over {} matches",
        summary.total_clients,
        summary.total_matches
    );

    HttpResponse::Ok().json(MatchGroupsResponse { groups, summary })
}
