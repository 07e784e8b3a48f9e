// Route exports
pub mod analytics;
pub mod clients;
pub mod matches;
pub mod properties;
pub mod system;

use std::sync::Arc;

use actix_web::web;

use crate::core::{BrandTagger, ZoneTagger};
use crate::services::DatasetStore;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DatasetStore>,
    pub brands: BrandTagger,
    pub zones: ZoneTagger,
    pub per_page: usize,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(system::configure)
            .configure(properties::configure)
            .configure(clients::configure)
            .configure(matches::configure)
            .configure(analytics::configure),
    );
}
