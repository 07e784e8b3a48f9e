use serde::{Deserialize, Serialize};

use crate::core::analytics::MarketReport;
use crate::core::filters::Facets;
use crate::core::grouping::{ClientGroup, MatchSummary};
use crate::models::{ClientRecord, PropertyRecord};
use crate::services::store::PropertySource;

/// Response for the property query endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyQueryResponse {
    pub items: Vec<PropertyRecord>,
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    /// Distinct option lists for the filter controls, derived from the full
    /// (unfiltered) collection.
    pub facets: Facets,
}

/// Headline counts over the filtered client collection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSummary {
    pub total: usize,
    pub with_requirements: usize,
    pub with_budget: usize,
    pub with_location: usize,
}

impl ClientSummary {
    pub fn compute(clients: &[ClientRecord]) -> Self {
        Self {
            total: clients.len(),
            with_requirements: clients.iter().filter(|c| c.has_requirements()).count(),
            with_budget: clients.iter().filter(|c| c.has_budget()).count(),
            with_location: clients.iter().filter(|c| !c.locations.is_empty()).count(),
        }
    }
}

/// Response for the client search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientQueryResponse {
    pub items: Vec<ClientRecord>,
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub summary: ClientSummary,
}

/// Response for the match groups endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchGroupsResponse {
    pub groups: Vec<ClientGroup>,
    pub summary: MatchSummary,
}

/// Response for the analytics endpoint; `report` is null when no properties
/// are loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResponse {
    pub report: Option<MarketReport>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub properties: usize,
    pub matches: usize,
    pub clients: usize,
    pub property_source: PropertySource,
}

/// Response for the reload endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReloadResponse {
    pub properties: usize,
    pub matches: usize,
    pub clients: usize,
    pub property_source: PropertySource,
    pub loaded_at: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
