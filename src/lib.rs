//! Inmo Panel - data service for the Inmo real-estate dashboard
//!
//! Ingests CSV snapshots of property listings, client profiles and
//! precomputed client-property matches, and serves filtered, sorted and
//! grouped views plus market analytics over a JSON API.

pub mod config;
pub mod core;
pub mod ingest;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{filter_properties, group_by_client, paginate, sort_properties, BrandTagger, Facets, MarketReport, MatchIndex, ZoneTagger};
pub use crate::ingest::{parse_clients, parse_matches, parse_properties};
pub use crate::models::{ClientRecord, FilterState, MatchRecord, OperationKind, PropertyRecord, SortDirection, SortKey};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let records = services::sample_properties();
        let filtered = filter_properties(
            &records,
            &FilterState::default(),
            chrono::NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        );
        assert_eq!(filtered.len(), records.len());
    }
}
