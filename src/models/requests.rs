use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{FilterState, NumericRange, SortDirection, SortKey};

/// Request to query the property collection
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertyQueryRequest {
    pub filters: FilterState,
    pub sort: Option<SortKey>,
    pub direction: SortDirection,
    #[validate(range(min = 1))]
    pub page: usize,
    /// Overrides the configured page size when present.
    #[validate(range(min = 1, max = 200))]
    pub per_page: Option<usize>,
}

impl Default for PropertyQueryRequest {
    fn default() -> Self {
        Self {
            filters: FilterState::default(),
            sort: None,
            direction: SortDirection::default(),
            page: 1,
            per_page: None,
        }
    }
}

/// Request to search the client collection
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientQueryRequest {
    pub search: String,
    #[validate(range(min = 1))]
    pub page: usize,
    #[validate(range(min = 1, max = 200))]
    pub per_page: Option<usize>,
}

impl Default for ClientQueryRequest {
    fn default() -> Self {
        Self {
            search: String::new(),
            page: 1,
            per_page: None,
        }
    }
}

/// Request for client match groups
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchGroupsRequest {
    /// Free text over client name, zone and advertiser.
    pub search: String,
    /// Inclusive overall-score window applied before grouping.
    pub score: NumericRange,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_query_defaults() {
        let request: PropertyQueryRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.page, 1);
        assert!(request.sort.is_none());
        assert_eq!(request.direction, SortDirection::Asc);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_property_query_parses_filters() {
        let request: PropertyQueryRequest = serde_json::from_str(
            r#"{
                "filters": {
                    "rooms": 3,
                    "price": {"min": 100000, "max": 300000},
                    "zones": ["Centro"],
                    "date": {"mode": "last7Days"}
                },
                "sort": "price",
                "direction": "desc",
                "page": 2
            }"#,
        )
        .unwrap();

        assert_eq!(request.filters.rooms, Some(3));
        assert_eq!(request.filters.zones, vec!["Centro"]);
        assert_eq!(request.sort, Some(SortKey::Price));
        assert_eq!(request.direction, SortDirection::Desc);
        assert_eq!(request.page, 2);
    }

    #[test]
    fn test_page_zero_fails_validation() {
        let request = PropertyQueryRequest {
            page: 0,
            ..Default::default()
        };
        assert!(request.validate().is_err());
    }
}
