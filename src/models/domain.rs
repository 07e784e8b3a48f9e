use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// String sentinel substituted for missing advertiser/zone labels.
pub const UNKNOWN_LABEL: &str = "Desconocido";

/// Listing operation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Sale,
    Rental,
    Other,
}

impl OperationKind {
    /// Parse a source label. Missing labels default to `Sale`, unrecognized
    /// labels collapse to `Other`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "" | "venta" | "sale" => OperationKind::Sale,
            "alquiler" | "rental" | "rent" => OperationKind::Rental,
            _ => OperationKind::Other,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OperationKind::Sale => "Venta",
            OperationKind::Rental => "Alquiler",
            OperationKind::Other => "Otro",
        }
    }
}

/// A property listing parsed from the unified catalog CSV.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRecord {
    pub id: u32,
    pub rooms: u32,
    pub baths: u32,
    pub price: f64,
    pub link: String,
    pub area_m2: f64,
    pub advertiser: String,
    pub zone: String,
    pub website: String,
    /// Inclusion date as it appeared in the source (`YYYY-MM-DD` preferred).
    pub listed_on: String,
    pub operation: OperationKind,
    /// Columns the alias table did not recognize, keyed by raw header name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl PropertyRecord {
    /// Calendar day of the inclusion date, if it parses.
    pub fn listed_day(&self) -> Option<NaiveDate> {
        parse_day(&self.listed_on)
    }
}

/// Parse a date string in the formats the catalog actually carries.
pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    // Timestamps keep only the date part
    let s = s.split('T').next().unwrap_or(s);
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%d/%m/%Y"))
        .or_else(|_| NaiveDate::parse_from_str(s, "%d-%m-%Y"))
        .ok()
}

/// A client profile parsed from the contacts CSV.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRecord {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub registered_on: String,
    pub created_by: String,
    /// Desired operation as free text (e.g. "venta").
    pub operation: String,
    pub types: Vec<String>,
    pub conditions: Vec<String>,
    pub rooms_min: Option<f64>,
    pub rooms_max: Option<f64>,
    pub baths_min: Option<f64>,
    pub baths_max: Option<f64>,
    pub living_min: Option<f64>,
    pub living_max: Option<f64>,
    pub area_min_m2: Option<f64>,
    pub area_max_m2: Option<f64>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub locations: Vec<String>,
    pub flags: Vec<String>,
    /// Normalized zone label.
    pub zone: String,
}

impl ClientRecord {
    pub fn has_requirements(&self) -> bool {
        !self.types.is_empty()
            || self.rooms_min.is_some()
            || self.price_min.is_some()
            || !self.locations.is_empty()
    }

    pub fn has_budget(&self) -> bool {
        self.price_min.is_some() || self.price_max.is_some()
    }
}

/// A precomputed client-property match parsed from the matches CSV.
///
/// Scores are produced by an external offline process; this service only
/// carries them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub client_id: String,
    pub client_name: String,
    pub property_id: String,
    pub link: String,
    pub website: String,
    pub advertiser: String,
    pub zone: String,
    /// Operation label as scored (e.g. "venta").
    pub operation: String,
    /// Property type label as scored.
    pub kind: String,
    pub rooms: u32,
    pub baths: u32,
    pub area_m2: f64,
    pub price: f64,
    /// Overall score in [0, 1].
    pub score: f64,
    pub price_score: f64,
    pub area_score: f64,
    pub rooms_score: f64,
    pub baths_score: f64,
    pub operation_score: f64,
    pub zone_match: String,
    pub type_match: String,
    /// Per-client rank, 1 = best.
    pub rank: u32,
}

/// Inclusive numeric range with independently optional bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl NumericRange {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    /// Whether `value` passes the range. An absent bound never excludes.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        if let Some(min) = self.min {
            if value < min {
                return false;
            }
        }
        if let Some(max) = self.max {
            if value > max {
                return false;
            }
        }
        true
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// Date window selector for the inclusion-date filter.
///
/// All modes compare calendar days; `Custom` bounds are independently
/// optional and inclusive through the whole end day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum DateFilter {
    #[default]
    All,
    Today,
    Yesterday,
    Last7Days,
    Last30Days,
    Custom {
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    },
}

/// Immutable filter state for the property query engine.
///
/// Every axis has a pass-through empty state, so the default value matches
/// everything. Composition across axes is logical AND.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterState {
    /// Exact room count; `None` = unconstrained.
    pub rooms: Option<u32>,
    /// Exact bath count; `None` = unconstrained.
    pub baths: Option<u32>,
    pub price: NumericRange,
    pub area: NumericRange,
    /// Multi-select zone membership; empty = all zones.
    pub zones: Vec<String>,
    /// Multi-select advertiser membership; empty = all advertisers.
    pub advertisers: Vec<String>,
    /// Multi-select operation membership; empty = all operations.
    pub operations: Vec<OperationKind>,
    pub date: DateFilter,
    /// Case-insensitive substring search across zone/advertiser/website.
    pub search: String,
}

/// Sortable property columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Price,
    Rooms,
    Baths,
    Area,
    Zone,
    Advertiser,
    ListedOn,
    /// Derived key: high-quality matches joined from the match collection.
    MatchCount,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_labels() {
        assert_eq!(OperationKind::from_label("Venta"), OperationKind::Sale);
        assert_eq!(OperationKind::from_label("alquiler"), OperationKind::Rental);
        assert_eq!(OperationKind::from_label(""), OperationKind::Sale);
        assert_eq!(OperationKind::from_label("Otro"), OperationKind::Other);
        assert_eq!(OperationKind::from_label("traspaso"), OperationKind::Other);
    }

    #[test]
    fn test_parse_day_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(parse_day("2024-03-05"), Some(expected));
        assert_eq!(parse_day("05/03/2024"), Some(expected));
        assert_eq!(parse_day("2024-03-05T10:30:00"), Some(expected));
        assert_eq!(parse_day("not a date"), None);
        assert_eq!(parse_day(""), None);
    }

    #[test]
    fn test_numeric_range_inclusive() {
        let range = NumericRange::new(Some(100.0), Some(200.0));
        assert!(range.contains(100.0));
        assert!(range.contains(200.0));
        assert!(!range.contains(99.99));
        assert!(!range.contains(200.01));

        let open = NumericRange::default();
        assert!(open.contains(f64::MIN));
        assert!(open.is_unbounded());
    }

    #[test]
    fn test_filter_state_default_is_pass_through() {
        let state = FilterState::default();
        assert!(state.rooms.is_none());
        assert!(state.zones.is_empty());
        assert_eq!(state.date, DateFilter::All);
        assert!(state.search.is_empty());
    }
}
