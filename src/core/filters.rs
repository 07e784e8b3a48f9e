use chrono::{Days, NaiveDate};

use crate::models::{
    ClientRecord, DateFilter, FilterState, MatchRecord, OperationKind, PropertyRecord,
};

/// Check if a property passes every axis of the filter state.
///
/// Axes compose with logical AND; an empty axis is a pass-through.
#[inline]
pub fn matches_filters(property: &PropertyRecord, filters: &FilterState, today: NaiveDate) -> bool {
    if !filters.operations.is_empty() && !filters.operations.contains(&property.operation) {
        return false;
    }

    if let Some(rooms) = filters.rooms {
        if property.rooms != rooms {
            return false;
        }
    }

    if let Some(baths) = filters.baths {
        if property.baths != baths {
            return false;
        }
    }

    if !filters.price.contains(property.price) {
        return false;
    }

    if !filters.area.contains(property.area_m2) {
        return false;
    }

    if !filters.zones.is_empty() && !filters.zones.contains(&property.zone) {
        return false;
    }

    if !filters.advertisers.is_empty() && !filters.advertisers.contains(&property.advertiser) {
        return false;
    }

    if !matches_search(property, &filters.search) {
        return false;
    }

    in_date_window(property.listed_day(), &filters.date, today)
}

/// Apply the filter state over the whole collection.
///
/// Pure: same records + same filters + same reference day always produce the
/// same output, in input order.
pub fn filter_properties(
    properties: &[PropertyRecord],
    filters: &FilterState,
    today: NaiveDate,
) -> Vec<PropertyRecord> {
    properties
        .iter()
        .filter(|p| matches_filters(p, filters, today))
        .cloned()
        .collect()
}

/// Case-insensitive substring search, OR'd across the searchable fields.
#[inline]
fn matches_search(property: &PropertyRecord, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }
    property.zone.to_lowercase().contains(&term)
        || property.advertiser.to_lowercase().contains(&term)
        || property.website.to_lowercase().contains(&term)
}

/// Check a calendar day against a date window.
///
/// Records without a readable date only pass the `All` window.
pub fn in_date_window(day: Option<NaiveDate>, filter: &DateFilter, today: NaiveDate) -> bool {
    if *filter == DateFilter::All {
        return true;
    }
    let Some(day) = day else {
        return false;
    };

    match filter {
        DateFilter::All => true,
        DateFilter::Today => day == today,
        DateFilter::Yesterday => today
            .checked_sub_days(Days::new(1))
            .map_or(false, |yesterday| day == yesterday),
        DateFilter::Last7Days => today
            .checked_sub_days(Days::new(7))
            .map_or(false, |floor| day >= floor),
        DateFilter::Last30Days => today
            .checked_sub_days(Days::new(30))
            .map_or(false, |floor| day >= floor),
        DateFilter::Custom { from, to } => {
            from.map_or(true, |from| day >= from) && to.map_or(true, |to| day <= to)
        }
    }
}

/// Free-text match over a client profile (name, phone, email, zone, desired
/// types and locations).
pub fn client_matches_term(client: &ClientRecord, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }
    client.name.to_lowercase().contains(&term)
        || client.phone.contains(&term)
        || client.email.to_lowercase().contains(&term)
        || client.zone.to_lowercase().contains(&term)
        || client.types.iter().any(|t| t.to_lowercase().contains(&term))
        || client
            .locations
            .iter()
            .any(|l| l.to_lowercase().contains(&term))
}

/// Free-text match over a match record (client name, zone, advertiser).
pub fn match_matches_term(record: &MatchRecord, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }
    record.client_name.to_lowercase().contains(&term)
        || record.zone.to_lowercase().contains(&term)
        || record.advertiser.to_lowercase().contains(&term)
}

/// Distinct filter option lists derived from the loaded collection.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Facets {
    pub zones: Vec<String>,
    pub advertisers: Vec<String>,
    pub operations: Vec<OperationKind>,
}

impl Facets {
    /// Collect sorted distinct zones and advertisers, and the present
    /// operations in their fixed display order (sale, rental, other).
    pub fn collect(properties: &[PropertyRecord]) -> Self {
        let mut zones: Vec<String> = properties.iter().map(|p| p.zone.clone()).collect();
        zones.sort();
        zones.dedup();

        let mut advertisers: Vec<String> =
            properties.iter().map(|p| p.advertiser.clone()).collect();
        advertisers.sort();
        advertisers.dedup();

        let operations = [
            OperationKind::Sale,
            OperationKind::Rental,
            OperationKind::Other,
        ]
        .into_iter()
        .filter(|op| properties.iter().any(|p| p.operation == *op))
        .collect();

        Self {
            zones,
            advertisers,
            operations,
        }
    }
}
