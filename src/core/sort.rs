use std::cmp::Ordering;
use std::collections::HashMap;

use crate::models::{MatchRecord, PropertyRecord, SortDirection, SortKey};
use crate::core::grouping::HIGH_QUALITY_THRESHOLD;

/// Match counts per property, prebuilt for the derived sort key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchStats {
    pub total: usize,
    pub high_quality: usize,
}

/// Join index from property identifiers to match counts.
///
/// Matches key on the scored property id when present, falling back to the
/// listing link; lookups try the id, the link, and finally a link-path
/// containment test, because the catalog and the scoring run do not always
/// agree on identifiers.
#[derive(Debug, Clone, Default)]
pub struct MatchIndex {
    by_key: HashMap<String, MatchStats>,
}

impl MatchIndex {
    pub fn build(matches: &[MatchRecord]) -> Self {
        let mut by_key: HashMap<String, MatchStats> = HashMap::new();
        for m in matches {
            let key = if m.property_id.is_empty() {
                m.link.clone()
            } else {
                m.property_id.clone()
            };
            if key.is_empty() {
                continue;
            }
            let stats = by_key.entry(key).or_default();
            stats.total += 1;
            if m.score >= HIGH_QUALITY_THRESHOLD {
                stats.high_quality += 1;
            }
        }
        Self { by_key }
    }

    /// Match counts for a property, degrading to zero when nothing joins.
    pub fn lookup(&self, property: &PropertyRecord) -> MatchStats {
        if let Some(stats) = self.by_key.get(&property.id.to_string()) {
            return *stats;
        }
        if !property.link.is_empty() {
            if let Some(stats) = self.by_key.get(&property.link) {
                return *stats;
            }
            let path = strip_origin(&property.link);
            if !path.is_empty() {
                for (key, stats) in &self.by_key {
                    if key.contains(path) || path.contains(key.as_str()) {
                        return *stats;
                    }
                }
            }
        }
        MatchStats::default()
    }
}

/// Drop the scheme and host from a listing URL, keeping the path.
fn strip_origin(link: &str) -> &str {
    match link.find("://") {
        Some(scheme_end) => {
            let rest = &link[scheme_end + 3..];
            match rest.find('/') {
                Some(path_start) => &rest[path_start..],
                None => "",
            }
        }
        None => link,
    }
}

/// Sort properties by a single key and direction.
///
/// `None` returns the input order untouched. String keys compare
/// case-insensitively, the date key compares parsed days, and the derived
/// match-count key joins through `index` on the high-quality count. The sort
/// is stable, so equal keys keep their input order.
pub fn sort_properties(
    mut properties: Vec<PropertyRecord>,
    key: Option<SortKey>,
    direction: SortDirection,
    index: &MatchIndex,
) -> Vec<PropertyRecord> {
    let Some(key) = key else {
        return properties;
    };

    properties.sort_by(|a, b| {
        let ordering = compare(a, b, key, index);
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
    properties
}

fn compare(a: &PropertyRecord, b: &PropertyRecord, key: SortKey, index: &MatchIndex) -> Ordering {
    match key {
        SortKey::Price => cmp_f64(a.price, b.price),
        SortKey::Rooms => a.rooms.cmp(&b.rooms),
        SortKey::Baths => a.baths.cmp(&b.baths),
        SortKey::Area => cmp_f64(a.area_m2, b.area_m2),
        SortKey::Zone => a.zone.to_lowercase().cmp(&b.zone.to_lowercase()),
        SortKey::Advertiser => a
            .advertiser
            .to_lowercase()
            .cmp(&b.advertiser.to_lowercase()),
        SortKey::ListedOn => a.listed_day().cmp(&b.listed_day()),
        SortKey::MatchCount => index
            .lookup(a)
            .high_quality
            .cmp(&index.lookup(b).high_quality),
    }
}

#[inline]
fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}
