use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::MatchRecord;

/// Fixed display threshold: a match with an overall score at or above this
/// counts as high quality.
pub const HIGH_QUALITY_THRESHOLD: f64 = 0.8;

/// Advertiser classifier separating own-brand listings from competitors.
///
/// The brand is recognized by case-insensitive substring fragments supplied
/// by configuration; the rule is a business fact, not a data-model one.
#[derive(Debug, Clone, Default)]
pub struct BrandTagger {
    fragments: Vec<String>,
}

impl BrandTagger {
    pub fn new(fragments: &[String]) -> Self {
        Self {
            fragments: fragments.iter().map(|f| f.to_lowercase()).collect(),
        }
    }

    pub fn is_own(&self, advertiser: &str) -> bool {
        let advertiser = advertiser.to_lowercase();
        self.fragments.iter().any(|f| advertiser.contains(f))
    }
}

/// One client's matches with per-group aggregates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientGroup {
    pub client_id: String,
    pub client_name: String,
    pub matches: Vec<MatchRecord>,
    pub total: usize,
    pub high_quality: usize,
    pub avg_score: f64,
    pub best_score: f64,
    pub avg_price: f64,
    pub own_brand: usize,
    pub competitor: usize,
}

/// Overall figures across every group.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummary {
    pub total_clients: usize,
    pub total_matches: usize,
    pub avg_per_client: f64,
    pub high_quality: usize,
}

/// Partition matches by client and aggregate each group.
///
/// The group key is the client id, falling back to the client name when the
/// id is blank. Matches inside a group are ordered by per-client rank
/// ascending; groups are ordered by descending match count (ties by client
/// name, for stable output).
pub fn group_by_client(matches: &[MatchRecord], brands: &BrandTagger) -> Vec<ClientGroup> {
    let mut order: Vec<String> = Vec::new();
    let mut buckets: HashMap<String, Vec<MatchRecord>> = HashMap::new();

    for m in matches {
        let key = if m.client_id.is_empty() {
            m.client_name.clone()
        } else {
            m.client_id.clone()
        };
        if !buckets.contains_key(&key) {
            order.push(key.clone());
        }
        buckets.entry(key).or_default().push(m.clone());
    }

    let mut groups: Vec<ClientGroup> = order
        .into_iter()
        .map(|key| {
            let mut group_matches = buckets.remove(&key).unwrap_or_default();
            group_matches.sort_by_key(|m| m.rank);

            let total = group_matches.len();
            let high_quality = group_matches
                .iter()
                .filter(|m| m.score >= HIGH_QUALITY_THRESHOLD)
                .count();
            let avg_score = if total > 0 {
                group_matches.iter().map(|m| m.score).sum::<f64>() / total as f64
            } else {
                0.0
            };
            let best_score = group_matches
                .iter()
                .map(|m| m.score)
                .fold(0.0_f64, f64::max);
            let avg_price = if total > 0 {
                group_matches.iter().map(|m| m.price).sum::<f64>() / total as f64
            } else {
                0.0
            };
            let own_brand = group_matches
                .iter()
                .filter(|m| brands.is_own(&m.advertiser))
                .count();

            ClientGroup {
                client_id: group_matches
                    .first()
                    .map(|m| m.client_id.clone())
                    .unwrap_or_default(),
                client_name: group_matches
                    .first()
                    .map(|m| m.client_name.clone())
                    .unwrap_or_default(),
                total,
                high_quality,
                avg_score,
                best_score,
                avg_price,
                own_brand,
                competitor: total - own_brand,
                matches: group_matches,
            }
        })
        .collect();

    groups.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.client_name.cmp(&b.client_name))
    });
    groups
}

/// Aggregate the overall match summary from the computed groups.
pub fn summarize(groups: &[ClientGroup]) -> MatchSummary {
    let total_clients = groups.len();
    let total_matches: usize = groups.iter().map(|g| g.total).sum();
    let high_quality: usize = groups.iter().map(|g| g.high_quality).sum();
    let avg_per_client = if total_clients > 0 {
        total_matches as f64 / total_clients as f64
    } else {
        0.0
    };

    MatchSummary {
        total_clients,
        total_matches,
        avg_per_client,
        high_quality,
    }
}
