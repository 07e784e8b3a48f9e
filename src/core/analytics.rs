use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::models::{OperationKind, PropertyRecord};

/// Zone classifier marking the labels the business watches closely.
///
/// Recognition is a case-insensitive substring test against configured
/// fragments, the same shape as the advertiser brand test.
#[derive(Debug, Clone, Default)]
pub struct ZoneTagger {
    fragments: Vec<String>,
}

impl ZoneTagger {
    pub fn new(fragments: &[String]) -> Self {
        Self {
            fragments: fragments.iter().map(|f| f.to_lowercase()).collect(),
        }
    }

    pub fn is_strategic(&self, zone: &str) -> bool {
        let zone = zone.to_lowercase();
        self.fragments.iter().any(|f| zone.contains(f))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneStats {
    pub zone: String,
    pub count: usize,
    pub sale_count: usize,
    pub rental_count: usize,
    pub avg_sale_price: f64,
    pub avg_rental_price: f64,
    pub avg_sale_price_per_m2: f64,
    pub avg_area_m2: f64,
    pub market_share: f64,
    pub min_sale_price: f64,
    pub max_sale_price: f64,
    pub strategic: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvertiserStats {
    pub advertiser: String,
    pub count: usize,
    pub sale_count: usize,
    pub rental_count: usize,
    pub avg_sale_price: f64,
    pub avg_rental_price: f64,
    pub avg_area_m2: f64,
    pub market_share: f64,
    pub zone_count: usize,
    pub strategic_zone_count: usize,
    pub min_price: f64,
    pub max_price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStats {
    pub day: String,
    pub count: usize,
    pub sale_count: usize,
    pub rental_count: usize,
    pub avg_sale_price: f64,
    pub avg_rental_price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomsBucket {
    pub rooms: u32,
    pub count: usize,
    pub avg_price: f64,
    pub avg_area_m2: f64,
    pub market_share: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationStats {
    pub operation: OperationKind,
    pub count: usize,
    pub avg_price: f64,
    pub avg_area_m2: f64,
    pub market_share: f64,
    pub total_value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategicSummary {
    pub zone_count: usize,
    pub property_count: usize,
    pub market_share: f64,
    pub avg_sale_price: f64,
    pub avg_sale_price_per_m2: f64,
}

/// Market-wide analytics computed from the property collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketReport {
    pub total_properties: usize,
    pub total_sales: usize,
    pub total_rentals: usize,
    pub avg_sale_price: f64,
    pub avg_rental_price: f64,
    pub avg_sale_price_per_m2: f64,
    pub avg_sale_area_m2: f64,
    pub zones: Vec<ZoneStats>,
    pub advertisers: Vec<AdvertiserStats>,
    pub daily: Vec<DailyStats>,
    pub rooms: Vec<RoomsBucket>,
    pub operations: Vec<OperationStats>,
    pub strategic: StrategicSummary,
    /// Strategic zones with sales volume low enough, and prices high enough,
    /// to flag as underexploited.
    pub opportunities: Vec<ZoneStats>,
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Price per m², skipping zero or non-finite areas.
fn price_per_m2(property: &PropertyRecord) -> Option<f64> {
    if property.area_m2 > 0.0 {
        let v = property.price / property.area_m2;
        v.is_finite().then_some(v)
    } else {
        None
    }
}

impl MarketReport {
    /// Compute the report. Returns `None` for an empty collection: there is
    /// nothing meaningful to aggregate.
    pub fn compute(properties: &[PropertyRecord], zones: &ZoneTagger) -> Option<MarketReport> {
        if properties.is_empty() {
            return None;
        }

        let total = properties.len();
        let sales: Vec<&PropertyRecord> = properties
            .iter()
            .filter(|p| p.operation == OperationKind::Sale)
            .collect();
        let rentals: Vec<&PropertyRecord> = properties
            .iter()
            .filter(|p| p.operation == OperationKind::Rental)
            .collect();

        let sale_prices: Vec<f64> = sales.iter().map(|p| p.price).collect();
        let rental_prices: Vec<f64> = rentals.iter().map(|p| p.price).collect();
        let sale_pm2: Vec<f64> = sales.iter().filter_map(|p| price_per_m2(p)).collect();
        let avg_sale_price_per_m2 = mean(&sale_pm2);

        let zone_stats = Self::zone_stats(properties, total, zones);
        let strategic_zones: Vec<&ZoneStats> =
            zone_stats.iter().filter(|z| z.strategic).collect();
        let strategic_sale_count: usize = strategic_zones.iter().map(|z| z.sale_count).sum();

        // Underexploited high-price strategic zones
        let opportunities: Vec<ZoneStats> = strategic_zones
            .iter()
            .filter(|z| {
                z.sale_count > 0
                    && (z.sale_count as f64) < strategic_sale_count as f64 * 0.15
                    && z.avg_sale_price_per_m2 > avg_sale_price_per_m2 * 1.05
            })
            .map(|z| (*z).clone())
            .collect();

        let strategic_properties: Vec<&PropertyRecord> = properties
            .iter()
            .filter(|p| zones.is_strategic(&p.zone))
            .collect();
        let strategic_sales: Vec<&&PropertyRecord> = strategic_properties
            .iter()
            .filter(|p| p.operation == OperationKind::Sale)
            .collect();
        let strategic = StrategicSummary {
            zone_count: strategic_zones.len(),
            property_count: strategic_properties.len(),
            market_share: strategic_properties.len() as f64 / total as f64 * 100.0,
            avg_sale_price: mean(
                &strategic_sales.iter().map(|p| p.price).collect::<Vec<_>>(),
            ),
            avg_sale_price_per_m2: mean(
                &strategic_sales
                    .iter()
                    .filter_map(|p| price_per_m2(p))
                    .collect::<Vec<_>>(),
            ),
        };

        Some(MarketReport {
            total_properties: total,
            total_sales: sales.len(),
            total_rentals: rentals.len(),
            avg_sale_price: mean(&sale_prices),
            avg_rental_price: mean(&rental_prices),
            avg_sale_price_per_m2,
            avg_sale_area_m2: mean(&sales.iter().map(|p| p.area_m2).collect::<Vec<_>>()),
            zones: zone_stats,
            advertisers: Self::advertiser_stats(properties, total, zones),
            daily: Self::daily_stats(properties),
            rooms: Self::rooms_stats(&sales),
            operations: Self::operation_stats(properties, total),
            strategic,
            opportunities,
        })
    }

    fn zone_stats(
        properties: &[PropertyRecord],
        total: usize,
        zones: &ZoneTagger,
    ) -> Vec<ZoneStats> {
        #[derive(Default)]
        struct Acc {
            count: usize,
            sale_prices: Vec<f64>,
            rental_prices: Vec<f64>,
            sale_pm2: Vec<f64>,
            areas: Vec<f64>,
        }

        let mut by_zone: HashMap<String, Acc> = HashMap::new();
        for p in properties {
            let acc = by_zone.entry(p.zone.clone()).or_default();
            acc.count += 1;
            acc.areas.push(p.area_m2);
            match p.operation {
                OperationKind::Sale => {
                    acc.sale_prices.push(p.price);
                    if let Some(v) = price_per_m2(p) {
                        acc.sale_pm2.push(v);
                    }
                }
                OperationKind::Rental => acc.rental_prices.push(p.price),
                OperationKind::Other => {}
            }
        }

        let mut stats: Vec<ZoneStats> = by_zone
            .into_iter()
            .map(|(zone, acc)| ZoneStats {
                strategic: zones.is_strategic(&zone),
                count: acc.count,
                sale_count: acc.sale_prices.len(),
                rental_count: acc.rental_prices.len(),
                avg_sale_price: mean(&acc.sale_prices),
                avg_rental_price: mean(&acc.rental_prices),
                avg_sale_price_per_m2: mean(&acc.sale_pm2),
                avg_area_m2: mean(&acc.areas),
                market_share: acc.count as f64 / total as f64 * 100.0,
                min_sale_price: acc.sale_prices.iter().copied().fold(f64::INFINITY, f64::min),
                max_sale_price: acc.sale_prices.iter().copied().fold(0.0, f64::max),
                zone,
            })
            .map(|mut z| {
                if z.sale_count == 0 {
                    z.min_sale_price = 0.0;
                }
                z
            })
            .collect();

        stats.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.zone.cmp(&b.zone)));
        stats
    }

    fn advertiser_stats(
        properties: &[PropertyRecord],
        total: usize,
        zones: &ZoneTagger,
    ) -> Vec<AdvertiserStats> {
        #[derive(Default)]
        struct Acc {
            count: usize,
            sale_prices: Vec<f64>,
            rental_prices: Vec<f64>,
            prices: Vec<f64>,
            areas: Vec<f64>,
            zones: HashSet<String>,
            strategic_zones: HashSet<String>,
        }

        let mut by_advertiser: HashMap<String, Acc> = HashMap::new();
        for p in properties {
            let acc = by_advertiser.entry(p.advertiser.clone()).or_default();
            acc.count += 1;
            acc.prices.push(p.price);
            acc.areas.push(p.area_m2);
            acc.zones.insert(p.zone.clone());
            if zones.is_strategic(&p.zone) {
                acc.strategic_zones.insert(p.zone.clone());
            }
            match p.operation {
                OperationKind::Sale => acc.sale_prices.push(p.price),
                OperationKind::Rental => acc.rental_prices.push(p.price),
                OperationKind::Other => {}
            }
        }

        let mut stats: Vec<AdvertiserStats> = by_advertiser
            .into_iter()
            .map(|(advertiser, acc)| AdvertiserStats {
                advertiser,
                count: acc.count,
                sale_count: acc.sale_prices.len(),
                rental_count: acc.rental_prices.len(),
                avg_sale_price: mean(&acc.sale_prices),
                avg_rental_price: mean(&acc.rental_prices),
                avg_area_m2: mean(&acc.areas),
                market_share: acc.count as f64 / total as f64 * 100.0,
                zone_count: acc.zones.len(),
                strategic_zone_count: acc.strategic_zones.len(),
                min_price: acc.prices.iter().copied().fold(f64::INFINITY, f64::min),
                max_price: acc.prices.iter().copied().fold(0.0, f64::max),
            })
            .collect();

        stats.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.advertiser.cmp(&b.advertiser))
        });
        stats
    }

    fn daily_stats(properties: &[PropertyRecord]) -> Vec<DailyStats> {
        #[derive(Default)]
        struct Acc {
            count: usize,
            sale_prices: Vec<f64>,
            rental_prices: Vec<f64>,
        }

        // BTreeMap keeps the series in ascending date order
        let mut by_day: BTreeMap<String, Acc> = BTreeMap::new();
        for p in properties {
            let day = p
                .listed_on
                .split('T')
                .next()
                .unwrap_or(&p.listed_on)
                .to_string();
            let acc = by_day.entry(day).or_default();
            acc.count += 1;
            match p.operation {
                OperationKind::Sale => acc.sale_prices.push(p.price),
                OperationKind::Rental => acc.rental_prices.push(p.price),
                OperationKind::Other => {}
            }
        }

        let mut daily: Vec<DailyStats> = by_day
            .into_iter()
            .map(|(day, acc)| DailyStats {
                day,
                count: acc.count,
                sale_count: acc.sale_prices.len(),
                rental_count: acc.rental_prices.len(),
                avg_sale_price: mean(&acc.sale_prices),
                avg_rental_price: mean(&acc.rental_prices),
            })
            .collect();

        // Keep the 30 most recent days
        if daily.len() > 30 {
            daily.drain(..daily.len() - 30);
        }
        daily
    }

    fn rooms_stats(sales: &[&PropertyRecord]) -> Vec<RoomsBucket> {
        #[derive(Default)]
        struct Acc {
            prices: Vec<f64>,
            areas: Vec<f64>,
        }

        let mut by_rooms: BTreeMap<u32, Acc> = BTreeMap::new();
        for p in sales {
            let acc = by_rooms.entry(p.rooms).or_default();
            acc.prices.push(p.price);
            acc.areas.push(p.area_m2);
        }

        by_rooms
            .into_iter()
            .map(|(rooms, acc)| RoomsBucket {
                rooms,
                count: acc.prices.len(),
                avg_price: mean(&acc.prices),
                avg_area_m2: mean(&acc.areas),
                market_share: if sales.is_empty() {
                    0.0
                } else {
                    acc.prices.len() as f64 / sales.len() as f64 * 100.0
                },
            })
            .collect()
    }

    fn operation_stats(properties: &[PropertyRecord], total: usize) -> Vec<OperationStats> {
        [
            OperationKind::Sale,
            OperationKind::Rental,
            OperationKind::Other,
        ]
        .into_iter()
        .map(|operation| {
            let subset: Vec<&PropertyRecord> = properties
                .iter()
                .filter(|p| p.operation == operation)
                .collect();
            OperationStats {
                operation,
                count: subset.len(),
                avg_price: mean(&subset.iter().map(|p| p.price).collect::<Vec<_>>()),
                avg_area_m2: mean(&subset.iter().map(|p| p.area_m2).collect::<Vec<_>>()),
                market_share: subset.len() as f64 / total as f64 * 100.0,
                total_value: subset.iter().map(|p| p.price).sum(),
            }
        })
        .collect()
    }
}
