use std::sync::{Arc, RwLock};

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::ingest::{parse_clients, parse_matches, parse_properties};
use crate::models::{ClientRecord, MatchRecord, OperationKind, PropertyRecord};
use crate::services::catalog::CatalogClient;

/// Where the property collection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertySource {
    /// Parsed from the remote catalog CSV.
    Remote,
    /// Bundled sample listings, used when the catalog cannot be fetched.
    Sample,
}

/// One immutable snapshot of the three collections.
///
/// Cloning is cheap: the record vectors sit behind `Arc`s and are never
/// mutated after parsing. A reload builds a whole new snapshot.
#[derive(Clone)]
pub struct Datasets {
    pub properties: Arc<Vec<PropertyRecord>>,
    pub matches: Arc<Vec<MatchRecord>>,
    pub clients: Arc<Vec<ClientRecord>>,
    pub property_source: PropertySource,
    pub loaded_at: DateTime<Utc>,
}

impl Datasets {
    pub fn new(
        properties: Vec<PropertyRecord>,
        matches: Vec<MatchRecord>,
        clients: Vec<ClientRecord>,
        property_source: PropertySource,
    ) -> Self {
        Self {
            properties: Arc::new(properties),
            matches: Arc::new(matches),
            clients: Arc::new(clients),
            property_source,
            loaded_at: Utc::now(),
        }
    }
}

/// In-memory dataset store behind the query endpoints.
///
/// The three sources load independently: one failing fetch never blocks the
/// others. Failed matches/clients fall back to empty collections, failed
/// properties fall back to the bundled sample listings, so the dashboard
/// always has something to render.
pub struct DatasetStore {
    catalog: CatalogClient,
    properties_delimiter: char,
    current: RwLock<Datasets>,
}

impl DatasetStore {
    /// Create a store that starts on the bundled sample data.
    pub fn new(catalog: CatalogClient, properties_delimiter: char) -> Self {
        Self {
            catalog,
            properties_delimiter,
            current: RwLock::new(Datasets::new(
                sample_properties(),
                Vec::new(),
                Vec::new(),
                PropertySource::Sample,
            )),
        }
    }

    /// The current snapshot.
    pub fn current(&self) -> Datasets {
        self.current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Replace the current snapshot wholesale.
    pub fn install(&self, datasets: Datasets) {
        let mut guard = self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = datasets;
    }

    /// Fetch and parse all three sources, then swap the snapshot in.
    ///
    /// Fetches run concurrently and fail independently; errors are logged
    /// and replaced by fallbacks, never propagated.
    pub async fn reload(&self) -> Datasets {
        let (properties_text, matches_text, clients_text) = tokio::join!(
            self.catalog.fetch_properties(),
            self.catalog.fetch_matches(),
            self.catalog.fetch_clients(),
        );

        let today = Local::now().date_naive();

        let (properties, property_source) = match properties_text {
            Ok(text) => (
                parse_properties(&text, self.properties_delimiter, today),
                PropertySource::Remote,
            ),
            Err(e) => {
                tracing::warn!("Property catalog unavailable, using sample data: {}", e);
                (sample_properties(), PropertySource::Sample)
            }
        };

        let matches = match matches_text {
            Ok(text) => parse_matches(&text),
            Err(e) => {
                tracing::warn!("Matches unavailable, using empty collection: {}", e);
                Vec::new()
            }
        };

        let clients = match clients_text {
            Ok(text) => parse_clients(&text),
            Err(e) => {
                tracing::warn!("Clients unavailable, using empty collection: {}", e);
                Vec::new()
            }
        };

        tracing::info!(
            "datasets loaded: {} properties ({:?}), {} matches, {} clients",
            properties.len(),
            property_source,
            matches.len(),
            clients.len()
        );

        let datasets = Datasets::new(properties, matches, clients, property_source);
        self.install(datasets.clone());
        datasets
    }
}

/// Bundled sample listings used when the remote catalog cannot be fetched.
pub fn sample_properties() -> Vec<PropertyRecord> {
    let listing = |id: u32,
                   rooms: u32,
                   baths: u32,
                   price: f64,
                   area_m2: f64,
                   advertiser: &str,
                   zone: &str,
                   website: &str,
                   listed_on: &str,
                   operation: OperationKind| PropertyRecord {
        id,
        rooms,
        baths,
        price,
        link: format!("https://ejemplo.com/propiedad{id}"),
        area_m2,
        advertiser: advertiser.to_string(),
        zone: zone.to_string(),
        website: website.to_string(),
        listed_on: listed_on.to_string(),
        operation,
        extra: Default::default(),
    };

    vec![
        listing(1, 3, 2, 350000.0, 85.0, "Inmobiliaria García", "Centro", "Idealista", "2024-01-15", OperationKind::Sale),
        listing(2, 2, 1, 1200.0, 65.0, "Propiedades Madrid", "Malasaña", "Fotocasa", "2024-01-20", OperationKind::Rental),
        listing(3, 4, 3, 520000.0, 120.0, "HomeFinder", "Chamberí", "Idealista", "2024-01-25", OperationKind::Sale),
        listing(4, 1, 1, 800.0, 45.0, "Alquileres Plus", "La Latina", "Habitaclia", "2024-02-01", OperationKind::Rental),
        listing(5, 5, 4, 750000.0, 150.0, "Luxury Homes", "Salamanca", "Engel & Völkers", "2024-02-05", OperationKind::Sale),
        listing(6, 3, 2, 1500.0, 90.0, "Rent & Go", "Chueca", "Spotahome", "2024-02-10", OperationKind::Rental),
        listing(7, 2, 2, 420000.0, 75.0, "Inmobiliaria García", "Retiro", "Idealista", "2024-02-12", OperationKind::Sale),
        listing(8, 6, 5, 2500.0, 200.0, "Luxury Homes", "Salamanca", "Engel & Völkers", "2024-02-20", OperationKind::Other),
        listing(9, 3, 1, 380000.0, 80.0, "Casas del Sur", "Lavapiés", "Habitaclia", "2024-02-18", OperationKind::Sale),
        listing(10, 1, 1, 280000.0, 40.0, "Starter Homes", "Tetuán", "Idealista", "2024-02-25", OperationKind::Sale),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SourceSettings;

    fn dead_catalog() -> CatalogClient {
        CatalogClient::new(SourceSettings {
            properties_url: "http://127.0.0.1:1/inmuebles.csv".to_string(),
            matches_url: "http://127.0.0.1:1/matches.csv".to_string(),
            clients_url: "http://127.0.0.1:1/contacts.csv".to_string(),
            properties_delimiter: ";".to_string(),
        })
    }

    #[test]
    fn test_store_starts_on_sample_data() {
        let store = DatasetStore::new(dead_catalog(), ';');
        let datasets = store.current();

        assert_eq!(datasets.property_source, PropertySource::Sample);
        assert!(!datasets.properties.is_empty());
        assert!(datasets.matches.is_empty());
    }

    #[test]
    fn test_install_replaces_snapshot() {
        let store = DatasetStore::new(dead_catalog(), ';');
        store.install(Datasets::new(
            Vec::new(),
            Vec::new(),
            Vec::new(),
            PropertySource::Remote,
        ));

        let datasets = store.current();
        assert_eq!(datasets.property_source, PropertySource::Remote);
        assert!(datasets.properties.is_empty());
    }

    #[tokio::test]
    async fn test_reload_falls_back_when_every_fetch_fails() {
        let store = DatasetStore::new(dead_catalog(), ';');
        let datasets = store.reload().await;

        assert_eq!(datasets.property_source, PropertySource::Sample);
        assert_eq!(datasets.properties.len(), sample_properties().len());
        assert!(datasets.matches.is_empty());
        assert!(datasets.clients.is_empty());
    }

    #[test]
    fn test_sample_properties_are_well_formed() {
        let samples = sample_properties();
        assert!(samples.iter().all(|p| p.listed_day().is_some()));
        assert!(samples.iter().any(|p| p.operation == OperationKind::Rental));
        assert!(samples.iter().any(|p| p.zone == "Centro"));
    }
}
