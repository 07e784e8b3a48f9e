// CSV ingestion exports
pub mod clients;
pub mod lines;
pub mod matches;
pub mod numeric;
pub mod properties;
pub mod schema;

pub use clients::parse_clients;
pub use matches::parse_matches;
pub use properties::parse_properties;
