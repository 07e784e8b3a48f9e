// Core engine exports
pub mod analytics;
pub mod filters;
pub mod grouping;
pub mod paging;
pub mod sort;

pub use analytics::{MarketReport, ZoneTagger};
pub use filters::{filter_properties, in_date_window, matches_filters, Facets};
pub use grouping::{group_by_client, summarize, BrandTagger, ClientGroup, MatchSummary, HIGH_QUALITY_THRESHOLD};
pub use paging::{paginate, PageSlice};
pub use sort::{sort_properties, MatchIndex, MatchStats};
