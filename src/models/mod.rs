// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    parse_day, ClientRecord, DateFilter, FilterState, MatchRecord, NumericRange, OperationKind,
    PropertyRecord, SortDirection, SortKey, UNKNOWN_LABEL,
};
pub use requests::{ClientQueryRequest, MatchGroupsRequest, PropertyQueryRequest};
pub use responses::{
    AnalyticsResponse, ClientQueryResponse, ClientSummary, ErrorResponse, HealthResponse,
    MatchGroupsResponse, PropertyQueryResponse, ReloadResponse,
};
