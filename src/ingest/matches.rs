use crate::ingest::lines::{split_quoted, strip_bom};
use crate::ingest::numeric::number_or_zero;
use crate::models::MatchRecord;

/// Parse the precomputed matches CSV into typed records.
///
/// The file is positional (22 columns, comma-delimited, quote-escaped).
/// Rows shorter than the header are skipped, and a record is only kept when
/// the client id, client name and property id are all present, since the
/// grouping engine keys on them.
pub fn parse_matches(text: &str) -> Vec<MatchRecord> {
    let mut lines = text.trim().lines();
    let Some(header_line) = lines.next() else {
        return Vec::new();
    };
    let header_len = split_quoted(strip_bom(header_line), ',').len();

    let mut records = Vec::new();
    for (line_no, line) in lines.enumerate() {
        let values = split_quoted(line, ',');
        if values.len() < header_len {
            tracing::warn!("skipping short match row {}", line_no + 2);
            continue;
        }

        let field = |i: usize| values.get(i).map(String::as_str).unwrap_or("");

        let record = MatchRecord {
            client_id: field(0).to_string(),
            client_name: field(1).to_string(),
            property_id: field(2).to_string(),
            link: field(3).to_string(),
            website: field(4).to_string(),
            advertiser: field(5).to_string(),
            zone: field(6).to_string(),
            operation: field(7).to_string(),
            kind: field(8).to_string(),
            rooms: number_or_zero(field(9)).max(0.0) as u32,
            baths: number_or_zero(field(10)).max(0.0) as u32,
            area_m2: number_or_zero(field(11)),
            price: number_or_zero(field(12)),
            score: number_or_zero(field(13)),
            price_score: number_or_zero(field(14)),
            area_score: number_or_zero(field(15)),
            rooms_score: number_or_zero(field(16)),
            baths_score: number_or_zero(field(17)),
            operation_score: number_or_zero(field(18)),
            zone_match: field(19).to_string(),
            type_match: field(20).to_string(),
            rank: number_or_zero(field(21)).max(0.0) as u32,
        };

        if record.client_id.is_empty()
            || record.client_name.is_empty()
            || record.property_id.is_empty()
        {
            tracing::warn!("skipping match row {} without identifiers", line_no + 2);
            continue;
        }

        records.push(record);
    }

    tracing::info!("parsed {} match rows", records.len());
    records
}
