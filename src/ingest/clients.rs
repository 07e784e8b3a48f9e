use crate::ingest::lines::{split_quoted, strip_bom};
use crate::ingest::numeric::{list_field, opt_number};
use crate::models::ClientRecord;

/// Parse the client contacts CSV into typed records.
///
/// The export is positional (22 columns) and quote-escaped: names and notes
/// may embed commas, so rows go through the quote-aware splitter. Rows
/// shorter than the header or without an id in the first column are skipped.
pub fn parse_clients(text: &str) -> Vec<ClientRecord> {
    let mut lines = text.trim().lines();
    let Some(header_line) = lines.next() else {
        return Vec::new();
    };
    let header_len = split_quoted(strip_bom(header_line), ',').len();

    let mut records = Vec::new();
    for (line_no, line) in lines.enumerate() {
        let values = split_quoted(line, ',');
        if values.len() < header_len || values[0].is_empty() {
            tracing::warn!("skipping client row {}", line_no + 2);
            continue;
        }

        let field = |i: usize| values.get(i).map(String::as_str).unwrap_or("");

        records.push(ClientRecord {
            id: field(0).to_string(),
            name: field(1).to_string(),
            phone: field(2).to_string(),
            email: field(3).to_string(),
            registered_on: field(4).to_string(),
            created_by: field(5).to_string(),
            operation: field(6).to_string(),
            types: list_field(field(7)),
            conditions: list_field(field(8)),
            rooms_min: opt_number(field(9)),
            rooms_max: opt_number(field(10)),
            baths_min: opt_number(field(11)),
            baths_max: opt_number(field(12)),
            living_min: opt_number(field(13)),
            living_max: opt_number(field(14)),
            area_min_m2: opt_number(field(15)),
            area_max_m2: opt_number(field(16)),
            price_min: opt_number(field(17)),
            price_max: opt_number(field(18)),
            locations: list_field(field(19)),
            flags: list_field(field(20)),
            zone: field(21).to_string(),
        });
    }

    tracing::info!("parsed {} client rows", records.len());
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "id,nombre,telefono,mail,fecha_inclusion,creado_info,operation,types,conditions,rooms_min,rooms_max,bath_min,bath_max,living_min,living_max,area_min_m2,area_max_m2,price_min_eur,price_max_eur,locations,flags,zona_std";

    #[test]
    fn test_parse_client_row() {
        let csv = format!(
            "{HEADER}\nc1,\"Pérez, Ana\",600111222,ana@mail.es,2024-03-01,captado por web,venta,\"['piso', 'atico']\",\"['reformado']\",2,3,1,null,,,60,120,150000,250000,\"['Centro', 'Eixample']\",\"['urgente']\",Centro"
        );
        let clients = parse_clients(&csv);

        assert_eq!(clients.len(), 1);
        let client = &clients[0];
        assert_eq!(client.name, "Pérez, Ana");
        assert_eq!(client.types, vec!["piso", "atico"]);
        assert_eq!(client.rooms_min, Some(2.0));
        assert_eq!(client.rooms_max, Some(3.0));
        assert_eq!(client.baths_max, None);
        assert_eq!(client.living_min, None);
        assert_eq!(client.price_min, Some(150000.0));
        assert_eq!(client.locations, vec!["Centro", "Eixample"]);
        assert_eq!(client.zone, "Centro");
        assert!(client.has_requirements());
        assert!(client.has_budget());
    }

    #[test]
    fn test_short_and_idless_rows_are_skipped() {
        let csv = format!(
            "{HEADER}\nc1,Ana\n,Ana,1,2,3,4,5,6,7,8,9,10,11,12,13,14,15,16,17,18,19,20\nc2,Luis,1,2,3,4,venta,[],[],,,,,,,,,,,[],[],Norte"
        );
        let clients = parse_clients(&csv);

        assert_eq!(clients.len(), 1);
        assert_eq!(clients[0].id, "c2");
        assert!(!clients[0].has_budget());
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_clients("").is_empty());
        assert!(parse_clients(HEADER).is_empty());
    }
}
