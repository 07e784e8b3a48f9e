use chrono::NaiveDate;

use crate::ingest::lines::{split_plain, strip_bom};
use crate::ingest::numeric::{lenient_int, locale_float};
use crate::ingest::schema::{self, PropertyColumn};
use crate::models::{OperationKind, PropertyRecord, UNKNOWN_LABEL};

/// Parse the property catalog CSV into typed records.
///
/// The header row is matched against the alias schema; unmatched columns are
/// kept verbatim in each record's overflow map. Rows shorter than the header
/// are skipped, every readable cell overrides a type-appropriate default and
/// records receive sequential 1-based ids. `today` backs the inclusion-date
/// default for rows that omit it.
///
/// Inputs with fewer than two lines produce an empty list, never an error.
pub fn parse_properties(text: &str, delimiter: char, today: NaiveDate) -> Vec<PropertyRecord> {
    let mut lines = text.trim().lines();
    let Some(header_line) = lines.next() else {
        return Vec::new();
    };

    let headers = split_plain(strip_bom(header_line), delimiter);
    let columns: Vec<Option<PropertyColumn>> =
        headers.iter().map(|h| schema::resolve(h)).collect();

    let default_date = today.format("%Y-%m-%d").to_string();
    let mut records = Vec::new();

    for (line_no, line) in lines.enumerate() {
        let values = split_plain(line, delimiter);
        if values.len() < headers.len() {
            tracing::warn!(
                "skipping short property row {} ({} of {} fields)",
                line_no + 2,
                values.len(),
                headers.len()
            );
            continue;
        }

        let mut record = PropertyRecord {
            id: records.len() as u32 + 1,
            rooms: 0,
            baths: 0,
            price: 0.0,
            link: String::new(),
            area_m2: 0.0,
            advertiser: String::new(),
            zone: String::new(),
            website: String::new(),
            listed_on: String::new(),
            operation: OperationKind::Sale,
            extra: Default::default(),
        };

        for (i, column) in columns.iter().enumerate() {
            let value = values[i].as_str();
            match column {
                Some(PropertyColumn::Rooms) => record.rooms = lenient_int(value).max(0) as u32,
                Some(PropertyColumn::Baths) => record.baths = lenient_int(value).max(0) as u32,
                Some(PropertyColumn::Price) => record.price = locale_float(value),
                Some(PropertyColumn::Area) => record.area_m2 = locale_float(value),
                Some(PropertyColumn::Link) => record.link = value.to_string(),
                Some(PropertyColumn::Advertiser) => record.advertiser = value.to_string(),
                Some(PropertyColumn::Zone) => record.zone = value.to_string(),
                Some(PropertyColumn::Website) => record.website = value.to_string(),
                Some(PropertyColumn::ListedOn) => record.listed_on = value.to_string(),
                Some(PropertyColumn::Operation) => {
                    record.operation = OperationKind::from_label(value)
                }
                None => {
                    if !value.is_empty() {
                        record.extra.insert(headers[i].clone(), value.to_string());
                    }
                }
            }
        }

        if record.advertiser.is_empty() {
            record.advertiser = UNKNOWN_LABEL.to_string();
        }
        if record.zone.is_empty() {
            record.zone = UNKNOWN_LABEL.to_string();
        }
        if record.listed_on.is_empty() {
            record.listed_on = default_date.clone();
        }

        records.push(record);
    }

    tracing::info!("parsed {} property rows", records.len());
    records
}
