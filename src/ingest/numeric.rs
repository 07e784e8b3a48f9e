//! Lenient numeric and list coercions for CSV cells.
//!
//! Source files mix locale conventions ("350.000,50 €" next to "1200") and
//! Python-style list literals. Every function here coerces instead of
//! failing: a cell that cannot be read becomes the type-appropriate default.

/// Parse an integer cell, keeping digits and a leading minus sign only.
/// Returns 0 for empty or unreadable cells.
pub fn lenient_int(raw: &str) -> i64 {
    let mut cleaned = String::new();
    for ch in raw.chars() {
        if ch.is_ascii_digit() {
            cleaned.push(ch);
        } else if ch == '-' && cleaned.is_empty() {
            cleaned.push(ch);
        }
    }
    cleaned.parse().unwrap_or(0)
}

/// Parse a currency/area cell that may use Spanish or plain formatting.
///
/// With both comma and dot present, dots are thousands separators and the
/// comma is the decimal mark; a lone comma is the decimal mark. Currency
/// symbols and whitespace are dropped. Returns 0.0 on failure.
pub fn locale_float(raw: &str) -> f64 {
    let mut s: String = raw
        .trim()
        .chars()
        .filter(|c| *c != '€' && *c != '$' && !c.is_whitespace())
        .collect();
    if s.is_empty() {
        return 0.0;
    }

    let has_comma = s.contains(',');
    let has_dot = s.contains('.');
    if has_comma && has_dot {
        s.retain(|c| c != '.');
        s = s.replace(',', ".");
    } else if has_comma {
        s = s.replace(',', ".");
    }

    s.retain(|c| c.is_ascii_digit() || c == '.' || c == '-');
    s.parse().unwrap_or(0.0)
}

/// Parse an optional numeric bound. Empty and literal "null" cells mean
/// "unconstrained", as do unreadable ones.
pub fn opt_number(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() || s == "null" {
        return None;
    }
    s.parse().ok()
}

/// Like [`opt_number`] but collapsing the absent case to 0.0.
pub fn number_or_zero(raw: &str) -> f64 {
    opt_number(raw).unwrap_or(0.0)
}

/// Parse a list cell exported as a Python list literal, e.g. `['piso', 'atico']`.
///
/// Single quotes are normalized to double quotes and the result is read as
/// JSON. Non-list free text falls back to a one-element list; empty and
/// "null" cells become an empty list.
pub fn list_field(raw: &str) -> Vec<String> {
    let s = raw.trim();
    if s.is_empty() || s == "null" {
        return Vec::new();
    }
    let normalized = s.replace('\'', "\"");
    match serde_json::from_str::<Vec<String>>(&normalized) {
        Ok(items) => items,
        Err(_) => vec![s.to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lenient_int() {
        assert_eq!(lenient_int("3"), 3);
        assert_eq!(lenient_int(" 4 hab."), 4);
        assert_eq!(lenient_int("-2"), -2);
        assert_eq!(lenient_int(""), 0);
        assert_eq!(lenient_int("n/a"), 0);
    }

    #[test]
    fn test_locale_float_spanish_format() {
        assert_eq!(locale_float("350.000,50 €"), 350000.50);
        assert_eq!(locale_float("950,5"), 950.5);
        // Lone dots are decimal marks, so a dotted-thousands string without a
        // comma cannot be read and coerces to the default.
        assert_eq!(locale_float("1.200.000"), 0.0);
    }

    #[test]
    fn test_locale_float_plain_format() {
        assert_eq!(locale_float("1200"), 1200.0);
        assert_eq!(locale_float("85.5"), 85.5);
        assert_eq!(locale_float("$ 2000"), 2000.0);
    }

    #[test]
    fn test_locale_float_failures_become_zero() {
        assert_eq!(locale_float(""), 0.0);
        assert_eq!(locale_float("consultar"), 0.0);
    }

    #[test]
    fn test_opt_number() {
        assert_eq!(opt_number("2"), Some(2.0));
        assert_eq!(opt_number("2.5"), Some(2.5));
        assert_eq!(opt_number(""), None);
        assert_eq!(opt_number("null"), None);
        assert_eq!(opt_number("dos"), None);
    }

    #[test]
    fn test_list_field_python_literal() {
        assert_eq!(list_field("['piso', 'atico']"), vec!["piso", "atico"]);
        assert_eq!(list_field("[]"), Vec::<String>::new());
        assert_eq!(list_field("null"), Vec::<String>::new());
        assert_eq!(list_field(""), Vec::<String>::new());
    }

    #[test]
    fn test_list_field_plain_text_fallback() {
        assert_eq!(list_field("centro"), vec!["centro"]);
    }
}
