/// Strip a UTF-8 byte-order-mark from the start of the header line.
#[inline]
pub fn strip_bom(line: &str) -> &str {
    line.strip_prefix('\u{feff}').unwrap_or(line)
}

/// Split a row on `delimiter` without quote awareness.
///
/// Fields are trimmed and every double quote is removed, which is what the
/// property catalog needs: its free-text columns never embed the delimiter.
pub fn split_plain(line: &str, delimiter: char) -> Vec<String> {
    line.split(delimiter)
        .map(|field| field.trim().replace('"', ""))
        .collect()
}

/// Split a row on `delimiter` with quote awareness.
///
/// Tracks an in-quotes flag character by character and only splits on the
/// delimiter outside quotes, so free-text fields may embed the delimiter.
/// Quote characters themselves are consumed; fields are trimmed.
pub fn split_quoted(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        if ch == '"' {
            in_quotes = !in_quotes;
        } else if ch == delimiter && !in_quotes {
            fields.push(current.trim().to_string());
            current.clear();
        } else {
            current.push(ch);
        }
    }
    fields.push(current.trim().to_string());

    fields
}
