//! FILENAME: core/cell-engine/src/coord.rs
//! PURPOSE: Conversions between 0-based indices and A1-style coordinate parts.
//! CONTEXT: Column letters use bijective base-26: there is no digit for zero,
//! so "A" = 0, "Z" = 25, "AA" = 26, "ZZ" = 701, "AAA" = 702.
//! Row 1 in A1 notation = row 0 internally.

const ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Converts a 0-based column index to its column letters.
/// 0 -> "A", 25 -> "Z", 26 -> "AA", 701 -> "ZZ", 702 -> "AAA".
pub fn index_to_col(col_index: u32) -> String {
    let mut letters = Vec::with_capacity(4);
    let mut n = col_index;
    loop {
        letters.push(ALPHABET[(n % 26) as usize]);
        if n < 26 {
            break;
        }
        // Each higher digit runs 1..=26, so step down before dividing.
        n = n / 26 - 1;
    }
    letters.reverse();
    letters.into_iter().map(char::from).collect()
}

/// Converts column letters back to a 0-based column index.
/// Accepts either case. Returns None for an empty string, non-letters,
/// or a value that does not fit in u32.
pub fn col_to_index(col_str: &str) -> Option<u32> {
    if col_str.is_empty() {
        return None;
    }
    let mut result: u32 = 0;
    for c in col_str.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let digit = (c.to_ascii_uppercase() as u32) - ('A' as u32) + 1;
        result = result.checked_mul(26)?.checked_add(digit)?;
    }
    Some(result - 1)
}

/// Converts a 0-based row index to the 1-based row number shown in A1 notation.
pub fn row_number(row_index: u32) -> u32 {
    row_index + 1
}

/// Splits a local A1 reference ("B2", "aa10") into 0-based (column, row).
/// Sheet prefixes and `$` anchors are not accepted.
pub fn parse_a1(reference: &str) -> Option<(u32, u32)> {
    let split = reference.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = reference.split_at(split);
    let column = col_to_index(letters)?;
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let row_num: u32 = digits.parse().ok()?;
    if row_num == 0 {
        return None;
    }
    Some((column, row_num - 1))
}

/// Quotes a sheet name for use as a reference prefix.
/// Names made only of ASCII letters are left bare; everything else is
/// wrapped in single quotes.
pub fn escape_sheet_name(sheet: &str) -> String {
    if !sheet.is_empty() && sheet.chars().all(|c| c.is_ascii_alphabetic()) {
        sheet.to_string()
    } else {
        format!("'{}'", sheet)
    }
}
