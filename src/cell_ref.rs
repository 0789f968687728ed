//! Excel-style column letters (1-based).

/// Convert a 1-based column index to Excel column letters (A, B, ..., Z, AA, AB, ...).
///
/// Column 0 has no name and yields an empty string.
pub fn column_name(column: u32) -> String {
    let mut result = String::new();
    let mut n = column;
    while n > 0 {
        n -= 1;
        // n % 26 < 26, so the sum stays in ASCII range
        let c = char::from_u32(u32::from(b'A') + n % 26).unwrap_or('?');
        result.insert(0, c);
        n /= 26;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LAST_COLUMN;

    #[test]
    fn test_column_names() {
        assert_eq!(column_name(1), "A");
        assert_eq!(column_name(26), "Z");
        assert_eq!(column_name(27), "AA");
        assert_eq!(column_name(702), "ZZ");
        assert_eq!(column_name(703), "AAA");
        assert_eq!(column_name(LAST_COLUMN), "XFD");
        assert_eq!(column_name(0), "");
    }
}
