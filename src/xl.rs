//! A1-notation helpers for formula construction.
//!
//! The layout engine builds synthesis formulas as plain text; these helpers
//! mirror the cell addressing the spreadsheet surface uses internally so the
//! two always agree.

/// Last addressable 0-based row of an xlsx worksheet.
pub const MAX_ROW: u32 = 1_048_575;

/// 0-based column index to its letter name: 0 -> "A", 27 -> "AB".
pub fn col_to_name(col: u16) -> String {
    let mut name = String::new();
    let mut remainder = col as u32 + 1;

    while remainder > 0 {
        let digit = ((remainder - 1) % 26) as u8;
        name.insert(0, (b'A' + digit) as char);
        remainder = (remainder - 1) / 26;
    }

    name
}

/// 0-based (row, col) to an A1 cell reference.
pub fn cell(row: u32, col: u16) -> String {
    format!("{}{}", col_to_name(col), row + 1)
}

/// 0-based corners to an A1 range reference.
pub fn range(first_row: u32, first_col: u16, last_row: u32, last_col: u16) -> String {
    format!("{}:{}", cell(first_row, first_col), cell(last_row, last_col))
}

/// Quote a sheet name for use inside a formula, doubling embedded quotes.
pub fn quoted(sheet_name: &str) -> String {
    format!("'{}'", sheet_name.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_col_to_name() {
        assert_eq!(col_to_name(0), "A");
        assert_eq!(col_to_name(5), "F");
        assert_eq!(col_to_name(25), "Z");
        assert_eq!(col_to_name(26), "AA");
        assert_eq!(col_to_name(27), "AB");
    }

    #[test]
    fn test_cell_and_range() {
        assert_eq!(cell(0, 1), "B1");
        assert_eq!(cell(9, 3), "D10");
        assert_eq!(range(0, 1, MAX_ROW, 1), "B1:B1048576");
    }

    #[test]
    fn test_quoted_doubles_embedded_quotes() {
        assert_eq!(quoted("Réseau"), "'Réseau'");
        assert_eq!(quoted("Bob's sheet"), "'Bob''s sheet'");
    }
}
