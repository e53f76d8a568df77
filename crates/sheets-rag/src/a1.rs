//! A1 cell-range notation helpers

use crate::error::{Error, Result};

/// Convert a 1-based column number to its A1 letter form.
///
/// `1` is `"A"`, `26` is `"Z"`, `27` is `"AA"`.
pub fn col_to_letter(n: usize) -> Result<String> {
    if n == 0 {
        return Err(Error::validation("column number must be a positive integer"));
    }

    let mut letters = Vec::new();
    let mut num = n;
    while num > 0 {
        let remainder = (num - 1) % 26;
        letters.push(b'A' + remainder as u8);
        num = (num - 1) / 26;
    }
    letters.reverse();

    // Only ASCII uppercase bytes are pushed above.
    Ok(String::from_utf8(letters).unwrap_or_default())
}

/// Build the scan range for a tab, e.g. `build_range("Sheet1", 10, 3)` is
/// `"Sheet1!A1:C10"`.
pub fn build_range(tab_title: &str, rows: usize, cols: usize) -> Result<String> {
    if tab_title.trim().is_empty() {
        return Err(Error::validation("tab title must be a non-empty string"));
    }
    if rows == 0 {
        return Err(Error::validation("rows must be a positive integer"));
    }
    if cols == 0 {
        return Err(Error::validation("cols must be a positive integer"));
    }

    Ok(format!("{}!A1:{}{}", tab_title, col_to_letter(cols)?, rows))
}
