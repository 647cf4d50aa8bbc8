//! Numeric value extraction from heterogeneous cells.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::table::CellValue;

/// First signed integer-or-decimal substring, or a bare ".digits" fraction.
static NUMERIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[-+]?\d+(?:\.\d+)?|\.\d+").expect("numeric pattern compiles"));

/// Pull an optional numeric value out of a cell.
///
/// Already-numeric cells pass through untouched. Text is scanned after
/// stripping thousands-separator commas, and the first numeric substring
/// wins — so `"Invoice #2023 for 45.00"` yields `2023.0`, not `45.0`. Text
/// with no digits, and missing cells, yield `None`: absence is a defined
/// outcome here, never coerced to zero. Callers choose how to treat it.
pub fn extract(value: &CellValue) -> Option<f64> {
    match value {
        CellValue::Number(n) => Some(*n),
        CellValue::Missing => None,
        CellValue::Text(s) => {
            let cleaned = s.replace(',', "");
            let m = NUMERIC_RE.find(&cleaned)?;
            m.as_str().parse::<f64>().ok()
        }
    }
}
