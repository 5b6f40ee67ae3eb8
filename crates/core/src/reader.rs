//! CSV reader.
//!
//! Reads an uploaded byte stream into [`RawRow`]s. Only structural problems
//! are errors here; numeric cells are kept as text and coerced later by
//! [`crate::sanitize`].

use csv::{ReaderBuilder, StringRecord, Trim};
use thiserror::Error;

use crate::types::{RawRow, RawValue};

/// Columns every upload must provide. Extra columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 5] = ["name", "category", "price", "quantity_sold", "rating"];

/// Errors that make an input unreadable as a table.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The input has no header row.
    #[error("input is empty")]
    Empty,

    /// The header is missing one or more required columns.
    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// A record could not be read.
    #[error("malformed CSV at line {line}: {message}")]
    Malformed {
        /// 1-based line number of the offending record.
        line: u64,
        message: String,
    },
}

/// Positions of the required columns within the header.
struct ColumnIndex {
    name: usize,
    category: usize,
    price: usize,
    quantity_sold: usize,
    rating: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self, ParseError> {
        let find = |column: &str| headers.iter().position(|h| h == column);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|c| find(c).is_none())
            .map(|c| (*c).to_owned())
            .collect();
        if !missing.is_empty() {
            return Err(ParseError::MissingColumns(missing));
        }

        // Every lookup succeeded above.
        Ok(Self {
            name: find("name").unwrap_or_default(),
            category: find("category").unwrap_or_default(),
            price: find("price").unwrap_or_default(),
            quantity_sold: find("quantity_sold").unwrap_or_default(),
            rating: find("rating").unwrap_or_default(),
        })
    }

    fn row(&self, record: &StringRecord) -> RawRow {
        let text = |idx: usize| record.get(idx).unwrap_or_default();

        RawRow {
            name: text(self.name).to_owned(),
            category: text(self.category).to_owned(),
            price: RawValue::from(record.get(self.price)),
            quantity_sold: RawValue::from(record.get(self.quantity_sold)),
            rating: RawValue::from(record.get(self.rating)),
        }
    }
}

/// Read CSV bytes into raw rows, preserving input order.
///
/// The first row is the header. Cells are trimmed. Rows shorter than the
/// header are padded with missing cells; rows longer than the header are
/// rejected.
///
/// # Errors
///
/// Returns `ParseError::Empty` if there is no header,
/// `ParseError::MissingColumns` if a required column is absent, and
/// `ParseError::Malformed` for unreadable records (bad quoting, invalid
/// UTF-8, NUL characters, too many fields).
pub fn read_csv(input: &[u8]) -> Result<Vec<RawRow>, ParseError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(input);

    let headers = reader.headers().map_err(malformed)?.clone();
    if headers.is_empty() {
        return Err(ParseError::Empty);
    }
    let columns = ColumnIndex::from_headers(&headers)?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(malformed)?;

        if record.len() > headers.len() {
            return Err(ParseError::Malformed {
                line: record.position().map_or(0, csv::Position::line),
                message: format!(
                    "expected {} fields, found {}",
                    headers.len(),
                    record.len()
                ),
            });
        }

        // PostgreSQL text cannot hold NUL.
        if record.iter().any(|field| field.contains('\0')) {
            return Err(ParseError::Malformed {
                line: record.position().map_or(0, csv::Position::line),
                message: "field contains a NUL character".to_owned(),
            });
        }

        // Blank lines are skipped by the reader; a row of empty cells is kept.
        rows.push(columns.row(&record));
    }

    Ok(rows)
}

fn malformed(err: csv::Error) -> ParseError {
    ParseError::Malformed {
        line: err.position().map_or(0, csv::Position::line),
        message: err.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    const HEADER: &str = "name,category,price,quantity_sold,rating\n";

    #[test]
    fn test_reads_rows_in_order() {
        let input = format!("{HEADER}Lamp,Home,10,5,4.5\nMug,Kitchen,3.5,12,4\n");
        let rows = read_csv(input.as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Lamp");
        assert_eq!(rows[0].category, "Home");
        assert_eq!(rows[0].price, RawValue::Text("10".to_owned()));
        assert_eq!(rows[1].name, "Mug");
        assert_eq!(rows[1].rating, RawValue::Text("4".to_owned()));
    }

    #[test]
    fn test_column_order_and_extra_columns() {
        let input = "sku,rating,price,name,quantity_sold,category\n\
                     A1,3.0,9.99,Pen,100,Office\n";
        let rows = read_csv(input.as_bytes()).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Pen");
        assert_eq!(rows[0].category, "Office");
        assert_eq!(rows[0].price, RawValue::Text("9.99".to_owned()));
        assert_eq!(rows[0].quantity_sold, RawValue::Text("100".to_owned()));
    }

    #[test]
    fn test_empty_cells_are_missing() {
        let input = format!("{HEADER}Lamp,Home,,5,\n");
        let rows = read_csv(input.as_bytes()).unwrap();

        assert!(rows[0].price.is_missing());
        assert!(rows[0].rating.is_missing());
    }

    #[test]
    fn test_short_rows_are_padded() {
        let input = format!("{HEADER}Lamp,Home,10\n");
        let rows = read_csv(input.as_bytes()).unwrap();

        assert_eq!(rows.len(), 1);
        assert!(rows[0].quantity_sold.is_missing());
        assert!(rows[0].rating.is_missing());
    }

    #[test]
    fn test_long_rows_are_rejected() {
        let input = format!("{HEADER}Lamp,Home,10,5,4,extra\n");
        let err = read_csv(input.as_bytes()).unwrap_err();

        assert!(matches!(err, ParseError::Malformed { line: 2, .. }));
    }

    #[test]
    fn test_missing_columns() {
        let input = "name,category,price\nLamp,Home,10\n";
        let err = read_csv(input.as_bytes()).unwrap_err();

        assert_eq!(
            err,
            ParseError::MissingColumns(vec!["quantity_sold".to_owned(), "rating".to_owned()])
        );
        assert_eq!(
            err.to_string(),
            "missing required columns: quantity_sold, rating"
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(read_csv(b"").unwrap_err(), ParseError::Empty);
    }

    #[test]
    fn test_header_only() {
        let rows = read_csv(HEADER.as_bytes()).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_quoted_fields() {
        let input = format!("{HEADER}\"Lamp, brass\",Home,10,5,4\n");
        let rows = read_csv(input.as_bytes()).unwrap();

        assert_eq!(rows[0].name, "Lamp, brass");
    }

    #[test]
    fn test_invalid_utf8_is_malformed() {
        let mut input = HEADER.as_bytes().to_vec();
        input.extend_from_slice(b"L\xffmp,Home,10,5,4\n");

        assert!(matches!(
            read_csv(&input).unwrap_err(),
            ParseError::Malformed { .. }
        ));
    }

    #[test]
    fn test_nul_character_is_malformed() {
        let input = format!("{HEADER}Lamp,Home,1,1,4\nLa\0mp,Home,10,5,4\n");
        let err = read_csv(input.as_bytes()).unwrap_err();

        assert!(matches!(err, ParseError::Malformed { line: 3, .. }));
        assert!(err.to_string().contains("NUL"));
    }
}
