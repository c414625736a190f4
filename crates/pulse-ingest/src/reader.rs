//! CSV reading into raw, string-typed rows.
//!
//! Column handling mirrors the upload contract: `Date` and `Engagements` are
//! required and their absence fails the whole upload; the four categorical
//! columns are optional and absent ones surface as `None` on every row.

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::error::IngestError;

pub(crate) const DATE_COLUMN: &str = "Date";
pub(crate) const ENGAGEMENTS_COLUMN: &str = "Engagements";
pub(crate) const OPTIONAL_COLUMNS: [&str; 4] = ["Platform", "Sentiment", "Media Type", "Location"];

/// One CSV row exactly as uploaded, before cleaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPost {
    pub date: String,
    pub engagements: String,
    pub platform: Option<String>,
    pub sentiment: Option<String>,
    pub media_type: Option<String>,
    pub location: Option<String>,
}

/// Column indices resolved from the header row.
struct ColumnMap {
    date: usize,
    engagements: usize,
    platform: Option<usize>,
    sentiment: Option<usize>,
    media_type: Option<usize>,
    location: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Result<Self, IngestError> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);

        let date = find(DATE_COLUMN).ok_or(IngestError::MissingColumn(DATE_COLUMN))?;
        let engagements =
            find(ENGAGEMENTS_COLUMN).ok_or(IngestError::MissingColumn(ENGAGEMENTS_COLUMN))?;

        Ok(Self {
            date,
            engagements,
            platform: find(OPTIONAL_COLUMNS[0]),
            sentiment: find(OPTIONAL_COLUMNS[1]),
            media_type: find(OPTIONAL_COLUMNS[2]),
            location: find(OPTIONAL_COLUMNS[3]),
        })
    }
}

/// Reads CSV text into raw rows.
///
/// Short rows are tolerated (missing trailing cells read as empty); cell
/// values are whitespace-trimmed.
///
/// # Errors
///
/// - [`IngestError::MissingColumn`] if `Date` or `Engagements` is absent from
///   the header row.
/// - [`IngestError::Csv`] if the payload is not parseable as CSV.
pub fn read_posts(csv_text: &str) -> Result<Vec<RawPost>, IngestError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(csv_text.as_bytes());

    let columns = ColumnMap::from_headers(reader.headers()?)?;

    let cell = |record: &StringRecord, idx: usize| -> String {
        record.get(idx).unwrap_or("").to_string()
    };
    let optional_cell = |record: &StringRecord, idx: Option<usize>| -> Option<String> {
        idx.map(|i| cell(record, i))
    };

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(RawPost {
            date: cell(&record, columns.date),
            engagements: cell(&record, columns.engagements),
            platform: optional_cell(&record, columns.platform),
            sentiment: optional_cell(&record, columns.sentiment),
            media_type: optional_cell(&record, columns.media_type),
            location: optional_cell(&record, columns.location),
        });
    }

    tracing::debug!(rows = rows.len(), "parsed CSV upload");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_CSV: &str = "\
Date,Engagements,Platform,Sentiment,Media Type,Location
2024-01-01,5,X,Positive,Image,NYC
2024-01-02,10,Y,Negative,Video,LA
";

    #[test]
    fn reads_all_columns() {
        let rows = read_posts(FULL_CSV).expect("parse");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, "2024-01-01");
        assert_eq!(rows[0].engagements, "5");
        assert_eq!(rows[0].platform.as_deref(), Some("X"));
        assert_eq!(rows[1].media_type.as_deref(), Some("Video"));
        assert_eq!(rows[1].location.as_deref(), Some("LA"));
    }

    #[test]
    fn missing_date_column_is_fatal() {
        let err = read_posts("Engagements,Platform\n5,X\n").unwrap_err();
        assert!(
            matches!(err, IngestError::MissingColumn("Date")),
            "got: {err:?}"
        );
    }

    #[test]
    fn missing_engagements_column_is_fatal() {
        let err = read_posts("Date,Platform\n2024-01-01,X\n").unwrap_err();
        assert!(
            matches!(err, IngestError::MissingColumn("Engagements")),
            "got: {err:?}"
        );
    }

    #[test]
    fn absent_optional_columns_read_as_none() {
        let rows = read_posts("Date,Engagements\n2024-01-01,5\n").expect("parse");
        assert_eq!(rows.len(), 1);
        assert!(rows[0].platform.is_none());
        assert!(rows[0].sentiment.is_none());
        assert!(rows[0].media_type.is_none());
        assert!(rows[0].location.is_none());
    }

    #[test]
    fn short_rows_fill_missing_cells_with_empty() {
        let rows = read_posts("Date,Engagements,Platform\n2024-01-01\n").expect("parse");
        assert_eq!(rows[0].engagements, "");
        assert_eq!(rows[0].platform.as_deref(), Some(""));
    }

    #[test]
    fn header_whitespace_is_trimmed() {
        let rows = read_posts("Date , Engagements\n2024-01-01,5\n").expect("parse");
        assert_eq!(rows[0].date, "2024-01-01");
        assert_eq!(rows[0].engagements, "5");
    }

    #[test]
    fn empty_input_with_headers_yields_no_rows() {
        let rows = read_posts("Date,Engagements\n").expect("parse");
        assert!(rows.is_empty());
    }
}
