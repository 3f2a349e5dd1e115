//! CSV export of the dashboard table.
//!
//! The header row is bare; every data cell is double-quoted with inner quotes
//! doubled. Timestamps are reduced to their `YYYY-MM-DD` date.

use std::io::Write;

use chrono::NaiveDate;
use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::model::SiteRecord;

const HEADER: &str = "Title,Slug,Price,Status,Created,Updated\n";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Error writing an export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Export is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Write `records` as CSV to `writer`, in the given order.
pub fn write_csv<W: Write>(records: &[SiteRecord], mut writer: W) -> Result<(), ExportError> {
    writer.write_all(HEADER.as_bytes())?;

    let mut csv = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    for record in records {
        let created = record.created_at.format(DATE_FORMAT).to_string();
        let updated = record.updated_at.format(DATE_FORMAT).to_string();
        csv.write_record([
            record.title.as_str(),
            record.slug.as_str(),
            record.price.as_str(),
            record.status.as_str(),
            created.as_str(),
            updated.as_str(),
        ])?;
    }
    csv.flush()?;
    Ok(())
}

/// Render `records` as a CSV document.
pub fn export_csv(records: &[SiteRecord]) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    write_csv(records, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

/// Download name for an export made on `date` (`websites-YYYY-MM-DD.csv`).
#[must_use]
pub fn export_file_name(date: NaiveDate) -> String {
    format!("websites-{}.csv", date.format(DATE_FORMAT))
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::SiteStatus;
    use crate::query::tests::record;

    #[test]
    fn test_export_empty_has_header_only() {
        assert_eq!(export_csv(&[]).unwrap(), HEADER);
    }

    #[test]
    fn test_export_rows_are_quoted() {
        let mut r = record("1", "Acme \"Best\" Bakery", "acme-bakery");
        r.price = "₹499".to_owned();
        r.status = SiteStatus::Published;
        r.updated_at = "2024-02-10T23:59:00Z".parse::<DateTime<Utc>>().unwrap();

        let csv = export_csv(&[r]).unwrap();

        assert_eq!(
            csv,
            "Title,Slug,Price,Status,Created,Updated\n\
             \"Acme \"\"Best\"\" Bakery\",\"acme-bakery\",\"₹499\",\"Published\",\"2024-01-01\",\"2024-02-10\"\n"
        );
    }

    #[test]
    fn test_export_keeps_order() {
        let records = vec![record("1", "B", "b"), record("2", "A", "a")];

        let csv = export_csv(&records).unwrap();
        let slugs: Vec<&str> = csv
            .lines()
            .skip(1)
            .filter_map(|l| l.split(',').nth(1))
            .collect();

        assert_eq!(slugs, vec!["\"b\"", "\"a\""]);
    }

    #[test]
    fn test_export_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(export_file_name(date), "websites-2024-03-07.csv");
    }
}
