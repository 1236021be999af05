//! CSV output generation
//!
//! This module writes assembled records to a CSV file, one row per record
//! in crawl order, under a fixed header row. Absent optional fields become
//! empty cells, so every row has the same shape.

use crate::record::Record;
use csv::Writer;
use std::path::Path;
use thiserror::Error;

/// Column headers written as the first row, in field order
const COLUMNS: [&str; 7] = [
    "title",
    "price_gbp",
    "stock",
    "rating",
    "category",
    "description",
    "product_url",
];

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Writes records to a CSV file, creating parent directories as needed
///
/// An existing file at the path is replaced. The header row is always
/// written, even for an empty record set.
///
/// # Arguments
///
/// * `records` - The assembled records, in crawl order
/// * `output_path` - Path where the CSV file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the CSV file
/// * `Err(OutputError)` - Failed to create directories or write rows
pub fn write_records(records: &[Record], output_path: &Path) -> OutputResult<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut writer = Writer::from_path(output_path)?;
    writer.write_record(COLUMNS)?;

    for record in records {
        // Debug formatting keeps the ".0" on whole-number prices
        let price = format!("{:?}", record.price_gbp);
        writer.write_record([
            record.title.as_str(),
            price.as_str(),
            record.stock.as_str(),
            record.rating.as_deref().unwrap_or(""),
            record.category.as_deref().unwrap_or(""),
            record.description.as_deref().unwrap_or(""),
            record.product_url.as_str(),
        ])?;
    }

    writer.flush()?;

    tracing::debug!(
        "Wrote {} records to {}",
        records.len(),
        output_path.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use csv::Reader;
    use tempfile::tempdir;

    fn create_test_record() -> Record {
        Record {
            title: "It's Only the Himalayas".to_string(),
            price_gbp: 45.17,
            stock: "In stock".to_string(),
            rating: Some("Two".to_string()),
            category: Some("Travel".to_string()),
            description: Some("Just don't do anything stupid.".to_string()),
            product_url: "https://books.toscrape.com/catalogue/its-only-the-himalayas_981/index.html".to_string(),
        }
    }

    #[test]
    fn test_header_row_is_always_written() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("books.csv");

        write_records(&[], &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content.lines().next(),
            Some("title,price_gbp,stock,rating,category,description,product_url")
        );
        assert_eq!(content.lines().count(), 1);
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data").join("books.csv");

        write_records(&[create_test_record()], &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_absent_fields_become_empty_cells() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("books.csv");

        let record = Record {
            title: "Bare".to_string(),
            price_gbp: 12.5,
            stock: "In stock".to_string(),
            rating: None,
            category: None,
            description: None,
            product_url: "https://example/catalogue/bare_1/index.html".to_string(),
        };
        write_records(&[record], &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content.lines().nth(1),
            Some("Bare,12.5,In stock,,,,https://example/catalogue/bare_1/index.html")
        );
    }

    #[test]
    fn test_whole_number_prices_keep_decimal_point() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("books.csv");

        let mut record = create_test_record();
        record.price_gbp = 10.0;
        write_records(&[record], &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.lines().nth(1).unwrap().contains(",10.0,In stock,"));
    }

    #[test]
    fn test_rows_round_trip_in_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("books.csv");

        let mut second = create_test_record();
        second.title = "A Second Book".to_string();
        second.price_gbp = 51.77;
        write_records(&[create_test_record(), second], &path).unwrap();

        let mut reader = Reader::from_path(&path).unwrap();
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();

        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "It's Only the Himalayas");
        assert_eq!(&rows[0][1], "45.17");
        assert_eq!(&rows[0][3], "Two");
        assert_eq!(
            &rows[0][6],
            "https://books.toscrape.com/catalogue/its-only-the-himalayas_981/index.html"
        );
        assert_eq!(&rows[1][0], "A Second Book");
        assert_eq!(&rows[1][1], "51.77");
    }

    #[test]
    fn test_existing_file_is_replaced() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("books.csv");

        let mut second = create_test_record();
        second.title = "A Second Book".to_string();
        write_records(&[create_test_record(), second], &path).unwrap();
        write_records(&[create_test_record()], &path).unwrap();

        let mut reader = Reader::from_path(&path).unwrap();
        assert_eq!(reader.records().count(), 1);
    }

    #[test]
    fn test_fields_with_commas_are_quoted() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("books.csv");

        let mut record = create_test_record();
        record.description = Some("Wherever you go, whatever you do.".to_string());
        write_records(&[record], &path).unwrap();

        let mut reader = Reader::from_path(&path).unwrap();
        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(&row[5], "Wherever you go, whatever you do.");
    }
}
