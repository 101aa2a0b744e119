use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Result, SplitError};
use crate::models::{BillSummary, CalculatedItem, Item, ItemId};
use crate::split::parse_amount;

/// File formats understood for item import and result export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Json,
}

impl FileFormat {
    /// Pick the format from a path's extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("csv") => Ok(FileFormat::Csv),
            Some("json") => Ok(FileFormat::Json),
            _ => Err(SplitError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Price as written in an item file: a number or free text.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawPrice {
    Number(f64),
    Text(String),
}

impl RawPrice {
    fn amount(&self) -> f64 {
        match self {
            RawPrice::Number(n) => *n,
            RawPrice::Text(s) => parse_amount(s),
        }
    }
}

#[derive(Debug, Deserialize)]
struct JsonItemRecord {
    #[serde(default)]
    name: String,
    #[serde(default)]
    price: Option<RawPrice>,
}

#[derive(Debug, Deserialize)]
struct CsvItemRecord {
    #[serde(default)]
    name: String,
    #[serde(default)]
    price: String,
}

/// Load an item list from a `.csv` (`name,price` header) or `.json` file.
///
/// Prices that cannot be read become zero. Ids are numbered from 1.
pub fn load_items<P: AsRef<Path>>(path: P) -> Result<Vec<Item>> {
    let path = path.as_ref();
    let entries: Vec<(String, f64)> = match FileFormat::from_path(path)? {
        FileFormat::Json => {
            let content = fs::read_to_string(path)?;
            let records: Vec<JsonItemRecord> = serde_json::from_str(&content)?;
            records
                .into_iter()
                .map(|r| (r.name, r.price.map(|p| p.amount()).unwrap_or(0.0)))
                .collect()
        }
        FileFormat::Csv => {
            let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;
            let mut entries = Vec::new();
            for record in rdr.deserialize() {
                let record: CsvItemRecord = record?;
                entries.push((record.name, parse_amount(&record.price)));
            }
            entries
        }
    };

    info!(path = %path.display(), count = entries.len(), "Loaded items");

    Ok(entries
        .into_iter()
        .zip(1..)
        .map(|((name, price), id)| Item::new(ItemId(id), name, price))
        .collect())
}

/// Label of the closing row carrying the summary in CSV exports.
const CSV_TOTAL_LABEL: &str = "Total";

/// Write computed rows as CSV, closed by a `Total` row.
///
/// The total row holds the subtotal, the summed share and the amount paid.
pub fn write_result_csv<W: Write>(
    writer: W,
    rows: &[CalculatedItem],
    summary: &BillSummary,
) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record(["name", "original_price", "percentage", "final_price"])?;

    for row in rows {
        wtr.write_record([
            row.name.clone(),
            format!("{:.2}", row.original_price),
            format!("{:.2}", row.percentage),
            format!("{:.2}", row.final_price),
        ])?;
    }

    let share: f64 = rows.iter().map(|row| row.percentage).sum();
    wtr.write_record([
        CSV_TOTAL_LABEL.to_string(),
        format!("{:.2}", summary.subtotal),
        format!("{:.2}", share),
        format!("{:.2}", summary.amount_paid()),
    ])?;

    wtr.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct ResultDocument<'a> {
    items: &'a [CalculatedItem],
    summary: &'a BillSummary,
}

/// Write computed rows and the summary as pretty JSON.
pub fn write_result_json<W: Write>(
    mut writer: W,
    rows: &[CalculatedItem],
    summary: &BillSummary,
) -> Result<()> {
    let doc = ResultDocument {
        items: rows,
        summary,
    };
    serde_json::to_writer_pretty(&mut writer, &doc)?;
    writeln!(writer)?;
    Ok(())
}

/// Export a result to a file, choosing the format from its extension.
pub fn export_result<P: AsRef<Path>>(
    path: P,
    rows: &[CalculatedItem],
    summary: &BillSummary,
) -> Result<()> {
    let path = path.as_ref();
    let format = FileFormat::from_path(path)?;
    let file = File::create(path)?;

    match format {
        FileFormat::Csv => write_result_csv(file, rows, summary)?,
        FileFormat::Json => write_result_json(file, rows, summary)?,
    }

    info!(path = %path.display(), rows = rows.len(), "Exported result");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::split::{compute, summarize};
    use tempfile::Builder;

    fn temp_with(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_json_items() {
        let file = temp_with(
            ".json",
            r#"[
                {"name": "Coffee", "price": 20000},
                {"name": "Tea", "price": "10.000"},
                {"name": "Water"}
            ]"#,
        );

        let items = load_items(file.path()).unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0], Item::new(ItemId(1), "Coffee", 20000.0));
        assert_eq!(items[1].price, 10000.0);
        assert_eq!(items[2].price, 0.0);
        assert_eq!(items[2].id, ItemId(3));
    }

    #[test]
    fn test_load_csv_items() {
        let file = temp_with(".csv", "name,price\nCoffee,20000\nTea, 10.000\nBroken,abc\n");

        let items = load_items(file.path()).unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].name, "Coffee");
        assert_eq!(items[1].price, 10000.0);
        assert_eq!(items[2].price, 0.0);
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let file = temp_with(".txt", "Coffee 20000");
        let err = load_items(file.path()).unwrap_err();
        assert!(matches!(err, SplitError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_write_result_csv() {
        let items = vec![
            Item::new(ItemId(1), "Coffee", 20000.0),
            Item::new(ItemId(2), "Tea", 10000.0),
        ];
        let rows = compute(&items, 33000.0).into_rows().unwrap();
        let summary = summarize(&items, 33000.0);

        let mut buf = Vec::new();
        write_result_csv(&mut buf, &rows, &summary).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "name,original_price,percentage,final_price");
        assert_eq!(lines[1], "Coffee,20000.00,66.67,22000.00");
        assert_eq!(lines[2], "Tea,10000.00,33.33,11000.00");
        assert_eq!(lines[3], "Total,30000.00,100.00,33000.00");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_export_json_file() {
        let items = vec![Item::new(ItemId(1), "Coffee", 20000.0)];
        let rows = compute(&items, 18000.0).into_rows().unwrap();
        let summary = summarize(&items, 18000.0);

        let out = Builder::new().suffix(".json").tempfile().unwrap();
        export_result(out.path(), &rows, &summary).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(out.path()).unwrap()).unwrap();
        assert_eq!(value["items"][0]["final_price"], 18000.0);
        assert_eq!(value["summary"]["adjustment"]["kind"], "discount");
    }
}
