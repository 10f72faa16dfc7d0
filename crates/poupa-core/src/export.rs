//! Tabular export/import of transactions
//!
//! The flat shape shared with spreadsheets is
//! `date,description,amount,type,category` with the amount written with
//! exactly two decimals and the category as its name (empty when the id does
//! not resolve). Reading and writing files is up to the caller; this module
//! works on `Read`/`Write` values and strings.

use std::io::{Read, Write};

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::aggregate::CategoryLookup;
use crate::error::{Error, Result};
use crate::models::{Category, Transaction, TransactionType};

/// Header row of the export format
pub const EXPORT_HEADERS: [&str; 5] = ["date", "description", "amount", "type", "category"];

/// One exported transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRow {
    pub date: String,
    pub description: String,
    /// Two decimal places
    pub amount: String,
    #[serde(rename = "type")]
    pub tx_type: String,
    pub category: String,
}

impl ExportRow {
    pub fn from_transaction(tx: &Transaction, categories: &CategoryLookup<'_>) -> Self {
        Self {
            date: tx.date.format("%Y-%m-%d").to_string(),
            description: tx.description.clone(),
            amount: format!("{:.2}", tx.amount),
            tx_type: tx.tx_type.as_str().to_string(),
            category: categories
                .get(&tx.category_id)
                .map(|c| c.name.clone())
                .unwrap_or_default(),
        }
    }
}

/// Export rows in input order
pub fn export_rows(transactions: &[Transaction], categories: &[Category]) -> Vec<ExportRow> {
    let lookup = CategoryLookup::new(categories, "");
    transactions
        .iter()
        .map(|tx| ExportRow::from_transaction(tx, &lookup))
        .collect()
}

/// Write rows (with header) as CSV
pub fn write_csv<W: Write>(rows: &[ExportRow], writer: W) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(EXPORT_HEADERS)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Export transactions to a CSV string
pub fn export_transactions_csv(
    transactions: &[Transaction],
    categories: &[Category],
) -> Result<String> {
    let rows = export_rows(transactions, categories);
    let mut buf = Vec::new();
    write_csv(&rows, &mut buf)?;
    debug!("Exported {} transactions to CSV", rows.len());
    String::from_utf8(buf).map_err(|e| Error::InvalidData(format!("CSV is not UTF-8: {}", e)))
}

/// A transaction read from CSV, before the storage layer assigns ids
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedRow {
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,
    pub tx_type: TransactionType,
    pub category_id: String,
}

impl ImportedRow {
    pub fn into_transaction(self, id: impl Into<String>, user_id: impl Into<String>) -> Transaction {
        Transaction {
            id: id.into(),
            user_id: user_id.into(),
            tx_type: self.tx_type,
            amount: self.amount,
            date: self.date,
            category_id: self.category_id,
            description: self.description,
            payment_method: None,
            recurring: None,
        }
    }
}

/// Result of reading an import file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportOutcome {
    pub rows: Vec<ImportedRow>,
    /// Rows dropped for a missing or unreadable date, amount or type
    pub skipped: usize,
}

/// Read CSV in the export format.
///
/// Rows without a date, amount or type, and rows the CSV reader cannot
/// decode, are skipped and counted. Any type other than
/// `income` is read as an expense. Categories are matched by name ignoring
/// case; unknown names get the first category's id (empty if there are no
/// categories).
pub fn parse_csv<R: Read>(reader: R, categories: &[Category]) -> Result<ImportOutcome> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let default_category = categories.first().map(|c| c.id.clone()).unwrap_or_default();
    let mut outcome = ImportOutcome::default();

    for (line, result) in rdr.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                warn!("Skipping import row {}: {}", line + 2, e);
                outcome.skipped += 1;
                continue;
            }
        };
        match parse_record(&record, categories, &default_category) {
            Some(row) => outcome.rows.push(row),
            None => {
                // +2: header line, 1-based
                warn!("Skipping import row {}: missing date, amount or type", line + 2);
                outcome.skipped += 1;
            }
        }
    }

    debug!(
        "Parsed {} import rows ({} skipped)",
        outcome.rows.len(),
        outcome.skipped
    );
    Ok(outcome)
}

fn parse_record(
    record: &StringRecord,
    categories: &[Category],
    default_category: &str,
) -> Option<ImportedRow> {
    let field = |i: usize| record.get(i).map(str::trim).filter(|s| !s.is_empty());

    let date = NaiveDate::parse_from_str(field(0)?, "%Y-%m-%d").ok()?;
    let amount: f64 = field(2)?.parse().ok()?;
    let tx_type = if field(3)? == "income" {
        TransactionType::Income
    } else {
        TransactionType::Expense
    };

    let category_id = field(4)
        .map(str::to_lowercase)
        .and_then(|name| {
            categories
                .iter()
                .find(|c| c.name.to_lowercase() == name)
                .map(|c| c.id.clone())
        })
        .unwrap_or_else(|| default_category.to_string());

    Some(ImportedRow {
        date,
        description: record.get(1).unwrap_or_default().to_string(),
        amount,
        tx_type,
        category_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryKind;

    fn categories() -> Vec<Category> {
        vec![
            Category {
                id: "c1".to_string(),
                user_id: "u1".to_string(),
                name: "Alimentacao".to_string(),
                kind: CategoryKind::Expense,
            },
            Category {
                id: "c2".to_string(),
                user_id: "u1".to_string(),
                name: "Salario".to_string(),
                kind: CategoryKind::Income,
            },
        ]
    }

    fn tx(description: &str, amount: f64, tx_type: TransactionType, category: &str) -> Transaction {
        Transaction {
            id: "t".to_string(),
            user_id: "u1".to_string(),
            tx_type,
            amount,
            date: NaiveDate::from_ymd_opt(2024, 4, 9).unwrap(),
            category_id: category.to_string(),
            description: description.to_string(),
            payment_method: None,
            recurring: None,
        }
    }

    #[test]
    fn test_export_formats_amount_and_category() {
        let csv = export_transactions_csv(
            &[
                tx("Feira", 12.5, TransactionType::Expense, "c1"),
                tx("Bonus", 1000.0, TransactionType::Income, "gone"),
            ],
            &categories(),
        )
        .unwrap();

        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "date,description,amount,type,category");
        assert_eq!(lines[1], "2024-04-09,Feira,12.50,expense,Alimentacao");
        assert_eq!(lines[2], "2024-04-09,Bonus,1000.00,income,");
    }

    #[test]
    fn test_export_quotes_commas() {
        let csv = export_transactions_csv(
            &[tx("Pao, leite", 3.0, TransactionType::Expense, "c1")],
            &categories(),
        )
        .unwrap();
        assert!(csv.contains("\"Pao, leite\""));
    }

    #[test]
    fn test_export_empty_has_header_only() {
        let csv = export_transactions_csv(&[], &[]).unwrap();
        assert_eq!(csv.trim_end(), "date,description,amount,type,category");
    }

    #[test]
    fn test_import_maps_categories_case_insensitively() {
        let input = "date,description,amount,type,category\n\
                     2024-01-05,Mercado,55.20,expense,alimentacao\n\
                     2024-01-06,Pagamento,3000,income,SALARIO\n\
                     2024-01-07,Cinema,30,expense,Lazer\n";
        let outcome = parse_csv(input.as_bytes(), &categories()).unwrap();
        assert_eq!(outcome.skipped, 0);
        assert_eq!(outcome.rows.len(), 3);
        assert_eq!(outcome.rows[0].category_id, "c1");
        assert_eq!(outcome.rows[1].category_id, "c2");
        assert_eq!(outcome.rows[1].tx_type, TransactionType::Income);
        // Unknown name falls back to the first category
        assert_eq!(outcome.rows[2].category_id, "c1");
    }

    #[test]
    fn test_import_skips_incomplete_rows_and_defaults_type() {
        let input = "date,description,amount,type,category\n\
                     ,Sem data,10,expense,\n\
                     2024-01-05,Sem valor,,expense,\n\
                     2024-01-05,Sem tipo,10,,\n\
                     2024-01-05,Outro tipo,10,transfer,\n";
        let outcome = parse_csv(input.as_bytes(), &[]).unwrap();
        assert_eq!(outcome.skipped, 3);
        assert_eq!(outcome.rows.len(), 1);
        assert_eq!(outcome.rows[0].tx_type, TransactionType::Expense);
        assert_eq!(outcome.rows[0].category_id, "");
    }

    #[test]
    fn test_import_skips_undecodable_rows() {
        let mut input = b"date,description,amount,type,category\n".to_vec();
        input.extend_from_slice(b"2024-01-05,Caf\xe9,10,expense,Alimentacao\n");
        input.extend_from_slice(b"2024-01-06,Pao,5,expense,Alimentacao\n");

        let outcome = parse_csv(input.as_slice(), &categories()).unwrap();
        assert_eq!(outcome.skipped, 1);
        assert_eq!(outcome.rows.len(), 1);
        assert_eq!(outcome.rows[0].description, "Pao");
        assert_eq!(outcome.rows[0].amount, 5.0);
    }

    #[test]
    fn test_export_then_import_preserves_fields() {
        let original = vec![
            tx("Feira, sabado", 12.5, TransactionType::Expense, "c1"),
            tx("Pagamento", 2500.0, TransactionType::Income, "c2"),
        ];
        let csv = export_transactions_csv(&original, &categories()).unwrap();
        let outcome = parse_csv(csv.as_bytes(), &categories()).unwrap();

        let restored: Vec<Transaction> = outcome
            .rows
            .into_iter()
            .map(|row| row.into_transaction("t", "u1"))
            .collect();
        assert_eq!(restored, original);
    }
}
