//! Spreadsheet-to-address extraction.
//!
//! Narrow interface over `calamine`: a client-local file becomes a list of
//! candidate address strings. Only the first column of the first sheet is
//! consulted, and only string cells longer than 2 characters qualify.

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to read spreadsheet: {0}")]
    Spreadsheet(#[from] calamine::Error),
    #[error("the spreadsheet has no sheets")]
    NoSheet,
    #[error("no valid address found in the first column")]
    NoAddresses,
}

/// Extract candidate addresses from the first sheet of an `.xlsx`/`.xls` file.
pub fn addresses_from_spreadsheet(path: &Path) -> Result<Vec<String>, ImportError> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(ImportError::NoSheet)??;

    let addresses = first_column_addresses(range.rows());
    if addresses.is_empty() {
        return Err(ImportError::NoAddresses);
    }

    info!(path = %path.display(), count = addresses.len(), "imported addresses from spreadsheet");
    Ok(addresses)
}

fn first_column_addresses<'a>(rows: impl Iterator<Item = &'a [Data]>) -> Vec<String> {
    rows.filter_map(|row| match row.first() {
        Some(Data::String(value)) if value.chars().count() > 2 => Some(value.clone()),
        _ => None,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_string_cells_longer_than_two_chars_qualify() {
        let rows: Vec<Vec<Data>> = vec![
            vec![Data::String("Rua das Flores, 120".to_string())],
            vec![Data::String("ok".to_string())], // too short
            vec![Data::Float(42.0)],              // numeric header rows are skipped
            vec![Data::Empty],
            vec![],
            vec![Data::String("Av. Brasil, 55".to_string()), Data::Float(1.0)],
        ];

        let addresses = first_column_addresses(rows.iter().map(Vec::as_slice));
        assert_eq!(
            addresses,
            vec!["Rua das Flores, 120".to_string(), "Av. Brasil, 55".to_string()]
        );
    }

    #[test]
    fn empty_sheet_yields_no_addresses() {
        let rows: Vec<Vec<Data>> = Vec::new();
        assert!(first_column_addresses(rows.iter().map(Vec::as_slice)).is_empty());
    }
}
