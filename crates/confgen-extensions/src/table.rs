//! Extension availability table parser.
//!
//! Finds the table whose header starts with an `Extension` cell, reads the
//! version labels from the header, then maps every data row to the versions
//! whose marker cell is non-empty.

use std::collections::HashSet;

use confgen_core::{Diagnostic, ExtensionRecord, ExtensionTable, VersionColumn};
use thiserror::Error;
use tracing::{debug, warn};

use crate::tokenizer::{is_separator_row, is_table_row, split_row};

/// Header cell that opens the extension table
pub const HEADER_CELL: &str = "Extension";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("no table row starting with an 'Extension' cell")]
    HeaderNotFound,
}

impl From<TableError> for confgen_core::GeneratorError {
    fn from(err: TableError) -> Self {
        confgen_core::GeneratorError::DecodeError(format!("extension table: {}", err))
    }
}

/// Parse the extension document into records in row order.
pub fn parse_extensions(document: &str) -> Result<ExtensionTable, TableError> {
    let mut lines = document.lines().enumerate();

    let columns = loop {
        let (_, line) = lines.next().ok_or(TableError::HeaderNotFound)?;
        if let Some(columns) = header_columns(line) {
            break columns;
        }
    };
    debug!(columns = columns.len(), "extension table header found");

    let mut table = ExtensionTable::default();
    let mut seen = HashSet::new();

    for (idx, line) in lines {
        if !is_table_row(line) {
            break;
        }
        let cells = split_row(line);
        if is_separator_row(&cells) {
            continue;
        }
        let Some((name_cell, markers)) = cells.split_first() else {
            continue;
        };

        let name = normalize_name(name_cell);
        if !seen.insert(name.clone()) {
            let diagnostic = Diagnostic::DuplicateExtension {
                name,
                line: idx + 1,
            };
            warn!("{}", diagnostic);
            table.diagnostics.push(diagnostic);
            continue;
        }

        if markers.len() > columns.len() {
            debug!(
                extension = %name,
                extra = markers.len() - columns.len(),
                "ignoring marker cells beyond the header"
            );
        }

        table.records.push(ExtensionRecord {
            supported_versions: available_versions(&columns, markers),
            name,
        });
    }

    Ok(table)
}

/// Version columns when `line` is the table header, `None` otherwise.
pub fn header_columns(line: &str) -> Option<Vec<VersionColumn>> {
    if !is_table_row(line) {
        return None;
    }
    let cells = split_row(line);
    let (first, labels) = cells.split_first()?;
    if first != HEADER_CELL {
        return None;
    }
    Some(
        labels
            .iter()
            .enumerate()
            .map(|(index, label)| VersionColumn {
                index,
                label: label.clone(),
            })
            .collect(),
    )
}

/// `` `Imagick` `` -> `imagick`
pub fn normalize_name(cell: &str) -> String {
    cell.trim().trim_matches('`').trim().to_lowercase()
}

fn available_versions(columns: &[VersionColumn], markers: &[String]) -> Vec<String> {
    columns
        .iter()
        .filter(|column| {
            markers
                .get(column.index)
                .is_some_and(|marker| !marker.trim().is_empty())
        })
        .map(|column| column.label.clone())
        .collect()
}
