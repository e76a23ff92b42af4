//! Conversion of raw list rows into power records.
//!
//! List services hand back loosely-typed rows keyed by column name. Multi-value
//! columns arrive either as JSON arrays or as a single text value with one
//! entry per line. Semicolons also separate, and commas do too except in the
//! colors column, where they belong to values like `rgb(0, 0, 255)`.

use serde_json::{Map, Value};

use super::errors::StoreError;
use super::ListFields;
use crate::core::hero::models::PowerRecord;

const SEPARATORS: [char; 3] = ['\n', ';', ','];
const COLOR_SEPARATORS: [char; 2] = ['\n', ';'];

/// Turn raw rows into records, reading columns by the names in `fields`.
///
/// Rows without a title are skipped with a warning; missing multi-value
/// columns are empty.
pub fn records_from_rows(list: &str, rows: Vec<Value>, fields: &ListFields) -> Vec<PowerRecord> {
    rows.into_iter()
        .enumerate()
        .filter_map(|(i, row)| {
            let record = match row {
                Value::Object(map) => record_from_row(list, i, &map, fields),
                other => Err(StoreError::invalid_record(
                    list,
                    format!("row {} is not an object: {}", i, other),
                )),
            };
            match record {
                Ok(record) => Some(record),
                Err(e) => {
                    log::warn!("Skipping row: {}", e);
                    None
                }
            }
        })
        .collect()
}

fn record_from_row(
    list: &str,
    index: usize,
    row: &Map<String, Value>,
    fields: &ListFields,
) -> Result<PowerRecord, StoreError> {
    let title = match row.get(&fields.title) {
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        _ => {
            return Err(StoreError::invalid_record(
                list,
                format!("row {} has no '{}' value", index, fields.title),
            ))
        }
    };

    Ok(PowerRecord {
        title,
        icons: multi_value(row.get(&fields.icons)),
        colors: split_values(row.get(&fields.colors), &COLOR_SEPARATORS),
        name_prefixes: multi_value(row.get(&fields.name_prefixes)),
        name_mains: multi_value(row.get(&fields.name_mains)),
    })
}

/// Flatten a multi-value column into trimmed, non-empty strings.
pub fn multi_value(value: Option<&Value>) -> Vec<String> {
    split_values(value, &SEPARATORS)
}

fn split_values(value: Option<&Value>, separators: &[char]) -> Vec<String> {
    match value {
        Some(Value::String(s)) => split_text(s, separators),
        Some(Value::Array(items)) => items
            .iter()
            .flat_map(|item| match item {
                Value::String(s) => split_text(s, separators),
                Value::Null => Vec::new(),
                other => vec![other.to_string()],
            })
            .collect(),
        // Some list services wrap choice columns as {"results": [...]}
        Some(Value::Object(map)) => split_values(map.get("results"), separators),
        Some(Value::Number(n)) => vec![n.to_string()],
        _ => Vec::new(),
    }
}

fn split_text(text: &str, separators: &[char]) -> Vec<String> {
    text.split(separators)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
