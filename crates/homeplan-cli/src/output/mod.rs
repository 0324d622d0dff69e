pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Split a result object into scalar rows (nested objects flattened to
/// `parent.child`) and the first array of objects, which formats as its own
/// table (e.g. schedule periods).
pub(crate) fn split_result(map: &Map<String, Value>) -> (Vec<(String, Value)>, Option<&[Value]>) {
    let mut rows = Vec::new();
    let mut rows_array = None;
    flatten_into(map, "", &mut rows, &mut rows_array);
    (rows, rows_array)
}

fn flatten_into<'a>(
    map: &'a Map<String, Value>,
    prefix: &str,
    rows: &mut Vec<(String, Value)>,
    rows_array: &mut Option<&'a [Value]>,
) {
    for (key, val) in map {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match val {
            Value::Object(inner) => flatten_into(inner, &name, rows, rows_array),
            Value::Array(items)
                if rows_array.is_none() && items.first().is_some_and(Value::is_object) =>
            {
                *rows_array = Some(items.as_slice());
            }
            other => rows.push((name, other.clone())),
        }
    }
}
