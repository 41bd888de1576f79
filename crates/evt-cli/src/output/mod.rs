use serde::Serialize;
use serde_json::{Map, Value};

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a serializable response in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
        OutputFormat::Table => {
            let prefs = ui::prefs();
            let options = table::TableOptions {
                max_width: prefs.width,
                color: prefs.color,
            };
            Ok(render_table(serde_json::to_value(value)?, options))
        }
    }
}

/// Print a serializable response to stdout.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    println!("{}", render(value, format)?);
    Ok(())
}

/// Arrays of objects become one row per item; a single object becomes
/// key/value rows. An object whose only array field is a list of objects
/// (the event board) renders that list.
fn render_table(value: Value, options: table::TableOptions) -> String {
    match value {
        Value::Array(items) => render_rows(&items, options),
        Value::Object(map) => match sole_listing(&map) {
            Some(items) => render_rows(items, options),
            None => {
                let rows = map
                    .iter()
                    .map(|(key, value)| vec![key.clone(), cell(value)])
                    .collect::<Vec<_>>();
                table::render(&["key", "value"], &rows, options)
            }
        },
        scalar => cell(&scalar),
    }
}

fn sole_listing(map: &Map<String, Value>) -> Option<&[Value]> {
    let mut arrays = map.values().filter_map(Value::as_array);
    let first = arrays.next()?;
    if arrays.next().is_some() || !first.iter().all(Value::is_object) {
        return None;
    }
    Some(first.as_slice())
}

fn render_rows(items: &[Value], options: table::TableOptions) -> String {
    if items.is_empty() {
        return String::from("(none)");
    }

    let mut headers = Vec::<&str>::new();
    for key in items.iter().filter_map(Value::as_object).flat_map(Map::keys) {
        if !headers.contains(&key.as_str()) {
            headers.push(key.as_str());
        }
    }
    if headers.is_empty() {
        let rows = items.iter().map(|item| vec![cell(item)]).collect::<Vec<_>>();
        return table::render(&["value"], &rows, options);
    }

    let rows = items
        .iter()
        .map(|item| {
            headers
                .iter()
                .map(|header| item.get(*header).map_or_else(|| String::from("-"), cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    table::render(&headers, &rows, options)
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
