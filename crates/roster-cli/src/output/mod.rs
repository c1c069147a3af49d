use roster_console::table::{TableOptions, render_table};
use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => Ok(render_table_value(&serde_json::to_value(value)?)),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// Terminal width from `COLUMNS`, when set.
pub fn table_options() -> TableOptions {
    TableOptions {
        max_width: std::env::var("COLUMNS")
            .ok()
            .and_then(|value| value.parse().ok()),
    }
}

fn render_table_value(value: &Value) -> String {
    match value {
        Value::Array(items) => render_rows(items),
        Value::Object(map) => {
            // Paged envelopes render their rows plus a footer.
            if let Some(Value::Array(items)) = map.get("content") {
                let mut out = render_rows(items);
                if let (Some(number), Some(total)) = (map.get("number"), map.get("totalPages")) {
                    let page = number.as_u64().map_or(1, |n| n + 1);
                    out.push_str(&format!("\npage {page}/{}", value_to_cell(total)));
                }
                return out;
            }
            let rows = map
                .iter()
                .map(|(key, value)| vec![key.clone(), value_to_cell(value)])
                .collect::<Vec<_>>();
            render_table(&["key", "value"], &rows, table_options())
        }
        scalar => value_to_cell(scalar),
    }
}

fn render_rows(items: &[Value]) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    let mut headers = vec![String::from("id"), String::from("name")];
    for item in items {
        if let Some(map) = item.as_object() {
            for key in map.keys() {
                if !headers.contains(key) {
                    headers.push(key.clone());
                }
            }
        }
    }

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = items
        .iter()
        .map(|item| {
            headers
                .iter()
                .map(|header| item.get(header).map_or_else(|| String::from("-"), value_to_cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    render_table(&header_refs, &rows, table_options())
}

/// Cell text for a JSON value. Nested references show their name.
fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        Value::Object(map) => map
            .get("name")
            .and_then(Value::as_str)
            .map_or_else(|| Value::Object(map.clone()).to_string(), str::to_string),
        Value::Array(_) => value.to_string(),
    }
}
