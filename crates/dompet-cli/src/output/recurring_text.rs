use std::io;

use serde_json::Value;

use super::ledger_text::str_field;

pub fn render_recurring_run(data: &Value) -> io::Result<String> {
    let processed = string_list(data, "processed")?;
    let skipped = string_list(data, "skipped")?;
    let errors = data
        .get("errors")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("recurring output requires errors"))?;

    let as_of = str_field(data, "as_of", "now");
    let heading = match data.get("template_id").and_then(Value::as_str) {
        Some(template_id) => format!("Manual generation of {template_id} at {as_of}:"),
        None => format!("Recurring run at {as_of}:"),
    };
    let mut lines = vec![heading];

    if processed.is_empty() && skipped.is_empty() && errors.is_empty() {
        lines.push("  Nothing was due.".to_string());
        return Ok(lines.join("\n"));
    }

    if !processed.is_empty() {
        lines.push(String::new());
        lines.push(format!("Generated ({}):", processed.len()));
        lines.extend(processed.iter().map(|label| format!("  - {label}")));
    }

    if !skipped.is_empty() {
        lines.push(String::new());
        lines.push(format!("Already generated by another run ({}):", skipped.len()));
        lines.extend(skipped.iter().map(|label| format!("  - {label}")));
    }

    if !errors.is_empty() {
        lines.push(String::new());
        lines.push(format!("Failed ({}):", errors.len()));
        for failure in errors {
            lines.push(format!(
                "  - {}: {}",
                str_field(failure, "template", "unknown"),
                str_field(failure, "error", "unknown error")
            ));
        }
        lines.push(String::new());
        lines.push("Fix the templates above, then run `dompet recurring generate <template_id>`.".to_string());
    }

    Ok(lines.join("\n"))
}

fn string_list(data: &Value, key: &str) -> io::Result<Vec<String>> {
    let values = data
        .get(key)
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other(format!("recurring output requires {key}")))?;
    Ok(values
        .iter()
        .filter_map(Value::as_str)
        .map(std::string::ToString::to_string)
        .collect())
}
