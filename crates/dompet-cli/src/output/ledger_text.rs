use std::io;

use serde_json::Value;

use super::format::{self, Align, Column};

pub fn render_wallet_added(data: &Value) -> io::Result<String> {
    let wallet_id = require_str(data, "wallet_id")?;
    let mut lines = vec!["Wallet created.".to_string(), String::new()];
    lines.extend(format::key_value_rows(
        &[
            ("Wallet id:", wallet_id.to_string()),
            ("Name:", str_field(data, "name", "")),
        ],
        2,
    ));
    lines.push(String::new());
    lines.push("Next:".to_string());
    lines.push(format!(
        "  dompet template add <description> --kind outcome --amount <amount> --from {wallet_id} --day <day>"
    ));
    Ok(lines.join("\n"))
}

pub fn render_wallet_list(data: &Value) -> io::Result<String> {
    let rows = require_rows(data, "wallet list")?;
    if rows.is_empty() {
        return Ok([
            "No wallets yet.",
            "",
            "Create one first:",
            "  dompet wallet add <name>",
        ]
        .join("\n"));
    }

    let columns = [
        Column {
            name: "Wallet Id",
            align: Align::Left,
        },
        Column {
            name: "Name",
            align: Align::Left,
        },
        Column {
            name: "Txn Count",
            align: Align::Right,
        },
        Column {
            name: "Balance",
            align: Align::Right,
        },
    ];
    let table_rows = rows
        .iter()
        .map(|row| {
            vec![
                str_field(row, "wallet_id", "unknown"),
                str_field(row, "name", ""),
                int_field(row, "transaction_count").to_string(),
                format::format_amount(int_field(row, "balance")),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    let mut lines = vec!["Wallets:".to_string()];
    lines.extend(format::render_table(&columns, &table_rows));
    lines.push(String::new());
    lines.extend(format::key_value_rows(
        &[(
            "Total balance:",
            format::format_amount(int_field(data, "total_balance")),
        )],
        0,
    ));
    Ok(lines.join("\n"))
}

pub fn render_template_saved(command: &str, data: &Value) -> io::Result<String> {
    let heading = match command {
        "template add" => "Recurring template saved.",
        "template pause" => "Recurring template paused.",
        _ => "Recurring template resumed.",
    };
    let template_id = require_str(data, "template_id")?;

    let mut entries = vec![
        ("Template id:", template_id.to_string()),
        ("Description:", str_field(data, "description", "")),
        ("Kind:", str_field(data, "kind", "")),
        ("Amount:", format::format_amount(int_field(data, "amount"))),
        ("Schedule:", schedule_label(data)),
        ("From wallet:", str_field(data, "source_wallet_id", "")),
    ];
    if let Some(target) = data.get("target_wallet_id").and_then(Value::as_str) {
        entries.push(("To wallet:", target.to_string()));
    }
    entries.push(("Next due:", str_field(data, "next_due_at", "paused")));

    let mut lines = vec![heading.to_string(), String::new()];
    lines.extend(format::key_value_rows(&entries, 2));
    Ok(lines.join("\n"))
}

pub fn render_template_list(data: &Value) -> io::Result<String> {
    let rows = require_rows(data, "template list")?;
    if rows.is_empty() {
        return Ok([
            "No recurring templates yet.",
            "",
            "Save one with:",
            "  dompet template add --help",
        ]
        .join("\n"));
    }

    let columns = [
        Column {
            name: "Template Id",
            align: Align::Left,
        },
        Column {
            name: "Description",
            align: Align::Left,
        },
        Column {
            name: "Kind",
            align: Align::Left,
        },
        Column {
            name: "Schedule",
            align: Align::Left,
        },
        Column {
            name: "Amount",
            align: Align::Right,
        },
        Column {
            name: "Next Due",
            align: Align::Left,
        },
    ];
    let table_rows = rows
        .iter()
        .map(|row| {
            vec![
                str_field(row, "template_id", "unknown"),
                str_field(row, "description", ""),
                str_field(row, "kind", ""),
                schedule_label(row),
                format::format_amount(int_field(row, "amount")),
                str_field(row, "next_due_at", "paused"),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    let mut lines = vec![format!(
        "Recurring templates (as of {}):",
        str_field(data, "as_of", "today")
    )];
    lines.extend(format::render_table(&columns, &table_rows));
    Ok(lines.join("\n"))
}

pub fn render_transaction_list(data: &Value) -> io::Result<String> {
    let rows = require_rows(data, "transaction list")?;
    if rows.is_empty() {
        return Ok("No transactions found.".to_string());
    }

    let columns = [
        Column {
            name: "Date",
            align: Align::Left,
        },
        Column {
            name: "Wallet Id",
            align: Align::Left,
        },
        Column {
            name: "Description",
            align: Align::Left,
        },
        Column {
            name: "Category",
            align: Align::Left,
        },
        Column {
            name: "Amount",
            align: Align::Right,
        },
    ];
    let table_rows = rows
        .iter()
        .map(|row| {
            let signed = int_field(row, "income") - int_field(row, "outcome") - int_field(row, "saving");
            vec![
                str_field(row, "posted_at", ""),
                str_field(row, "wallet_id", ""),
                str_field(row, "description", ""),
                str_field(row, "category", ""),
                format::format_amount(signed),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    let mut lines = vec![format!("Transactions ({} shown, newest first):", rows.len())];
    lines.extend(format::render_table(&columns, &table_rows));
    Ok(lines.join("\n"))
}

fn schedule_label(row: &Value) -> String {
    match row.get("frequency").and_then(Value::as_str) {
        Some("weekly") => "weekly".to_string(),
        _ => format!("monthly, day {}", int_field(row, "day_of_month")),
    }
}

fn require_rows<'a>(data: &'a Value, command: &str) -> io::Result<&'a Vec<Value>> {
    data.get("rows")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other(format!("{command} output requires rows")))
}

fn require_str<'a>(data: &'a Value, key: &str) -> io::Result<&'a str> {
    data.get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| io::Error::other(format!("output requires `{key}`")))
}

pub(super) fn str_field(row: &Value, key: &str, fallback: &str) -> String {
    row.get(key)
        .and_then(Value::as_str)
        .unwrap_or(fallback)
        .to_string()
}

pub(super) fn int_field(row: &Value, key: &str) -> i64 {
    row.get(key).and_then(Value::as_i64).unwrap_or(0)
}
