use std::cmp;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    pub name: &'a str,
    pub align: Align,
}

const INDENT: usize = 2;
const COLUMN_GAP: usize = 2;
const MAX_CELL_WIDTH: usize = 40;

pub fn key_value_rows(entries: &[(&str, String)], indent: usize) -> Vec<String> {
    let label_width = entries
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    let padding = " ".repeat(indent);

    entries
        .iter()
        .map(|(label, value)| format!("{padding}{label:<label_width$}  {value}"))
        .collect()
}

/// Renders a header line plus one line per row. Cells longer than the
/// column cap are cut and end in `...`.
pub fn render_table(columns: &[Column<'_>], rows: &[Vec<String>]) -> Vec<String> {
    if columns.is_empty() {
        return Vec::new();
    }

    let cells = rows
        .iter()
        .map(|row| row.iter().map(|value| truncate(value)).collect::<Vec<String>>())
        .collect::<Vec<Vec<String>>>();

    let mut widths = columns
        .iter()
        .map(|column| column.name.chars().count())
        .collect::<Vec<usize>>();
    for row in &cells {
        for (index, value) in row.iter().enumerate() {
            if let Some(slot) = widths.get_mut(index) {
                *slot = cmp::max(*slot, value.chars().count());
            }
        }
    }

    let header = columns
        .iter()
        .map(|column| column.name.to_string())
        .collect::<Vec<String>>();
    let mut output = vec![format_row(columns, &header, &widths)];
    output.extend(cells.iter().map(|row| format_row(columns, row, &widths)));
    output
}

/// `1500000` becomes `1,500,000`.
pub fn format_amount(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

fn format_row(columns: &[Column<'_>], cells: &[String], widths: &[usize]) -> String {
    let pieces = columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            let width = widths.get(index).copied().unwrap_or(0);
            let value = cells.get(index).map(String::as_str).unwrap_or("");
            match column.align {
                Align::Left => format!("{value:<width$}"),
                Align::Right => format!("{value:>width$}"),
            }
        })
        .collect::<Vec<String>>();

    let line = format!("{}{}", " ".repeat(INDENT), pieces.join(&" ".repeat(COLUMN_GAP)));
    line.trim_end().to_string()
}

fn truncate(value: &str) -> String {
    if value.chars().count() <= MAX_CELL_WIDTH {
        return value.to_string();
    }
    let kept = value.chars().take(MAX_CELL_WIDTH - 3).collect::<String>();
    format!("{kept}...")
}

#[cfg(test)]
mod tests {
    use super::{Align, Column, format_amount, key_value_rows, render_table};

    #[test]
    fn amounts_are_grouped_by_thousands() {
        assert_eq!(format_amount(0), "0");
        assert_eq!(format_amount(999), "999");
        assert_eq!(format_amount(1_500_000), "1,500,000");
        assert_eq!(format_amount(-250_000), "-250,000");
    }

    #[test]
    fn key_value_labels_are_aligned() {
        let rows = key_value_rows(&[("Id:", "w1".to_string()), ("Balance:", "10".to_string())], 2);
        assert_eq!(rows, vec!["  Id:       w1", "  Balance:  10"]);
    }

    #[test]
    fn table_pads_columns_and_right_aligns_numbers() {
        let columns = [
            Column {
                name: "Name",
                align: Align::Left,
            },
            Column {
                name: "Balance",
                align: Align::Right,
            },
        ];
        let rows = vec![
            vec!["Cash".to_string(), "5".to_string()],
            vec!["Savings".to_string(), "1,000".to_string()],
        ];
        let lines = render_table(&columns, &rows);
        assert_eq!(lines[0], "  Name     Balance");
        assert_eq!(lines[1], "  Cash           5");
        assert_eq!(lines[2], "  Savings    1,000");
    }

    #[test]
    fn long_cells_are_truncated() {
        let columns = [Column {
            name: "Description",
            align: Align::Left,
        }];
        let lines = render_table(&columns, &[vec!["x".repeat(60)]]);
        assert!(lines[1].ends_with("..."));
        assert_eq!(lines[1].trim().chars().count(), 40);
    }
}
