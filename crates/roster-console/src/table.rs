//! Plain aligned text tables.

#[derive(Clone, Copy, Debug, Default)]
pub struct TableOptions {
    /// Shrink the widest columns until the table fits this many columns.
    pub max_width: Option<usize>,
}

/// Render `rows` under `headers`, numeric cells right-aligned.
#[must_use]
pub fn render_table(headers: &[&str], rows: &[Vec<String>], options: TableOptions) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
                .max(header.chars().count())
        })
        .collect();

    fit_widths(&mut widths, headers, options.max_width);

    let header_line = join_cells(headers.iter().zip(&widths).map(|(header, width)| {
        pad(&truncate(header, *width), *width, false)
    }));
    let divider = "-".repeat(widths.iter().sum::<usize>() + widths.len().saturating_sub(1) * 2);

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(header_line);
    lines.push(divider);
    for row in rows {
        lines.push(join_cells(widths.iter().enumerate().map(|(index, width)| {
            let cell = row.get(index).map_or("-", String::as_str);
            let text = truncate(cell, *width);
            pad(&text, *width, looks_numeric(&text))
        })));
    }
    lines.join("\n")
}

fn join_cells(cells: impl Iterator<Item = String>) -> String {
    cells.collect::<Vec<_>>().join("  ").trim_end().to_string()
}

fn fit_widths(widths: &mut [usize], headers: &[&str], max_width: Option<usize>) {
    let Some(max_width) = max_width else {
        return;
    };
    let separators = widths.len().saturating_sub(1) * 2;

    while widths.iter().sum::<usize>() + separators > max_width {
        let widest = widths
            .iter()
            .enumerate()
            .filter(|(index, width)| **width > headers[*index].chars().count().max(4))
            .max_by_key(|(_, width)| **width)
            .map(|(index, _)| index);
        let Some(index) = widest else {
            break;
        };
        widths[index] -= 1;
    }
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    if width <= 1 {
        return "…".to_string();
    }
    let mut out: String = value.chars().take(width - 1).collect();
    out.push('…');
    out
}

fn looks_numeric(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|ch| ch.is_ascii_digit() || ch == '-')
}

fn pad(value: &str, width: usize, right_align: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(value.chars().count()));
    if right_align {
        format!("{fill}{value}")
    } else {
        format!("{value}{fill}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<Vec<String>> {
        vec![
            vec!["1".into(), "Sales".into()],
            vec!["12".into(), "Research and Development".into()],
        ]
    }

    #[test]
    fn aligns_columns_under_headers() {
        let table = render_table(&["id", "name"], &rows(), TableOptions::default());
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("id  name"));
        assert!(lines[1].chars().all(|c| c == '-'));
        assert!(lines[2].starts_with(" 1  Sales"));
        assert!(lines[3].starts_with("12  Research"));
    }

    #[test]
    fn narrows_widest_column_to_fit() {
        let table = render_table(
            &["id", "name"],
            &rows(),
            TableOptions {
                max_width: Some(16),
            },
        );
        assert!(table.lines().all(|line| line.chars().count() <= 16));
        assert!(table.contains('…'));
    }

    #[test]
    fn missing_cells_render_as_dash() {
        let table = render_table(
            &["id", "name", "department"],
            &[vec!["3".into(), "Ada".into()]],
            TableOptions::default(),
        );
        assert!(table.lines().nth(2).is_some_and(|line| line.ends_with('-')));
    }
}
