//! Pipe-delimited tables for embedding report sections in markdown.

/// Renders a two-column table. Column widths are the maximum length over the
/// header and every row, cells left-justified. With no rows the output is
/// just the header and separator.
pub fn to_table(header: [&str; 2], rows: &[(String, String)]) -> String {
    let widths = [
        rows.iter()
            .map(|(name, _)| name.len())
            .chain([header[0].len()])
            .max()
            .unwrap_or(0),
        rows.iter()
            .map(|(_, value)| value.len())
            .chain([header[1].len()])
            .max()
            .unwrap_or(0),
    ];

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format_row(header[0], header[1], widths));
    lines.push(format!(
        "|-{}-|-{}-|",
        "-".repeat(widths[0]),
        "-".repeat(widths[1])
    ));
    for (name, value) in rows {
        lines.push(format_row(name, value, widths));
    }
    lines.join("\n")
}

fn format_row(left: &str, right: &str, widths: [usize; 2]) -> String {
    format!(
        "| {:<lw$} | {:<rw$} |",
        left,
        right,
        lw = widths[0],
        rw = widths[1]
    )
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn single_row_table_has_three_lines() {
        let rows = vec![("a".to_string(), "1".to_string())];
        let table = to_table(["Name", "Value"], &rows);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        // Widths come from the headers here, so every line pads to them.
        assert_eq!(lines[0], "| Name | Value |");
        assert_eq!(lines[1], "|------|-------|");
        assert_eq!(lines[2], "| a    | 1     |");
    }

    #[test]
    fn wide_cells_stretch_the_columns() {
        let rows = vec![(
            "a-rather-long-name".to_string(),
            "2".to_string(),
        )];
        let table = to_table(["Name", "Value"], &rows);
        let lines: Vec<&str> = table.lines().collect();

        assert!(lines.iter().all(|l| l.len() == lines[0].len()));
        assert!(lines[0].contains("Name"));
        assert!(lines[2].contains("a-rather-long-name"));
    }

    #[test]
    fn empty_rows_render_header_and_separator_only() {
        let table = to_table(["Namespace", "Replicas"], &[]);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "| Namespace | Replicas |");
        assert_eq!(lines[1], "|-----------|----------|");
    }
}
