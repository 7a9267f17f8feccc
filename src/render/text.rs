use crate::error::SurfaceError;
use crate::render::{RenderSurface, TableView};
use crate::table::SortOrder;
use crate::value::Value;
use std::io::Write;
use unicode_width::UnicodeWidthStr;

/// Renders table views as aligned plain text. The reference surface for
/// the demo binary and tests; real applications plug in their own.
pub struct TextSurface<W: Write> {
    out: W,
}

impl<W: Write> TextSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RenderSurface for TextSurface<W> {
    fn render(&mut self, view: &TableView) -> Result<(), SurfaceError> {
        let widths = column_widths(view);

        let mut header = String::new();
        for (idx, column) in view.columns.iter().enumerate() {
            let title = header_text(view, idx);
            header.push_str(&pad(&title, widths[idx]));
            header.push_str("  ");
        }
        writeln!(self.out, "{}", header.trim_end())?;

        let rule_width = widths.iter().map(|w| w + 2).sum::<usize>().saturating_sub(2);
        writeln!(self.out, "{}", "-".repeat(rule_width))?;

        for row in &view.rows {
            let mut line = String::new();
            for (idx, cell) in row.cells.iter().enumerate() {
                line.push_str(&pad(&cell_text(cell), widths[idx]));
                line.push_str("  ");
            }
            writeln!(self.out, "{}", line.trim_end())?;
        }

        writeln!(self.out, "page {}/{}", view.current_page, view.total_pages)?;
        Ok(())
    }
}

fn header_text(view: &TableView, idx: usize) -> String {
    let column = &view.columns[idx];
    let marker = match &view.sort {
        Some(state) if state.column == column.key => match state.order {
            SortOrder::Asc => " ^",
            SortOrder::Desc => " v",
        },
        _ => "",
    };
    format!("{}{marker}", column.label)
}

/// Booleans render as a read-only checked indicator, not literal text.
fn cell_text(value: &Value) -> String {
    match value {
        Value::Bool(true) => "[x]".to_string(),
        Value::Bool(false) => "[ ]".to_string(),
        Value::Null => String::new(),
        other => other.to_field_text(),
    }
}

fn column_widths(view: &TableView) -> Vec<usize> {
    view.columns
        .iter()
        .enumerate()
        .map(|(idx, _)| {
            let mut width = UnicodeWidthStr::width(header_text(view, idx).as_str());
            for row in &view.rows {
                if let Some(cell) = row.cells.get(idx) {
                    width = width.max(UnicodeWidthStr::width(cell_text(cell).as_str()));
                }
            }
            width
        })
        .collect()
}

fn pad(text: &str, width: usize) -> String {
    let used = UnicodeWidthStr::width(text);
    format!("{text}{}", " ".repeat(width.saturating_sub(used)))
}

#[cfg(test)]
mod tests {
    use super::TextSurface;
    use crate::render::{Column, RenderSurface, RowView, TableView};
    use crate::table::{SortOrder, SortState};
    use crate::value::Value;

    fn sample_view() -> TableView {
        TableView {
            columns: vec![
                Column::new("id", "ID"),
                Column::new("title", "Title"),
                Column::new("published", "Published"),
            ],
            rows: vec![
                RowView {
                    id: Some(1),
                    cells: vec![
                        Value::Number(1),
                        Value::Text("Première".to_string()),
                        Value::Bool(true),
                    ],
                },
                RowView {
                    id: Some(2),
                    cells: vec![
                        Value::Number(2),
                        Value::Text("Second".to_string()),
                        Value::Bool(false),
                    ],
                },
            ],
            current_page: 1,
            total_pages: 2,
            sort: Some(SortState {
                column: "title".to_string(),
                order: SortOrder::Asc,
            }),
        }
    }

    #[test]
    fn renders_aligned_columns_and_pagination() {
        let mut surface = TextSurface::new(Vec::new());
        surface.render(&sample_view()).expect("render succeeds");

        let output = String::from_utf8(surface.into_inner()).expect("utf-8 output");
        let lines: Vec<&str> = output.lines().collect();

        assert!(lines[0].starts_with("ID  Title ^"));
        assert!(lines[2].contains("Première"));
        assert!(lines[2].contains("[x]"));
        assert!(lines[3].contains("[ ]"));
        assert_eq!(lines[4], "page 1/2");
    }
}
