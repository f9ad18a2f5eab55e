use super::RenderContext;
use crate::model::{TableCell, TableContent, TableRow, TextAlignment};

impl<'a> RenderContext<'a> {
    /// Spans and alignment are copied per cell; nothing checks that rows line up.
    pub(crate) fn render_table(&mut self, table: &'a TableContent) {
        self.open("table", &[("class", "content-table")]);
        if let Some(caption) = &table.caption {
            self.open("caption", &[]);
            self.render_rich_text(caption);
            self.close("caption");
        }
        if let Some(rows) = &table.header_rows {
            self.render_row_group("thead", rows, true);
        }
        self.render_row_group("tbody", &table.body_rows, false);
        if let Some(rows) = &table.footer_rows {
            self.render_row_group("tfoot", rows, false);
        }
        self.close("table");
    }

    fn render_row_group(&mut self, tag: &str, rows: &'a [TableRow], header: bool) {
        self.open(tag, &[]);
        for row in rows {
            self.open("tr", &[]);
            for cell in &row.cells {
                self.render_cell(cell, header);
            }
            self.close("tr");
        }
        self.close(tag);
    }

    fn render_cell(&mut self, cell: &'a TableCell, in_header: bool) {
        let tag = if in_header || cell.is_header { "th" } else { "td" };
        let col_span = cell.col_span.map(|span| span.to_string());
        let row_span = cell.row_span.map(|span| span.to_string());
        let style = cell
            .alignment
            .and_then(TextAlignment::as_css)
            .map(|alignment| format!("text-align: {alignment}"));

        let mut attrs = Vec::new();
        if let Some(span) = col_span.as_deref() {
            attrs.push(("colspan", span));
        }
        if let Some(span) = row_span.as_deref() {
            attrs.push(("rowspan", span));
        }
        if let Some(style) = style.as_deref() {
            attrs.push(("style", style));
        }

        self.open(tag, &attrs);
        self.render_nodes(&cell.content);
        self.close(tag);
    }
}
