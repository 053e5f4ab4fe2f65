/// Scrolling checklist table with a highlighted cursor row
use super::{accent_color, border_style};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Row, Table, Widget},
};

#[derive(Clone, Debug)]
pub struct TableRow {
    pub cells: Vec<String>,
    pub style: Style,
}

pub struct TableWidget<'a> {
    headers: Vec<&'a str>,
    rows: Vec<TableRow>,
    widths: Vec<u16>,
    selected: Option<usize>,
    title: String,
    high_contrast: bool,
}

impl<'a> TableWidget<'a> {
    pub fn new(title: impl Into<String>, headers: Vec<&'a str>, widths: Vec<u16>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
            widths,
            selected: None,
            title: title.into(),
            high_contrast: false,
        }
    }

    pub fn rows(mut self, rows: Vec<TableRow>) -> Self {
        self.rows = rows;
        self
    }

    /// Highlighted row; `None` when the table does not have focus
    pub fn selected(mut self, index: Option<usize>) -> Self {
        self.selected = index.map(|i| i.min(self.rows.len().saturating_sub(1)));
        self
    }

    pub fn high_contrast(mut self, enabled: bool) -> Self {
        self.high_contrast = enabled;
        self
    }

    /// First row shown so that the selected row stays inside the viewport
    fn scroll_offset(&self, viewport: usize) -> usize {
        match self.selected {
            Some(sel) if viewport > 0 && sel >= viewport => sel + 1 - viewport,
            _ => 0,
        }
    }
}

impl<'a> Widget for TableWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let accent = accent_color(self.high_contrast);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(self.high_contrast))
            .title(Span::styled(
                self.title.clone(),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ));

        // borders and header
        let viewport = area.height.saturating_sub(3) as usize;
        let offset = self.scroll_offset(viewport);

        let header_cells = self
            .headers
            .iter()
            .map(|h| Span::styled(*h, Style::default().fg(accent).add_modifier(Modifier::BOLD)));
        let header = Row::new(header_cells).height(1);

        let rows: Vec<Row> = self
            .rows
            .iter()
            .enumerate()
            .skip(offset)
            .map(|(i, row)| {
                let style = if Some(i) == self.selected {
                    Style::default()
                        .bg(accent)
                        .fg(Color::Black)
                        .add_modifier(Modifier::BOLD)
                } else {
                    row.style
                };
                Row::new(row.cells.iter().map(|c| c.as_str())).style(style)
            })
            .collect();

        let table = Table::new(rows, self.widths.iter().copied())
            .header(header)
            .block(block);

        Widget::render(table, area, buf);

        if self.rows.len() > viewport && area.height > 4 {
            self.render_scrollbar(area, buf, offset, viewport);
        }
    }
}

impl<'a> TableWidget<'a> {
    fn render_scrollbar(&self, area: Rect, buf: &mut Buffer, offset: usize, viewport: usize) {
        let scrollbar_x = area.right().saturating_sub(1);
        let scrollbar_start = area.top() + 2;
        let scrollbar_end = area.bottom().saturating_sub(1);
        let scrollbar_height = scrollbar_end.saturating_sub(scrollbar_start);
        if scrollbar_height == 0 {
            return;
        }

        let hidden = self.rows.len().saturating_sub(viewport).max(1);
        let thumb = (offset * scrollbar_height.saturating_sub(1) as usize / hidden) as u16;
        let thumb_y = scrollbar_start + thumb.min(scrollbar_height.saturating_sub(1));
        let thumb_color = accent_color(self.high_contrast);

        for y in scrollbar_start..scrollbar_end {
            if let Some(cell) = buf.cell_mut((scrollbar_x, y)) {
                if y == thumb_y {
                    cell.set_char('█').set_fg(thumb_color);
                } else {
                    cell.set_char('│').set_fg(Color::DarkGray);
                }
            }
        }
    }
}

/// Helper to create styled rows
pub fn create_row(cells: Vec<String>, color: Color) -> TableRow {
    TableRow {
        cells,
        style: Style::default().fg(color),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(n: usize) -> Vec<TableRow> {
        (0..n)
            .map(|i| create_row(vec![format!("row {}", i)], Color::White))
            .collect()
    }

    #[test]
    fn test_scroll_keeps_selection_visible() {
        let table = TableWidget::new("t", vec!["A"], vec![10])
            .rows(rows(30))
            .selected(Some(25));
        assert_eq!(table.scroll_offset(10), 16);

        let table = TableWidget::new("t", vec!["A"], vec![10])
            .rows(rows(30))
            .selected(Some(3));
        assert_eq!(table.scroll_offset(10), 0);
    }

    #[test]
    fn test_selection_clamped_to_rows() {
        let table = TableWidget::new("t", vec!["A"], vec![10])
            .rows(rows(2))
            .selected(Some(9));
        assert_eq!(table.selected, Some(1));
    }

    #[test]
    fn test_renders_rows_after_offset() {
        let table = TableWidget::new(" List ", vec!["A"], vec![12])
            .rows(rows(30))
            .selected(Some(29));
        let area = Rect::new(0, 0, 20, 10);
        let mut buf = Buffer::empty(area);
        table.render(area, &mut buf);

        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("row 29"));
        assert!(!text.contains("row 0 "));
        assert!(text.contains("List"));
    }
}
