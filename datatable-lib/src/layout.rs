//! Fixed-width text layout of a rendered table for terminal surfaces.
//!
//! [`TextLayout`] turns a [`TableView`] and the pagination bars into lines of
//! styled [`Span`]s. Column widths follow the width hints, falling back to
//! the widest of header and cells, bounded by the min/max hints. Text that
//! does not fit is cut with an ellipsis by display width.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::column::Alignment;
use crate::content::{Span, Tone};
use crate::pagination::PaginationView;
use crate::table::{HeaderCell, SortIndicator, TableBody, TableView};

const ELLIPSIS: char = '…';
const COLUMN_GAP: &str = "  ";
const CURSOR: &str = "▸ ";
const NO_CURSOR: &str = "  ";
const LOADING_TEXT: &str = " Loading… ";

/// One line of styled text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    pub fn new(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    /// Display width in terminal cells.
    pub fn width(&self) -> usize {
        self.spans.iter().map(Span::width).sum()
    }

    /// Cut the line to `width` cells.
    pub fn truncate(mut self, width: usize) -> Self {
        let mut remaining = width;
        let mut kept = Vec::with_capacity(self.spans.len());
        for mut span in self.spans.drain(..) {
            if remaining == 0 {
                break;
            }
            let span_width = span.width();
            if span_width > remaining {
                span.text = clip(&span.text, remaining);
                remaining = 0;
            } else {
                remaining -= span_width;
            }
            kept.push(span);
        }
        self.spans = kept;
        self
    }

    /// Cut the line to `width` cells, ending in an ellipsis.
    fn truncate_with_ellipsis(self, width: usize) -> Self {
        if width == 0 {
            return Line::default();
        }
        let mut line = self.truncate(width - 1);
        let style = line.spans.last().cloned().unwrap_or_default();
        line.spans.push(Span {
            text: ELLIPSIS.to_string(),
            ..style
        });
        // wide glyphs cut at the boundary can leave a one-cell gap
        let short = width.saturating_sub(line.width());
        if short > 0 {
            line.spans.push(Span::new(" ".repeat(short)));
        }
        line
    }
}

/// Lays out a table view as text.
#[derive(Debug, Clone)]
pub struct TextLayout<'a> {
    table: &'a TableView,
    top: Option<&'a PaginationView>,
    bottom: Option<&'a PaginationView>,
    cursor: Option<usize>,
}

impl<'a> TextLayout<'a> {
    pub fn new(table: &'a TableView) -> Self {
        Self {
            table,
            top: None,
            bottom: None,
            cursor: None,
        }
    }

    /// Pagination bars drawn above and below the grid.
    pub fn pagination(
        mut self,
        top: Option<&'a PaginationView>,
        bottom: Option<&'a PaginationView>,
    ) -> Self {
        self.top = top;
        self.bottom = bottom;
        self
    }

    /// Mark row `index` with the cursor gutter.
    pub fn cursor(mut self, index: Option<usize>) -> Self {
        self.cursor = index;
        self
    }

    /// Width of each column in cells.
    pub fn column_widths(&self) -> Vec<usize> {
        self.table
            .header
            .iter()
            .enumerate()
            .map(|(i, header)| {
                if let Some(width) = header.width {
                    return width as usize;
                }
                let content = self
                    .table
                    .rows()
                    .iter()
                    .filter_map(|row| row.cells.get(i))
                    .map(|cell| cell.content.width())
                    .max()
                    .unwrap_or(0);
                let mut width = header_width(header).max(content);
                if let Some(max) = header.max_width {
                    width = width.min(max as usize);
                }
                if let Some(min) = header.min_width {
                    width = width.max(min as usize);
                }
                width
            })
            .collect()
    }

    /// Full width of the grid including the cursor gutter.
    pub fn grid_width(&self) -> usize {
        let widths = self.column_widths();
        let gaps = widths.len().saturating_sub(1) * COLUMN_GAP.width();
        NO_CURSOR.width() + widths.iter().sum::<usize>() + gaps
    }

    /// All lines: top bar, header, rule, body, bottom bar.
    pub fn lines(&self) -> Vec<Line> {
        let widths = self.column_widths();
        let mut lines = Vec::new();

        if let Some(top) = self.top {
            lines.push(pagination_line(top));
        }
        lines.push(self.header_line(&widths));
        lines.push(self.rule_line());
        lines.extend(self.body_lines(&widths));
        if let Some(bottom) = self.bottom {
            lines.push(pagination_line(bottom));
        }
        lines
    }

    fn header_line(&self, widths: &[usize]) -> Line {
        let mut spans = vec![Span::new(NO_CURSOR)];
        for (i, (header, &width)) in self.table.header.iter().zip(widths).enumerate() {
            if i > 0 {
                spans.push(Span::new(COLUMN_GAP));
            }
            let mut cell = vec![Span::new(header.label.clone()).bold()];
            if header.tooltip.is_some() {
                cell.push(Span::new(" ?").muted());
            }
            if header.indicator != SortIndicator::None {
                let glyph = Span::new(format!(" {}", header.indicator.glyph()));
                cell.push(if header.indicator.is_active() {
                    glyph.tone(Tone::Accent)
                } else {
                    glyph.muted()
                });
            }
            spans.extend(fit(cell, width, header.align));
        }
        Line::new(spans)
    }

    fn rule_line(&self) -> Line {
        let width = self.grid_width();
        if !self.table.overlay || width < LOADING_TEXT.width() + 2 {
            return Line::new(vec![Span::new("─".repeat(width)).muted()]);
        }
        let left = (width - LOADING_TEXT.width()) / 2;
        let right = width - LOADING_TEXT.width() - left;
        Line::new(vec![
            Span::new("─".repeat(left)).muted(),
            Span::new(LOADING_TEXT).tone(Tone::Accent).bold(),
            Span::new("─".repeat(right)).muted(),
        ])
    }

    fn body_lines(&self, widths: &[usize]) -> Vec<Line> {
        match &self.table.body {
            TableBody::Placeholder { text, .. } => {
                let inner = self.grid_width() - NO_CURSOR.width();
                let mut spans = vec![Span::new(NO_CURSOR)];
                spans.extend(fit(vec![Span::new(text.clone()).muted()], inner, Alignment::Center));
                vec![Line::new(spans)]
            }
            TableBody::Rows(rows) => rows
                .iter()
                .map(|row| {
                    let gutter = if self.cursor == Some(row.index) {
                        Span::new(CURSOR).tone(Tone::Accent)
                    } else {
                        Span::new(NO_CURSOR)
                    };
                    let mut spans = vec![gutter];
                    for (i, (cell, &width)) in row.cells.iter().zip(widths).enumerate() {
                        if i > 0 {
                            spans.push(Span::new(COLUMN_GAP));
                        }
                        spans.extend(fit(cell.content.spans().to_vec(), width, cell.align));
                    }
                    Line::new(spans)
                })
                .collect(),
        }
    }
}

/// One line for a pagination bar.
///
/// ```text
/// Viewing 1-10 rows of 701 results   Rows: [10] 25 50 100   Page 1 of 71   « ‹ › »
/// ```
pub fn pagination_line(view: &PaginationView) -> Line {
    let mut spans = vec![Span::new(view.summary.clone())];

    if let Some(sizes) = &view.page_sizes {
        spans.push(Span::new("   Rows:"));
        for &(size, selected) in sizes {
            spans.push(if selected {
                Span::new(format!(" [{}]", size)).tone(Tone::Accent).bold()
            } else {
                Span::new(format!(" {}", size)).muted()
            });
        }
    }

    spans.push(Span::new("   Page "));
    if let Some(input) = &view.page_input {
        spans.push(Span::new(input.clone()).underline());
        spans.push(Span::new(format!(" {}", view.page_label)));
    } else {
        spans.push(Span::new(view.page_label.clone()));
    }

    spans.push(Span::new("  "));
    for button in &view.buttons {
        let glyph = Span::new(format!(" {}", button.button.glyph()));
        spans.push(if button.enabled {
            glyph.bold()
        } else {
            glyph.muted().dim()
        });
    }
    Line::new(spans)
}

fn header_width(header: &HeaderCell) -> usize {
    let mut width = header.label.width();
    if header.tooltip.is_some() {
        width += 2;
    }
    if header.indicator != SortIndicator::None {
        width += 1 + header.indicator.glyph().width();
    }
    width
}

/// Cut or pad spans to exactly `width` cells.
fn fit(spans: Vec<Span>, width: usize, align: Alignment) -> Vec<Span> {
    let total: usize = spans.iter().map(Span::width).sum();
    if total > width {
        return Line::new(spans).truncate_with_ellipsis(width).spans;
    }
    let pad = width - total;
    let (left, right) = match align {
        Alignment::Left => (0, pad),
        Alignment::Right => (pad, 0),
        Alignment::Center => (pad / 2, pad - pad / 2),
    };
    let mut out = Vec::with_capacity(spans.len() + 2);
    if left > 0 {
        out.push(Span::new(" ".repeat(left)));
    }
    out.extend(spans);
    if right > 0 {
        out.push(Span::new(" ".repeat(right)));
    }
    out
}

/// Longest prefix of `text` that fits in `width` cells.
fn clip(text: &str, width: usize) -> String {
    let mut used = 0;
    text.chars()
        .take_while(|c| {
            used += c.width().unwrap_or(0);
            used <= width
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::{Column, ColumnSet};
    use crate::model::{PaginationState, SortDescriptor, Sorting};
    use crate::pagination::PaginationControl;
    use crate::table::DataTable;

    struct Group {
        id: &'static str,
        name: &'static str,
    }

    fn columns() -> ColumnSet<Group> {
        ColumnSet::new(vec![
            Column::new("id", "ID", |g: &Group| g.id.into()),
            Column::new("name", "Name", |g: &Group| g.name.into())
                .max_width(8)
                .tooltip("Display name"),
        ])
        .unwrap()
    }

    fn rows() -> Vec<Group> {
        vec![
            Group { id: "1", name: "Acme" },
            Group { id: "22", name: "Globex Corporation" },
        ]
    }

    #[test]
    fn test_fit_pads_by_alignment() {
        let spans = vec![Span::new("ab")];
        let text = |s: Vec<Span>| Line::new(s).text();
        assert_eq!(text(fit(spans.clone(), 5, Alignment::Left)), "ab   ");
        assert_eq!(text(fit(spans.clone(), 5, Alignment::Right)), "   ab");
        assert_eq!(text(fit(spans, 5, Alignment::Center)), " ab  ");
    }

    #[test]
    fn test_fit_truncates_with_ellipsis() {
        let spans = vec![Span::new("Globex "), Span::new("Corporation").muted()];
        let out = fit(spans, 10, Alignment::Left);
        let line = Line::new(out);
        assert_eq!(line.text(), "Globex Co…");
        assert_eq!(line.width(), 10);
        assert_eq!(line.spans.last().unwrap().tone, Tone::Muted);
    }

    #[test]
    fn test_fit_wide_chars() {
        let line = Line::new(fit(vec![Span::new("日本語テキスト")], 6, Alignment::Left));
        assert_eq!(line.width(), 6);
        assert!(line.text().starts_with("日本"));
    }

    #[test]
    fn test_column_widths_respect_hints() {
        let columns = columns();
        let rows = rows();
        let sorting = Sorting::none();
        let view = DataTable::new(&columns, &rows, &sorting).render();
        // "ID ⇅" is wider than every id; the name column is capped at 8
        assert_eq!(TextLayout::new(&view).column_widths(), vec![4, 8]);
    }

    #[test]
    fn test_lines_layout() {
        let columns = columns();
        let rows = rows();
        let sorting = Sorting::single(SortDescriptor::asc("id"));
        let view = DataTable::new(&columns, &rows, &sorting).render();
        let lines = TextLayout::new(&view).cursor(Some(1)).lines();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0].text(), "  ID ▲  Name ? ⇅");
        assert_eq!(lines[2].text(), "  1     Acme    ");
        assert_eq!(lines[3].text(), "▸ 22    Globex …");
    }

    #[test]
    fn test_placeholder_is_centered() {
        let columns = columns();
        let rows: Vec<Group> = Vec::new();
        let sorting = Sorting::none();
        let view = DataTable::new(&columns, &rows, &sorting)
            .no_data_text("None")
            .render();
        let layout = TextLayout::new(&view);
        let lines = layout.lines();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2].width(), layout.grid_width());
        assert_eq!(lines[2].text().trim(), "None");
    }

    #[test]
    fn test_loading_rule() {
        let columns = ColumnSet::new(vec![
            Column::new("id", "Identifier", |g: &Group| g.id.into()).width(20),
        ])
        .unwrap();
        let rows = rows();
        let sorting = Sorting::none();
        let view = DataTable::new(&columns, &rows, &sorting)
            .loading(true)
            .render();
        let lines = TextLayout::new(&view).lines();
        assert!(lines[1].text().contains("Loading…"));
        assert_eq!(lines[1].width(), 22);
    }

    #[test]
    fn test_pagination_line() {
        let state = PaginationState {
            page_index: 0,
            page_size: 10,
            total_pages: 71,
            total_rows: 701,
        };
        let view = PaginationControl::new(state, false).view();
        let line = pagination_line(&view);
        assert_eq!(
            line.text(),
            "Viewing 1-10 rows of 701 results   Rows: [10] 25 50 100   Page 1 of 71   « ‹ › »"
        );
        let first = line.spans.iter().find(|s| s.text == " «").unwrap();
        assert!(first.dim);
    }

    #[test]
    fn test_line_truncate() {
        let line = Line::new(vec![Span::new("abc"), Span::new("def")]).truncate(4);
        assert_eq!(line.text(), "abcd");
        assert_eq!(line.spans.len(), 2);
    }
}
