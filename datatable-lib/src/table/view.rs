//! Render output of the table engine.

use crate::column::Alignment;
use crate::content::CellContent;

/// Sort indicator drawn next to a header label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortIndicator {
    /// The column cannot be sorted.
    None,
    /// Sortable but not sorted, drawn faded.
    Unsorted,
    Ascending,
    Descending,
}

impl SortIndicator {
    pub fn glyph(self) -> &'static str {
        match self {
            SortIndicator::None => "",
            SortIndicator::Unsorted => "⇅",
            SortIndicator::Ascending => "▲",
            SortIndicator::Descending => "▼",
        }
    }

    /// Whether the indicator marks the active sort.
    pub fn is_active(self) -> bool {
        matches!(self, SortIndicator::Ascending | SortIndicator::Descending)
    }
}

/// One header cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub label: String,
    pub tooltip: Option<String>,
    /// Clickable iff sortable.
    pub sortable: bool,
    pub indicator: SortIndicator,
    pub align: Alignment,
    pub width: Option<u16>,
    pub min_width: Option<u16>,
    pub max_width: Option<u16>,
}

/// One body cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellView {
    pub content: CellContent,
    pub align: Alignment,
}

/// One body row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    /// Index of the row within the current page.
    pub index: usize,
    pub cells: Vec<CellView>,
    /// Marked clickable (a row-click handler exists and nothing is loading).
    pub interactive: bool,
    /// Stale row under the loading overlay.
    pub dimmed: bool,
    pub test_id: String,
}

/// Table body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableBody {
    /// Full-width "no results" row.
    Placeholder {
        text: String,
        colspan: usize,
        test_id: String,
    },
    /// Data rows; may be empty while loading.
    Rows(Vec<RowView>),
}

/// Rendered grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub header: Vec<HeaderCell>,
    pub body: TableBody,
    /// Loading overlay drawn above the body.
    pub overlay: bool,
    pub test_id: String,
}

impl TableView {
    /// Returns `true` if the "no results" placeholder is shown.
    pub fn shows_placeholder(&self) -> bool {
        matches!(self.body, TableBody::Placeholder { .. })
    }

    /// Data rows, empty when the placeholder is shown.
    pub fn rows(&self) -> &[RowView] {
        match &self.body {
            TableBody::Rows(rows) => rows,
            TableBody::Placeholder { .. } => &[],
        }
    }
}
