//! Table rendering engine - maps columns and rows into a rendered grid with
//! click-to-sort headers, row clicks, a loading overlay and an empty state.
//!
//! The engine is read-only: it borrows the current rows and sorting, and its
//! event methods return change requests instead of mutating anything.
//!
//! # Example
//!
//! ```
//! use datatable_lib::prelude::*;
//!
//! let columns = ColumnSet::new(vec![
//!     Column::new("name", "Name", |n: &String| n.as_str().into()),
//! ])
//! .unwrap();
//! let rows = vec!["Telna".to_string()];
//! let sorting = Sorting::none();
//!
//! let table = DataTable::new(&columns, &rows, &sorting);
//! assert_eq!(
//!     table.on_header_click(0),
//!     Some(Sorting::single(SortDescriptor::asc("name")))
//! );
//! assert_eq!(table.render().rows().len(), 1);
//! ```

mod sort;
mod view;

pub use sort::{sorted_direction, toggle_sort};
pub use view::{CellView, HeaderCell, RowView, SortIndicator, TableBody, TableView};

use crate::column::ColumnSet;
use crate::model::Sorting;

/// Placeholder text shown when there are no rows.
pub const DEFAULT_NO_DATA_TEXT: &str = "No results found.";

/// Read-only table over one page of rows.
#[derive(Debug)]
pub struct DataTable<'a, T> {
    columns: &'a ColumnSet<T>,
    rows: &'a [T],
    sorting: &'a Sorting,
    loading: bool,
    no_data_text: &'a str,
    row_click: bool,
    test_id_prefix: &'a str,
}

impl<'a, T> DataTable<'a, T> {
    /// Create a table over rows and the current sorting.
    pub fn new(columns: &'a ColumnSet<T>, rows: &'a [T], sorting: &'a Sorting) -> Self {
        Self {
            columns,
            rows,
            sorting,
            loading: false,
            no_data_text: DEFAULT_NO_DATA_TEXT,
            row_click: false,
            test_id_prefix: "data-table",
        }
    }

    /// Set the loading flag.
    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    /// Set the "no results" placeholder text.
    pub fn no_data_text(mut self, text: &'a str) -> Self {
        self.no_data_text = text;
        self
    }

    /// Mark rows clickable; only set when a row-click handler exists.
    pub fn row_click(mut self, enabled: bool) -> Self {
        self.row_click = enabled;
        self
    }

    /// Set the prefix of automation ids.
    pub fn test_id_prefix(mut self, prefix: &'a str) -> Self {
        self.test_id_prefix = prefix;
        self
    }

    /// Indicator for the header of column `index`.
    pub fn sort_indicator(&self, index: usize) -> SortIndicator {
        let Some(column) = self.columns.get(index) else {
            return SortIndicator::None;
        };
        if !column.is_sortable() {
            return SortIndicator::None;
        }
        match sorted_direction(self.sorting, column) {
            Some(crate::model::SortDirection::Ascending) => SortIndicator::Ascending,
            Some(crate::model::SortDirection::Descending) => SortIndicator::Descending,
            None => SortIndicator::Unsorted,
        }
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    /// Handle a click on the header of column `index`.
    ///
    /// Returns the proposed sorting, or `None` if the column is not sortable.
    pub fn on_header_click(&self, index: usize) -> Option<Sorting> {
        let column = self.columns.get(index)?;
        if !column.is_sortable() {
            return None;
        }
        Some(toggle_sort(self.sorting, column))
    }

    /// Handle a click on row `index`.
    ///
    /// Returns the clicked row and its index when rows are interactive.
    pub fn on_row_click(&self, index: usize) -> Option<(&'a T, usize)> {
        if !self.row_click || self.loading {
            return None;
        }
        self.rows.get(index).map(|row| (row, index))
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    /// Render the grid.
    ///
    /// An empty page shows the placeholder only when nothing is loading; while
    /// loading, the previous rows stay in place, dimmed and inert, under the
    /// overlay.
    pub fn render(&self) -> TableView {
        let header = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, col)| HeaderCell {
                label: col.header().to_string(),
                tooltip: col.header_tooltip().map(str::to_string),
                sortable: col.is_sortable(),
                indicator: self.sort_indicator(i),
                align: col.alignment(),
                width: col.width_hint(),
                min_width: col.min_width_hint(),
                max_width: col.max_width_hint(),
            })
            .collect();

        let body = if self.rows.is_empty() && !self.loading {
            TableBody::Placeholder {
                text: self.no_data_text.to_string(),
                colspan: self.columns.len(),
                test_id: format!("{}-no-data", self.test_id_prefix),
            }
        } else {
            TableBody::Rows(
                self.rows
                    .iter()
                    .enumerate()
                    .map(|(index, row)| RowView {
                        index,
                        cells: self
                            .columns
                            .iter()
                            .map(|col| {
                                let content = col.cell(row);
                                CellView {
                                    content: if self.loading {
                                        content.dimmed()
                                    } else {
                                        content
                                    },
                                    align: col.alignment(),
                                }
                            })
                            .collect(),
                        interactive: self.row_click && !self.loading,
                        dimmed: self.loading,
                        test_id: format!("{}-row-{}", self.test_id_prefix, index),
                    })
                    .collect(),
            )
        };

        TableView {
            header,
            body,
            overlay: self.loading,
            test_id: self.test_id_prefix.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::{Alignment, Column};
    use crate::content::CellContent;
    use crate::model::SortDescriptor;

    #[derive(Debug, PartialEq)]
    struct Group {
        id: i64,
        name: String,
    }

    fn columns() -> ColumnSet<Group> {
        ColumnSet::new(vec![
            Column::new("id", "ID", |g: &Group| g.id.into()).width(8),
            Column::new("name", "Name", |g: &Group| g.name.as_str().into())
                .render(|g, _| CellContent::plain(g.name.to_uppercase())),
            Column::new("actions", "Actions", |_| Default::default())
                .not_sortable()
                .align(Alignment::Center),
        ])
        .unwrap()
    }

    fn rows() -> Vec<Group> {
        vec![
            Group {
                id: 1,
                name: "telna".into(),
            },
            Group {
                id: 2,
                name: "demo".into(),
            },
        ]
    }

    #[test]
    fn test_placeholder_only_when_idle() {
        let columns = columns();
        let sorting = Sorting::none();
        let empty: Vec<Group> = Vec::new();

        let idle = DataTable::new(&columns, &empty, &sorting)
            .no_data_text("No billing groups found.")
            .test_id_prefix("billing")
            .render();
        assert_eq!(
            idle.body,
            TableBody::Placeholder {
                text: "No billing groups found.".into(),
                colspan: 3,
                test_id: "billing-no-data".into(),
            }
        );
        assert!(!idle.overlay);

        let loading = DataTable::new(&columns, &empty, &sorting)
            .loading(true)
            .render();
        assert!(!loading.shows_placeholder());
        assert!(loading.overlay);
        assert!(loading.rows().is_empty());
    }

    #[test]
    fn test_loading_keeps_stale_rows_dimmed() {
        let columns = columns();
        let sorting = Sorting::none();
        let rows = rows();
        let view = DataTable::new(&columns, &rows, &sorting)
            .row_click(true)
            .loading(true)
            .render();
        assert_eq!(view.rows().len(), 2);
        assert!(view.rows().iter().all(|r| r.dimmed && !r.interactive));
        assert!(view.rows()[0].cells[0].content.spans()[0].dim);
    }

    #[test]
    fn test_cells_and_ids() {
        let columns = columns();
        let sorting = Sorting::none();
        let rows = rows();
        let view = DataTable::new(&columns, &rows, &sorting).render();
        let first = &view.rows()[0];
        assert_eq!(first.test_id, "data-table-row-0");
        assert_eq!(first.cells[0].content.text(), "1");
        assert_eq!(first.cells[1].content.text(), "TELNA");
        assert_eq!(first.cells[2].content.text(), "");
        assert_eq!(first.cells[2].align, Alignment::Center);
        assert!(!first.interactive);
        assert_eq!(view.header[0].width, Some(8));
    }

    #[test]
    fn test_indicators() {
        let columns = columns();
        let sorting = Sorting::single(SortDescriptor::desc("name"));
        let rows = rows();
        let table = DataTable::new(&columns, &rows, &sorting);
        assert_eq!(table.sort_indicator(0), SortIndicator::Unsorted);
        assert_eq!(table.sort_indicator(1), SortIndicator::Descending);
        assert_eq!(table.sort_indicator(2), SortIndicator::None);
        assert_eq!(table.sort_indicator(9), SortIndicator::None);
    }

    #[test]
    fn test_header_click() {
        let columns = columns();
        let sorting = Sorting::single(SortDescriptor::asc("name"));
        let rows = rows();
        let table = DataTable::new(&columns, &rows, &sorting);
        assert_eq!(
            table.on_header_click(1),
            Some(Sorting::single(SortDescriptor::desc("name")))
        );
        assert_eq!(
            table.on_header_click(0),
            Some(Sorting::single(SortDescriptor::asc("id")))
        );
        assert_eq!(table.on_header_click(2), None);
    }

    #[test]
    fn test_row_click() {
        let columns = columns();
        let sorting = Sorting::none();
        let rows = rows();

        let inert = DataTable::new(&columns, &rows, &sorting);
        assert_eq!(inert.on_row_click(0), None);

        let clickable = DataTable::new(&columns, &rows, &sorting).row_click(true);
        assert_eq!(clickable.on_row_click(1), Some((&rows[1], 1)));
        assert_eq!(clickable.on_row_click(5), None);
        assert!(clickable.render().rows()[0].interactive);

        let loading = DataTable::new(&columns, &rows, &sorting)
            .row_click(true)
            .loading(true);
        assert_eq!(loading.on_row_click(0), None);
    }
}
