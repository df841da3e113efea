//! Click-to-sort toggling.

use crate::column::Column;
use crate::model::{SortDescriptor, SortDirection, Sorting};

/// Next sorting after the header of `column` is clicked.
///
/// A column cycles unsorted → ascending → descending → unsorted. Clicking a
/// column other than the sorted one replaces the sort with an ascending sort
/// on that column. Only one column is ever sorted.
pub fn toggle_sort<T>(current: &Sorting, column: &Column<T>) -> Sorting {
    let active = current
        .primary()
        .filter(|d| column.matches_sort_id(&d.id));

    match active.map(SortDescriptor::direction) {
        None => Sorting::single(SortDescriptor::asc(column.effective_sort_key())),
        Some(SortDirection::Ascending) => {
            Sorting::single(SortDescriptor::desc(column.effective_sort_key()))
        }
        Some(SortDirection::Descending) => Sorting::none(),
    }
}

/// Direction `column` is currently sorted in, if any.
pub fn sorted_direction<T>(current: &Sorting, column: &Column<T>) -> Option<SortDirection> {
    current
        .primary()
        .filter(|d| column.matches_sort_id(&d.id))
        .map(SortDescriptor::direction)
}
