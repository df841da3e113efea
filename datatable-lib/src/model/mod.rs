//! Canonical shapes flowing between the table components.

mod fetch;
mod pagination;
mod sort;

pub use fetch::{FetchRequest, FetchResponse};
pub use pagination::{clamp_page, total_pages_for, PaginationState};
pub use sort::{SortDescriptor, SortDirection, Sorting};
