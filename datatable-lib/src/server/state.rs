//! Runtime state owned by a server table.

use crate::model::{PaginationState, Sorting};

/// Whether a fetch is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchPhase {
    #[default]
    Idle,
    Fetching,
}

/// Mutable state behind the table's lock.
#[derive(Debug)]
pub(crate) struct TableState<T> {
    pub rows: Vec<T>,
    pub pagination: PaginationState,
    pub sorting: Sorting,
    pub phase: FetchPhase,
    /// Set once the table has mounted.
    pub initialized: bool,
    /// Fingerprint of the last dependency set, if any was given.
    pub dependencies: Option<u64>,
    /// Sequence handed to the most recent request.
    pub latest_issued: u64,
    /// Highest sequence whose response has been applied.
    pub highest_applied: u64,
}

impl<T> TableState<T> {
    pub fn new(page_size: usize, sorting: Sorting) -> Self {
        Self {
            rows: Vec::new(),
            pagination: PaginationState::new(page_size),
            sorting,
            phase: FetchPhase::Idle,
            initialized: false,
            dependencies: None,
            latest_issued: 0,
            highest_applied: 0,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase == FetchPhase::Fetching
    }

    /// Reserve the next request sequence.
    pub fn issue(&mut self) -> u64 {
        self.latest_issued += 1;
        self.latest_issued
    }

    /// Drop rows and counts after a failed fetch.
    pub fn reset_results(&mut self) {
        self.rows.clear();
        self.pagination.total_rows = 0;
        self.pagination.total_pages = 0;
    }
}

/// Point-in-time copy of a table's state.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSnapshot<T> {
    pub rows: Vec<T>,
    pub pagination: PaginationState,
    pub sorting: Sorting,
    pub loading: bool,
}

impl<T> TableSnapshot<T> {
    pub fn phase(&self) -> FetchPhase {
        if self.loading {
            FetchPhase::Fetching
        } else {
            FetchPhase::Idle
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<T: Clone> From<&TableState<T>> for TableSnapshot<T> {
    fn from(state: &TableState<T>) -> Self {
        Self {
            rows: state.rows.clone(),
            pagination: state.pagination,
            sorting: state.sorting.clone(),
            loading: state.is_loading(),
        }
    }
}
