//! Data orchestrator - owns the runtime state of a server-paged table.
//!
//! [`ServerTable`] holds rows, the pagination cursor, the sorting and the
//! loading flag behind a lock, issues fetches to a [`DataSource`] and applies
//! their responses. Every operation changes state synchronously and hands back
//! a [`PendingFetch`] for the host to await or spawn. Handles are cheap to
//! clone and share the same state.

mod pending;
mod state;
pub mod wakeup;

pub use pending::{FetchOutcome, PendingFetch};
pub use state::{FetchPhase, TableSnapshot};

use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use futures::FutureExt;

use crate::column::{Column, ColumnSet};
use crate::config::{ResponseOrdering, TableConfig};
use crate::error::{ConfigError, FetchError};
use crate::model::{FetchRequest, FetchResponse, PaginationState, Sorting};
use crate::pagination::{PaginationControl, PaginationRequest, PaginationView};
use crate::source::DataSource;
use crate::table::{DataTable, TableView};

use state::TableState;
use wakeup::WakeupSender;

type RowClickHandler<T> = Arc<dyn Fn(&T, usize) + Send + Sync>;

/// Pagination bars and grid of one render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedTable {
    pub top: Option<PaginationView>,
    pub table: TableView,
    pub bottom: Option<PaginationView>,
}

/// Server-paged, server-sorted table.
///
/// # Example
///
/// ```
/// use datatable_lib::prelude::*;
///
/// # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
/// let columns = vec![Column::new("n", "N", |n: &u32| (*n).into())];
/// let source = MemorySource::new((0..101).collect::<Vec<u32>>());
/// let table = ServerTable::new(columns, source, TableConfig::new()).unwrap();
///
/// table.mount().unwrap().await;
/// let snapshot = table.snapshot();
/// assert_eq!(snapshot.rows.len(), 10);
/// assert_eq!(snapshot.pagination.total_pages, 11);
/// # });
/// ```
pub struct ServerTable<T, S> {
    columns: Arc<ColumnSet<T>>,
    source: Arc<S>,
    config: Arc<TableConfig>,
    row_click: Option<RowClickHandler<T>>,
    inner: Arc<RwLock<TableState<T>>>,
    dirty: Arc<AtomicBool>,
    wakeup: Arc<Mutex<Option<WakeupSender>>>,
}

impl<T, S> Clone for ServerTable<T, S> {
    fn clone(&self) -> Self {
        Self {
            columns: Arc::clone(&self.columns),
            source: Arc::clone(&self.source),
            config: Arc::clone(&self.config),
            row_click: self.row_click.clone(),
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
            wakeup: Arc::clone(&self.wakeup),
        }
    }
}

impl<T, S> ServerTable<T, S>
where
    T: Clone + Send + Sync + 'static,
    S: DataSource<T> + 'static,
{
    /// Build a table; nothing is fetched until [`mount`](Self::mount).
    pub fn new(
        columns: Vec<Column<T>>,
        source: S,
        config: TableConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let columns = ColumnSet::new(columns)?;
        let state = TableState::new(config.default_page_size, config.initial_sorting());

        Ok(Self {
            columns: Arc::new(columns),
            source: Arc::new(source),
            config: Arc::new(config),
            row_click: None,
            inner: Arc::new(RwLock::new(state)),
            dirty: Arc::new(AtomicBool::new(false)),
            wakeup: Arc::new(Mutex::new(None)),
        })
    }

    /// Make rows interactive and call `handler` with the clicked row.
    pub fn on_row_click(mut self, handler: impl Fn(&T, usize) + Send + Sync + 'static) -> Self {
        self.row_click = Some(Arc::new(handler));
        self
    }

    /// Install a wakeup sender, shared by all clones of this table.
    pub fn install_wakeup(&self, sender: WakeupSender) {
        if let Ok(mut guard) = self.wakeup.lock() {
            *guard = Some(sender);
        }
    }

    /// Check if the state changed since the last check.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }

    pub fn columns(&self) -> &ColumnSet<T> {
        &self.columns
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    pub fn snapshot(&self) -> TableSnapshot<T> {
        TableSnapshot::from(&*self.read())
    }

    pub fn pagination(&self) -> PaginationState {
        self.read().pagination
    }

    pub fn sorting(&self) -> Sorting {
        self.read().sorting.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.read().is_loading()
    }

    pub fn is_initialized(&self) -> bool {
        self.read().initialized
    }

    /// Pagination control over the current cursor.
    ///
    /// Its request methods return what a button press or jump would ask for;
    /// pass the result to [`handle_pagination`](Self::handle_pagination).
    pub fn pagination_control(&self) -> PaginationControl<'_> {
        let (state, loading) = {
            let guard = self.read();
            (guard.pagination, guard.is_loading())
        };
        PaginationControl::new(state, loading)
            .page_size_options(&self.config.page_size_options)
            .options(self.config.pagination)
            .test_id_prefix(&self.config.test_id_prefix)
    }

    /// Render both pagination bars and the grid from the current state.
    pub fn render(&self) -> RenderedTable {
        let prefix = &self.config.test_id_prefix;
        let top_prefix = format!("{prefix}-pagination-top");
        let bottom_prefix = format!("{prefix}-pagination-bottom");

        let guard = self.read();
        let loading = guard.is_loading();
        let bar = |id_prefix: &str| {
            PaginationControl::new(guard.pagination, loading)
                .page_size_options(&self.config.page_size_options)
                .options(self.config.pagination)
                .test_id_prefix(id_prefix)
                .view()
        };

        let top = self.config.show_pagination_top.then(|| bar(&top_prefix));
        let bottom = self
            .config
            .show_pagination_bottom
            .then(|| bar(&bottom_prefix));
        let table = DataTable::new(&self.columns, &guard.rows, &guard.sorting)
            .loading(loading)
            .no_data_text(&self.config.empty_message)
            .row_click(self.row_click.is_some())
            .test_id_prefix(prefix)
            .render();

        RenderedTable { top, table, bottom }
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Mount the table.
    ///
    /// Fetches the first page when `fetch_on_mount` is set. Mounting twice
    /// does nothing.
    pub fn mount(&self) -> Option<PendingFetch> {
        let (page_size, sorting) = {
            let mut guard = self.write();
            if guard.initialized {
                return None;
            }
            guard.initialized = true;
            (guard.pagination.page_size, guard.sorting.clone())
        };
        log::debug!("Mounting table '{}'", self.config.test_id_prefix);
        self.mark_changed();

        self.config
            .fetch_on_mount
            .then(|| self.request_data(page_size, 0, sorting))
    }

    /// Record the host's dependency values.
    ///
    /// The first call sets a baseline. A later call with different values
    /// refetches page 0 with the current page size and sorting once the table
    /// is mounted.
    pub fn set_dependencies<D: Hash + ?Sized>(&self, dependencies: &D) -> Option<PendingFetch> {
        let mut hasher = DefaultHasher::new();
        dependencies.hash(&mut hasher);
        let fingerprint = hasher.finish();

        let (page_size, sorting) = {
            let mut guard = self.write();
            let previous = guard.dependencies.replace(fingerprint);
            if previous.is_none_or(|p| p == fingerprint) || !guard.initialized {
                return None;
            }
            (guard.pagination.page_size, guard.sorting.clone())
        };
        log::debug!("Dependencies changed, returning to first page");
        Some(self.request_data(page_size, 0, sorting))
    }

    /// Fetch the current page again.
    pub fn refetch(&self) -> PendingFetch {
        let (page_size, page_index, sorting) = {
            let guard = self.read();
            (
                guard.pagination.page_size,
                guard.pagination.page_index,
                guard.sorting.clone(),
            )
        };
        self.request_data(page_size, page_index, sorting)
    }

    // -------------------------------------------------------------------------
    // Requests
    // -------------------------------------------------------------------------

    /// Issue a fetch for the given cursor and sorting.
    ///
    /// The cursor, sorting and loading flag change immediately; rows and
    /// counts change when the returned fetch settles. A zero `page_size`
    /// keeps the current size. A `page_index` past the last page reported
    /// by the response is clamped and fetched again.
    pub fn request_data(&self, page_size: usize, page_index: usize, sorting: Sorting) -> PendingFetch {
        let request = {
            let mut guard = self.write();
            if page_size == 0 {
                log::warn!(
                    "Ignoring page size 0, keeping {}",
                    guard.pagination.page_size
                );
            } else {
                guard.pagination.page_size = page_size;
            }
            guard.pagination.page_index = page_index;
            guard.sorting = sorting;
            guard.phase = state::FetchPhase::Fetching;
            let sequence = guard.issue();
            FetchRequest::new(page_index, guard.pagination.page_size, &guard.sorting)
                .with_sequence(sequence)
        };
        self.mark_changed();

        log::debug!(
            "Fetching page {} (size {}, sort {:?}, seq {})",
            request.page_index,
            request.page_size,
            request.sort_id,
            request.sequence
        );

        let sequence = request.sequence;
        let source = Arc::clone(&self.source);
        let table = self.clone();
        let future = async move {
            let result = <S as DataSource<T>>::fetch(&source, request.clone()).await;
            match table.settle(&request, result) {
                Settled::Done(outcome) => outcome,
                Settled::Clamped(page_index) => {
                    table
                        .request_data(request.page_size, page_index, table.sorting())
                        .await
                }
            }
        };
        PendingFetch::new(sequence, future.boxed())
    }

    /// Move to `page_index`, ignoring indices outside the known pages.
    pub fn change_page(&self, page_index: usize) -> Option<PendingFetch> {
        let (pagination, sorting) = {
            let guard = self.read();
            (guard.pagination, guard.sorting.clone())
        };
        if !pagination.contains(page_index) {
            log::debug!(
                "Ignoring page {} outside 0..{}",
                page_index,
                pagination.total_pages
            );
            return None;
        }
        Some(self.request_data(pagination.page_size, page_index, sorting))
    }

    /// Change the page size and return to the first page.
    pub fn change_page_size(&self, page_size: usize) -> Option<PendingFetch> {
        if page_size == 0 {
            return None;
        }
        let sorting = self.sorting();
        Some(self.request_data(page_size, 0, sorting))
    }

    /// Apply a new sorting, staying on the current page.
    pub fn change_sort(&self, sorting: Sorting) -> PendingFetch {
        let pagination = self.pagination();
        self.request_data(pagination.page_size, pagination.page_index, sorting)
    }

    /// Route a request produced by the pagination control.
    pub fn handle_pagination(&self, request: PaginationRequest) -> Option<PendingFetch> {
        match request {
            PaginationRequest::Page(page) => self.change_page(page),
            PaginationRequest::PageSize(size) => self.change_page_size(size),
        }
    }

    /// Ask the pagination control for a request and route it.
    ///
    /// ```ignore
    /// table.paginate(|control| control.next());
    /// ```
    pub fn paginate(
        &self,
        f: impl FnOnce(&PaginationControl<'_>) -> Option<PaginationRequest>,
    ) -> Option<PendingFetch> {
        let request = f(&self.pagination_control())?;
        self.handle_pagination(request)
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    /// Toggle sorting on the header of column `index`.
    pub fn click_header(&self, index: usize) -> Option<PendingFetch> {
        let sorting = {
            let guard = self.read();
            DataTable::new(&self.columns, &guard.rows, &guard.sorting).on_header_click(index)?
        };
        Some(self.change_sort(sorting))
    }

    /// Click row `index` of the current page.
    ///
    /// Returns whether the row-click handler ran. Clicks are ignored while
    /// loading.
    pub fn click_row(&self, index: usize) -> bool {
        let Some(handler) = &self.row_click else {
            return false;
        };
        let row = {
            let guard = self.read();
            DataTable::new(&self.columns, &guard.rows, &guard.sorting)
                .loading(guard.is_loading())
                .row_click(true)
                .on_row_click(index)
                .map(|(row, _)| row.clone())
        };
        match row {
            Some(row) => {
                handler(&row, index);
                true
            }
            None => false,
        }
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn settle(
        &self,
        request: &FetchRequest,
        result: Result<FetchResponse<T>, FetchError>,
    ) -> Settled {
        let ordering = self.config.response_ordering;
        let settled = {
            let mut guard = self.write();
            if ordering == ResponseOrdering::LatestIssued
                && request.sequence < guard.highest_applied
            {
                log::debug!(
                    "Discarding response {} superseded by {}",
                    request.sequence,
                    guard.highest_applied
                );
                return Settled::Done(FetchOutcome::Discarded);
            }

            let outcome = match result {
                Ok(response) => {
                    let total_pages = response.resolved_total_pages(request.page_size);
                    log::debug!(
                        "Applied page {} of {} ({} rows total, seq {})",
                        request.page_index,
                        total_pages,
                        response.total_rows,
                        request.sequence
                    );
                    guard.pagination.total_rows = response.total_rows;
                    guard.pagination.total_pages = total_pages;
                    guard.rows = response.rows;
                    FetchOutcome::Applied
                }
                Err(e) => {
                    log::error!("Failed to fetch data: {}", e);
                    guard.reset_results();
                    FetchOutcome::Failed
                }
            };

            guard.highest_applied = guard.highest_applied.max(request.sequence);
            let settles_loading = match ordering {
                ResponseOrdering::LastResolved => true,
                ResponseOrdering::LatestIssued => request.sequence == guard.latest_issued,
            };
            let total_pages = guard.pagination.total_pages;
            if settles_loading && total_pages > 0 && guard.pagination.page_index >= total_pages {
                // Totals shrank under the cursor; refetch the new last page.
                let last = total_pages - 1;
                log::debug!(
                    "Page {} past the last page, moving to {}",
                    guard.pagination.page_index,
                    last
                );
                guard.pagination.page_index = last;
                Settled::Clamped(last)
            } else {
                if settles_loading {
                    guard.phase = state::FetchPhase::Idle;
                }
                Settled::Done(outcome)
            }
        };
        self.mark_changed();
        settled
    }

    fn read(&self) -> RwLockReadGuard<'_, TableState<T>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, TableState<T>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn mark_changed(&self) {
        self.dirty.store(true, Ordering::SeqCst);
        if let Ok(guard) = self.wakeup.lock()
            && let Some(sender) = guard.as_ref()
        {
            sender.send();
        }
    }
}

/// How a response left the table.
enum Settled {
    Done(FetchOutcome),
    /// The cursor was moved back to this page, which still has to be fetched.
    Clamped(usize),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SortDescriptor;
    use crate::source::MemorySource;

    fn table(config: TableConfig) -> ServerTable<u32, MemorySource<u32>> {
        let columns = vec![Column::new("n", "N", |n: &u32| (*n).into())];
        let source = MemorySource::new((0..101).collect()).sort_by("n", |n: &u32| (*n).into());
        ServerTable::new(columns, source, config).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let columns = vec![Column::new("n", "N", |n: &u32| (*n).into())];
        let result = ServerTable::new(
            columns,
            MemorySource::new(vec![]),
            TableConfig::new().default_page_size(0),
        );
        assert!(matches!(result, Err(ConfigError::ZeroPageSize)));
    }

    #[test]
    fn test_initial_state() {
        let table = table(TableConfig::new().default_sort("n", true));
        let snapshot = table.snapshot();
        assert!(snapshot.rows.is_empty());
        assert!(!snapshot.loading);
        assert_eq!(snapshot.pagination, PaginationState::new(10));
        assert_eq!(snapshot.sorting, Sorting::single(SortDescriptor::desc("n")));
        assert!(!table.is_initialized());
    }

    #[test]
    fn test_request_sets_loading_before_settling() {
        let table = table(TableConfig::new());
        let pending = table.request_data(25, 2, Sorting::none());
        let snapshot = table.snapshot();
        assert!(snapshot.loading);
        assert_eq!(snapshot.pagination.page_index, 2);
        assert_eq!(snapshot.pagination.page_size, 25);
        assert_eq!(pending.sequence(), 1);
        assert!(table.is_dirty());
    }

    #[tokio::test]
    async fn test_mount_fetches_first_page() {
        let table = table(TableConfig::new());
        assert_eq!(table.mount().unwrap().await, FetchOutcome::Applied);
        assert!(table.mount().is_none());

        let snapshot = table.snapshot();
        assert_eq!(snapshot.rows, (0..10).collect::<Vec<_>>());
        assert_eq!(snapshot.pagination.total_rows, 101);
        assert_eq!(snapshot.pagination.total_pages, 11);
        assert!(!snapshot.loading);
    }

    #[tokio::test]
    async fn test_click_header_cycles_sort_on_same_page() {
        let table = table(TableConfig::new());
        table.mount().unwrap().await;
        table.change_page(3).unwrap().await;

        table.click_header(0).unwrap().await;
        assert_eq!(table.sorting(), Sorting::single(SortDescriptor::asc("n")));
        table.click_header(0).unwrap().await;
        assert_eq!(table.sorting(), Sorting::single(SortDescriptor::desc("n")));
        assert_eq!(table.pagination().page_index, 3);
        assert_eq!(table.snapshot().rows[0], 70);
        table.click_header(0).unwrap().await;
        assert!(table.sorting().is_empty());
    }

    #[tokio::test]
    async fn test_render_uses_prefixed_ids() {
        let table = table(TableConfig::new().show_pagination(false, true));
        table.mount().unwrap().await;
        let rendered = table.render();
        assert!(rendered.top.is_none());
        let bottom = rendered.bottom.unwrap();
        assert_eq!(bottom.summary, "Viewing 1-10 rows of 101 results");
        assert_eq!(rendered.table.test_id, "server-data-table");
        assert_eq!(rendered.table.rows()[0].test_id, "server-data-table-row-0");
        assert_eq!(rendered.table.rows().len(), 10);
    }

    #[tokio::test]
    async fn test_wakeup_on_settle() {
        let (tx, mut rx) = wakeup::channel();
        let table = table(TableConfig::new());
        table.install_wakeup(tx);
        table.mount().unwrap().await;
        // mount, request issue, settle
        assert_eq!(rx.drain(), 3);
    }

    #[tokio::test]
    async fn test_zero_page_size_keeps_current_size() {
        let table = table(TableConfig::new());
        let pending = table.request_data(0, 0, Sorting::none());
        assert_eq!(table.pagination().page_size, 10);
        assert_eq!(pending.await, FetchOutcome::Applied);

        let pagination = table.pagination();
        assert_eq!(pagination.page_size, 10);
        assert_eq!(pagination.total_pages, 11);
        assert_eq!(table.snapshot().rows.len(), 10);
    }

    #[tokio::test]
    async fn test_huge_page_index_lands_on_last_page() {
        let table = table(TableConfig::new());
        assert_eq!(
            table.request_data(10, usize::MAX / 2, Sorting::none()).await,
            FetchOutcome::Applied
        );

        let snapshot = table.snapshot();
        assert_eq!(snapshot.pagination.page_index, 10);
        assert_eq!(snapshot.rows, vec![100]);
        assert!(!snapshot.loading);
        assert_eq!(
            table.pagination_control().summary(),
            "Viewing 101-101 rows of 101 results"
        );
    }
}
