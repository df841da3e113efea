//! Data sources the orchestrator fetches pages from.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::column::ColumnSet;
use crate::error::FetchError;
use crate::model::{FetchRequest, FetchResponse};
use crate::value::CellValue;

/// Asynchronous source of table pages.
///
/// A fetch must resolve or fail; retries, timeouts and backoff are up to the
/// implementation. Failures never reach the caller of the table: the
/// orchestrator logs them and shows an empty result.
#[async_trait]
pub trait DataSource<T>: Send + Sync {
    /// Fetch one page.
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse<T>, FetchError>;
}

/// Adapts an async function into a [`DataSource`].
///
/// # Example
///
/// ```
/// use datatable_lib::prelude::*;
///
/// let source = FnSource::new(|request: FetchRequest| async move {
///     let rows: Vec<u32> = (0..request.page_size as u32).collect();
///     Ok::<_, FetchError>(FetchResponse::new(rows, 100))
/// });
/// # let _ = source;
/// ```
pub struct FnSource<F> {
    fetch: F,
}

impl<F> FnSource<F> {
    pub fn new(fetch: F) -> Self {
        Self { fetch }
    }
}

#[async_trait]
impl<T, F, Fut> DataSource<T> for FnSource<F>
where
    T: Send + 'static,
    F: Fn(FetchRequest) -> Fut + Send + Sync,
    Fut: Future<Output = Result<FetchResponse<T>, FetchError>> + Send,
{
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse<T>, FetchError> {
        (self.fetch)(request).await
    }
}

#[async_trait]
impl<T, S> DataSource<T> for Arc<S>
where
    T: Send + 'static,
    S: DataSource<T> + ?Sized,
{
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse<T>, FetchError> {
        (**self).fetch(request).await
    }
}

type SortAccessor<T> = Arc<dyn Fn(&T) -> CellValue + Send + Sync>;
type RowFilter<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// In-memory source that sorts and pages a fixed set of rows.
///
/// Stands in for a server while a page is built: rows are filtered, sorted
/// by the requested sort id and sliced to the requested page. Sort ids
/// without a registered accessor leave the order unchanged.
pub struct MemorySource<T> {
    rows: Arc<Vec<T>>,
    sort_accessors: HashMap<String, SortAccessor<T>>,
    filter: Option<RowFilter<T>>,
    latency: Option<Duration>,
}

impl<T> MemorySource<T> {
    pub fn new(rows: Vec<T>) -> Self {
        Self {
            rows: Arc::new(rows),
            sort_accessors: HashMap::new(),
            filter: None,
            latency: None,
        }
    }

    /// Sort rows by `accessor` when `id` is requested.
    pub fn sort_by(
        mut self,
        id: impl Into<String>,
        accessor: impl Fn(&T) -> CellValue + Send + Sync + 'static,
    ) -> Self {
        self.sort_accessors.insert(id.into(), Arc::new(accessor));
        self
    }

    /// Register every sortable column under its effective sort key.
    pub fn sort_by_columns(mut self, columns: &ColumnSet<T>) -> Self
    where
        T: 'static,
    {
        for col in columns.iter().filter(|c| c.is_sortable()) {
            let col = col.clone();
            self.sort_accessors.insert(
                col.effective_sort_key().to_string(),
                Arc::new(move |row: &T| col.value(row)),
            );
        }
        self
    }

    /// Only serve rows the predicate accepts; evaluated on every fetch.
    pub fn filter(mut self, filter: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        self.filter = Some(Arc::new(filter));
        self
    }

    /// Delay every response, simulating network latency.
    pub fn latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Number of rows before filtering.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn page(&self, request: &FetchRequest) -> FetchResponse<T>
    where
        T: Clone,
    {
        let mut matching: Vec<&T> = match &self.filter {
            Some(filter) => self.rows.iter().filter(|r| filter(r)).collect(),
            None => self.rows.iter().collect(),
        };

        if let Some(id) = &request.sort_id
            && let Some(accessor) = self.sort_accessors.get(id)
        {
            let descending = request.sort_descending.unwrap_or(false);
            matching.sort_by(|a, b| {
                let ord = accessor(a).compare(&accessor(b));
                if descending { ord.reverse() } else { ord }
            });
        }

        let total_rows = matching.len();
        let rows = matching
            .into_iter()
            .skip(request.offset())
            .take(request.page_size)
            .cloned()
            .collect();
        FetchResponse::new(rows, total_rows)
    }
}

#[async_trait]
impl<T> DataSource<T> for MemorySource<T>
where
    T: Clone + Send + Sync + 'static,
{
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse<T>, FetchError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        Ok(self.page(&request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SortDescriptor, Sorting};

    fn source() -> MemorySource<(i64, &'static str)> {
        MemorySource::new(vec![(3, "c"), (1, "a"), (2, "b"), (5, "e"), (4, "d")])
            .sort_by("id", |r: &(i64, &str)| r.0.into())
    }

    #[tokio::test]
    async fn test_pages_in_source_order_without_sort() {
        let page = source()
            .fetch(FetchRequest::new(0, 2, &Sorting::none()))
            .await
            .unwrap();
        assert_eq!(page.rows, vec![(3, "c"), (1, "a")]);
        assert_eq!(page.total_rows, 5);
        assert_eq!(page.total_pages, None);
    }

    #[tokio::test]
    async fn test_sorts_then_pages() {
        let sorting = Sorting::single(SortDescriptor::desc("id"));
        let page = source()
            .fetch(FetchRequest::new(1, 2, &sorting))
            .await
            .unwrap();
        assert_eq!(page.rows, vec![(3, "c"), (2, "b")]);
    }

    #[tokio::test]
    async fn test_unknown_sort_id_keeps_order() {
        let sorting = Sorting::single(SortDescriptor::asc("missing"));
        let page = source()
            .fetch(FetchRequest::new(0, 5, &sorting))
            .await
            .unwrap();
        assert_eq!(page.rows[0], (3, "c"));
    }

    #[tokio::test]
    async fn test_filter_reduces_total() {
        let page = source()
            .filter(|r| r.0 % 2 == 1)
            .fetch(FetchRequest::new(0, 10, &Sorting::none()))
            .await
            .unwrap();
        assert_eq!(page.total_rows, 3);
    }

    #[tokio::test]
    async fn test_page_past_end_is_empty() {
        let page = source()
            .fetch(FetchRequest::new(9, 2, &Sorting::none()))
            .await
            .unwrap();
        assert!(page.rows.is_empty());
        assert_eq!(page.total_rows, 5);
    }
}
