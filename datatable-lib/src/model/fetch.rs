//! Fetch request and response exchanged with the data source.

use serde::{Deserialize, Serialize};

use crate::error::FetchError;

use super::pagination::total_pages_for;
use super::sort::Sorting;

/// Parameters handed to the data source for one page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchRequest {
    /// Requested page (0-based).
    pub page_index: usize,
    /// Rows per page.
    pub page_size: usize,
    /// Sort key of the active sort, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_id: Option<String>,
    /// Direction of the active sort, present together with `sort_id`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_descending: Option<bool>,
    /// Issue order of this request within its table.
    #[serde(skip)]
    pub sequence: u64,
}

impl FetchRequest {
    /// Builds a request from a page cursor and the current sorting.
    pub fn new(page_index: usize, page_size: usize, sorting: &Sorting) -> Self {
        let primary = sorting.primary();
        Self {
            page_index,
            page_size,
            sort_id: primary.map(|s| s.id.clone()),
            sort_descending: primary.map(|s| s.descending),
            sequence: 0,
        }
    }

    /// Sets the issue sequence number.
    pub fn with_sequence(mut self, sequence: u64) -> Self {
        self.sequence = sequence;
        self
    }

    /// Index of the first row of the requested page across all pages.
    pub fn offset(&self) -> usize {
        self.page_index.saturating_mul(self.page_size)
    }
}

/// One page of rows returned by the data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchResponse<T> {
    /// Rows of the requested page.
    #[serde(alias = "data")]
    pub rows: Vec<T>,
    /// Rows across all pages.
    pub total_rows: usize,
    /// Page count, derived from `total_rows` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<usize>,
}

impl<T> FetchResponse<T> {
    /// Creates a response without an explicit page count.
    pub fn new(rows: Vec<T>, total_rows: usize) -> Self {
        Self {
            rows,
            total_rows,
            total_pages: None,
        }
    }

    /// Sets the page count reported by the server.
    pub fn with_total_pages(mut self, total_pages: usize) -> Self {
        self.total_pages = Some(total_pages);
        self
    }

    /// Reported page count, or `ceil(total_rows / page_size)`.
    pub fn resolved_total_pages(&self, page_size: usize) -> usize {
        self.total_pages
            .unwrap_or_else(|| total_pages_for(self.total_rows, page_size))
    }
}

impl<T: serde::de::DeserializeOwned> FetchResponse<T> {
    /// Decodes a JSON response body.
    pub fn from_json(body: &[u8]) -> Result<Self, FetchError> {
        Ok(serde_json::from_slice(body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SortDescriptor;

    #[test]
    fn test_request_from_sorting() {
        let sorting = Sorting::single(SortDescriptor::desc("created_ts"));
        let request = FetchRequest::new(2, 25, &sorting);
        assert_eq!(request.sort_id.as_deref(), Some("created_ts"));
        assert_eq!(request.sort_descending, Some(true));
        assert_eq!(request.offset(), 50);
    }

    #[test]
    fn test_request_without_sort() {
        let request = FetchRequest::new(0, 10, &Sorting::none());
        assert_eq!(request.sort_id, None);
        assert_eq!(request.sort_descending, None);
    }

    #[test]
    fn test_resolved_total_pages() {
        let response = FetchResponse::<u32>::new(Vec::new(), 101);
        assert_eq!(response.resolved_total_pages(10), 11);
        let response = response.with_total_pages(3);
        assert_eq!(response.resolved_total_pages(10), 3);
    }

    #[test]
    fn test_from_json_accepts_data_alias() {
        let body = br#"{"data": [1, 2, 3], "totalRows": 3}"#;
        let response = FetchResponse::<u32>::from_json(body).unwrap();
        assert_eq!(response.rows, vec![1, 2, 3]);
        assert_eq!(response.total_pages, None);

        let body = br#"{"rows": [], "totalRows": 0, "totalPages": 0}"#;
        let response = FetchResponse::<u32>::from_json(body).unwrap();
        assert_eq!(response.total_pages, Some(0));
    }

    #[test]
    fn test_from_json_malformed() {
        let err = FetchResponse::<u32>::from_json(b"{\"rows\": 5}").unwrap_err();
        assert!(matches!(err, FetchError::Malformed(_)));
    }
}
