//! Construction-time configuration of a server table.

use serde::Deserialize;

use crate::error::ConfigError;
use crate::model::{SortDescriptor, Sorting};
use crate::pagination::{PaginationOptions, DEFAULT_PAGE_SIZE_OPTIONS};
use crate::table::DEFAULT_NO_DATA_TEXT;

/// How responses of overlapping fetches are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseOrdering {
    /// Apply every response as it resolves; the last one to resolve wins,
    /// even if it answers an older request. Any settled request clears the
    /// loading flag.
    LastResolved,
    /// Drop responses older than the newest one already applied; the loading
    /// flag clears when the most recently issued request settles.
    #[default]
    LatestIssued,
}

/// Default sort column and direction.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DefaultSort {
    /// Sort id of the column.
    pub id: String,
    #[serde(default = "default_descending")]
    pub descending: bool,
}

fn default_descending() -> bool {
    true
}

/// Table configuration, immutable after the table is built.
///
/// # Example
///
/// ```
/// use datatable_lib::config::TableConfig;
///
/// let config: TableConfig = serde_json::from_str(
///     r#"{ "default_page_size": 25, "default_sort": { "id": "dateCreated" } }"#,
/// ).unwrap();
/// assert_eq!(config.default_page_size, 25);
/// assert!(config.default_sort.unwrap().descending);
/// assert_eq!(config.page_size_options, vec![10, 25, 50, 100]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub default_page_size: usize,
    pub default_sort: Option<DefaultSort>,
    pub page_size_options: Vec<usize>,
    /// Placeholder text of an empty table.
    pub empty_message: String,
    pub fetch_on_mount: bool,
    /// Prefix of automation ids.
    pub test_id_prefix: String,
    pub show_pagination_top: bool,
    pub show_pagination_bottom: bool,
    #[serde(flatten)]
    pub pagination: PaginationOptions,
    pub response_ordering: ResponseOrdering,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            default_sort: None,
            page_size_options: DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
            empty_message: DEFAULT_NO_DATA_TEXT.to_string(),
            fetch_on_mount: true,
            test_id_prefix: "server-data-table".to_string(),
            show_pagination_top: true,
            show_pagination_bottom: true,
            pagination: PaginationOptions::default(),
            response_ordering: ResponseOrdering::default(),
        }
    }
}

impl TableConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_page_size(mut self, size: usize) -> Self {
        self.default_page_size = size;
        self
    }

    /// Sort by `id` initially.
    pub fn default_sort(mut self, id: impl Into<String>, descending: bool) -> Self {
        self.default_sort = Some(DefaultSort {
            id: id.into(),
            descending,
        });
        self
    }

    pub fn page_size_options(mut self, options: impl Into<Vec<usize>>) -> Self {
        self.page_size_options = options.into();
        self
    }

    pub fn empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    pub fn fetch_on_mount(mut self, fetch: bool) -> Self {
        self.fetch_on_mount = fetch;
        self
    }

    pub fn test_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.test_id_prefix = prefix.into();
        self
    }

    pub fn show_pagination(mut self, top: bool, bottom: bool) -> Self {
        self.show_pagination_top = top;
        self.show_pagination_bottom = bottom;
        self
    }

    pub fn pagination_options(mut self, options: PaginationOptions) -> Self {
        self.pagination = options;
        self
    }

    pub fn response_ordering(mut self, ordering: ResponseOrdering) -> Self {
        self.response_ordering = ordering;
        self
    }

    /// Sorting the table starts with.
    pub fn initial_sorting(&self) -> Sorting {
        self.default_sort
            .as_ref()
            .map(|s| SortDescriptor {
                id: s.id.clone(),
                descending: s.descending,
            })
            .into()
    }

    /// Check the page-size settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        if self.page_size_options.is_empty() {
            return Err(ConfigError::NoPageSizeOptions);
        }
        if self.page_size_options.contains(&0) {
            return Err(ConfigError::ZeroPageSizeOption);
        }
        Ok(())
    }
}
