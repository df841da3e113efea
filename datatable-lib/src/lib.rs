//! Server-driven data table core
//!
//! A headless, generic table that pages and sorts on the server. The
//! [`ServerTable`](server::ServerTable) orchestrator owns the runtime state and
//! calls an external [`DataSource`](source::DataSource); the
//! [`DataTable`](table::DataTable) engine and the
//! [`PaginationControl`](pagination::PaginationControl) only read snapshots of
//! that state and turn user interaction into change requests.

pub mod column;
pub mod config;
pub mod content;
pub mod error;
pub mod layout;
pub mod model;
pub mod pagination;
pub mod server;
pub mod source;
pub mod table;
pub mod value;

pub mod prelude {
    pub use crate::column::{Alignment, Column, ColumnSet};
    pub use crate::config::{ResponseOrdering, TableConfig};
    pub use crate::content::{CellContent, Span, Tone};
    pub use crate::error::{ConfigError, FetchError};
    pub use crate::layout::{Line, TextLayout};
    pub use crate::model::{
        FetchRequest, FetchResponse, PaginationState, SortDescriptor, SortDirection, Sorting,
    };
    pub use crate::pagination::{PaginationControl, PaginationRequest, PaginationView};
    pub use crate::server::{FetchOutcome, PendingFetch, RenderedTable, ServerTable, TableSnapshot};
    pub use crate::source::{DataSource, FnSource, MemorySource};
    pub use crate::table::{DataTable, TableView};
    pub use crate::value::CellValue;
}
