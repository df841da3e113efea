//! Sort descriptor types.

use serde::{Deserialize, Serialize};

/// Sort direction for a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    /// Ascending order (A-Z, 0-9).
    Ascending,
    /// Descending order (Z-A, 9-0).
    Descending,
}

/// One active sort: the id sent to the data source and its direction.
///
/// The id is the column's effective sort key, which is the `sort_key`
/// override when the column declares one and its accessor key otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortDescriptor {
    /// Sort key understood by the data source.
    pub id: String,
    /// Whether the order is descending.
    #[serde(default)]
    pub descending: bool,
}

impl SortDescriptor {
    /// Creates an ascending sort on a key.
    pub fn asc(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            descending: false,
        }
    }

    /// Creates a descending sort on a key.
    pub fn desc(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            descending: true,
        }
    }

    /// Returns the direction of this sort.
    pub fn direction(&self) -> SortDirection {
        if self.descending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        }
    }
}

/// Order-significant list of sort descriptors.
///
/// The table only ever produces zero or one descriptor, and only the first
/// entry is consulted when building a fetch request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sorting(Vec<SortDescriptor>);

impl Sorting {
    /// No active sort.
    pub fn none() -> Self {
        Self(Vec::new())
    }

    /// A single active sort.
    pub fn single(descriptor: SortDescriptor) -> Self {
        Self(vec![descriptor])
    }

    /// The descriptor that governs the fetch request.
    pub fn primary(&self) -> Option<&SortDescriptor> {
        self.0.first()
    }

    /// Returns `true` if nothing is sorted.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// All descriptors in order.
    pub fn descriptors(&self) -> &[SortDescriptor] {
        &self.0
    }
}

impl From<Option<SortDescriptor>> for Sorting {
    fn from(descriptor: Option<SortDescriptor>) -> Self {
        match descriptor {
            Some(d) => Self::single(d),
            None => Self::none(),
        }
    }
}

impl From<Vec<SortDescriptor>> for Sorting {
    fn from(descriptors: Vec<SortDescriptor>) -> Self {
        Self(descriptors)
    }
}
