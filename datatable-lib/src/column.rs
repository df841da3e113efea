//! Column definitions for server-driven tables.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::content::CellContent;
use crate::error::ConfigError;
use crate::value::CellValue;

/// Horizontal alignment for column content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

type Accessor<T> = Arc<dyn Fn(&T) -> CellValue + Send + Sync>;
type Renderer<T> = Arc<dyn Fn(&T, &CellValue) -> CellContent + Send + Sync>;

/// Column configuration.
///
/// A column reads one field of a row through a typed accessor. The accessor
/// key names that field; it identifies the column and, unless a sort key
/// overrides it, is the id sent to the data source when the column is sorted.
///
/// # Examples
///
/// ```
/// use datatable_lib::column::{Alignment, Column};
///
/// struct Group { id: i64, created: String }
///
/// let columns: Vec<Column<Group>> = vec![
///     Column::new("id", "ID", |g: &Group| g.id.into()).width(10),
///     Column::new("dateCreated", "Created", |g: &Group| g.created.as_str().into())
///         .sort_key("created_ts"),
///     Column::new("actions", "Actions", |_| Default::default())
///         .not_sortable()
///         .align(Alignment::Center),
/// ];
/// ```
pub struct Column<T> {
    accessor_key: String,
    header: String,
    tooltip: Option<String>,
    accessor: Accessor<T>,
    renderer: Option<Renderer<T>>,
    sortable: bool,
    sort_key: Option<String>,
    width: Option<u16>,
    min_width: Option<u16>,
    max_width: Option<u16>,
    align: Alignment,
}

impl<T> Column<T> {
    /// Create a sortable, left-aligned column.
    pub fn new(
        accessor_key: impl Into<String>,
        header: impl Into<String>,
        accessor: impl Fn(&T) -> CellValue + Send + Sync + 'static,
    ) -> Self {
        Self {
            accessor_key: accessor_key.into(),
            header: header.into(),
            tooltip: None,
            accessor: Arc::new(accessor),
            renderer: None,
            sortable: true,
            sort_key: None,
            width: None,
            min_width: None,
            max_width: None,
            align: Alignment::Left,
        }
    }

    /// Render cells with a custom function instead of stringifying the value.
    pub fn render(
        mut self,
        renderer: impl Fn(&T, &CellValue) -> CellContent + Send + Sync + 'static,
    ) -> Self {
        self.renderer = Some(Arc::new(renderer));
        self
    }

    /// Enable or disable sorting on this column.
    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Disable sorting on this column.
    pub fn not_sortable(self) -> Self {
        self.sortable(false)
    }

    /// Send this key to the data source instead of the accessor key.
    pub fn sort_key(mut self, key: impl Into<String>) -> Self {
        self.sort_key = Some(key.into());
        self
    }

    /// Header tooltip text.
    pub fn tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    /// Preferred width in terminal columns.
    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    /// Lower bound for the computed width.
    pub fn min_width(mut self, width: u16) -> Self {
        self.min_width = Some(width);
        self
    }

    /// Upper bound for the computed width.
    pub fn max_width(mut self, width: u16) -> Self {
        self.max_width = Some(width);
        self
    }

    /// Set the column alignment.
    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    pub fn accessor_key(&self) -> &str {
        &self.accessor_key
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn header_tooltip(&self) -> Option<&str> {
        self.tooltip.as_deref()
    }

    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    pub fn sort_key_override(&self) -> Option<&str> {
        self.sort_key.as_deref()
    }

    /// The id a sort on this column is requested with.
    pub fn effective_sort_key(&self) -> &str {
        self.sort_key.as_deref().unwrap_or(&self.accessor_key)
    }

    /// Whether an active sort id refers to this column.
    pub fn matches_sort_id(&self, id: &str) -> bool {
        self.accessor_key == id || self.sort_key.as_deref() == Some(id)
    }

    pub fn width_hint(&self) -> Option<u16> {
        self.width
    }

    pub fn min_width_hint(&self) -> Option<u16> {
        self.min_width
    }

    pub fn max_width_hint(&self) -> Option<u16> {
        self.max_width
    }

    pub fn alignment(&self) -> Alignment {
        self.align
    }

    /// Read this column's value from a row.
    pub fn value(&self, row: &T) -> CellValue {
        (self.accessor)(row)
    }

    /// Render this column's cell for a row.
    pub fn cell(&self, row: &T) -> CellContent {
        let value = self.value(row);
        match &self.renderer {
            Some(render) => render(row, &value),
            None => CellContent::plain(value.to_string()),
        }
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            accessor_key: self.accessor_key.clone(),
            header: self.header.clone(),
            tooltip: self.tooltip.clone(),
            accessor: Arc::clone(&self.accessor),
            renderer: self.renderer.clone(),
            sortable: self.sortable,
            sort_key: self.sort_key.clone(),
            width: self.width,
            min_width: self.min_width,
            max_width: self.max_width,
            align: self.align,
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("accessor_key", &self.accessor_key)
            .field("header", &self.header)
            .field("sortable", &self.sortable)
            .field("sort_key", &self.sort_key)
            .field("align", &self.align)
            .finish_non_exhaustive()
    }
}

/// A validated, immutable list of columns.
#[derive(Debug)]
pub struct ColumnSet<T> {
    columns: Vec<Column<T>>,
}

impl<T> ColumnSet<T> {
    /// Validate a column list.
    ///
    /// Accessor keys must be unique, and every effective sort key must belong
    /// to exactly one column: it may not equal another column's accessor key
    /// or effective sort key.
    pub fn new(columns: Vec<Column<T>>) -> Result<Self, ConfigError> {
        if columns.is_empty() {
            return Err(ConfigError::NoColumns);
        }

        let mut accessors: HashMap<&str, &str> = HashMap::new();
        for col in &columns {
            if accessors.insert(&col.accessor_key, &col.accessor_key).is_some() {
                return Err(ConfigError::DuplicateAccessor {
                    key: col.accessor_key.clone(),
                });
            }
        }

        let mut sort_ids: HashMap<&str, &str> = HashMap::new();
        for col in &columns {
            let key = col.effective_sort_key();
            let owner = accessors
                .get(key)
                .filter(|owner| **owner != col.accessor_key)
                .or_else(|| sort_ids.get(key));
            if let Some(other) = owner {
                return Err(ConfigError::SortKeyCollision {
                    sort_key: key.to_string(),
                    column: col.accessor_key.clone(),
                    other: other.to_string(),
                });
            }
            sort_ids.insert(key, &col.accessor_key);
        }

        Ok(Self { columns })
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Column<T>> {
        self.columns.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Column<T>> {
        self.columns.iter()
    }

    /// Find the column an active sort id refers to.
    pub fn find_by_sort_id(&self, id: &str) -> Option<(usize, &Column<T>)> {
        self.columns
            .iter()
            .enumerate()
            .find(|(_, col)| col.matches_sort_id(id))
    }
}

impl<T> Clone for ColumnSet<T> {
    fn clone(&self) -> Self {
        Self {
            columns: self.columns.clone(),
        }
    }
}

impl<'a, T> IntoIterator for &'a ColumnSet<T> {
    type Item = &'a Column<T>;
    type IntoIter = std::slice::Iter<'a, Column<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Row {
        name: Option<String>,
        created: String,
    }

    fn name() -> Column<Row> {
        Column::new("name", "Name", |r: &Row| r.name.clone().into())
    }

    fn created() -> Column<Row> {
        Column::new("dateCreated", "Created", |r: &Row| r.created.as_str().into())
    }

    #[test]
    fn test_cell_stringifies_without_renderer() {
        let row = Row {
            name: None,
            created: "2025-11-26 11:53:27".into(),
        };
        assert_eq!(name().cell(&row).text(), "");
        assert_eq!(created().cell(&row).text(), "2025-11-26 11:53:27");
    }

    #[test]
    fn test_cell_uses_renderer() {
        let row = Row {
            name: Some("Telna".into()),
            created: String::new(),
        };
        let col = name().render(|_, value| CellContent::plain(format!("<{}>", value)));
        assert_eq!(col.cell(&row).text(), "<Telna>");
    }

    #[test]
    fn test_effective_sort_key() {
        assert_eq!(created().effective_sort_key(), "dateCreated");
        let col = created().sort_key("created_ts");
        assert_eq!(col.effective_sort_key(), "created_ts");
        assert!(col.matches_sort_id("created_ts"));
        assert!(col.matches_sort_id("dateCreated"));
        assert!(!col.matches_sort_id("name"));
    }

    #[test]
    fn test_rejects_duplicate_accessor() {
        let err = ColumnSet::new(vec![name(), name()]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::DuplicateAccessor {
                key: "name".into()
            }
        );
    }

    #[test]
    fn test_rejects_sort_key_matching_other_accessor() {
        let err = ColumnSet::new(vec![name(), created().sort_key("name")]).unwrap_err();
        assert!(matches!(err, ConfigError::SortKeyCollision { ref other, .. } if other == "name"));
    }

    #[test]
    fn test_rejects_shared_sort_key() {
        let err = ColumnSet::new(vec![
            name().sort_key("ts"),
            created().sort_key("ts"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::SortKeyCollision { .. }));
    }

    #[test]
    fn test_sort_key_equal_to_own_accessor_is_fine() {
        let set = ColumnSet::new(vec![name().sort_key("name"), created()]).unwrap();
        assert_eq!(set.find_by_sort_id("name").map(|(i, _)| i), Some(0));
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(
            ColumnSet::<Row>::new(Vec::new()).unwrap_err(),
            ConfigError::NoColumns
        );
    }
}
