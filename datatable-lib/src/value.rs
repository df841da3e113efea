//! Value enum for typed cell values

use std::cmp::Ordering;
use std::fmt;

/// The value a column accessor reads from a row.
///
/// # Example
///
/// ```
/// use datatable_lib::value::CellValue;
///
/// let name = CellValue::from("Telna");
/// let id = CellValue::from(1097715i64);
/// let missing = CellValue::Null;
/// assert_eq!(missing.to_string(), "");
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Missing value, displayed as an empty string.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// Text value.
    Text(String),
}

impl CellValue {
    /// Total order used when sorting rows locally.
    ///
    /// Nulls sort first, then booleans, numbers and text. Integers and floats
    /// compare numerically with each other.
    pub fn compare(&self, other: &CellValue) -> Ordering {
        use CellValue::*;
        match (self, other) {
            (Null, Null) => Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Int(a), Int(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Int(a), Float(b)) => (*a as f64).total_cmp(b),
            (Float(a), Int(b)) => a.total_cmp(&(*b as f64)),
            (Text(a), Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            CellValue::Null => 0,
            CellValue::Bool(_) => 1,
            CellValue::Int(_) | CellValue::Float(_) => 2,
            CellValue::Text(_) => 3,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Bool(v) => write!(f, "{}", v),
            CellValue::Int(v) => write!(f, "{}", v),
            CellValue::Float(v) => write!(f, "{}", v),
            CellValue::Text(v) => f.write_str(v),
        }
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for CellValue {
    fn from(v: bool) -> Self {
        CellValue::Bool(v)
    }
}

impl From<i32> for CellValue {
    fn from(v: i32) -> Self {
        CellValue::Int(v.into())
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        CellValue::Int(v)
    }
}

impl From<u32> for CellValue {
    fn from(v: u32) -> Self {
        CellValue::Int(v.into())
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float(v)
    }
}

impl From<String> for CellValue {
    fn from(v: String) -> Self {
        CellValue::Text(v)
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        CellValue::Text(v.to_string())
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(CellValue::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(CellValue::Null.to_string(), "");
        assert_eq!(CellValue::from(42i64).to_string(), "42");
        assert_eq!(CellValue::from("Telna").to_string(), "Telna");
        assert_eq!(CellValue::from(None::<String>).to_string(), "");
    }

    #[test]
    fn test_compare_mixed_numbers() {
        assert_eq!(
            CellValue::from(2i64).compare(&CellValue::from(2.5)),
            Ordering::Less
        );
        assert_eq!(
            CellValue::from(3.0).compare(&CellValue::from(3i64)),
            Ordering::Equal
        );
    }

    #[test]
    fn test_compare_nulls_first() {
        assert_eq!(
            CellValue::Null.compare(&CellValue::from("a")),
            Ordering::Less
        );
        assert_eq!(
            CellValue::from("b").compare(&CellValue::from("a")),
            Ordering::Greater
        );
    }
}
