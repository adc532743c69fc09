use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Column names of the customer-behaviour dataset
// ---------------------------------------------------------------------------

pub const CUSTOMER_ID: &str = "Customer ID";
pub const GENDER: &str = "Gender";
pub const CITY: &str = "City";
pub const MEMBERSHIP_TYPE: &str = "Membership Type";
pub const DISCOUNT_APPLIED: &str = "Discount Applied";
pub const DAYS_SINCE_LAST_PURCHASE: &str = "Days Since Last Purchase";
pub const ITEMS_PURCHASED: &str = "Items Purchased";
pub const SATISFACTION_LEVEL: &str = "Satisfaction Level";

/// Columns the dashboard cannot work without.
pub const REQUIRED_COLUMNS: [&str; 3] = [CITY, GENDER, MEMBERSHIP_TYPE];

// ---------------------------------------------------------------------------
// CellValue – a single cell of the table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring common dataframe dtypes.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Numeric view of the cell, if it holds a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Category label of the cell. Nulls have no label.
    pub fn label(&self) -> Option<String> {
        match self {
            CellValue::Null => None,
            CellValue::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Exact, case-sensitive comparison against a selected category label.
    pub fn matches_label(&self, label: &str) -> bool {
        match self {
            CellValue::Null => false,
            CellValue::String(s) => s == label,
            other => other.to_string() == label,
        }
    }
}

// ---------------------------------------------------------------------------
// Table – the loaded dataset
// ---------------------------------------------------------------------------

/// In-memory table: named columns and rows of cells, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// Build a table; short rows are padded with nulls and long rows truncated
    /// so every row has exactly one cell per column.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Null);
                row
            })
            .collect();
        Table { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Iterate over one column's cells. Empty when the column does not exist.
    pub fn column_values<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a CellValue> + 'a {
        let idx = self.column_index(name);
        self.rows
            .iter()
            .filter_map(move |row| idx.map(|i| &row[i]))
    }

    /// Distinct non-null labels of a column in first-appearance order.
    /// These are the choices offered by the filter controls.
    pub fn distinct_values(&self, name: &str) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        self.column_values(name)
            .filter_map(CellValue::label)
            .filter(|label| seen.insert(label.clone()))
            .collect()
    }

    /// New table holding the rows at `indices`, in the given order.
    pub fn select_rows(&self, indices: &[usize]) -> Self {
        Table {
            columns: self.columns.clone(),
            rows: indices.iter().map(|&i| self.rows[i].clone()).collect(),
        }
    }

}

// ---------------------------------------------------------------------------
// CustomerRecord – typed view of one row
// ---------------------------------------------------------------------------

/// One customer row as written to CSV, with the dataset's exact column names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    #[serde(rename = "Customer ID")]
    pub customer_id: i64,
    #[serde(rename = "Gender")]
    pub gender: String,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "Membership Type")]
    pub membership_type: String,
    #[serde(rename = "Discount Applied")]
    pub discount_applied: f64,
    #[serde(rename = "Days Since Last Purchase")]
    pub days_since_last_purchase: u32,
    #[serde(rename = "Items Purchased")]
    pub items_purchased: u32,
    /// Ground truth; displayed only, never fed to the model.
    #[serde(rename = "Satisfaction Level")]
    pub satisfaction: Option<String>,
}
