use std::collections::HashMap;

use super::model::Table;

/// One bar (or pie slice): a category and how many rows carry it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

impl CategoryCount {
    pub fn new(category: impl Into<String>, count: usize) -> Self {
        Self {
            category: category.into(),
            count,
        }
    }
}

/// Frequency of each distinct non-null value of `column`, most frequent
/// first. Equal counts keep the order in which the values first appear.
///
/// A missing column yields an empty result.
pub fn count_by(table: &Table, column: &str) -> Vec<CategoryCount> {
    let mut counts: Vec<CategoryCount> = Vec::new();
    let mut position: HashMap<String, usize> = HashMap::new();

    for label in table.column_values(column).filter_map(|cell| cell.label()) {
        match position.get(&label) {
            Some(&i) => counts[i].count += 1,
            None => {
                position.insert(label.clone(), counts.len());
                counts.push(CategoryCount::new(label, 1));
            }
        }
    }

    // sort_by is stable, so first-appearance order survives among ties
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Sum of all counts; equals the number of non-null cells counted.
pub fn total(counts: &[CategoryCount]) -> usize {
    counts.iter().map(|c| c.count).sum()
}
