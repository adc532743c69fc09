use std::collections::BTreeSet;

use super::model::{CITY, CellValue, GENDER, MEMBERSHIP_TYPE, Table};

// ---------------------------------------------------------------------------
// Filter criteria: what the user picked in the side panel
// ---------------------------------------------------------------------------

/// Single-choice selection with an "All" wildcard.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    /// Label shown in the combo box.
    pub fn label(&self) -> &str {
        match self {
            Selection::All => "All",
            Selection::Only(v) => v,
        }
    }

    fn admits(&self, cell: &CellValue) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(v) => cell.matches_label(v),
        }
    }
}

/// City and membership are single-choice with a wildcard; gender is a set.
/// An empty gender set matches nothing, the full set matches every gender.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    pub city: Selection,
    pub genders: BTreeSet<String>,
    pub membership: Selection,
}

impl FilterCriteria {
    /// Criteria under which every row passes: wildcards and every gender.
    pub fn select_all(table: &Table) -> Self {
        FilterCriteria {
            city: Selection::All,
            genders: table.distinct_values(GENDER).into_iter().collect(),
            membership: Selection::All,
        }
    }

    /// Whether a single row passes all three predicates.
    fn admits(&self, city: &CellValue, gender: &CellValue, membership: &CellValue) -> bool {
        self.city.admits(city)
            && self.membership.admits(membership)
            && gender
                .label()
                .is_some_and(|g| self.genders.contains(&g))
    }
}

// ---------------------------------------------------------------------------
// Applying the criteria
// ---------------------------------------------------------------------------

/// Return indices of rows that pass all predicates, in table order.
pub fn filtered_indices(table: &Table, criteria: &FilterCriteria) -> Vec<usize> {
    if criteria.genders.is_empty() {
        // Nothing selected for gender → hide everything
        return Vec::new();
    }

    let (Some(city), Some(gender), Some(membership)) = (
        table.column_index(CITY),
        table.column_index(GENDER),
        table.column_index(MEMBERSHIP_TYPE),
    ) else {
        return Vec::new();
    };

    table
        .rows()
        .iter()
        .enumerate()
        .filter(|(_, row)| criteria.admits(&row[city], &row[gender], &row[membership]))
        .map(|(i, _)| i)
        .collect()
}

/// Stable filter: the rows matching `criteria`, in their original order.
pub fn apply(table: &Table, criteria: &FilterCriteria) -> Table {
    let indices = filtered_indices(table, criteria);
    log::debug!(
        "filter {criteria:?} kept {} of {} rows",
        indices.len(),
        table.len()
    );
    table.select_rows(&indices)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn s(v: &str) -> CellValue {
        CellValue::String(v.to_string())
    }

    /// City, Gender, Membership Type, plus an id column to track order.
    fn table(rows: &[(&str, &str, &str)]) -> Table {
        Table::from_rows(
            vec!["id".into(), CITY.into(), GENDER.into(), MEMBERSHIP_TYPE.into()],
            rows.iter()
                .enumerate()
                .map(|(i, (c, g, m))| {
                    let cell = |v: &str| if v.is_empty() { CellValue::Null } else { s(v) };
                    vec![CellValue::Integer(i as i64), cell(c), cell(g), cell(m)]
                })
                .collect(),
        )
    }

    fn ids(table: &Table) -> Vec<CellValue> {
        table.column_values("id").cloned().collect()
    }

    fn sample() -> Table {
        table(&[
            ("A", "F", "Gold"),
            ("B", "M", "Silver"),
            ("A", "M", "Gold"),
            ("C", "F", "Bronze"),
            ("", "F", "Gold"),
        ])
    }

    #[test]
    fn select_all_returns_table_unchanged() {
        let t = sample();
        let criteria = FilterCriteria::select_all(&t);
        assert_eq!(apply(&t, &criteria), t);
    }

    #[test]
    fn empty_gender_set_matches_nothing() {
        let t = sample();
        for city in [Selection::All, Selection::Only("A".into())] {
            let criteria = FilterCriteria {
                city,
                genders: BTreeSet::new(),
                membership: Selection::All,
            };
            let out = apply(&t, &criteria);
            assert!(out.is_empty());
            assert_eq!(out.columns(), t.columns());
        }
    }

    #[test]
    fn city_filter_keeps_matching_rows_in_order() {
        let t = table(&[("A", "F", "Gold"), ("B", "M", "Silver"), ("A", "M", "Gold")]);
        let criteria = FilterCriteria {
            city: Selection::Only("A".into()),
            genders: ["F".to_string(), "M".to_string()].into(),
            membership: Selection::All,
        };
        let out = apply(&t, &criteria);
        assert_eq!(ids(&out), vec![CellValue::Integer(0), CellValue::Integer(2)]);
    }

    #[test]
    fn predicates_combine_with_and() {
        let t = sample();
        let criteria = FilterCriteria {
            city: Selection::Only("A".into()),
            genders: ["M".to_string()].into(),
            membership: Selection::Only("Gold".into()),
        };
        assert_eq!(ids(&apply(&t, &criteria)), vec![CellValue::Integer(2)]);
    }

    #[test]
    fn city_match_is_case_sensitive() {
        let t = sample();
        let mut criteria = FilterCriteria::select_all(&t);
        criteria.city = Selection::Only("a".into());
        assert!(apply(&t, &criteria).is_empty());
    }

    #[test]
    fn null_city_survives_wildcard_but_not_a_concrete_city() {
        let t = sample();
        let mut criteria = FilterCriteria::select_all(&t);
        assert!(ids(&apply(&t, &criteria)).contains(&CellValue::Integer(4)));

        criteria.membership = Selection::Only("Gold".into());
        criteria.city = Selection::Only("A".into());
        assert!(!ids(&apply(&t, &criteria)).contains(&CellValue::Integer(4)));
    }

    #[test]
    fn null_gender_never_matches() {
        let t = table(&[("A", "", "Gold"), ("A", "F", "Gold")]);
        let criteria = FilterCriteria::select_all(&t);
        assert_eq!(ids(&apply(&t, &criteria)), vec![CellValue::Integer(1)]);
    }

    #[test]
    fn apply_is_idempotent() {
        let t = sample();
        let criteria = FilterCriteria {
            city: Selection::All,
            genders: ["F".to_string()].into(),
            membership: Selection::Only("Gold".into()),
        };
        let once = apply(&t, &criteria);
        let twice = apply(&once, &criteria);
        assert_eq!(once, twice);
    }

    #[test]
    fn table_without_filter_columns_yields_nothing() {
        let t = Table::from_rows(vec!["other".into()], vec![vec![s("x")]]);
        let criteria = FilterCriteria {
            genders: ["F".to_string()].into(),
            ..Default::default()
        };
        assert!(apply(&t, &criteria).is_empty());
    }
}
