use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn is_ascending(&self) -> bool {
        matches!(self, SortOrder::Asc)
    }

    pub fn toggled(&self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    /// Query string form expected by the paged backend endpoints.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

/// Field value used as a sort key.
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue<'a> {
    Missing,
    Number(f64),
    Text(&'a str),
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
    Bool(bool),
}

impl SortValue<'_> {
    fn rank(&self) -> u8 {
        match self {
            SortValue::Missing => 0,
            SortValue::Bool(_) => 1,
            SortValue::Number(_) => 2,
            SortValue::Date(_) => 3,
            SortValue::DateTime(_) => 4,
            SortValue::Text(_) => 5,
        }
    }

    /// Missing values order before everything else; values of different
    /// kinds order by kind.
    pub fn compare(&self, other: &SortValue<'_>) -> Ordering {
        match (self, other) {
            (SortValue::Number(a), SortValue::Number(b)) => a.total_cmp(b),
            (SortValue::Text(a), SortValue::Text(b)) => locale_compare(a, b),
            (SortValue::Date(a), SortValue::Date(b)) => a.cmp(b),
            (SortValue::DateTime(a), SortValue::DateTime(b)) => a.cmp(b),
            (SortValue::Bool(a), SortValue::Bool(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl From<Option<f64>> for SortValue<'_> {
    fn from(value: Option<f64>) -> Self {
        value.map_or(SortValue::Missing, SortValue::Number)
    }
}

impl<'a> From<Option<&'a str>> for SortValue<'a> {
    fn from(value: Option<&'a str>) -> Self {
        value.map_or(SortValue::Missing, SortValue::Text)
    }
}

/// Record that can be ordered by a named field.
pub trait Sortable {
    /// Sort key for `field`. Unknown fields return `SortValue::Missing`,
    /// which leaves the order unchanged.
    fn sort_value(&self, field: &str) -> SortValue<'_>;

    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        self.sort_value(field).compare(&other.sort_value(field))
    }
}

/// Locale-style string compare: case-insensitive first, then lowercase
/// before uppercase at the first differing character.
///
/// `["Zeta", "alpha", "Beta"]` sorts as `["alpha", "Beta", "Zeta"]` and
/// `"a" < "A"`.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    if folded != Ordering::Equal {
        return folded;
    }

    for (x, y) in a.chars().zip(b.chars()) {
        if x == y {
            continue;
        }
        return match (x.is_lowercase(), y.is_lowercase()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => x.cmp(&y),
        };
    }
    a.len().cmp(&b.len())
}

/// Stable sort by `field`. `Desc` flips the comparator, so equal keys keep
/// their original relative order in both directions.
pub fn sort_items<T: Sortable>(items: &mut [T], field: &str, order: SortOrder) {
    items.sort_by(|a, b| order.apply(a.compare_by_field(b, field)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: u32,
        name: &'static str,
        qty: Option<f64>,
    }

    impl Sortable for Row {
        fn sort_value(&self, field: &str) -> SortValue<'_> {
            match field {
                "name" => SortValue::Text(self.name),
                "qty" => self.qty.into(),
                _ => SortValue::Missing,
            }
        }
    }

    fn rows(names: &[&'static str]) -> Vec<Row> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| Row {
                id: i as u32,
                name: *name,
                qty: None,
            })
            .collect()
    }

    #[test]
    fn test_locale_order_of_names() {
        let mut items = rows(&["Zeta", "alpha", "Beta"]);
        sort_items(&mut items, "name", SortOrder::Asc);
        let names: Vec<_> = items.iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["alpha", "Beta", "Zeta"]);

        sort_items(&mut items, "name", SortOrder::Desc);
        let names: Vec<_> = items.iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Zeta", "Beta", "alpha"]);
    }

    #[test]
    fn test_case_tiebreak() {
        assert_eq!(locale_compare("a", "A"), Ordering::Less);
        assert_eq!(locale_compare("Apple", "apple"), Ordering::Greater);
        assert_eq!(locale_compare("abc", "abc"), Ordering::Equal);
        assert_eq!(locale_compare("ab", "abc"), Ordering::Less);
    }

    #[test]
    fn test_stable_for_ties_in_both_orders() {
        let mut items = vec![
            Row { id: 0, name: "x", qty: Some(2.0) },
            Row { id: 1, name: "y", qty: Some(1.0) },
            Row { id: 2, name: "z", qty: Some(2.0) },
            Row { id: 3, name: "w", qty: Some(1.0) },
        ];
        sort_items(&mut items, "qty", SortOrder::Asc);
        let ids: Vec<_> = items.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3, 0, 2]);

        sort_items(&mut items, "qty", SortOrder::Desc);
        let ids: Vec<_> = items.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![0, 2, 1, 3]);
    }

    #[test]
    fn test_missing_values_first_ascending() {
        let mut items = vec![
            Row { id: 0, name: "a", qty: Some(3.0) },
            Row { id: 1, name: "b", qty: None },
            Row { id: 2, name: "c", qty: Some(-1.0) },
        ];
        sort_items(&mut items, "qty", SortOrder::Asc);
        let ids: Vec<_> = items.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 0]);
    }

    #[test]
    fn test_unknown_field_keeps_order() {
        let mut items = rows(&["c", "a", "b"]);
        let before = items.clone();
        sort_items(&mut items, "nope", SortOrder::Desc);
        assert_eq!(items, before);
    }

    #[test]
    fn test_dates_compare_by_value() {
        let early = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let late = NaiveDate::from_ymd_opt(2024, 11, 2).unwrap();
        assert_eq!(
            SortValue::Date(early).compare(&SortValue::Date(late)),
            Ordering::Less
        );
    }
}
