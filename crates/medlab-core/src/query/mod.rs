//! Search and sort over a collection of records.
//!
//! Search is a stable filter: a record matches when the lower-cased query is
//! a substring of the lower-cased display text of any configured field. No
//! tokenizing and no ranking, so results keep collection order.

use std::cmp::Ordering;

use crate::models::Record;

/// Records whose configured fields contain `query`, case-insensitively.
///
/// An empty query returns every record. Fields a record does not have never
/// match.
pub fn search<'a, T: Record>(records: &'a [T], query: &str, fields: &[&str]) -> Vec<&'a T> {
    if query.is_empty() {
        return records.iter().collect();
    }

    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|record| matches(*record, &needle, fields))
        .collect()
}

/// Search over the record type's own search fields.
pub fn search_default<'a, T: Record>(records: &'a [T], query: &str) -> Vec<&'a T> {
    search(records, query, T::SEARCH_FIELDS)
}

/// `needle` must already be lower-cased.
fn matches<T: Record>(record: &T, needle: &str, fields: &[&str]) -> bool {
    fields.iter().any(|name| {
        record
            .field(name)
            .is_some_and(|value| value.display_text().to_lowercase().contains(needle))
    })
}

/// Column sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Stable sort by a display field. Records without the field go last in
/// either direction.
pub fn sort_by<T: Record>(records: &mut [&T], field: &str, direction: SortDirection) {
    records.sort_by(|a, b| match (a.field(field), b.field(field)) {
        (Some(x), Some(y)) => match direction {
            SortDirection::Ascending => x.compare(&y),
            SortDirection::Descending => y.compare(&x),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}
