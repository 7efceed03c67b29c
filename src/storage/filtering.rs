//! Filter and sort application over serialized rows
//!
//! The in-memory store filters on the JSON form of each model, so the filter
//! language is shape-agnostic: exact match on `"field"`, numeric comparison
//! via `"field>"`, `"field<"`, `"field>="`, `"field<="`; sort expressions are
//! `field`, `field:asc` or `field:desc`.

use serde_json::Value;
use std::cmp::Ordering;

/// Does a serialized row satisfy a filter object?
///
/// Non-object filters match everything. A comparison against a non-numeric
/// field never matches.
pub(crate) fn matches_filter(row: &Value, filter: &Value) -> bool {
    let Some(criteria) = filter.as_object() else {
        return true;
    };

    criteria.iter().all(|(key, expected)| {
        // Two-char suffixes first, ">" would also match ">=".
        if let Some(field) = key.strip_suffix(">=") {
            compare_numbers(row.get(field), expected).is_some_and(|o| o != Ordering::Less)
        } else if let Some(field) = key.strip_suffix("<=") {
            compare_numbers(row.get(field), expected).is_some_and(|o| o != Ordering::Greater)
        } else if let Some(field) = key.strip_suffix('>') {
            compare_numbers(row.get(field), expected).is_some_and(|o| o == Ordering::Greater)
        } else if let Some(field) = key.strip_suffix('<') {
            compare_numbers(row.get(field), expected).is_some_and(|o| o == Ordering::Less)
        } else {
            row.get(key) == Some(expected)
        }
    })
}

fn compare_numbers(actual: Option<&Value>, expected: &Value) -> Option<Ordering> {
    let actual = actual?.as_f64()?;
    let expected = expected.as_f64()?;
    actual.partial_cmp(&expected)
}

/// Sort rows in place by a `field[:asc|:desc]` expression.
pub(crate) fn apply_sort<T>(rows: &mut [(Value, T)], sort: &str) {
    let (field, direction) = match sort.split_once(':') {
        Some((field, direction)) => (field, direction),
        None => (sort, "asc"),
    };

    rows.sort_by(|(a, _), (b, _)| compare_values(a.get(field), b.get(field)));
    if direction.eq_ignore_ascii_case("desc") {
        rows.reverse();
    }
}

/// Total order over the JSON values a sortable field can hold. Missing fields
/// sort first; mixed types group by type.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => match (a, b) {
            (Value::Number(x), Value::Number(y)) => x
                .as_f64()
                .partial_cmp(&y.as_f64())
                .unwrap_or(Ordering::Equal),
            (Value::String(x), Value::String(y)) => x.cmp(y),
            (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
            _ => rank(a).cmp(&rank(b)),
        },
    }
}

fn rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}
