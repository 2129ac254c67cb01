//! Reference comparison service.
//!
//! Strings compare case-insensitively, integers and floats compare
//! numerically, arrays and hashes compare structurally. `Undef` and
//! `Default` equal only themselves.

use std::cmp::Ordering;

use keel_value::Value;

use super::Comparator;

#[derive(Clone, Copy, Debug, Default)]
pub struct StandardComparator;

impl StandardComparator {
    pub fn new() -> Self {
        StandardComparator
    }

    fn regex_or_equals(&self, candidate: &Value, needle: &Value) -> bool {
        match (needle, candidate) {
            (Value::Regex(re), Value::Str(s)) => re.is_match(s),
            (Value::Regex(_), _) => false,
            _ => self.equals(candidate, needle),
        }
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "integer/float comparison widens to float"
)]
fn numeric_pair(a: &Value, b: &Value) -> Option<(f64, f64)> {
    match (a, b) {
        (Value::Integer(x), Value::Float(y)) => Some((*x as f64, *y)),
        (Value::Float(x), Value::Integer(y)) => Some((*x, *y as f64)),
        (Value::Float(x), Value::Float(y)) => Some((*x, *y)),
        _ => None,
    }
}

#[expect(clippy::float_cmp, reason = "language equality is exact")]
fn floats_equal(x: f64, y: f64) -> bool {
    x == y
}

fn fold_case(s: &str) -> String {
    s.to_lowercase()
}

impl Comparator for StandardComparator {
    fn equals(&self, a: &Value, b: &Value) -> bool {
        match (a, b) {
            (Value::Str(x), Value::Str(y)) => x == y || fold_case(x) == fold_case(y),
            (Value::Array(xs), Value::Array(ys)) => {
                xs.len() == ys.len() && xs.iter().zip(ys.iter()).all(|(x, y)| self.equals(x, y))
            }
            (Value::Hash(xs), Value::Hash(ys)) => {
                xs.len() == ys.len()
                    && xs
                        .iter()
                        .all(|(k, v)| ys.get(k).is_some_and(|other| self.equals(v, other)))
            }
            _ => match numeric_pair(a, b) {
                Some((x, y)) => floats_equal(x, y),
                None => a == b,
            },
        }
    }

    fn compare(&self, a: &Value, b: &Value) -> Option<Ordering> {
        match (a, b) {
            (Value::Integer(x), Value::Integer(y)) => Some(x.cmp(y)),
            (Value::Str(x), Value::Str(y)) => Some(fold_case(x).cmp(&fold_case(y))),
            _ => numeric_pair(a, b).and_then(|(x, y)| x.partial_cmp(&y)),
        }
    }

    fn includes(&self, collection: &Value, value: &Value) -> bool {
        match collection {
            Value::Str(haystack) => match value {
                Value::Str(needle) => fold_case(haystack).contains(&fold_case(needle)),
                Value::Regex(re) => re.is_match(haystack),
                _ => false,
            },
            Value::Array(items) => items.iter().any(|item| self.regex_or_equals(item, value)),
            Value::Hash(map) => map.keys().any(|key| self.regex_or_equals(key, value)),
            _ => false,
        }
    }
}
