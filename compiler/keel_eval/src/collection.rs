//! Collection algebra: concatenation, difference and append over Array and
//! Hash values.
//!
//! Pure functions; operands are never mutated, results are fresh values.
//!
//! | left  | right | `concatenate`                        | `delete`                     |
//! |-------|-------|--------------------------------------|------------------------------|
//! | Array | Array | `left ++ right`                      | drop every element of right  |
//! | Array | Hash  | `left ++ [[k, v], ...]`              | drop every `[k, v]` pair     |
//! | Array | other | `left ++ [right]`                    | drop every `right`           |
//! | Hash  | Hash  | merge, right wins                    | drop keys of right           |
//! | Hash  | Array | merge pairs or a flat `k, v` list    | drop listed keys             |
//! | Hash  | other | error                                | drop key `right`             |
//! | other | any   | `[left] ++ right` as Array           | error                        |

use keel_value::{Value, ValueMap};

/// Failure of a collection operation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CollectionError {
    #[error("an Array with an odd number of elements ({len}) cannot be merged into a Hash")]
    OddElementCount { len: usize },
    #[error("element {index} is not a [key, value] pair")]
    NotAPair { index: usize },
    #[error("a {right} cannot be merged into a Hash")]
    NotMergeable { right: &'static str },
    #[error("can only delete from an Array or Hash, got {left}")]
    NotACollection { left: &'static str },
}

/// View any value as an element sequence for concatenation/deletion.
fn to_elements(value: &Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items.to_vec(),
        Value::Hash(map) => map
            .iter()
            .map(|(k, v)| Value::array(vec![k.clone(), v.clone()]))
            .collect(),
        other => vec![other.clone()],
    }
}

/// Interpret an Array as Hash entries: a list of pairs, or a flat `k, v` list.
fn array_to_entries(items: &[Value]) -> Result<ValueMap, CollectionError> {
    let Some(first) = items.first() else {
        return Ok(ValueMap::default());
    };
    if matches!(first, Value::Array(_)) {
        items
            .iter()
            .enumerate()
            .map(|(index, item)| match item.as_array() {
                Some([k, v]) => Ok((k.clone(), v.clone())),
                _ => Err(CollectionError::NotAPair { index }),
            })
            .collect()
    } else if items.len() % 2 == 0 {
        Ok(items
            .chunks_exact(2)
            .map(|kv| (kv[0].clone(), kv[1].clone()))
            .collect())
    } else {
        Err(CollectionError::OddElementCount { len: items.len() })
    }
}

/// `left + right` for collections.
pub fn concatenate(left: &Value, right: &Value) -> Result<Value, CollectionError> {
    match left {
        Value::Array(items) => {
            let mut out = items.to_vec();
            out.extend(to_elements(right));
            Ok(Value::array(out))
        }
        Value::Hash(map) => {
            let mut out = map.to_inner();
            match right {
                Value::Hash(other) => {
                    out.extend(other.iter().map(|(k, v)| (k.clone(), v.clone())));
                }
                Value::Array(items) => out.extend(array_to_entries(items)?),
                other => {
                    return Err(CollectionError::NotMergeable {
                        right: other.type_name(),
                    })
                }
            }
            Ok(Value::map(out))
        }
        scalar => concatenate(&Value::array(vec![scalar.clone()]), right),
    }
}

/// `left - right` for collections.
///
/// Array difference removes every occurrence of each element of `right`.
pub fn delete(left: &Value, right: &Value) -> Result<Value, CollectionError> {
    match left {
        Value::Array(items) => {
            let remove = to_elements(right);
            let out = items
                .iter()
                .filter(|item| !remove.contains(item))
                .cloned()
                .collect();
            Ok(Value::array(out))
        }
        Value::Hash(map) => {
            let keys: Vec<Value> = match right {
                Value::Array(items) => items.to_vec(),
                Value::Hash(other) => other.keys().cloned().collect(),
                other => vec![other.clone()],
            };
            let mut out = map.to_inner();
            for key in &keys {
                out.shift_remove(key);
            }
            Ok(Value::map(out))
        }
        other => Err(CollectionError::NotACollection {
            left: other.type_name(),
        }),
    }
}

/// `left << right`: append `right` as a single element.
///
/// Returns `None` unless `left` is an Array.
pub fn append(left: &Value, right: &Value) -> Option<Value> {
    let items = left.as_array()?;
    let mut out = items.to_vec();
    out.push(right.clone());
    Some(Value::array(out))
}

/// Splat a value into elements: `Undef` is empty, an Array is itself, a Hash
/// is its `[key, value]` pairs, anything else is a single element.
pub fn unfold(value: Value) -> Vec<Value> {
    match value {
        Value::Undef => Vec::new(),
        Value::Array(items) => items.to_inner(),
        Value::Hash(_) => to_elements(&value),
        other => vec![other],
    }
}

#[cfg(test)]
#[expect(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
