//! Reference indexing service for `receiver[keys...]`.

use std::ops::Range;

use keel_ir::Expr;
use keel_value::{operator_not_applicable, type_coercion, EvalError, EvalResult, TypeRef, Value};

use super::Indexer;

#[derive(Clone, Copy, Debug, Default)]
pub struct StandardIndexer;

impl StandardIndexer {
    pub fn new() -> Self {
        StandardIndexer
    }
}

fn int_key(key: &Value) -> Result<i64, EvalError> {
    match key {
        Value::Integer(n) => Ok(*n),
        other => Err(type_coercion(other.clone(), "Integer")),
    }
}

fn len_i64(len: usize) -> i64 {
    i64::try_from(len).unwrap_or(i64::MAX)
}

fn to_usize(n: i64) -> usize {
    usize::try_from(n).unwrap_or(0)
}

/// Position `i` in a sequence of `len`; negative counts from the end.
fn resolve_index(len: usize, i: i64) -> Option<usize> {
    let len = len_i64(len);
    let idx = if i < 0 { len + i } else { i };
    (0..len).contains(&idx).then(|| to_usize(idx))
}

/// `[start, count]`; a negative count ends that many elements before the
/// end, inclusive.
fn slice_range(len: usize, start: i64, count: i64) -> Range<usize> {
    let len = len_i64(len);
    let start = if start < 0 {
        (len + start).max(0)
    } else {
        start.min(len)
    };
    let end = if count < 0 {
        len + count + 1
    } else {
        start.saturating_add(count)
    };
    let end = end.clamp(start, len);
    to_usize(start)..to_usize(end)
}

fn wrong_key_count(receiver: &Value, given: usize) -> EvalError {
    EvalError::new(format!(
        "{}[] takes 1 or 2 keys, got {given}",
        receiver.type_name()
    ))
}

fn access_array(receiver: &Value, items: &[Value], keys: &[Value]) -> EvalResult {
    match keys {
        [index] => Ok(resolve_index(items.len(), int_key(index)?)
            .map_or(Value::Undef, |i| items[i].clone())),
        [start, count] => {
            let range = slice_range(items.len(), int_key(start)?, int_key(count)?);
            Ok(Value::array(items[range].to_vec()))
        }
        _ => Err(wrong_key_count(receiver, keys.len())),
    }
}

fn access_string(receiver: &Value, text: &str, keys: &[Value]) -> EvalResult {
    let chars: Vec<char> = text.chars().collect();
    match keys {
        [index] => Ok(Value::string(
            resolve_index(chars.len(), int_key(index)?)
                .map(|i| chars[i].to_string())
                .unwrap_or_default(),
        )),
        [start, count] => {
            let range = slice_range(chars.len(), int_key(start)?, int_key(count)?);
            Ok(Value::string(chars[range].iter().collect::<String>()))
        }
        _ => Err(wrong_key_count(receiver, keys.len())),
    }
}

impl Indexer for StandardIndexer {
    fn access(&self, receiver: &Value, keys: &[Value], _node: &Expr) -> EvalResult {
        match receiver {
            Value::Array(items) => access_array(receiver, items, keys),
            Value::Str(text) => access_string(receiver, text, keys),
            Value::Hash(map) => match keys {
                [key] => Ok(map.get(key).cloned().unwrap_or(Value::Undef)),
                [] => Err(wrong_key_count(receiver, 0)),
                _ => Ok(Value::array(
                    keys.iter().filter_map(|k| map.get(k).cloned()).collect(),
                )),
            },
            Value::Type(t) if !t.is_parameterized() && !keys.is_empty() => Ok(Value::type_ref(
                TypeRef::with_params(t.name.clone(), keys.to_vec()),
            )),
            other => Err(operator_not_applicable("[]", other.clone())),
        }
    }
}
