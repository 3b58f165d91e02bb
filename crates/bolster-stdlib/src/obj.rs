//! Structural map utilities
//!
//! Helpers over map values: value listing, deep property provisioning,
//! robust classification and property copying. `provide` and `extend`
//! mutate the map they are given and hand the same reference back.

use std::rc::Rc;

use bolster_core::convert::map_receiver;
use bolster_core::{Error, Result, Value, ValueKind};

/// Sequence of the map's values, in key insertion order
pub fn values(obj: &Value) -> Result<Value> {
    let entries = map_receiver(obj, "values")?;
    let out: Vec<Value> = entries.borrow().values().cloned().collect();
    Ok(Value::seq(out))
}

/// Walk `path` as nested map keys from `obj`, creating an empty map at
/// every missing segment, and return the map at the final segment.
///
/// Falsy intermediate values are replaced by fresh maps; a truthy non-map
/// value cannot be descended into and is `InvalidArgument`. Existing
/// sibling entries along the path are left alone.
pub fn provide(obj: &Value, path: &[&str]) -> Result<Value> {
    map_receiver(obj, "provide")?;
    let mut node = obj.clone();
    for segment in path {
        let entries = map_receiver(&node, "provide")?;
        let existing = entries.borrow().get(*segment).cloned();
        node = match existing {
            Some(value) if value.is_truthy() => {
                if value.as_map().is_none() {
                    return Err(Error::invalid_argument(format!(
                        "provide cannot descend into a {} at '{segment}'",
                        value.type_name()
                    )));
                }
                value
            }
            _ => {
                let fresh = Value::map();
                entries.borrow_mut().insert(segment.to_string(), fresh.clone());
                fresh
            }
        };
    }
    Ok(node)
}

/// Lowercase classification of a value; tells arrays, maps and functions
/// apart where a naive type test would not
pub fn type_of(value: &Value) -> &'static str {
    value.type_name()
}

/// Whether the value is a sequence
pub fn is_array(value: &Value) -> bool {
    value.kind() == ValueKind::Array
}

/// Whether the value is callable
pub fn is_function(value: &Value) -> bool {
    value.kind() == ValueKind::Function
}

/// Whether the value is a string
pub fn is_string(value: &Value) -> bool {
    value.kind() == ValueKind::String
}

/// Whether the value is a number
pub fn is_number(value: &Value) -> bool {
    value.kind() == ValueKind::Number
}

/// Whether the value is a boolean
pub fn is_boolean(value: &Value) -> bool {
    value.kind() == ValueKind::Boolean
}

/// Whether the value is a compiled regular expression
pub fn is_regexp(value: &Value) -> bool {
    value.kind() == ValueKind::Regexp
}

/// Whether the value is a date
pub fn is_date(value: &Value) -> bool {
    value.kind() == ValueKind::Date
}

/// Copy each source map's own entries onto `destination`, left to right,
/// later sources overwriting earlier ones. Returns `destination` itself.
/// Sources that are not maps contribute nothing.
pub fn extend(destination: &Value, sources: &[Value]) -> Result<Value> {
    let dest = map_receiver(destination, "extend")?;
    for source in sources {
        let Some(src) = source.as_map() else { continue };
        if Rc::ptr_eq(src, &dest) {
            continue;
        }
        let entries: Vec<(String, Value)> = src
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        let mut dest = dest.borrow_mut();
        for (key, value) in entries {
            dest.insert(key, value);
        }
    }
    Ok(destination.clone())
}
