//! Argument extraction helpers
//!
//! Registered methods receive their receiver and arguments as plain
//! `Value`s; these helpers pull typed data out of them and turn missing or
//! mistyped inputs into `InvalidArgument` errors with a consistent shape.

use std::rc::Rc;

use crate::error::{Error, Result};
use crate::value::{MapRef, SeqRef, Value};

/// The argument at `idx`, or `undefined` when the caller omitted it
pub fn arg(args: &[Value], idx: usize) -> Value {
    args.get(idx).cloned().unwrap_or(Value::Undefined)
}

/// Extract a required numeric argument
pub fn number_arg(args: &[Value], idx: usize, what: &str) -> Result<f64> {
    let v = arg(args, idx);
    v.as_number()
        .ok_or_else(|| mismatch(what, "number", &v))
}

/// Extract a required string argument
pub fn string_arg(args: &[Value], idx: usize, what: &str) -> Result<Rc<str>> {
    match arg(args, idx) {
        Value::Str(s) => Ok(s),
        v => Err(mismatch(what, "string", &v)),
    }
}

/// Extract a required function argument
pub fn func_arg(args: &[Value], idx: usize, what: &str) -> Result<Value> {
    let v = arg(args, idx);
    require_func(&v, what)
}

/// Require a value to be callable, returning it unchanged
pub fn require_func(v: &Value, what: &str) -> Result<Value> {
    match v {
        Value::Func(_) => Ok(v.clone()),
        other => Err(mismatch(what, "function", other)),
    }
}

/// Require a sequence receiver and hand back its shared storage
pub fn seq_receiver(v: &Value, what: &str) -> Result<SeqRef> {
    v.as_seq()
        .cloned()
        .ok_or_else(|| mismatch(what, "array", v))
}

/// Require a map receiver and hand back its shared storage
pub fn map_receiver(v: &Value, what: &str) -> Result<MapRef> {
    v.as_map()
        .cloned()
        .ok_or_else(|| mismatch(what, "object", v))
}

/// Require a string receiver
pub fn str_receiver(v: &Value, what: &str) -> Result<Rc<str>> {
    match v {
        Value::Str(s) => Ok(s.clone()),
        other => Err(mismatch(what, "string", other)),
    }
}

/// Require a numeric receiver
pub fn number_receiver(v: &Value, what: &str) -> Result<f64> {
    v.as_number()
        .ok_or_else(|| mismatch(what, "number", v))
}

fn mismatch(what: &str, expected: &str, got: &Value) -> Error {
    Error::invalid_argument(format!(
        "{what}: expected {expected}, got {}",
        got.type_name()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arg_defaults_to_undefined() {
        assert!(matches!(arg(&[], 0), Value::Undefined));
        assert!(matches!(arg(&[Value::Null], 1), Value::Undefined));
    }

    #[test]
    fn test_number_arg_rejects_missing_and_mistyped() {
        assert_eq!(number_arg(&[Value::from(4.0)], 0, "range start").unwrap(), 4.0);

        let err = number_arg(&[], 0, "range start").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid argument: range start: expected number, got undefined"
        );

        let err = number_arg(&[Value::str("4")], 0, "range start").unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_receiver_helpers_report_actual_kind() {
        let err = seq_receiver(&Value::from(1.0), "uniq").unwrap_err();
        assert_eq!(err.to_string(), "invalid argument: uniq: expected array, got number");

        let err = map_receiver(&Value::empty_seq(), "values").unwrap_err();
        assert_eq!(err.to_string(), "invalid argument: values: expected object, got array");
    }

    #[test]
    fn test_require_func() {
        assert!(require_func(&Value::func(|_, _| Ok(Value::Undefined)), "detect").is_ok());
        assert!(require_func(&Value::Null, "detect").unwrap_err().is_invalid_argument());
    }
}
