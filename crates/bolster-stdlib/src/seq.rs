//! Sequence utilities
//!
//! Non-mutating helpers over sequence values. Callback-taking operations
//! (`detect`, `group`, `reject`) pass `(element, index, seq)` to the
//! callback and use the optional evaluation context as its receiver.

use bolster_core::convert::{require_func, seq_receiver};
use bolster_core::{Error, Result, Value};

/// Normalize any value into a sequence.
///
/// `null` and `undefined` become a new empty sequence, a sequence comes
/// back as the very same sequence (identity preserved), anything else
/// becomes a one-element sequence.
pub fn wrap(value: &Value) -> Value {
    match value {
        Value::Null | Value::Undefined => Value::empty_seq(),
        Value::Seq(_) => value.clone(),
        other => Value::seq(vec![other.clone()]),
    }
}

/// New sequence with duplicates removed, first occurrence order kept.
/// Elements are compared with strict equality.
pub fn uniq(seq: &Value) -> Result<Value> {
    let items = seq_receiver(seq, "uniq")?;
    let items = items.borrow();
    let mut out: Vec<Value> = Vec::new();
    for item in items.iter() {
        if !out.iter().any(|seen| seen.strict_eq(item)) {
            out.push(item.clone());
        }
    }
    Ok(Value::seq(out))
}

/// New inclusive sequence of numbers from `start` to `end`; empty when
/// `end < start`.
///
/// Fails with `InvalidArgument` unless both bounds are numbers.
pub fn range(start: &Value, end: &Value) -> Result<Value> {
    let (Some(start), Some(end)) = (start.as_number(), end.as_number()) else {
        return Err(Error::invalid_argument("range requires numeric start and end bounds"));
    };
    let mut out = Vec::new();
    let mut i = start;
    while i <= end {
        out.push(Value::from(i));
        i += 1.0;
    }
    Ok(Value::seq(out))
}

/// First element for which the predicate is truthy, short-circuiting;
/// `null` when nothing matches.
pub fn detect(seq: &Value, predicate: &Value, context: Option<&Value>) -> Result<Value> {
    let items = seq_receiver(seq, "detect")?;
    let predicate = require_func(predicate, "detect predicate")?;
    let recv = context.cloned().unwrap_or(Value::Undefined);

    let mut i = 0;
    loop {
        // Re-borrow per element; the predicate may touch the sequence.
        let elem = match items.borrow().get(i) {
            Some(elem) => elem.clone(),
            None => return Ok(Value::Null),
        };
        let verdict = predicate.call(&recv, &[elem.clone(), Value::from(i as f64), seq.clone()])?;
        if verdict.is_truthy() {
            return Ok(elem);
        }
        i += 1;
    }
}

/// Convert an array-like value into a true sequence.
///
/// A sequence is shallow-copied. A map is read through its `length`
/// property and numeric-string keys, the way captured variadic argument
/// bundles are shaped. Strings are explicitly disallowed.
pub fn to_seq(args_like: &Value) -> Result<Value> {
    match args_like {
        Value::Str(_) => Err(Error::invalid_argument("to_seq called on a string")),
        Value::Null | Value::Undefined => {
            Err(Error::invalid_argument("to_seq called on null or undefined"))
        }
        Value::Seq(items) => Ok(Value::seq(items.borrow().clone())),
        Value::Map(entries) => {
            let entries = entries.borrow();
            let len = entries
                .get("length")
                .and_then(Value::as_number)
                .map(|n| if n.is_nan() || n < 0.0 { 0.0 } else { n.floor() })
                .unwrap_or(0.0) as usize;
            let out = (0..len)
                .map(|i| entries.get(&i.to_string()).cloned().unwrap_or(Value::Undefined))
                .collect();
            Ok(Value::seq(out))
        }
        _ => Ok(Value::empty_seq()),
    }
}

/// First element of a sequence, `undefined` when empty
pub fn head(seq: &Value) -> Result<Value> {
    let items = seq_receiver(seq, "head")?;
    let first = items.borrow().first().cloned();
    Ok(first.unwrap_or(Value::Undefined))
}

/// Everything but the first element, as a new sequence
pub fn tail(seq: &Value) -> Result<Value> {
    let items = seq_receiver(seq, "tail")?;
    let rest: Vec<Value> = items.borrow().iter().skip(1).cloned().collect();
    Ok(Value::seq(rest))
}

/// New sequence with `null` and `undefined` elements removed; other falsy
/// elements (`0`, `""`, `false`) stay.
pub fn compact(seq: &Value) -> Result<Value> {
    let items = seq_receiver(seq, "compact")?;
    let kept: Vec<Value> = items
        .borrow()
        .iter()
        .filter(|item| !item.is_null_or_undefined())
        .cloned()
        .collect();
    Ok(Value::seq(kept))
}

/// Group elements by classification key.
///
/// The classifier's result is stringified into the group key; groups
/// appear in first-encounter order and each group keeps element order.
pub fn group(seq: &Value, classify: &Value, context: Option<&Value>) -> Result<Value> {
    let items = seq_receiver(seq, "group")?;
    let classify = require_func(classify, "group classifier")?;
    let recv = context.cloned().unwrap_or(Value::Undefined);

    let grouped = Value::map();
    let mut i = 0;
    loop {
        let elem = match items.borrow().get(i) {
            Some(elem) => elem.clone(),
            None => return Ok(grouped),
        };
        let key = classify
            .call(&recv, &[elem.clone(), Value::from(i as f64), seq.clone()])?
            .to_string();
        let bucket = {
            let entries = grouped.as_map().map(|m| m.borrow().get(&key).cloned());
            match entries.flatten() {
                Some(bucket) => bucket,
                None => {
                    let bucket = Value::empty_seq();
                    if let Some(entries) = grouped.as_map() {
                        entries.borrow_mut().insert(key, bucket.clone());
                    }
                    bucket
                }
            }
        };
        if let Some(items) = bucket.as_seq() {
            items.borrow_mut().push(elem);
        }
        i += 1;
    }
}

/// New sequence keeping elements for which the predicate is falsy
pub fn reject(seq: &Value, predicate: &Value, context: Option<&Value>) -> Result<Value> {
    let items = seq_receiver(seq, "reject")?;
    let predicate = require_func(predicate, "reject predicate")?;
    let recv = context.cloned().unwrap_or(Value::Undefined);

    let mut kept = Vec::new();
    let mut i = 0;
    loop {
        let elem = match items.borrow().get(i) {
            Some(elem) => elem.clone(),
            None => return Ok(Value::seq(kept)),
        };
        let verdict = predicate.call(&recv, &[elem.clone(), Value::from(i as f64), seq.clone()])?;
        if !verdict.is_truthy() {
            kept.push(elem);
        }
        i += 1;
    }
}

/// First `n` elements as a new sequence.
///
/// A falsy `n` is rejected — `take(seq, 0)` fails with `InvalidArgument`
/// rather than producing an empty sequence. Longstanding quirk, kept.
pub fn take(seq: &Value, n: &Value) -> Result<Value> {
    let items = seq_receiver(seq, "take")?;
    let n = nonzero_count(n, "take")?;
    let out: Vec<Value> = items.borrow().iter().take(n).cloned().collect();
    Ok(Value::seq(out))
}

/// All but the first `n` elements as a new sequence.
///
/// Shares `take`'s quirk: a falsy `n` fails with `InvalidArgument`.
pub fn drop(seq: &Value, n: &Value) -> Result<Value> {
    let items = seq_receiver(seq, "drop")?;
    let n = nonzero_count(n, "drop")?;
    let out: Vec<Value> = items.borrow().iter().skip(n).cloned().collect();
    Ok(Value::seq(out))
}

fn nonzero_count(n: &Value, what: &str) -> Result<usize> {
    if !n.is_truthy() {
        return Err(Error::invalid_argument(format!("{what} requires a non-zero count")));
    }
    let count = n
        .as_number()
        .ok_or_else(|| Error::invalid_argument(format!("{what} count must be a number")))?;
    // Negative counts saturate to zero.
    Ok(count.max(0.0) as usize)
}

/// Map each element to its `name` property, invoking it with no arguments
/// when it is callable; `undefined` for missing properties and non-map
/// elements.
///
/// Fails with `InvalidArgument` when `name` is absent or not a non-empty
/// string.
pub fn pluck(seq: &Value, name: &Value) -> Result<Value> {
    let items = seq_receiver(seq, "pluck")?;
    let prop = match name.as_str() {
        Some(prop) if !prop.is_empty() => prop.to_string(),
        _ => return Err(Error::invalid_argument("pluck requires a property name")),
    };

    let snapshot: Vec<Value> = items.borrow().clone();
    let mut out = Vec::with_capacity(snapshot.len());
    for elem in snapshot {
        let found = elem.as_map().and_then(|entries| entries.borrow().get(&prop).cloned());
        let value = match found {
            Some(Value::Func(f)) => f(&elem, &[])?,
            Some(value) => value,
            None => Value::Undefined,
        };
        out.push(value);
    }
    Ok(Value::seq(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn num_seq(items: &[f64]) -> Value {
        Value::seq(items.iter().copied().map(Value::from).collect())
    }

    fn str_seq(items: &[&str]) -> Value {
        Value::seq(items.iter().map(|s| Value::str(s)).collect())
    }

    #[test]
    fn test_wrap_null_and_undefined_yield_empty() {
        assert_eq!(wrap(&Value::Null), Value::empty_seq());
        assert_eq!(wrap(&Value::Undefined), Value::empty_seq());
    }

    #[test]
    fn test_wrap_preserves_sequence_identity() {
        let existing = num_seq(&[1.0, 2.0]);
        assert!(wrap(&existing).strict_eq(&existing));
    }

    #[test]
    fn test_wrap_boxes_other_values() {
        assert_eq!(wrap(&Value::str("foo")), str_seq(&["foo"]));
        assert_eq!(wrap(&Value::from(0.0)), num_seq(&[0.0]));
    }

    #[test]
    fn test_uniq() {
        assert_eq!(
            uniq(&num_seq(&[1.0, 1.0, 1.0, 2.0, 2.0, 3.0])).unwrap(),
            num_seq(&[1.0, 2.0, 3.0])
        );
        assert_eq!(uniq(&num_seq(&[])).unwrap(), num_seq(&[]));
        assert_eq!(uniq(&num_seq(&[3.0, 1.0, 2.0])).unwrap(), num_seq(&[3.0, 1.0, 2.0]));
    }

    #[test]
    fn test_uniq_compares_containers_by_identity() {
        let shared = Value::map();
        let input = Value::seq(vec![shared.clone(), shared.clone(), Value::map()]);
        let out = uniq(&input).unwrap();
        assert_eq!(out.as_seq().unwrap().borrow().len(), 2);
    }

    #[test]
    fn test_range() {
        assert_eq!(
            range(&Value::from(4.0), &Value::from(7.0)).unwrap(),
            num_seq(&[4.0, 5.0, 6.0, 7.0])
        );
        assert_eq!(range(&Value::from(5.0), &Value::from(3.0)).unwrap(), num_seq(&[]));
        assert!(range(&Value::from(4.0), &Value::Undefined).unwrap_err().is_invalid_argument());
        assert!(range(&Value::str("4"), &Value::from(7.0)).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_detect_short_circuits() {
        let calls = Rc::new(Cell::new(0));
        let pred = {
            let calls = calls.clone();
            Value::func(move |_, args| {
                calls.set(calls.get() + 1);
                Ok(Value::from(args[0].as_number() == Some(2.0)))
            })
        };
        let found = detect(&num_seq(&[1.0, 2.0, 3.0, 4.0]), &pred, None).unwrap();
        assert_eq!(found, Value::from(2.0));
        assert!(calls.get() <= 2, "predicate ran {} times", calls.get());
    }

    #[test]
    fn test_detect_miss_returns_null() {
        let pred = Value::func(|_, _| Ok(Value::from(false)));
        assert_eq!(detect(&num_seq(&[1.0]), &pred, None).unwrap(), Value::Null);
    }

    #[test]
    fn test_detect_passes_element_index_and_seq() {
        let seq = str_seq(&["a", "b"]);
        let seq_in_pred = seq.clone();
        let pred = Value::func(move |_, args| {
            assert_eq!(args.len(), 3);
            assert!(args[2].strict_eq(&seq_in_pred));
            Ok(Value::from(args[1].as_number() == Some(1.0)))
        });
        assert_eq!(detect(&seq, &pred, None).unwrap(), Value::str("b"));
    }

    #[test]
    fn test_detect_context_becomes_receiver() {
        let ctx = Value::map();
        let ctx_in_pred = ctx.clone();
        let pred = Value::func(move |recv, _| {
            assert!(recv.strict_eq(&ctx_in_pred));
            Ok(Value::from(true))
        });
        detect(&num_seq(&[1.0]), &pred, Some(&ctx)).unwrap();
    }

    #[test]
    fn test_to_seq_rejects_strings() {
        assert!(to_seq(&Value::str("abc")).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_to_seq_reads_args_bundle() {
        let bundle = Value::map_from([
            ("0".to_string(), Value::str("x")),
            ("1".to_string(), Value::str("y")),
            ("length".to_string(), Value::from(2.0)),
        ]);
        assert_eq!(to_seq(&bundle).unwrap(), str_seq(&["x", "y"]));
    }

    #[test]
    fn test_to_seq_copies_sequences() {
        let original = num_seq(&[1.0]);
        let copy = to_seq(&original).unwrap();
        assert_eq!(copy, original);
        assert!(!copy.strict_eq(&original));
    }

    #[test]
    fn test_head_and_tail() {
        let seq = num_seq(&[1.0, 2.0, 3.0]);
        assert_eq!(head(&seq).unwrap(), Value::from(1.0));
        assert_eq!(tail(&seq).unwrap(), num_seq(&[2.0, 3.0]));
        assert_eq!(head(&num_seq(&[])).unwrap(), Value::Undefined);
        assert_eq!(tail(&num_seq(&[])).unwrap(), num_seq(&[]));
        // Receiver untouched.
        assert_eq!(seq, num_seq(&[1.0, 2.0, 3.0]));
    }

    #[test]
    fn test_compact_keeps_other_falsy_values() {
        let input = Value::seq(vec![
            Value::Null,
            Value::from(0.0),
            Value::Undefined,
            Value::str(""),
            Value::from(false),
        ]);
        let out = compact(&input).unwrap();
        assert_eq!(
            out,
            Value::seq(vec![Value::from(0.0), Value::str(""), Value::from(false)])
        );
    }

    #[test]
    fn test_group_by_first_letter() {
        let words = str_seq(&["apple", "beer", "cat", "aardvaak", "cyclops", "balls"]);
        let classify = Value::func(|_, args| {
            let word = args[0].as_str().unwrap_or("").to_string();
            let initial: String = word.chars().take(1).collect::<String>().to_uppercase();
            Ok(Value::str(initial))
        });

        let grouped = group(&words, &classify, None).unwrap();
        let entries = grouped.as_map().unwrap().borrow();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries.get("A").unwrap(), &str_seq(&["apple", "aardvaak"]));
        assert_eq!(entries.get("B").unwrap(), &str_seq(&["beer", "balls"]));
        assert_eq!(entries.get("C").unwrap(), &str_seq(&["cat", "cyclops"]));
        // First-encounter order of keys.
        let keys: Vec<&String> = entries.keys().collect();
        assert_eq!(keys, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_group_requires_callable_classifier() {
        assert!(group(&num_seq(&[1.0]), &Value::Null, None).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_reject() {
        let odd = Value::func(|_, args| {
            Ok(Value::from(args[0].as_number().unwrap_or(0.0) % 2.0 != 0.0))
        });
        assert_eq!(
            reject(&num_seq(&[1.0, 2.0, 3.0, 4.0]), &odd, None).unwrap(),
            num_seq(&[2.0, 4.0])
        );
        assert!(reject(&num_seq(&[1.0]), &Value::Undefined, None)
            .unwrap_err()
            .is_invalid_argument());
    }

    #[test]
    fn test_take_and_drop_partition() {
        let seq = num_seq(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        for n in 1..=5 {
            let n = Value::from(n as f64);
            let mut joined = take(&seq, &n).unwrap().as_seq().unwrap().borrow().clone();
            joined.extend(drop(&seq, &n).unwrap().as_seq().unwrap().borrow().iter().cloned());
            assert_eq!(Value::seq(joined), seq);
        }
    }

    #[test]
    fn test_take_and_drop_reject_zero() {
        let seq = num_seq(&[1.0, 2.0]);
        assert!(take(&seq, &Value::from(0.0)).unwrap_err().is_invalid_argument());
        assert!(drop(&seq, &Value::from(0.0)).unwrap_err().is_invalid_argument());
        assert!(take(&seq, &Value::Undefined).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_take_past_the_end() {
        let seq = num_seq(&[1.0, 2.0]);
        assert_eq!(take(&seq, &Value::from(10.0)).unwrap(), seq);
        assert_eq!(drop(&seq, &Value::from(10.0)).unwrap(), num_seq(&[]));
    }

    #[test]
    fn test_pluck_reads_properties_and_calls_methods() {
        let person = |name: &str| {
            Value::map_from([
                ("name".to_string(), Value::str(name)),
                (
                    "shout".to_string(),
                    Value::func(|recv, _| {
                        let name = recv
                            .as_map()
                            .and_then(|m| m.borrow().get("name").cloned())
                            .unwrap_or(Value::Undefined);
                        Ok(Value::str(format!("{name}!")))
                    }),
                ),
            ])
        };
        let people = Value::seq(vec![person("ann"), person("bob")]);

        assert_eq!(
            pluck(&people, &Value::str("name")).unwrap(),
            str_seq(&["ann", "bob"])
        );
        assert_eq!(
            pluck(&people, &Value::str("shout")).unwrap(),
            str_seq(&["ann!", "bob!"])
        );
        let missing = pluck(&people, &Value::str("age")).unwrap();
        assert_eq!(missing, Value::seq(vec![Value::Undefined, Value::Undefined]));
    }

    #[test]
    fn test_pluck_requires_property_name() {
        let seq = num_seq(&[1.0]);
        assert!(pluck(&seq, &Value::Undefined).unwrap_err().is_invalid_argument());
        assert!(pluck(&seq, &Value::from(3.0)).unwrap_err().is_invalid_argument());
        assert!(pluck(&seq, &Value::str("")).unwrap_err().is_invalid_argument());
    }
}
