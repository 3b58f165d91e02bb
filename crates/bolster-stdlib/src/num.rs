//! Numeric utilities
//!
//! Iteration, duration conversion and zero padding. All numbers are
//! doubles; the duration helpers are pure multiplications with no
//! rounding.

use bolster_core::convert::require_func;
use bolster_core::value::format_number;
use bolster_core::{Error, Result, Value};

/// Invoke `f(i)` for `i` from `0` to `n - 1`, in order
pub fn times(n: f64, f: &Value) -> Result<()> {
    let f = require_func(f, "times")?;
    let mut i = 0.0;
    while i < n {
        f.call(&Value::Undefined, &[Value::from(i)])?;
        i += 1.0;
    }
    Ok(())
}

/// `n` seconds in milliseconds
pub fn seconds(n: f64) -> f64 {
    n * 1000.0
}

/// `n` minutes in milliseconds
pub fn minutes(n: f64) -> f64 {
    seconds(n) * 60.0
}

/// `n` hours in milliseconds
pub fn hours(n: f64) -> f64 {
    minutes(n) * 60.0
}

/// String form of `n` prefixed with exactly `zero_count` literal zeros.
///
/// Not width padding: the zeros are always prepended regardless of how
/// wide `n` already prints. Fractional counts floor; a non-numeric count
/// is `InvalidArgument` and a negative one is `OutOfRange`.
pub fn pad(n: f64, zero_count: &Value) -> Result<String> {
    let count = zero_count
        .as_number()
        .ok_or_else(|| Error::invalid_argument("pad requires a numeric zero count"))?;
    if count < 0.0 {
        return Err(Error::out_of_range("pad zero count must not be negative"));
    }
    let zeros = if count.is_nan() { 0 } else { count.floor() as usize };
    let mut out = String::with_capacity(zeros + 8);
    out.extend(std::iter::repeat('0').take(zeros));
    out.push_str(&format_number(n));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_times_yields_indices_in_order() {
        let seen: Rc<RefCell<Vec<f64>>> = Default::default();
        let f = {
            let seen = seen.clone();
            Value::func(move |_, args| {
                seen.borrow_mut().push(args[0].as_number().unwrap_or(f64::NAN));
                Ok(Value::Undefined)
            })
        };
        times(3.0, &f).unwrap();
        assert_eq!(*seen.borrow(), vec![0.0, 1.0, 2.0]);

        times(0.0, &f).unwrap();
        assert_eq!(seen.borrow().len(), 3, "zero count means zero calls");
    }

    #[test]
    fn test_times_requires_a_function() {
        assert!(times(2.0, &Value::Null).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_duration_conversions() {
        assert_eq!(seconds(1.0), 1000.0);
        assert_eq!(minutes(1.0), 60_000.0);
        assert_eq!(hours(1.0), 3_600_000.0);
        assert_eq!(seconds(0.5), 500.0);
        assert_eq!(hours(2.0), 7_200_000.0);
    }

    #[test]
    fn test_pad_prepends_literal_zeros() {
        assert_eq!(pad(5.0, &Value::from(3.0)).unwrap(), "0005");
        assert_eq!(pad(123.0, &Value::from(2.0)).unwrap(), "00123");
        assert_eq!(pad(5.0, &Value::from(0.0)).unwrap(), "5");
        // Fractional counts floor.
        assert_eq!(pad(5.0, &Value::from(2.5)).unwrap(), "005");
    }

    #[test]
    fn test_pad_rejects_bad_counts() {
        assert!(pad(5.0, &Value::str("3")).unwrap_err().is_invalid_argument());
        assert!(pad(5.0, &Value::Undefined).unwrap_err().is_invalid_argument());
        assert!(pad(5.0, &Value::from(-1.0)).unwrap_err().is_out_of_range());
    }
}
