//! Value — the dynamic value representation
//!
//! Every capability in the library operates on `Value`. Primitives are
//! stored inline; sequences and maps are reference-counted with interior
//! mutability so that two handles to the same container observe each
//! other's writes (the identity semantics `wrap`, `extend` and `provide`
//! rely on). Maps preserve key insertion order.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::SystemTime;

use indexmap::IndexMap;
use regex::Regex;

use crate::error::{Error, Result};

/// Native method implementation: `(receiver, args) -> value`.
///
/// The receiver carries the value a registered method was invoked on, or
/// the optional evaluation context when a utility forwards one to a
/// predicate.
pub type MethodFn = dyn Fn(&Value, &[Value]) -> Result<Value>;

/// Shared storage behind a sequence value
pub type SeqRef = Rc<RefCell<Vec<Value>>>;

/// Shared storage behind a map value
pub type MapRef = Rc<RefCell<IndexMap<String, Value>>>;

/// A dynamically typed value
#[derive(Clone)]
pub enum Value {
    /// The null value
    Null,
    /// The undefined value (absent-value marker)
    Undefined,
    /// A boolean
    Bool(bool),
    /// A double-precision number; `NaN` doubles as the parse-failure sentinel
    Number(f64),
    /// An immutable string
    Str(Rc<str>),
    /// An ordered sequence with shared mutable storage
    Seq(SeqRef),
    /// An insertion-ordered string-keyed map with shared mutable storage
    Map(MapRef),
    /// A native callable
    Func(Rc<MethodFn>),
    /// A compiled regular expression
    Regexp(Rc<Regex>),
    /// A point in time
    Date(SystemTime),
}

/// Classification of a value, one tag per `Value` variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// `null`
    Null,
    /// `undefined`
    Undefined,
    /// `boolean`
    Boolean,
    /// `number`
    Number,
    /// `string`
    String,
    /// `array`
    Array,
    /// `object`
    Object,
    /// `function`
    Function,
    /// `regexp`
    Regexp,
    /// `date`
    Date,
}

impl ValueKind {
    /// Lowercase classification name
    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Undefined => "undefined",
            ValueKind::Boolean => "boolean",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
            ValueKind::Function => "function",
            ValueKind::Regexp => "regexp",
            ValueKind::Date => "date",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Value {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create a sequence value from a vector of elements
    pub fn seq(items: Vec<Value>) -> Self {
        Value::Seq(Rc::new(RefCell::new(items)))
    }

    /// Create an empty sequence value
    pub fn empty_seq() -> Self {
        Value::seq(Vec::new())
    }

    /// Create an empty map value
    pub fn map() -> Self {
        Value::Map(Rc::new(RefCell::new(IndexMap::new())))
    }

    /// Create a map value from `(key, value)` entries, preserving order
    pub fn map_from(entries: impl IntoIterator<Item = (String, Value)>) -> Self {
        Value::Map(Rc::new(RefCell::new(entries.into_iter().collect())))
    }

    /// Create a string value
    pub fn str(s: impl AsRef<str>) -> Self {
        Value::Str(Rc::from(s.as_ref()))
    }

    /// Create a function value from a native closure
    pub fn func(f: impl Fn(&Value, &[Value]) -> Result<Value> + 'static) -> Self {
        Value::Func(Rc::new(f))
    }

    /// Create a regexp value from an already compiled pattern
    pub fn regexp(re: Regex) -> Self {
        Value::Regexp(Rc::new(re))
    }

    /// Create a date value for the current instant
    pub fn date_now() -> Self {
        Value::Date(SystemTime::now())
    }

    // ========================================================================
    // Classification and coercion
    // ========================================================================

    /// Classify this value
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Undefined => ValueKind::Undefined,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Number(_) => ValueKind::Number,
            Value::Str(_) => ValueKind::String,
            Value::Seq(_) => ValueKind::Array,
            Value::Map(_) => ValueKind::Object,
            Value::Func(_) => ValueKind::Function,
            Value::Regexp(_) => ValueKind::Regexp,
            Value::Date(_) => ValueKind::Date,
        }
    }

    /// Lowercase classification name of this value
    pub fn type_name(&self) -> &'static str {
        self.kind().as_str()
    }

    /// Truthiness: everything is truthy except `null`, `undefined`,
    /// `false`, `0`/`NaN` and the empty string
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null | Value::Undefined => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Str(s) => !s.is_empty(),
            _ => true,
        }
    }

    /// Whether this value is `null` or `undefined`
    pub fn is_null_or_undefined(&self) -> bool {
        matches!(self, Value::Null | Value::Undefined)
    }

    /// The number behind a `Number` value
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The string behind a `Str` value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The shared storage behind a `Seq` value
    pub fn as_seq(&self) -> Option<&SeqRef> {
        match self {
            Value::Seq(items) => Some(items),
            _ => None,
        }
    }

    /// The shared storage behind a `Map` value
    pub fn as_map(&self) -> Option<&MapRef> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// The native closure behind a `Func` value
    pub fn as_func(&self) -> Option<&Rc<MethodFn>> {
        match self {
            Value::Func(f) => Some(f),
            _ => None,
        }
    }

    // ========================================================================
    // Identity and invocation
    // ========================================================================

    /// Strict equality: primitives compare by value (`NaN` is not equal to
    /// itself), containers and functions compare by reference identity,
    /// dates by instant.
    pub fn strict_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Undefined, Value::Undefined) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Seq(a), Value::Seq(b)) => Rc::ptr_eq(a, b),
            (Value::Map(a), Value::Map(b)) => Rc::ptr_eq(a, b),
            (Value::Func(a), Value::Func(b)) => Rc::ptr_eq(a, b),
            (Value::Regexp(a), Value::Regexp(b)) => Rc::ptr_eq(a, b),
            (Value::Date(a), Value::Date(b)) => a == b,
            _ => false,
        }
    }

    /// Invoke this value as a function.
    ///
    /// Fails with `InvalidArgument` when the value is not callable.
    pub fn call(&self, receiver: &Value, args: &[Value]) -> Result<Value> {
        match self {
            Value::Func(f) => f(receiver, args),
            other => Err(Error::invalid_argument(format!(
                "cannot call a value of type {}",
                other.type_name()
            ))),
        }
    }
}

/// Deep structural equality, mainly for assertions: sequences and maps
/// compare element-wise, functions by identity, `NaN` never equals itself.
impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Seq(a), Value::Seq(b)) => {
                Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow()
            }
            (Value::Map(a), Value::Map(b)) => {
                if Rc::ptr_eq(a, b) {
                    return true;
                }
                let (a, b) = (a.borrow(), b.borrow());
                a.len() == b.len()
                    && a.iter().zip(b.iter()).all(|((ka, va), (kb, vb))| ka == kb && va == vb)
            }
            (Value::Regexp(a), Value::Regexp(b)) => a.as_str() == b.as_str(),
            _ => self.strict_eq(other),
        }
    }
}

/// Stringification following host conventions: integral finite numbers
/// print without a fractional part, sequences join their elements with
/// commas, maps print as `[object Object]`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Undefined => f.write_str("undefined"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => f.write_str(&format_number(*n)),
            Value::Str(s) => f.write_str(s),
            Value::Seq(items) => {
                let items = items.borrow();
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    // null and undefined elements stringify to nothing.
                    if !item.is_null_or_undefined() {
                        write!(f, "{item}")?;
                    }
                }
                Ok(())
            }
            Value::Map(_) => f.write_str("[object Object]"),
            Value::Func(_) => f.write_str("function"),
            Value::Regexp(re) => write!(f, "/{}/", re.as_str()),
            Value::Date(t) => write!(f, "{t:?}"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Undefined => f.write_str("Undefined"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Number(n) => write!(f, "Number({n})"),
            Value::Str(s) => write!(f, "Str({s:?})"),
            Value::Seq(items) => write!(f, "Seq({:?})", items.borrow()),
            Value::Map(entries) => {
                let entries = entries.borrow();
                f.debug_map().entries(entries.iter()).finish()
            }
            Value::Func(_) => f.write_str("Func(..)"),
            Value::Regexp(re) => write!(f, "Regexp({:?})", re.as_str()),
            Value::Date(t) => write!(f, "Date({t:?})"),
        }
    }
}

/// Format a number the way the library stringifies it: integral finite
/// values without a fractional part, `NaN` and infinities by name.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity".to_string() } else { "-Infinity".to_string() }
    } else if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::str(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::seq(items)
    }
}
