//! Method registry — collision-aware capability registration
//!
//! Capabilities are attached to per-kind namespaces by name. Registration
//! is idempotent: the first binding for a `(namespace, name)` pair wins,
//! and later attempts notify every registered clash observer instead of
//! overwriting. The registry is an explicit object constructed by the
//! caller and passed by reference — there is no process-global state.

use std::collections::HashMap;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::value::{MethodFn, Value};

/// The capability family a method is registered under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// Sequence methods (array receivers)
    Seq,
    /// Callable transformers (function receivers)
    Func,
    /// Numeric methods (number receivers)
    Num,
    /// Structural methods (map receivers)
    Obj,
    /// Text methods (string receivers)
    Text,
}

impl Namespace {
    /// Lowercase namespace name, used in log lines and error messages
    pub fn as_str(self) -> &'static str {
        match self {
            Namespace::Seq => "seq",
            Namespace::Func => "func",
            Namespace::Num => "num",
            Namespace::Obj => "obj",
            Namespace::Text => "text",
        }
    }

    /// The namespace a value's methods dispatch through, if any
    pub fn of(value: &Value) -> Option<Namespace> {
        match value {
            Value::Seq(_) => Some(Namespace::Seq),
            Value::Func(_) => Some(Namespace::Func),
            Value::Number(_) => Some(Namespace::Num),
            Value::Map(_) => Some(Namespace::Obj),
            Value::Str(_) => Some(Namespace::Text),
            _ => None,
        }
    }
}

impl std::fmt::Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Observer invoked when a registration attempt targets an occupied name.
///
/// Receives the namespace, the method name and the implementation that was
/// *not* applied.
pub type ClashObserver = dyn Fn(Namespace, &str, &Rc<MethodFn>);

/// Registry of named methods indexed by `(namespace, name)`
pub struct MethodRegistry {
    methods: HashMap<(Namespace, String), Rc<MethodFn>>,
    clash_observers: Vec<Box<ClashObserver>>,
}

impl MethodRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            methods: HashMap::new(),
            clash_observers: Vec::new(),
        }
    }

    /// Register a method under a namespace by name.
    ///
    /// If the name is vacant the implementation is bound. If it is already
    /// occupied, nothing is rebound and every clash observer is invoked
    /// with the attempted implementation, in registration order. A
    /// collision is a reported event, never an error.
    pub fn define_method(
        &mut self,
        ns: Namespace,
        name: &str,
        f: impl Fn(&Value, &[Value]) -> Result<Value> + 'static,
    ) {
        self.define_method_rc(ns, name, Rc::new(f));
    }

    fn define_method_rc(&mut self, ns: Namespace, name: &str, f: Rc<MethodFn>) {
        let key = (ns, name.to_string());
        if self.methods.contains_key(&key) {
            log::warn!("clash registering {ns}.{name}; keeping the existing binding");
            for observer in &self.clash_observers {
                observer(ns, name, &f);
            }
            return;
        }
        log::trace!("registered {ns}.{name}");
        self.methods.insert(key, f);
    }

    /// Register `alias` as another name for the implementation already
    /// bound under `existing`. Routes through [`define_method`], so alias
    /// registration is itself collision-safe.
    ///
    /// Fails with `InvalidArgument` when `existing` is not bound.
    ///
    /// [`define_method`]: MethodRegistry::define_method
    pub fn define_alias(&mut self, ns: Namespace, alias: &str, existing: &str) -> Result<()> {
        let f = self.get(ns, existing).ok_or_else(|| {
            Error::invalid_argument(format!("alias {ns}.{alias}: no method named {existing}"))
        })?;
        self.define_method_rc(ns, alias, f);
        Ok(())
    }

    /// Append a clash observer. Observers never affect the outcome of a
    /// registration; they only get told about collisions.
    pub fn on_clash(&mut self, observer: impl Fn(Namespace, &str, &Rc<MethodFn>) + 'static) {
        self.clash_observers.push(Box::new(observer));
    }

    /// Get a method by namespace and name
    pub fn get(&self, ns: Namespace, name: &str) -> Option<Rc<MethodFn>> {
        self.methods.get(&(ns, name.to_string())).cloned()
    }

    /// Check whether a method is registered
    pub fn contains(&self, ns: Namespace, name: &str) -> bool {
        self.methods.contains_key(&(ns, name.to_string()))
    }

    /// The number of registered methods
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// Check whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Dispatch a method on a receiver, picking the namespace from the
    /// receiver's kind.
    ///
    /// Fails with `InvalidArgument` when the receiver has no namespace or
    /// the name is not bound in it.
    pub fn invoke(&self, receiver: &Value, name: &str, args: &[Value]) -> Result<Value> {
        let ns = Namespace::of(receiver).ok_or_else(|| {
            Error::invalid_argument(format!(
                "no methods dispatch on a value of type {}",
                receiver.type_name()
            ))
        })?;
        let f = self
            .get(ns, name)
            .ok_or_else(|| Error::invalid_argument(format!("no method {ns}.{name}")))?;
        f(receiver, args)
    }
}

impl Default for MethodRegistry {
    fn default() -> Self {
        Self::new()
    }
}
