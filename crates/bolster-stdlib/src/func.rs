//! Callable transformers
//!
//! Wrappers that change *when* a function runs without changing what it
//! does. State (the used-up flag, the last permitted instant, the pending
//! timer) lives inside each wrapper's closure. Time is measured on a
//! [`Timers`] facility clock, so the wrappers stay single-threaded and
//! deterministic to drive.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use bolster_core::convert::require_func;
use bolster_core::timers::{TimerId, Timers};
use bolster_core::{Result, Value};

/// Wrapper that invokes `f` on its first call only; every later call is a
/// no-op returning `undefined`.
pub fn single_use(f: &Value) -> Result<Value> {
    let inner = require_func(f, "single_use")?;
    let already_called = Cell::new(false);
    Ok(Value::func(move |recv, args| {
        if already_called.get() {
            return Ok(Value::Undefined);
        }
        already_called.set(true);
        inner.call(recv, args)
    }))
}

/// Wrapper that invokes `f` with `preset` arguments applied first,
/// followed by whatever the call site supplies. Each call concatenates
/// afresh; the preset never grows.
pub fn curry(f: &Value, preset: &[Value]) -> Result<Value> {
    let inner = require_func(f, "curry")?;
    let preset = preset.to_vec();
    Ok(Value::func(move |recv, args| {
        let mut combined = preset.clone();
        combined.extend_from_slice(args);
        inner.call(recv, &combined)
    }))
}

/// Rate-limiting wrapper: the first call runs immediately, later calls
/// run only once at least `min_interval_ms` has elapsed on the facility
/// clock since the last permitted run. Calls inside the window are
/// dropped silently, no queueing.
pub fn throttle(f: &Value, min_interval_ms: f64, timers: &Timers) -> Result<Value> {
    let inner = require_func(f, "throttle")?;
    let timers = timers.clone();
    let window = millis(min_interval_ms);
    let last_permitted: Cell<Option<Instant>> = Cell::new(None);

    Ok(Value::func(move |recv, args| {
        let now = timers.now();
        if let Some(prev) = last_permitted.get() {
            if now.duration_since(prev) < window {
                return Ok(Value::Undefined);
            }
        }
        last_permitted.set(Some(now));
        inner.call(recv, args)
    }))
}

/// Quiet-period wrapper: schedules `f` to run `delay_ms` after the most
/// recent call. Every call cancels the pending timer and reschedules with
/// the latest receiver and arguments; only the final burst survives.
pub fn debounce(f: &Value, delay_ms: f64, timers: &Timers) -> Result<Value> {
    let inner = require_func(f, "debounce")?;
    let timers = timers.clone();
    let delay = millis(delay_ms);
    let pending: Rc<Cell<Option<TimerId>>> = Rc::new(Cell::new(None));

    Ok(Value::func(move |recv, args| {
        if let Some(id) = pending.take() {
            timers.cancel(id);
        }
        let fire = {
            let inner = inner.clone();
            let recv = recv.clone();
            let args = args.to_vec();
            let pending = pending.clone();
            move || {
                pending.set(None);
                inner.call(&recv, &args).map(|_| ())
            }
        };
        pending.set(Some(timers.schedule(delay, fire)));
        Ok(Value::Undefined)
    }))
}

fn millis(ms: f64) -> Duration {
    Duration::try_from_secs_f64(ms.max(0.0) / 1000.0).unwrap_or(Duration::MAX)
}
