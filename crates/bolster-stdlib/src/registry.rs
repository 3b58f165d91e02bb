//! Builtin registration
//!
//! Registers every capability into a `MethodRegistry` by name, grouped by
//! namespace. Prototype-style methods (`uniq`, `pad`, `startsWith`, ...)
//! dispatch on their receiver; constructor-style ones (`wrap`, `range`,
//! `typeOf`, `extend`, ...) ignore the receiver and read their operand
//! from the argument list, matching the shape of the API this library
//! descends from.

use bolster_core::convert::{self, number_receiver, str_receiver};
use bolster_core::{MethodRegistry, Namespace, Result, Timers, Value};

use crate::{func, num, obj, seq, text};

/// Register every builtin method into the given registry.
///
/// `timers` is the facility the time-based callable transformers
/// (`throttle`, `debounce`) will measure and schedule against. Installing
/// into a registry that already holds any of these names fires the
/// registry's clash observers and leaves the existing bindings intact.
pub fn install(registry: &mut MethodRegistry, timers: &Timers) -> Result<()> {
    install_seq(registry);
    install_func(registry, timers);
    install_num(registry)?;
    install_obj(registry);
    install_text(registry);
    log::debug!("installed {} builtin methods", registry.len());
    Ok(())
}

/// Register sequence methods
fn install_seq(registry: &mut MethodRegistry) {
    registry.define_method(Namespace::Seq, "wrap", |_, args| {
        Ok(seq::wrap(&convert::arg(args, 0)))
    });
    registry.define_method(Namespace::Seq, "range", |_, args| {
        seq::range(&convert::arg(args, 0), &convert::arg(args, 1))
    });
    registry.define_method(Namespace::Seq, "toSequence", |_, args| {
        seq::to_seq(&convert::arg(args, 0))
    });
    registry.define_method(Namespace::Seq, "uniq", |recv, _| seq::uniq(recv));
    registry.define_method(Namespace::Seq, "detect", |recv, args| {
        seq::detect(recv, &convert::arg(args, 0), args.get(1))
    });
    registry.define_method(Namespace::Seq, "head", |recv, _| seq::head(recv));
    registry.define_method(Namespace::Seq, "tail", |recv, _| seq::tail(recv));
    registry.define_method(Namespace::Seq, "compact", |recv, _| seq::compact(recv));
    registry.define_method(Namespace::Seq, "group", |recv, args| {
        seq::group(recv, &convert::arg(args, 0), args.get(1))
    });
    registry.define_method(Namespace::Seq, "reject", |recv, args| {
        seq::reject(recv, &convert::arg(args, 0), args.get(1))
    });
    registry.define_method(Namespace::Seq, "take", |recv, args| {
        seq::take(recv, &convert::arg(args, 0))
    });
    registry.define_method(Namespace::Seq, "drop", |recv, args| {
        seq::drop(recv, &convert::arg(args, 0))
    });
    registry.define_method(Namespace::Seq, "pluck", |recv, args| {
        seq::pluck(recv, &convert::arg(args, 0))
    });
}

/// Register callable transformers
fn install_func(registry: &mut MethodRegistry, timers: &Timers) {
    registry.define_method(Namespace::Func, "singleUse", |recv, _| func::single_use(recv));
    registry.define_method(Namespace::Func, "curry", |recv, args| func::curry(recv, args));
    {
        let timers = timers.clone();
        registry.define_method(Namespace::Func, "throttle", move |recv, args| {
            let rate = convert::number_arg(args, 0, "throttle interval")?;
            func::throttle(recv, rate, &timers)
        });
    }
    {
        let timers = timers.clone();
        registry.define_method(Namespace::Func, "debounce", move |recv, args| {
            let delay = convert::number_arg(args, 0, "debounce delay")?;
            func::debounce(recv, delay, &timers)
        });
    }
}

/// Register numeric methods and their singular aliases
fn install_num(registry: &mut MethodRegistry) -> Result<()> {
    registry.define_method(Namespace::Num, "times", |recv, args| {
        num::times(number_receiver(recv, "times")?, &convert::arg(args, 0))?;
        Ok(Value::Undefined)
    });
    registry.define_method(Namespace::Num, "seconds", |recv, _| {
        Ok(Value::from(num::seconds(number_receiver(recv, "seconds")?)))
    });
    registry.define_method(Namespace::Num, "minutes", |recv, _| {
        Ok(Value::from(num::minutes(number_receiver(recv, "minutes")?)))
    });
    registry.define_method(Namespace::Num, "hours", |recv, _| {
        Ok(Value::from(num::hours(number_receiver(recv, "hours")?)))
    });
    registry.define_method(Namespace::Num, "pad", |recv, args| {
        let n = number_receiver(recv, "pad")?;
        Ok(Value::str(num::pad(n, &convert::arg(args, 0))?))
    });

    registry.define_alias(Namespace::Num, "second", "seconds")?;
    registry.define_alias(Namespace::Num, "minute", "minutes")?;
    registry.define_alias(Namespace::Num, "hour", "hours")?;
    Ok(())
}

/// Register structural methods
fn install_obj(registry: &mut MethodRegistry) {
    registry.define_method(Namespace::Obj, "values", |_, args| {
        obj::values(&convert::arg(args, 0))
    });
    registry.define_method(Namespace::Obj, "provide", |_, args| {
        let target = convert::arg(args, 0);
        let mut segments = Vec::with_capacity(args.len().saturating_sub(1));
        for i in 1..args.len() {
            segments.push(convert::string_arg(args, i, "provide path segment")?);
        }
        let path: Vec<&str> = segments.iter().map(|s| s.as_ref()).collect();
        obj::provide(&target, &path)
    });
    registry.define_method(Namespace::Obj, "typeOf", |_, args| {
        Ok(Value::str(obj::type_of(&convert::arg(args, 0))))
    });
    registry.define_method(Namespace::Obj, "isArray", |_, args| {
        Ok(Value::from(obj::is_array(&convert::arg(args, 0))))
    });
    registry.define_method(Namespace::Obj, "isFunction", |_, args| {
        Ok(Value::from(obj::is_function(&convert::arg(args, 0))))
    });
    registry.define_method(Namespace::Obj, "isString", |_, args| {
        Ok(Value::from(obj::is_string(&convert::arg(args, 0))))
    });
    registry.define_method(Namespace::Obj, "isNumber", |_, args| {
        Ok(Value::from(obj::is_number(&convert::arg(args, 0))))
    });
    registry.define_method(Namespace::Obj, "isBoolean", |_, args| {
        Ok(Value::from(obj::is_boolean(&convert::arg(args, 0))))
    });
    registry.define_method(Namespace::Obj, "isRegexp", |_, args| {
        Ok(Value::from(obj::is_regexp(&convert::arg(args, 0))))
    });
    registry.define_method(Namespace::Obj, "isDate", |_, args| {
        Ok(Value::from(obj::is_date(&convert::arg(args, 0))))
    });
    registry.define_method(Namespace::Obj, "extend", |_, args| {
        let rest = args.get(1..).unwrap_or(&[]);
        obj::extend(&convert::arg(args, 0), rest)
    });
}

/// Register text methods
fn install_text(registry: &mut MethodRegistry) {
    registry.define_method(Namespace::Text, "startsWith", |recv, args| {
        let s = str_receiver(recv, "startsWith")?;
        let prefix = convert::string_arg(args, 0, "startsWith prefix")?;
        Ok(Value::from(text::starts_with(&s, &prefix)?))
    });
    registry.define_method(Namespace::Text, "endsWith", |recv, args| {
        let s = str_receiver(recv, "endsWith")?;
        let suffix = convert::string_arg(args, 0, "endsWith suffix")?;
        Ok(Value::from(text::ends_with(&s, &suffix)))
    });
    registry.define_method(Namespace::Text, "contains", |recv, args| {
        let s = str_receiver(recv, "contains")?;
        let pattern = convert::string_arg(args, 0, "contains pattern")?;
        Ok(Value::from(text::contains(&s, &pattern)?))
    });
    registry.define_method(Namespace::Text, "strip", |recv, _| {
        Ok(Value::str(text::strip(&str_receiver(recv, "strip")?)))
    });
    registry.define_method(Namespace::Text, "quote", |recv, args| {
        let s = str_receiver(recv, "quote")?;
        let enclosing = convert::arg(args, 0);
        Ok(Value::str(text::quote(&s, enclosing.as_str())))
    });
    registry.define_method(Namespace::Text, "toFloat", |recv, _| {
        Ok(Value::from(text::to_float(&str_receiver(recv, "toFloat")?)))
    });
    registry.define_method(Namespace::Text, "toInteger", |recv, _| {
        Ok(Value::from(text::to_integer(&str_receiver(recv, "toInteger")?)))
    });
}
