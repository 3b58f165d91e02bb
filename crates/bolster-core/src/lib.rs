//! Bolster core — the pieces the capability modules are built on.
//!
//! This crate provides the dynamic [`Value`] model, the two-kind error
//! taxonomy, argument conversion helpers, the collision-aware
//! [`MethodRegistry`] and the cooperative [`Timers`] queue. The capability
//! implementations themselves live in `bolster-stdlib`.

#![warn(missing_docs)]

pub mod convert;
pub mod error;
pub mod registry;
pub mod timers;
pub mod value;

pub use error::{Error, Result};
pub use registry::{MethodRegistry, Namespace};
pub use timers::{TimerId, Timers};
pub use value::{MapRef, MethodFn, SeqRef, Value, ValueKind};
