//! Bolster standard library
//!
//! Utility capabilities over the shared dynamic value model, grouped by
//! the kind they operate on: sequences, callables, numbers, structured
//! maps and text. Everything can be used as plain functions, or installed
//! into a [`MethodRegistry`](bolster_core::MethodRegistry) for name-based
//! dispatch via [`registry::install`].

#![warn(missing_docs)]

pub mod func;
pub mod num;
pub mod obj;
pub mod registry;
pub mod seq;
pub mod text;

pub use registry::install;
