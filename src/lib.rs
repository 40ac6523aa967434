//! # sweph-batch
//!
//! Batch invocation and result assembly over the Swiss Ephemeris C API.
//!
//! The engine is a stateful, single-threaded C library that answers through fixed-size
//! out-parameters and integer status codes. This crate turns host-side collections into
//! sequences of engine calls and folds the per-call outputs back into parallel results:
//!
//! - [`engine`] – the [`Engine`](engine::Engine) gateway trait, a deterministic
//!   [`StubEngine`](engine::stub::StubEngine) and, with the `swisseph` feature, the linked
//!   C library.
//! - [`batch`] – length validation, per-element dispatch, [`BatchResult`] assembly and the
//!   single-element collapse rule.
//! - [`Sweph`] – the façade owning the engine and its [`EngineConfig`]; the operations live in
//!   [`calc`], [`eclipse`], [`heliacal`] and [`houses`].
//!
//! Input validation failures are [`SwephError`]s raised before the engine is contacted.
//! Engine failures are data: they come back as negative statuses next to their diagnostics.
pub mod batch;
pub mod buffers;
pub mod calc;
pub mod config;
pub mod constants;
pub mod eclipse;
pub mod engine;
pub mod heliacal;
pub mod houses;
pub mod site;
pub mod sweph;
pub mod sweph_errors;
pub mod time;

pub use batch::{BatchResult, MagnitudeBatch, NamedBatchResult, NumericOutput, ValueBatch};
pub use buffers::NameOverflow;
pub use config::{EngineConfig, SiderealMode, Topocentric};
pub use constants::*;
pub use eclipse::Horizon;
pub use heliacal::Conditions;
pub use site::{Atmosphere, GeoPosition, ObserverProfile, VisibilityConditions};
pub use sweph::Sweph;
pub use sweph_errors::SwephError;
