//! Composable per-frame action scheduler.
//!
//! Actions are units of deferred or time-extended work. A host loop owns a
//! top-level [`ActionList`] (or any composite) and calls `update(dt)` once
//! per frame until it reports over.
//!
//! - **Single-threaded**: all progress happens inside `update`, nothing blocks
//! - **Fail-fast**: child errors reach the caller unchanged
//! - **Checked lifecycle**: out-of-order calls surface as [`ContractViolation`]
//!
//! # Architecture
//!
//! - [`Action`]: Core trait for all actions
//! - [`Guarded`] / [`Phase`]: lifecycle enforcement
//! - Composite actions: [`Sequence`], [`Parallel`]
//! - Leaf actions: [`Wait`], [`Callback`]
//! - Decorator: [`Shared`]
//! - [`ActionList`]: host-facing queue

pub mod action;
pub mod builder;
pub mod composite;
pub mod config;
pub mod decorator;
pub mod error;
pub mod leaf;
pub mod lifecycle;
pub mod list;

// Re-export core types for ergonomic API
pub use action::{Action, BoxedAction};
pub use composite::{Parallel, ParallelHandle, Sequence, SequenceHandle, StartState};
pub use config::{DeltaPolicy, SchedulerConfig};
pub use decorator::Shared;
pub use error::{ActionError, ContractViolation, Result};
pub use leaf::{Callback, Wait};
pub use lifecycle::{Guarded, Phase};
pub use list::ActionList;
