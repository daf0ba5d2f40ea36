//! Mutex-guarded value cell
//!
//! This crate provides a single concurrency primitive: [`Guarded`], a cell
//! that binds a payload to an exclusive lock so that every read and every
//! mutation is serialized without callers managing lock acquisition:
//! - Scope-bound accessors ([`ReadGuard`] / [`WriteGuard`]) that hold the
//!   lock for exactly their lifetime and release it on every exit path
//! - Snapshot, store, replace, take and swap operations on a single cell
//! - Dual-cell copy, move, compare and swap, with both locks taken as one
//!   deadlock-free acquisition
//!
//! The lock is pluggable: the cell defaults to the `parking_lot` raw mutex,
//! and any [`lock_api::RawMutex`] implementation can stand in for it.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

mod cell;
mod guard;
mod order;

pub use cell::Guarded;
pub use guard::{ReadGuard, WriteGuard};

/// Re-export of the raw lock abstraction, for implementing custom lock types.
pub use lock_api;
