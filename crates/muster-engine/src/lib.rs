//! Muster Planning Engine
//!
//! The algorithmic layer over `muster-types`: everything that decides who
//! goes where. State lives in a `Session`; this crate only transforms it.
//!
//! # Key Concepts
//!
//! - **SessionPlanner**: The facade a UI talks to. Wraps one session with
//!   its roster and resolved settings, snapshots state before every edit,
//!   and journals soft-constraint violations instead of failing.
//! - **Capacity model**: Each filled supervisor position accounts for a
//!   fixed number of members; size targets are clamped against that
//!   capacity so they stay achievable.
//! - **Repair passes**: `merge_small_groups` and `dissolve_small_groups`
//!   fold undersized groups into compatible neighbors. Merging restarts
//!   its scan after every success; dissolving is a single pass with
//!   escalating spread tolerances.
//! - **Staffing**: `rebalance_supervisors` redeals posts from scratch
//!   (leaders first, then strict fairness); `normalize_roles` is the
//!   idempotent local cleanup for one group.
//! - **History**: Snapshot-based undo/redo. Whole states are recorded and
//!   restored, never replayed edit-by-edit.
//!
//! # Design Principles
//!
//! 1. Constraints are soft. Violations are journaled, never blocking;
//!    only precondition failures return errors, and those reject before
//!    any mutation.
//! 2. Deterministic tie-breaking everywhere. Equal candidates resolve by
//!    fitness, qualification, name, then id, so replanning the same
//!    session yields the same plan.
//! 3. Group labels are display text. No pass ever renumbers them.

#![deny(unsafe_code)]

mod capacity;
mod edits;
mod history;
mod planner;
mod repair;
mod staffing;

pub use capacity::*;
pub use edits::*;
pub use history::*;
pub use planner::*;
pub use repair::*;
pub use staffing::*;
