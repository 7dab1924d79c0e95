//! Domain types for Muster session planning
//!
//! A planned session assigns two pools of people — participants and
//! supervisors — into labeled groups. These types are plain data: they
//! carry no heuristics and reach into no ambient state. Every engine
//! operation takes the session, roster, and settings it works on
//! explicitly.
//!
//! # Key Concepts
//!
//! - **Roster**: read-only lookup of participant and supervisor records
//!   by id. Owned by the caller, consumed by reference everywhere.
//! - **Group**: a labeled bucket of participant members plus four
//!   supervisor positions — leader, secondary, tertiary, and an
//!   open-ended extras set. The leader position is qualification-gated.
//! - **Session**: the scheduled event being planned — its ordered
//!   groups, the two availability sets, and display preferences.
//! - **PlannerSettings**: the configuration parameters (capacity
//!   multiplier, leader floor, size band, fitness spread) resolved once
//!   from a caller-supplied parameter list into a strongly-typed struct.
//! - **PlanJournal**: an append-only log of human-readable notes and
//!   warnings produced during one batch operation. Soft constraint
//!   violations land here instead of blocking the edit.
//! - **SessionSnapshot**: a deep copy of group and availability state,
//!   the currency of the undo/redo history.
//!
//! # Design Principles
//!
//! 1. Identity is a fixed-width integer. Members, extras, and the
//!    availability pools are true sets of `PersonId` — a person can
//!    occupy at most one place, by construction plus one withdrawal
//!    rule in the engine.
//! 2. Soft constraints warn, hard preconditions reject. Nothing in the
//!    core panics on user input.
//! 3. Snapshots own their data. Restoring one replaces session state
//!    wholesale; nothing aliases live groups.

#![deny(unsafe_code)]

mod compliance;
mod errors;
mod group;
mod journal;
mod person;
mod roster;
mod session;
mod settings;

pub use compliance::*;
pub use errors::*;
pub use group::*;
pub use journal::*;
pub use person::*;
pub use roster::*;
pub use session::*;
pub use settings::*;
