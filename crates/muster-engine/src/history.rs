//! Snapshot-based edit history
//!
//! A linear log of whole-session snapshots with one cursor. Undo and
//! redo hand back snapshots to restore wholesale; nothing is ever
//! replayed operation by operation. The log is bounded: once full, the
//! oldest states fall off the far end.

use muster_types::SessionSnapshot;
use tracing::debug;

/// Retained snapshots before the oldest are dropped
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Undo/redo log over [`SessionSnapshot`]s
#[derive(Clone, Debug)]
pub struct History {
    snapshots: Vec<SessionSnapshot>,
    /// Position of the state currently considered live; `None` until
    /// the first record
    cursor: Option<usize>,
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl History {
    pub fn new(limit: usize) -> Self {
        Self {
            snapshots: Vec::new(),
            cursor: None,
            limit: limit.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Capture state before a mutation.
    ///
    /// Anything beyond the cursor is a redo branch the new edit
    /// invalidates, so it is dropped. A snapshot equal to the one at the
    /// cursor is not recorded twice. Once the log exceeds its limit the
    /// oldest entries fall off.
    pub fn record(&mut self, snapshot: SessionSnapshot) {
        if let Some(cursor) = self.cursor {
            self.snapshots.truncate(cursor + 1);
        }
        if self.snapshots.last() != Some(&snapshot) {
            self.snapshots.push(snapshot);
        }
        while self.snapshots.len() > self.limit {
            self.snapshots.remove(0);
        }
        self.cursor = Some(self.snapshots.len() - 1);
        debug!(entries = self.snapshots.len(), "State recorded");
    }

    /// Step back one state. `live` is the session as it stands right
    /// now: when it has drifted from the cursor entry (an edit happened
    /// without a record), it is parked at the tail so redo can come back
    /// to it, and the cursor entry itself is returned.
    pub fn undo(&mut self, live: &SessionSnapshot) -> Option<SessionSnapshot> {
        let cursor = self.cursor?;
        let recorded = self.snapshots.get(cursor)?.clone();
        if &recorded != live {
            self.snapshots.push(live.clone());
            debug!(cursor, "Unrecorded edit parked for redo");
            return Some(recorded);
        }
        if cursor == 0 {
            return None;
        }
        self.cursor = Some(cursor - 1);
        self.snapshots.get(cursor - 1).cloned()
    }

    /// Step forward one state, if an entry exists beyond the cursor
    pub fn redo(&mut self) -> Option<SessionSnapshot> {
        let next = self.cursor? + 1;
        let snapshot = self.snapshots.get(next)?.clone();
        self.cursor = Some(next);
        Some(snapshot)
    }

    /// Whether undo would change anything, given the live state
    pub fn can_undo(&self, live: &SessionSnapshot) -> bool {
        match self.cursor {
            Some(cursor) => cursor > 0 || self.snapshots.get(cursor) != Some(live),
            None => false,
        }
    }

    pub fn can_redo(&self) -> bool {
        match self.cursor {
            Some(cursor) => cursor + 1 < self.snapshots.len(),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use muster_types::{Group, GroupId, PersonId};
    use std::collections::BTreeSet;

    /// Snapshot with a single group holding the given members
    fn snap(members: &[u32]) -> SessionSnapshot {
        let mut group = Group::new(GroupId(1), "Group 1");
        for id in members {
            group.add_member(PersonId(*id));
        }
        SessionSnapshot {
            groups: vec![group],
            available_participants: BTreeSet::new(),
            available_supervisors: BTreeSet::new(),
        }
    }

    #[test]
    fn undo_steps_back_and_redo_returns() {
        let mut history = History::default();
        history.record(snap(&[]));
        history.record(snap(&[1]));

        let live = snap(&[1]);
        assert!(history.can_undo(&live));
        assert_eq!(history.undo(&live), Some(snap(&[])));

        let live = snap(&[]);
        assert!(!history.can_undo(&live));
        assert_eq!(history.undo(&live), None);

        assert!(history.can_redo());
        assert_eq!(history.redo(), Some(snap(&[1])));
        assert_eq!(history.redo(), None);
    }

    #[test]
    fn record_then_undo_restores_the_prior_state() {
        let mut history = History::default();
        history.record(snap(&[1]));

        // The mutation happened after the record; undo returns what was
        // recorded and parks the live state for redo.
        let live = snap(&[1, 2]);
        assert_eq!(history.undo(&live), Some(snap(&[1])));
        assert_eq!(history.redo(), Some(snap(&[1, 2])));
    }

    #[test]
    fn fresh_history_has_nothing_to_offer() {
        let mut history = History::default();
        assert!(history.is_empty());
        assert_eq!(history.undo(&snap(&[])), None);
        assert_eq!(history.redo(), None);
        assert!(!history.can_undo(&snap(&[])));
        assert!(!history.can_redo());
    }

    #[test]
    fn recording_discards_the_redo_branch() {
        let mut history = History::default();
        history.record(snap(&[1]));
        history.record(snap(&[2]));
        assert_eq!(history.undo(&snap(&[2])), Some(snap(&[1])));

        history.record(snap(&[3]));
        assert!(!history.can_redo());
        assert_eq!(history.redo(), None);
        assert_eq!(history.len(), 2);
        assert_eq!(history.undo(&snap(&[3])), Some(snap(&[1])));
    }

    #[test]
    fn equal_snapshots_are_recorded_once() {
        let mut history = History::default();
        history.record(snap(&[1]));
        history.record(snap(&[1]));
        assert_eq!(history.len(), 1);
        assert_eq!(history.undo(&snap(&[1])), None);
    }

    #[test]
    fn oldest_entries_fall_off_a_full_log() {
        let mut history = History::new(2);
        history.record(snap(&[1]));
        history.record(snap(&[2]));
        history.record(snap(&[3]));

        assert_eq!(history.len(), 2);
        assert_eq!(history.undo(&snap(&[3])), Some(snap(&[2])));
        // The earliest state was dropped; nothing further back remains.
        assert_eq!(history.undo(&snap(&[2])), None);
    }

    #[test]
    fn divergent_undo_keeps_the_cursor_entry() {
        let mut history = History::default();
        history.record(snap(&[1]));
        history.record(snap(&[2]));

        // Two consecutive undos against a drifted live state: the first
        // parks it, the second steps back normally.
        assert_eq!(history.undo(&snap(&[2, 3])), Some(snap(&[2])));
        assert_eq!(history.undo(&snap(&[2])), Some(snap(&[1])));
        // Redo walks forward to the recorded state, then the parked one.
        assert_eq!(history.redo(), Some(snap(&[2])));
        assert_eq!(history.redo(), Some(snap(&[2, 3])));
    }
}
