//! Session planner — the unified planning entity
//!
//! The planner wraps one session with its roster and resolved settings
//! and is the entry point a UI talks to. It does NOT decide anything
//! itself — it sequences the engine: snapshot before the mutation,
//! perform it, journal what the constraints think, hand the session to
//! the store.
//!
//! Every mutating method starts a fresh journal, so `journal()` always
//! describes the most recent operation. Precondition failures reject
//! before any of that: no snapshot, no save, no state change.

use crate::{
    check_group_compliance, dissolve_small_groups, edits, merge_small_groups, normalize_roles,
    rebalance_supervisors, AttendanceEffect, DissolveOutcome, History, RebalanceSummary,
    RepairOutcome,
};
use chrono::Utc;
use muster_types::{
    ComplianceReport, GroupId, GroupOrdering, PersonId, PlanError, PlanJournal, PlanResult,
    PlannerSettings, Roster, Session, Slot,
};
use tracing::info;

/// Where updated sessions are handed after every mutation
///
/// Fire-and-forget: the planner neither retries nor verifies, and never
/// waits on the collaborator before returning.
pub trait SessionStore {
    fn save(&mut self, session: &Session);
}

/// Store that keeps nothing
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopStore;

impl SessionStore for NoopStore {
    fn save(&mut self, _session: &Session) {}
}

/// The planning facade over one session
pub struct SessionPlanner {
    session: Session,
    roster: Roster,
    settings: PlannerSettings,

    // --- Composed machinery ---
    /// Undo/redo log
    history: History,
    /// Journal of the most recent operation
    journal: PlanJournal,
    /// Persistence collaborator
    store: Box<dyn SessionStore>,
}

impl SessionPlanner {
    pub fn new(session: Session, roster: Roster, settings: PlannerSettings) -> Self {
        info!(
            session = %session.id,
            groups = session.group_count(),
            participants = roster.participant_count(),
            supervisors = roster.supervisor_count(),
            "Session planner created"
        );
        Self {
            session,
            roster,
            settings,
            history: History::default(),
            journal: PlanJournal::new(),
            store: Box::new(NoopStore),
        }
    }

    /// Use a real persistence collaborator
    pub fn with_store(mut self, store: Box<dyn SessionStore>) -> Self {
        self.store = store;
        self
    }

    /// Bound the undo log differently
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history = History::new(limit);
        self
    }

    // =========================================================================
    // GROUP STRUCTURE
    // =========================================================================

    /// Add an empty group with an automatic label
    pub fn add_group(&mut self) -> GroupId {
        let label = format!("Group {}", self.session.group_count() + 1);
        self.add_labeled_group(label)
    }

    /// Add an empty group with the given label
    pub fn add_labeled_group(&mut self, label: impl Into<String>) -> GroupId {
        self.journal = PlanJournal::new();
        let before = self.session.snapshot();
        let id = self.session.add_group(label);
        self.history.record(before);
        self.store.save(&self.session);
        id
    }

    /// Delete a group; its people become unassigned
    pub fn remove_group(&mut self, id: GroupId) -> PlanResult<()> {
        self.journal = PlanJournal::new();
        let before = self.session.snapshot();
        self.session.remove_group(id)?;
        self.history.record(before);
        self.store.save(&self.session);
        Ok(())
    }

    /// Split a group into two balanced halves
    pub fn split_group(&mut self, id: GroupId) -> PlanResult<(GroupId, GroupId)> {
        self.journal = PlanJournal::new();
        let before = self.session.snapshot();
        let halves = edits::split_group(&mut self.session, &self.roster, &self.settings, id)?;
        self.history.record(before);
        self.store.save(&self.session);
        Ok(halves)
    }

    /// Merge one group into another, non-destructively for the target
    pub fn merge_groups(&mut self, source: GroupId, target: GroupId) -> PlanResult<()> {
        self.journal = PlanJournal::new();
        let before = self.session.snapshot();
        edits::merge_groups(
            &mut self.session,
            &self.roster,
            &self.settings,
            source,
            target,
            &mut self.journal,
        )?;
        self.history.record(before);
        self.store.save(&self.session);
        Ok(())
    }

    // =========================================================================
    // PEOPLE PLACEMENT
    // =========================================================================

    /// Place a participant into a group (moving them if needed)
    pub fn place_participant(&mut self, pid: PersonId, group: GroupId) -> PlanResult<()> {
        self.journal = PlanJournal::new();
        let before = self.session.snapshot();
        edits::place_participant(
            &mut self.session,
            &self.roster,
            &self.settings,
            pid,
            group,
            &mut self.journal,
        )?;
        self.history.record(before);
        self.store.save(&self.session);
        Ok(())
    }

    /// Take a participant out of their group
    pub fn withdraw_participant(&mut self, pid: PersonId) -> Option<GroupId> {
        self.journal = PlanJournal::new();
        let before = self.session.snapshot();
        let vacated = edits::withdraw_participant(&mut self.session, pid)?;
        self.history.record(before);
        self.store.save(&self.session);
        Some(vacated)
    }

    /// Place a supervisor into a post (vacating any other post first)
    pub fn place_supervisor(&mut self, sid: PersonId, group: GroupId, slot: Slot) -> PlanResult<()> {
        self.journal = PlanJournal::new();
        let before = self.session.snapshot();
        edits::place_supervisor(
            &mut self.session,
            &self.roster,
            &self.settings,
            sid,
            group,
            slot,
            &mut self.journal,
        )?;
        self.history.record(before);
        self.store.save(&self.session);
        Ok(())
    }

    /// Vacate a supervisor's post and re-normalize the group they left
    pub fn withdraw_supervisor(&mut self, sid: PersonId) -> Option<(GroupId, Slot)> {
        self.journal = PlanJournal::new();
        let before = self.session.snapshot();
        let (group_id, slot) = edits::withdraw_supervisor(&mut self.session, sid)?;
        if let Some(group) = self.session.group_mut(group_id) {
            normalize_roles(group, &self.roster, &self.settings);
        }
        self.history.record(before);
        self.store.save(&self.session);
        Some((group_id, slot))
    }

    /// Exchange the groups of two participants
    pub fn swap_participants(&mut self, a: PersonId, b: PersonId) -> PlanResult<()> {
        self.journal = PlanJournal::new();
        let before = self.session.snapshot();
        edits::swap_participants(&mut self.session, a, b)?;
        self.history.record(before);
        self.store.save(&self.session);
        Ok(())
    }

    /// Exchange the posts of two supervisors
    pub fn swap_supervisors(&mut self, a: PersonId, b: PersonId) -> PlanResult<()> {
        self.journal = PlanJournal::new();
        let before = self.session.snapshot();
        edits::swap_supervisors(&mut self.session, a, b)?;
        self.history.record(before);
        self.store.save(&self.session);
        Ok(())
    }

    // =========================================================================
    // REPAIR & STAFFING
    // =========================================================================

    /// Fold undersized groups into compatible neighbors, repeatedly
    pub fn merge_small_groups(&mut self) -> RepairOutcome {
        self.journal = PlanJournal::new();
        let before = self.session.snapshot();
        let outcome = merge_small_groups(&mut self.session, &self.settings, &mut self.journal);
        self.history.record(before);
        self.store.save(&self.session);
        outcome
    }

    /// One best-effort pass dissolving undersized groups
    pub fn dissolve_small_groups(&mut self) -> DissolveOutcome {
        self.journal = PlanJournal::new();
        let before = self.session.snapshot();
        let outcome = dissolve_small_groups(&mut self.session, &self.settings, &mut self.journal);
        self.history.record(before);
        self.store.save(&self.session);
        outcome
    }

    /// Redeal supervisor posts across the whole session
    pub fn rebalance_supervisors(&mut self) -> RebalanceSummary {
        self.journal = PlanJournal::new();
        let before = self.session.snapshot();
        let summary = rebalance_supervisors(
            &mut self.session,
            &self.roster,
            &self.settings,
            &mut self.journal,
        );
        self.history.record(before);
        self.store.save(&self.session);
        summary
    }

    /// Make one group's positions canonical
    pub fn normalize_group_roles(&mut self, id: GroupId) -> PlanResult<bool> {
        self.journal = PlanJournal::new();
        let before = self.session.snapshot();
        let Some(group) = self.session.group_mut(id) else {
            return Err(PlanError::GroupNotFound(id));
        };
        let changed = normalize_roles(group, &self.roster, &self.settings);
        if changed {
            self.history.record(before);
            self.store.save(&self.session);
        }
        Ok(changed)
    }

    // =========================================================================
    // ATTENDANCE
    // =========================================================================

    /// Flip a participant's availability for this session
    pub fn set_participant_attendance(&mut self, pid: PersonId, present: bool) -> AttendanceEffect {
        self.journal = PlanJournal::new();
        let before = self.session.snapshot();
        let effect = edits::set_participant_attendance(&mut self.session, pid, present, Utc::now());
        self.history.record(before);
        self.store.save(&self.session);
        effect
    }

    /// Flip a supervisor's availability, re-normalizing a group that
    /// loses its post
    pub fn set_supervisor_attendance(&mut self, sid: PersonId, present: bool) -> AttendanceEffect {
        self.journal = PlanJournal::new();
        let before = self.session.snapshot();
        let effect = edits::set_supervisor_attendance(&mut self.session, sid, present, Utc::now());
        if let AttendanceEffect::Evicted { group, .. } = effect {
            if let Some(group) = self.session.group_mut(group) {
                normalize_roles(group, &self.roster, &self.settings);
            }
        }
        self.history.record(before);
        self.store.save(&self.session);
        effect
    }

    // =========================================================================
    // HISTORY
    // =========================================================================

    /// Step back to the previous recorded state
    pub fn undo(&mut self) -> bool {
        self.journal = PlanJournal::new();
        let live = self.session.snapshot();
        match self.history.undo(&live) {
            Some(snapshot) => {
                self.session.restore(&snapshot);
                self.store.save(&self.session);
                info!(session = %self.session.id, "Undo applied");
                true
            }
            None => false,
        }
    }

    /// Step forward again after an undo
    pub fn redo(&mut self) -> bool {
        self.journal = PlanJournal::new();
        match self.history.redo() {
            Some(snapshot) => {
                self.session.restore(&snapshot);
                self.store.save(&self.session);
                info!(session = %self.session.id, "Redo applied");
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo(&self.session.snapshot())
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // =========================================================================
    // VIEWS & QUERIES
    // =========================================================================

    /// Change how groups are ordered for display. Not an undoable edit.
    pub fn set_group_ordering(&mut self, ordering: GroupOrdering) {
        self.session.ordering = ordering;
        self.store.save(&self.session);
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn settings(&self) -> &PlannerSettings {
        &self.settings
    }

    /// Journal of the most recent operation
    pub fn journal(&self) -> &PlanJournal {
        &self.journal
    }

    /// Group ids in the session's display order
    pub fn sorted_group_ids(&self) -> Vec<GroupId> {
        self.session.sorted_group_ids(&self.roster)
    }

    /// Soft-constraint report for one group
    pub fn group_compliance(&self, id: GroupId) -> PlanResult<ComplianceReport> {
        self.session
            .group(id)
            .map(|g| check_group_compliance(g, &self.roster, &self.settings))
            .ok_or(PlanError::GroupNotFound(id))
    }

    /// Soft-constraint reports for every group, in session order
    pub fn session_compliance(&self) -> Vec<ComplianceReport> {
        self.session
            .groups
            .iter()
            .map(|g| check_group_compliance(g, &self.roster, &self.settings))
            .collect()
    }

    /// Available participants who are in no group (the tray)
    pub fn unassigned_participants(&self) -> Vec<PersonId> {
        self.session
            .available_participants
            .iter()
            .copied()
            .filter(|pid| self.session.participant_group(*pid).is_none())
            .collect()
    }

    /// Available supervisors holding no post (the tray)
    pub fn unposted_supervisors(&self) -> Vec<PersonId> {
        self.session
            .available_supervisors
            .iter()
            .copied()
            .filter(|sid| self.session.supervisor_post(*sid).is_none())
            .collect()
    }
}
