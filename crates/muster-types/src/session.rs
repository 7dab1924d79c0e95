//! Sessions: one planning surface
//!
//! A session owns its groups plus the availability pools for the day.
//! Group ids are handed out by the session and never reused, even after
//! a group is removed or an undo resurrects older state.

use crate::{Group, GroupId, PersonId, PlanError, PlanResult, Roster, Slot};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Unique identifier for a session
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random id
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Display ordering preference for a session's groups
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupOrdering {
    /// Alphabetical by label
    #[default]
    ByLabel,
    /// Strongest group first
    ByFitness,
    /// Largest group first
    BySize,
}

/// A planning session: groups plus who is available that day
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Unique identifier
    pub id: SessionId,
    /// Scheduled start; drives the past/future attendance cascade
    pub starts_at: DateTime<Utc>,
    /// Groups in creation order
    pub groups: Vec<Group>,
    /// Participants marked present for this session
    pub available_participants: BTreeSet<PersonId>,
    /// Supervisors marked present for this session
    pub available_supervisors: BTreeSet<PersonId>,
    /// Display preference, not part of planning state
    pub ordering: GroupOrdering,
    /// Next group id to hand out; monotonic
    pub next_group_id: u32,
}

impl Session {
    pub fn new(starts_at: DateTime<Utc>) -> Self {
        Self {
            id: SessionId::generate(),
            starts_at,
            groups: Vec::new(),
            available_participants: BTreeSet::new(),
            available_supervisors: BTreeSet::new(),
            ordering: GroupOrdering::default(),
            next_group_id: 1,
        }
    }

    pub fn with_id(mut self, id: SessionId) -> Self {
        self.id = id;
        self
    }

    /// Whether the session has already started at `now`
    pub fn is_past(&self, now: DateTime<Utc>) -> bool {
        self.starts_at < now
    }

    // --- Groups ---

    /// Create an empty group with a fresh id
    pub fn add_group(&mut self, label: impl Into<String>) -> GroupId {
        let id = GroupId(self.next_group_id);
        self.next_group_id += 1;
        self.groups.push(Group::new(id, label));
        id
    }

    /// Remove a group and return it
    pub fn remove_group(&mut self, id: GroupId) -> PlanResult<Group> {
        let pos = self
            .group_position(id)
            .ok_or(PlanError::GroupNotFound(id))?;
        Ok(self.groups.remove(pos))
    }

    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn group_mut(&mut self, id: GroupId) -> Option<&mut Group> {
        self.groups.iter_mut().find(|g| g.id == id)
    }

    pub fn group_position(&self, id: GroupId) -> Option<usize> {
        self.groups.iter().position(|g| g.id == id)
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    // --- Person lookups ---

    /// The group a participant is currently a member of, if any
    pub fn participant_group(&self, id: PersonId) -> Option<GroupId> {
        self.groups.iter().find(|g| g.has_member(id)).map(|g| g.id)
    }

    /// The post a supervisor currently holds, if any
    pub fn supervisor_post(&self, id: PersonId) -> Option<(GroupId, Slot)> {
        self.groups
            .iter()
            .find_map(|g| g.slot_of(id).map(|slot| (g.id, slot)))
    }

    // --- Views ---

    /// Group ids sorted by the session's display preference
    pub fn sorted_group_ids(&self, roster: &Roster) -> Vec<GroupId> {
        let mut ids: Vec<GroupId> = self.groups.iter().map(|g| g.id).collect();
        match self.ordering {
            GroupOrdering::ByLabel => {
                ids.sort_by(|a, b| {
                    let la = self.group(*a).map(|g| g.label.as_str()).unwrap_or("");
                    let lb = self.group(*b).map(|g| g.label.as_str()).unwrap_or("");
                    la.cmp(lb).then(a.cmp(b))
                });
            }
            GroupOrdering::ByFitness => {
                ids.sort_by_key(|id| {
                    let score = self.group(*id).map(|g| g.fitness_score(roster)).unwrap_or(0);
                    (std::cmp::Reverse(score), *id)
                });
            }
            GroupOrdering::BySize => {
                ids.sort_by_key(|id| {
                    let size = self.group(*id).map(|g| g.member_count()).unwrap_or(0);
                    (std::cmp::Reverse(size), *id)
                });
            }
        }
        ids
    }

    // --- Snapshots ---

    /// Deep copy of the undoable state
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            groups: self.groups.clone(),
            available_participants: self.available_participants.clone(),
            available_supervisors: self.available_supervisors.clone(),
        }
    }

    /// Replace the undoable state wholesale. Display preferences and the
    /// id counter are untouched, so restored sessions keep handing out
    /// fresh ids.
    pub fn restore(&mut self, snapshot: &SessionSnapshot) {
        self.groups = snapshot.groups.clone();
        self.available_participants = snapshot.available_participants.clone();
        self.available_supervisors = snapshot.available_supervisors.clone();
    }
}

/// The undoable slice of a session, deep-copied
#[derive(Clone, Debug, PartialEq)]
pub struct SessionSnapshot {
    pub groups: Vec<Group>,
    pub available_participants: BTreeSet<PersonId>,
    pub available_supervisors: BTreeSet<PersonId>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Participant;
    use chrono::TimeZone;

    fn make_session() -> Session {
        Session::new(Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap())
    }

    #[test]
    fn group_ids_are_never_reused() {
        let mut session = make_session();
        let a = session.add_group("Group 1");
        let b = session.add_group("Group 2");
        assert_eq!(a, GroupId(1));
        assert_eq!(b, GroupId(2));

        session.remove_group(a).unwrap();
        let c = session.add_group("Group 3");
        assert_eq!(c, GroupId(3));
        assert_eq!(session.group_count(), 2);
    }

    #[test]
    fn remove_unknown_group_fails() {
        let mut session = make_session();
        let err = session.remove_group(GroupId(7)).unwrap_err();
        assert_eq!(err, PlanError::GroupNotFound(GroupId(7)));
    }

    #[test]
    fn person_lookups_scan_all_groups() {
        let mut session = make_session();
        let a = session.add_group("Group 1");
        let b = session.add_group("Group 2");
        session.group_mut(b).unwrap().add_member(PersonId(5));
        session
            .group_mut(a)
            .unwrap()
            .place_supervisor(Slot::Tertiary, PersonId(9));

        assert_eq!(session.participant_group(PersonId(5)), Some(b));
        assert_eq!(session.participant_group(PersonId(6)), None);
        assert_eq!(session.supervisor_post(PersonId(9)), Some((a, Slot::Tertiary)));
        assert_eq!(session.supervisor_post(PersonId(5)), None);
    }

    #[test]
    fn snapshot_restore_round_trip() {
        let mut session = make_session();
        let a = session.add_group("Group 1");
        session.group_mut(a).unwrap().add_member(PersonId(1));
        session.available_participants.insert(PersonId(1));

        let before = session.snapshot();
        session.group_mut(a).unwrap().remove_member(PersonId(1));
        session.available_participants.clear();
        assert_ne!(session.snapshot(), before);

        session.restore(&before);
        assert_eq!(session.snapshot(), before);
        assert!(session.group(a).unwrap().has_member(PersonId(1)));
    }

    #[test]
    fn restore_keeps_id_counter_monotonic() {
        let mut session = make_session();
        session.add_group("Group 1");
        let before = session.snapshot();
        session.add_group("Group 2");
        session.restore(&before);

        let next = session.add_group("Group 3");
        assert_eq!(next, GroupId(3));
    }

    #[test]
    fn ordering_views() {
        let mut roster = Roster::new();
        roster.add_participant(Participant::new(PersonId(1), "A", 8));
        roster.add_participant(Participant::new(PersonId(2), "B", 2));
        roster.add_participant(Participant::new(PersonId(3), "C", 2));

        let mut session = make_session();
        let a = session.add_group("Blue");
        let b = session.add_group("Amber");
        session.group_mut(a).unwrap().add_member(PersonId(1));
        session.group_mut(b).unwrap().add_member(PersonId(2));
        session.group_mut(b).unwrap().add_member(PersonId(3));

        assert_eq!(session.sorted_group_ids(&roster), vec![b, a]); // label

        session.ordering = GroupOrdering::ByFitness;
        assert_eq!(session.sorted_group_ids(&roster), vec![a, b]);

        session.ordering = GroupOrdering::BySize;
        assert_eq!(session.sorted_group_ids(&roster), vec![b, a]);
    }

    #[test]
    fn past_is_strict() {
        let session = make_session();
        assert!(!session.is_past(session.starts_at));
        assert!(session.is_past(session.starts_at + chrono::Duration::minutes(1)));
        assert!(!session.is_past(session.starts_at - chrono::Duration::minutes(1)));
    }

    #[test]
    fn session_survives_serialization() {
        let mut session = make_session();
        let g = session.add_group("Group 1");
        session.group_mut(g).unwrap().add_member(PersonId(5));
        session
            .group_mut(g)
            .unwrap()
            .place_supervisor(Slot::Leader, PersonId(9));
        session.available_participants.insert(PersonId(5));
        session.ordering = GroupOrdering::ByFitness;

        let json = serde_json::to_string(&session).unwrap();
        let restored: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, session);
        assert_eq!(restored.next_group_id, 2);
    }
}
