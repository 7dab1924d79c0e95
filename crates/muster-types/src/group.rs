//! Groups: the mutable unit of planning
//!
//! A group holds a set of participant members and up to three named
//! supervisor positions plus an open-ended extras set. Ids are assigned
//! at creation and never reused; the label is display-only and survives
//! every repair pass.

use crate::{PersonId, Roster};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Unique identifier for a group within a session
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GroupId(pub u32);

impl GroupId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The four supervisor positions of a group
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Slot {
    /// Qualification-gated lead position
    Leader,
    /// Second position
    Secondary,
    /// Third position
    Tertiary,
    /// Any position beyond the named three
    Extra,
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Slot::Leader => write!(f, "leader"),
            Slot::Secondary => write!(f, "secondary"),
            Slot::Tertiary => write!(f, "tertiary"),
            Slot::Extra => write!(f, "extra"),
        }
    }
}

/// A labeled bucket of members plus supervisor positions
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Group {
    /// Unique within a session, never reused
    pub id: GroupId,
    /// Display name; not identity
    pub label: String,
    /// Lead supervisor (qualification-gated, softly)
    pub leader: Option<PersonId>,
    /// Second supervisor
    pub secondary: Option<PersonId>,
    /// Third supervisor
    pub tertiary: Option<PersonId>,
    /// Supervisors beyond the named positions
    pub extras: BTreeSet<PersonId>,
    /// Participant members
    pub members: BTreeSet<PersonId>,
    /// Target fitness of this group; derived from members when unset
    pub balance_tag: Option<i32>,
}

impl Group {
    pub fn new(id: GroupId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            leader: None,
            secondary: None,
            tertiary: None,
            extras: BTreeSet::new(),
            members: BTreeSet::new(),
            balance_tag: None,
        }
    }

    pub fn with_balance_tag(mut self, tag: i32) -> Self {
        self.balance_tag = Some(tag);
        self
    }

    // --- Supervisor positions ---

    /// Occupant of a named position (`None` for `Slot::Extra`)
    pub fn occupant(&self, slot: Slot) -> Option<PersonId> {
        match slot {
            Slot::Leader => self.leader,
            Slot::Secondary => self.secondary,
            Slot::Tertiary => self.tertiary,
            Slot::Extra => None,
        }
    }

    /// Place a supervisor into a position. For a named position the
    /// previous occupant, if any, is returned; placing into `Extra`
    /// inserts into the extras set.
    pub fn place_supervisor(&mut self, slot: Slot, id: PersonId) -> Option<PersonId> {
        match slot {
            Slot::Leader => self.leader.replace(id),
            Slot::Secondary => self.secondary.replace(id),
            Slot::Tertiary => self.tertiary.replace(id),
            Slot::Extra => {
                self.extras.insert(id);
                None
            }
        }
    }

    /// Remove a supervisor from whatever position they hold
    pub fn remove_supervisor(&mut self, id: PersonId) -> Option<Slot> {
        if self.leader == Some(id) {
            self.leader = None;
            return Some(Slot::Leader);
        }
        if self.secondary == Some(id) {
            self.secondary = None;
            return Some(Slot::Secondary);
        }
        if self.tertiary == Some(id) {
            self.tertiary = None;
            return Some(Slot::Tertiary);
        }
        if self.extras.remove(&id) {
            return Some(Slot::Extra);
        }
        None
    }

    /// Position held by a supervisor in this group, if any
    pub fn slot_of(&self, id: PersonId) -> Option<Slot> {
        if self.leader == Some(id) {
            Some(Slot::Leader)
        } else if self.secondary == Some(id) {
            Some(Slot::Secondary)
        } else if self.tertiary == Some(id) {
            Some(Slot::Tertiary)
        } else if self.extras.contains(&id) {
            Some(Slot::Extra)
        } else {
            None
        }
    }

    pub fn has_supervisor(&self, id: PersonId) -> bool {
        self.slot_of(id).is_some()
    }

    /// All supervisors: leader, secondary, tertiary, then extras in id order
    pub fn supervisors(&self) -> Vec<PersonId> {
        self.leader
            .into_iter()
            .chain(self.secondary)
            .chain(self.tertiary)
            .chain(self.extras.iter().copied())
            .collect()
    }

    /// Count of filled positions, extras included
    pub fn filled_role_count(&self) -> usize {
        self.leader.iter().count()
            + self.secondary.iter().count()
            + self.tertiary.iter().count()
            + self.extras.len()
    }

    /// Whether leader, secondary, and tertiary are all filled
    pub fn fully_staffed(&self) -> bool {
        self.leader.is_some() && self.secondary.is_some() && self.tertiary.is_some()
    }

    // --- Members ---

    pub fn add_member(&mut self, id: PersonId) -> bool {
        self.members.insert(id)
    }

    pub fn remove_member(&mut self, id: PersonId) -> bool {
        self.members.remove(&id)
    }

    pub fn has_member(&self, id: PersonId) -> bool {
        self.members.contains(&id)
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    // --- Fitness ---

    /// Rounded mean fitness of current members, if any are known
    pub fn mean_member_fitness(&self, roster: &Roster) -> Option<i32> {
        let levels: Vec<i32> = self
            .members
            .iter()
            .filter_map(|id| roster.participant_fitness(*id))
            .collect();
        if levels.is_empty() {
            return None;
        }
        let sum: i64 = levels.iter().map(|l| *l as i64).sum();
        Some((sum as f64 / levels.len() as f64).round() as i32)
    }

    /// The group's representative fitness: the balance tag when set,
    /// otherwise the member mean, otherwise 0.
    pub fn fitness_score(&self, roster: &Roster) -> i32 {
        self.balance_tag
            .or_else(|| self.mean_member_fitness(roster))
            .unwrap_or(0)
    }
}
