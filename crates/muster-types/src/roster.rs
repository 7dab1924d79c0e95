//! Roster: id-keyed lookup over the two people pools
//!
//! The roster is supplied by the caller and read-only to every planning
//! operation. It stores everyone who exists, not who attends — the
//! session's availability sets track attendance.

use crate::{Participant, PersonId, Supervisor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lookup index over participant and supervisor records
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    /// All participant records, keyed by id
    pub participants: BTreeMap<PersonId, Participant>,
    /// All supervisor records, keyed by id
    pub supervisors: BTreeMap<PersonId, Supervisor>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_participant(&mut self, participant: Participant) {
        self.participants.insert(participant.id, participant);
    }

    pub fn add_supervisor(&mut self, supervisor: Supervisor) {
        self.supervisors.insert(supervisor.id, supervisor);
    }

    pub fn participant(&self, id: PersonId) -> Option<&Participant> {
        self.participants.get(&id)
    }

    pub fn supervisor(&self, id: PersonId) -> Option<&Supervisor> {
        self.supervisors.get(&id)
    }

    /// Fitness of a participant, if known
    pub fn participant_fitness(&self, id: PersonId) -> Option<i32> {
        self.participant(id).map(|p| p.fitness)
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    pub fn supervisor_count(&self) -> usize {
        self.supervisors.len()
    }

    pub fn iter_participants(&self) -> impl Iterator<Item = &Participant> {
        self.participants.values()
    }

    pub fn iter_supervisors(&self) -> impl Iterator<Item = &Supervisor> {
        self.supervisors.values()
    }
}
