//! People: participants and supervisors
//!
//! Both pools share one normalized identifier type. Records are owned
//! by the roster; the engine only ever reads them.

use serde::{Deserialize, Serialize};

/// Unique identifier for a person (participant or supervisor)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PersonId(pub u32);

impl PersonId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PersonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for PersonId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// A participant to be placed into a group
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    /// Stable unique identity
    pub id: PersonId,
    /// Display name
    pub name: String,
    /// Bounded skill/fitness level used for balancing
    pub fitness: i32,
}

impl Participant {
    pub fn new(id: PersonId, name: impl Into<String>, fitness: i32) -> Self {
        Self {
            id,
            name: name.into(),
            fitness,
        }
    }
}

/// Supervisor qualification: a graded level or the distinguished
/// "not applicable" sentinel for staff who never lead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Qualification {
    /// Graded qualification level (higher is more qualified)
    Level(i32),
    /// No leader qualification
    #[default]
    NotApplicable,
}

impl Qualification {
    /// The graded level, if any
    pub fn level(&self) -> Option<i32> {
        match self {
            Qualification::Level(level) => Some(*level),
            Qualification::NotApplicable => None,
        }
    }

    /// Whether this qualification meets a minimum level.
    /// `NotApplicable` never meets a minimum.
    pub fn meets(&self, minimum: i32) -> bool {
        match self {
            Qualification::Level(level) => *level >= minimum,
            Qualification::NotApplicable => false,
        }
    }
}

impl std::fmt::Display for Qualification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Qualification::Level(level) => write!(f, "level {}", level),
            Qualification::NotApplicable => write!(f, "n/a"),
        }
    }
}

/// A supervisor who can staff group positions
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Supervisor {
    /// Stable unique identity
    pub id: PersonId,
    /// Display name
    pub name: String,
    /// Bounded skill/fitness level
    pub fitness: i32,
    /// Leader qualification
    pub qualification: Qualification,
}

impl Supervisor {
    pub fn new(id: PersonId, name: impl Into<String>, fitness: i32) -> Self {
        Self {
            id,
            name: name.into(),
            fitness,
            qualification: Qualification::NotApplicable,
        }
    }

    pub fn with_qualification(mut self, qualification: Qualification) -> Self {
        self.qualification = qualification;
        self
    }

    /// Whether this supervisor can hold the leader position under the
    /// given floor. `None` means the floor is not enforced.
    pub fn qualifies_for_leader(&self, minimum: Option<i32>) -> bool {
        match minimum {
            Some(floor) => self.qualification.meets(floor),
            None => true,
        }
    }
}
