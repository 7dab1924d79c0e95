//! Soft-constraint compliance reporting
//!
//! Planning never blocks on these; they describe how far a group sits
//! from the configured targets so a UI can badge it.

use crate::{GroupId, PersonId};

/// One way a group can violate a soft constraint
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComplianceIssue {
    /// More members than the filled supervisor positions account for
    OverCapacity { capacity: usize, members: usize },
    /// Leader sits below the qualification floor (or holds none)
    LeaderBelowMinimum {
        leader: PersonId,
        level: Option<i32>,
        minimum: i32,
    },
    /// Member fitness spread wider than tolerated
    SpreadExceeded { spread: i32, limit: i32 },
    /// Fewer members than the configured minimum size
    BelowMinimumSize { members: usize, minimum: i32 },
}

impl std::fmt::Display for ComplianceIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComplianceIssue::OverCapacity { capacity, members } => {
                write!(f, "{members} members exceed capacity {capacity}")
            }
            ComplianceIssue::LeaderBelowMinimum {
                leader,
                level,
                minimum,
            } => match level {
                Some(level) => write!(
                    f,
                    "leader {leader} holds level {level}, below minimum {minimum}"
                ),
                None => write!(f, "leader {leader} holds no level, minimum is {minimum}"),
            },
            ComplianceIssue::SpreadExceeded { spread, limit } => {
                write!(f, "fitness spread {spread} exceeds limit {limit}")
            }
            ComplianceIssue::BelowMinimumSize { members, minimum } => {
                write!(f, "{members} members, below minimum size {minimum}")
            }
        }
    }
}

/// All issues found on one group
#[derive(Clone, Debug, PartialEq)]
pub struct ComplianceReport {
    pub group: GroupId,
    pub issues: Vec<ComplianceIssue>,
}

impl ComplianceReport {
    pub fn clean(group: GroupId) -> Self {
        Self {
            group,
            issues: Vec::new(),
        }
    }

    pub fn is_compliant(&self) -> bool {
        self.issues.is_empty()
    }
}
