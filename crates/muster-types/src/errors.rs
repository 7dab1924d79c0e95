//! Error types for planning operations

use crate::{GroupId, PersonId};

/// Errors that can occur in planning operations
///
/// Only precondition violations live here; soft-constraint violations go
/// to the [`PlanJournal`](crate::PlanJournal) instead. Every operation
/// returning one of these rejects before mutating anything.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    #[error("Group not found: {0}")]
    GroupNotFound(GroupId),

    #[error("Unknown participant: {0}")]
    UnknownParticipant(PersonId),

    #[error("Unknown supervisor: {0}")]
    UnknownSupervisor(PersonId),

    #[error("Participant {0} is not assigned to any group")]
    ParticipantNotAssigned(PersonId),

    #[error("Supervisor {0} holds no post")]
    SupervisorNotPosted(PersonId),

    #[error("Cannot split a group of {0} members")]
    SplitTooSmall(usize),

    #[error("Cannot merge a group into itself")]
    MergeSelf,
}

/// Result type alias for planning operations
pub type PlanResult<T> = Result<T, PlanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_render_for_display() {
        assert_eq!(
            PlanError::GroupNotFound(GroupId(3)).to_string(),
            "Group not found: 3"
        );
        assert_eq!(
            PlanError::SplitTooSmall(1).to_string(),
            "Cannot split a group of 1 members"
        );
        assert_eq!(
            PlanError::MergeSelf.to_string(),
            "Cannot merge a group into itself"
        );
    }
}
