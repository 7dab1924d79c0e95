//! Structural edit operations
//!
//! The operations behind drag-drop and the group context menu. Every
//! placement removes the person from wherever they currently sit first,
//! so a participant is never in two groups and a supervisor never holds
//! two posts. Capacity, spread, and qualification are soft here: the
//! edit goes through and the journal carries the warning.

use crate::{check_group_compliance, fold_group, normalize_roles};
use chrono::{DateTime, Utc};
use muster_types::{
    ComplianceIssue, Group, GroupId, PersonId, PlanError, PlanJournal, PlanResult,
    PlannerSettings, Roster, Session, Slot,
};
use std::cmp::Reverse;
use tracing::debug;

/// What an attendance toggle did beyond flipping the availability flag
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttendanceEffect {
    /// Only the availability pool changed
    PoolOnly,
    /// The person was also removed from their group (absent on a
    /// session that has not started yet)
    Evicted {
        group: GroupId,
        /// The post held, for supervisors
        slot: Option<Slot>,
    },
}

/// Put a participant into a group, moving them out of any other group
/// first. Overbooking and spread violations go to the journal.
pub fn place_participant(
    session: &mut Session,
    roster: &Roster,
    settings: &PlannerSettings,
    pid: PersonId,
    group_id: GroupId,
    journal: &mut PlanJournal,
) -> PlanResult<()> {
    if roster.participant(pid).is_none() {
        return Err(PlanError::UnknownParticipant(pid));
    }
    if session.group(group_id).is_none() {
        return Err(PlanError::GroupNotFound(group_id));
    }

    if session.participant_group(pid) == Some(group_id) {
        return Ok(());
    }
    withdraw_participant(session, pid);
    if let Some(group) = session.group_mut(group_id) {
        group.add_member(pid);
    }
    debug!(participant = %pid, group = %group_id, "Participant placed");

    warn_soft_violations(session, roster, settings, group_id, journal);
    Ok(())
}

/// Take a participant out of whatever group holds them
pub fn withdraw_participant(session: &mut Session, pid: PersonId) -> Option<GroupId> {
    let group_id = session.participant_group(pid)?;
    session.group_mut(group_id)?.remove_member(pid);
    debug!(participant = %pid, group = %group_id, "Participant withdrawn");
    Some(group_id)
}

/// Put a supervisor into a post, vacating any post they already hold.
/// A named slot's sitting occupant is displaced into the group's extras,
/// never dropped.
pub fn place_supervisor(
    session: &mut Session,
    roster: &Roster,
    settings: &PlannerSettings,
    sid: PersonId,
    group_id: GroupId,
    slot: Slot,
    journal: &mut PlanJournal,
) -> PlanResult<()> {
    if roster.supervisor(sid).is_none() {
        return Err(PlanError::UnknownSupervisor(sid));
    }
    if session.group(group_id).is_none() {
        return Err(PlanError::GroupNotFound(group_id));
    }

    withdraw_supervisor(session, sid);
    let Some(group) = session.group_mut(group_id) else {
        return Err(PlanError::GroupNotFound(group_id));
    };
    if let Some(displaced) = group.place_supervisor(slot, sid) {
        group.place_supervisor(Slot::Extra, displaced);
        journal.note(format!(
            "Moved supervisor {displaced} to the extras of \"{}\"",
            group.label
        ));
    }
    debug!(supervisor = %sid, group = %group_id, slot = %slot, "Supervisor placed");

    if slot == Slot::Leader {
        warn_leader_below_floor(session, roster, settings, group_id, sid, journal);
    }
    Ok(())
}

/// Vacate a supervisor's post, wherever it is
pub fn withdraw_supervisor(session: &mut Session, sid: PersonId) -> Option<(GroupId, Slot)> {
    let (group_id, slot) = session.supervisor_post(sid)?;
    session.group_mut(group_id)?.remove_supervisor(sid);
    debug!(supervisor = %sid, group = %group_id, slot = %slot, "Supervisor withdrawn");
    Some((group_id, slot))
}

/// Exchange the groups of two assigned participants
pub fn swap_participants(session: &mut Session, a: PersonId, b: PersonId) -> PlanResult<()> {
    let group_a = session
        .participant_group(a)
        .ok_or(PlanError::ParticipantNotAssigned(a))?;
    let group_b = session
        .participant_group(b)
        .ok_or(PlanError::ParticipantNotAssigned(b))?;
    if group_a == group_b {
        return Ok(());
    }
    if let Some(group) = session.group_mut(group_a) {
        group.remove_member(a);
        group.add_member(b);
    }
    if let Some(group) = session.group_mut(group_b) {
        group.remove_member(b);
        group.add_member(a);
    }
    debug!(first = %a, second = %b, "Participants swapped");
    Ok(())
}

/// Exchange the posts of two assigned supervisors
pub fn swap_supervisors(session: &mut Session, a: PersonId, b: PersonId) -> PlanResult<()> {
    let (group_a, slot_a) = session
        .supervisor_post(a)
        .ok_or(PlanError::SupervisorNotPosted(a))?;
    let (group_b, slot_b) = session
        .supervisor_post(b)
        .ok_or(PlanError::SupervisorNotPosted(b))?;
    if a == b {
        return Ok(());
    }
    if let Some(group) = session.group_mut(group_a) {
        group.remove_supervisor(a);
    }
    if let Some(group) = session.group_mut(group_b) {
        group.remove_supervisor(b);
        group.place_supervisor(slot_b, a);
    }
    if let Some(group) = session.group_mut(group_a) {
        group.place_supervisor(slot_a, b);
    }
    debug!(first = %a, second = %b, "Supervisors swapped");
    Ok(())
}

/// Split one group into two balanced halves.
///
/// Members are ranked by fitness and dealt in a snake pattern so both
/// halves end near the original mean. Supervisors alternate between the
/// halves by qualification, and each half is normalized so a qualifying
/// supervisor ends up leading it. The halves take the original's spot in
/// the session order with fresh ids and derived balance tags.
pub fn split_group(
    session: &mut Session,
    roster: &Roster,
    settings: &PlannerSettings,
    group_id: GroupId,
) -> PlanResult<(GroupId, GroupId)> {
    let position = session
        .group_position(group_id)
        .ok_or(PlanError::GroupNotFound(group_id))?;
    let members = session
        .group(group_id)
        .map(Group::member_count)
        .unwrap_or(0);
    if members < 2 {
        return Err(PlanError::SplitTooSmall(members));
    }
    let original = session.remove_group(group_id)?;

    let id_a = GroupId(session.next_group_id);
    let id_b = GroupId(session.next_group_id + 1);
    session.next_group_id += 2;
    let mut half_a = Group::new(id_a, format!("{} A", original.label));
    let mut half_b = Group::new(id_b, format!("{} B", original.label));

    // Snake deal over the fitness ranking: ranks 0,3,4,7,... go left,
    // 1,2,5,6,... go right, balancing the two means.
    let mut ranked: Vec<PersonId> = original.members.iter().copied().collect();
    ranked.sort_by_key(|pid| (Reverse(roster.participant_fitness(*pid).unwrap_or(0)), *pid));
    for (rank, pid) in ranked.into_iter().enumerate() {
        if (rank + 1) / 2 % 2 == 0 {
            half_a.add_member(pid);
        } else {
            half_b.add_member(pid);
        }
    }

    let mut staff = original.supervisors();
    staff.sort_by_key(|sid| {
        let record = roster.supervisor(*sid);
        let level = record.and_then(|s| s.qualification.level());
        let fitness = record.map(|s| s.fitness).unwrap_or(0);
        (Reverse(level.unwrap_or(i32::MIN)), Reverse(fitness), *sid)
    });
    for (i, sid) in staff.into_iter().enumerate() {
        let half = if i % 2 == 0 { &mut half_a } else { &mut half_b };
        let slot = if half.secondary.is_none() {
            Slot::Secondary
        } else if half.tertiary.is_none() {
            Slot::Tertiary
        } else {
            Slot::Extra
        };
        half.place_supervisor(slot, sid);
    }
    normalize_roles(&mut half_a, roster, settings);
    normalize_roles(&mut half_b, roster, settings);

    session.groups.insert(position, half_a);
    session.groups.insert(position + 1, half_b);
    debug!(original = %group_id, left = %id_a, right = %id_b, "Group split");
    Ok((id_a, id_b))
}

/// Merge one group into another, keeping everything the target already
/// has. Source supervisors fill the target's open named positions
/// (leader included) and spill into extras; members are unioned; the
/// source group is deleted.
pub fn merge_groups(
    session: &mut Session,
    roster: &Roster,
    settings: &PlannerSettings,
    source: GroupId,
    target: GroupId,
    journal: &mut PlanJournal,
) -> PlanResult<()> {
    if source == target {
        return Err(PlanError::MergeSelf);
    }
    if session.group(source).is_none() {
        return Err(PlanError::GroupNotFound(source));
    }
    let source_label = session
        .group(source)
        .map(|g| g.label.clone())
        .unwrap_or_default();
    let target_label = session
        .group(target)
        .map(|g| g.label.clone())
        .ok_or(PlanError::GroupNotFound(target))?;

    let placements = fold_group(session, source, target, true)?;
    journal.note(format!(
        "Merged group \"{source_label}\" into \"{target_label}\""
    ));
    for (sid, slot) in placements {
        if slot == Slot::Leader {
            warn_leader_below_floor(session, roster, settings, target, sid, journal);
        }
    }
    warn_soft_violations(session, roster, settings, target, journal);
    debug!(source = %source, target = %target, "Groups merged");
    Ok(())
}

/// Flip a participant's availability. Marking someone absent before the
/// session starts also pulls them out of their group; once the session
/// is in the past the assignment is kept as the historical record.
pub fn set_participant_attendance(
    session: &mut Session,
    pid: PersonId,
    present: bool,
    now: DateTime<Utc>,
) -> AttendanceEffect {
    if present {
        session.available_participants.insert(pid);
        return AttendanceEffect::PoolOnly;
    }
    session.available_participants.remove(&pid);
    if session.is_past(now) {
        return AttendanceEffect::PoolOnly;
    }
    match withdraw_participant(session, pid) {
        Some(group) => AttendanceEffect::Evicted { group, slot: None },
        None => AttendanceEffect::PoolOnly,
    }
}

/// Supervisor counterpart of [`set_participant_attendance`]. The caller
/// is expected to normalize a group that loses a post this way.
pub fn set_supervisor_attendance(
    session: &mut Session,
    sid: PersonId,
    present: bool,
    now: DateTime<Utc>,
) -> AttendanceEffect {
    if present {
        session.available_supervisors.insert(sid);
        return AttendanceEffect::PoolOnly;
    }
    session.available_supervisors.remove(&sid);
    if session.is_past(now) {
        return AttendanceEffect::PoolOnly;
    }
    match withdraw_supervisor(session, sid) {
        Some((group, slot)) => AttendanceEffect::Evicted {
            group,
            slot: Some(slot),
        },
        None => AttendanceEffect::PoolOnly,
    }
}

/// Journal the capacity and spread state of a group after an edit
fn warn_soft_violations(
    session: &Session,
    roster: &Roster,
    settings: &PlannerSettings,
    group_id: GroupId,
    journal: &mut PlanJournal,
) {
    let Some(group) = session.group(group_id) else {
        return;
    };
    let report = check_group_compliance(group, roster, settings);
    for issue in &report.issues {
        match issue {
            ComplianceIssue::OverCapacity { .. } | ComplianceIssue::SpreadExceeded { .. } => {
                journal.warn(format!("Group \"{}\": {issue}", group.label));
            }
            _ => {}
        }
    }
}

fn warn_leader_below_floor(
    session: &Session,
    roster: &Roster,
    settings: &PlannerSettings,
    group_id: GroupId,
    sid: PersonId,
    journal: &mut PlanJournal,
) {
    let Some(minimum) = settings.min_leader_level else {
        return;
    };
    let qualifies = roster
        .supervisor(sid)
        .map(|s| s.qualifies_for_leader(Some(minimum)))
        .unwrap_or(false);
    if !qualifies {
        let label = session
            .group(group_id)
            .map(|g| g.label.as_str())
            .unwrap_or("");
        journal.warn(format!(
            "Group \"{label}\": leader {sid} is below the minimum level"
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use muster_types::{Participant, Qualification, Supervisor};

    fn setup() -> (Session, Roster, PlannerSettings) {
        let mut roster = Roster::new();
        for (id, fitness) in [(1, 9), (2, 7), (3, 4), (4, 2), (5, 5), (6, 5)] {
            roster.add_participant(Participant::new(PersonId(id), format!("P{id}"), fitness));
        }
        for (id, fitness, qualification) in [
            (20, 6, Qualification::Level(3)),
            (21, 5, Qualification::Level(2)),
            (22, 4, Qualification::Level(1)),
            (23, 3, Qualification::NotApplicable),
        ] {
            roster.add_supervisor(
                Supervisor::new(PersonId(id), format!("S{id}"), fitness)
                    .with_qualification(qualification),
            );
        }
        let session = Session::new(Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap());
        (session, roster, PlannerSettings::default())
    }

    #[test]
    fn placing_a_participant_moves_them() {
        let (mut session, roster, settings) = setup();
        let g1 = session.add_group("Group 1");
        let g2 = session.add_group("Group 2");
        let mut journal = PlanJournal::new();

        place_participant(&mut session, &roster, &settings, PersonId(1), g1, &mut journal)
            .unwrap();
        place_participant(&mut session, &roster, &settings, PersonId(1), g2, &mut journal)
            .unwrap();

        assert!(!session.group(g1).unwrap().has_member(PersonId(1)));
        assert!(session.group(g2).unwrap().has_member(PersonId(1)));
        assert_eq!(session.participant_group(PersonId(1)), Some(g2));
    }

    #[test]
    fn overbooking_is_warned_not_rejected() {
        let (mut session, roster, settings) = setup();
        let g = session.add_group("Group 1");
        session
            .group_mut(g)
            .unwrap()
            .place_supervisor(Slot::Leader, PersonId(20));
        let mut journal = PlanJournal::new();

        // Capacity 4; the fifth member overbooks.
        for pid in [3, 5, 6, 2, 1] {
            place_participant(&mut session, &roster, &settings, PersonId(pid), g, &mut journal)
                .unwrap();
        }

        assert_eq!(session.group(g).unwrap().member_count(), 5);
        assert!(journal
            .warnings()
            .any(|e| e.message.contains("exceed capacity")));
    }

    #[test]
    fn unknown_ids_are_rejected_before_any_change() {
        let (mut session, roster, settings) = setup();
        let g = session.add_group("Group 1");
        let mut journal = PlanJournal::new();

        assert_eq!(
            place_participant(&mut session, &roster, &settings, PersonId(99), g, &mut journal),
            Err(PlanError::UnknownParticipant(PersonId(99)))
        );
        assert_eq!(
            place_participant(
                &mut session,
                &roster,
                &settings,
                PersonId(1),
                GroupId(42),
                &mut journal
            ),
            Err(PlanError::GroupNotFound(GroupId(42)))
        );
        assert!(session.group(g).unwrap().is_empty());
        assert!(journal.is_empty());
    }

    #[test]
    fn placing_a_supervisor_displaces_the_occupant_to_extras() {
        let (mut session, roster, settings) = setup();
        let g = session.add_group("Group 1");
        session
            .group_mut(g)
            .unwrap()
            .place_supervisor(Slot::Leader, PersonId(21));
        let mut journal = PlanJournal::new();

        place_supervisor(
            &mut session,
            &roster,
            &settings,
            PersonId(20),
            g,
            Slot::Leader,
            &mut journal,
        )
        .unwrap();

        let group = session.group(g).unwrap();
        assert_eq!(group.leader, Some(PersonId(20)));
        assert_eq!(group.slot_of(PersonId(21)), Some(Slot::Extra));
        assert!(journal.entries().iter().any(|e| e.message.contains("extras")));
    }

    #[test]
    fn a_supervisor_never_holds_two_posts() {
        let (mut session, roster, settings) = setup();
        let g1 = session.add_group("Group 1");
        let g2 = session.add_group("Group 2");
        let mut journal = PlanJournal::new();

        place_supervisor(&mut session, &roster, &settings, PersonId(20), g1, Slot::Leader, &mut journal)
            .unwrap();
        place_supervisor(&mut session, &roster, &settings, PersonId(20), g2, Slot::Tertiary, &mut journal)
            .unwrap();

        assert_eq!(session.group(g1).unwrap().leader, None);
        assert_eq!(session.supervisor_post(PersonId(20)), Some((g2, Slot::Tertiary)));
    }

    #[test]
    fn below_floor_leader_placement_warns() {
        let (mut session, roster, settings) = setup();
        let g = session.add_group("Group 1");
        let mut journal = PlanJournal::new();

        place_supervisor(&mut session, &roster, &settings, PersonId(22), g, Slot::Leader, &mut journal)
            .unwrap();

        assert_eq!(session.group(g).unwrap().leader, Some(PersonId(22)));
        assert_eq!(journal.warning_count(), 1);
    }

    #[test]
    fn withdraw_reports_what_was_vacated() {
        let (mut session, roster, settings) = setup();
        let g = session.add_group("Group 1");
        let mut journal = PlanJournal::new();
        place_supervisor(&mut session, &roster, &settings, PersonId(20), g, Slot::Secondary, &mut journal)
            .unwrap();

        assert_eq!(
            withdraw_supervisor(&mut session, PersonId(20)),
            Some((g, Slot::Secondary))
        );
        assert_eq!(withdraw_supervisor(&mut session, PersonId(20)), None);
        assert_eq!(withdraw_participant(&mut session, PersonId(1)), None);
    }

    #[test]
    fn swapping_participants_exchanges_groups() {
        let (mut session, _, _) = setup();
        let g1 = session.add_group("Group 1");
        let g2 = session.add_group("Group 2");
        session.group_mut(g1).unwrap().add_member(PersonId(1));
        session.group_mut(g2).unwrap().add_member(PersonId(2));

        swap_participants(&mut session, PersonId(1), PersonId(2)).unwrap();

        assert_eq!(session.participant_group(PersonId(1)), Some(g2));
        assert_eq!(session.participant_group(PersonId(2)), Some(g1));

        assert_eq!(
            swap_participants(&mut session, PersonId(1), PersonId(3)),
            Err(PlanError::ParticipantNotAssigned(PersonId(3)))
        );
    }

    #[test]
    fn swapping_supervisors_exchanges_posts() {
        let (mut session, _, _) = setup();
        let g1 = session.add_group("Group 1");
        let g2 = session.add_group("Group 2");
        session
            .group_mut(g1)
            .unwrap()
            .place_supervisor(Slot::Leader, PersonId(20));
        session
            .group_mut(g2)
            .unwrap()
            .place_supervisor(Slot::Tertiary, PersonId(21));

        swap_supervisors(&mut session, PersonId(20), PersonId(21)).unwrap();

        assert_eq!(session.supervisor_post(PersonId(20)), Some((g2, Slot::Tertiary)));
        assert_eq!(session.supervisor_post(PersonId(21)), Some((g1, Slot::Leader)));

        assert_eq!(
            swap_supervisors(&mut session, PersonId(20), PersonId(23)),
            Err(PlanError::SupervisorNotPosted(PersonId(23)))
        );
    }

    #[test]
    fn split_deals_members_in_a_snake() {
        let (mut session, roster, settings) = setup();
        let g = session.add_group("Blue");
        for pid in [1, 2, 3, 4] {
            // fitness 9, 7, 4, 2
            session.group_mut(g).unwrap().add_member(PersonId(pid));
        }

        let (left, right) = split_group(&mut session, &roster, &settings, g).unwrap();

        assert!(session.group(g).is_none());
        let half_a = session.group(left).unwrap();
        let half_b = session.group(right).unwrap();
        assert_eq!(half_a.label, "Blue A");
        assert_eq!(half_b.label, "Blue B");
        // Ranks 0 and 3 (fitness 9 and 2) go left; 1 and 2 go right.
        assert!(half_a.has_member(PersonId(1)) && half_a.has_member(PersonId(4)));
        assert!(half_b.has_member(PersonId(2)) && half_b.has_member(PersonId(3)));
        // Both halves sit at the original mean.
        assert_eq!(half_a.mean_member_fitness(&roster), Some(6));
        assert_eq!(half_b.mean_member_fitness(&roster), Some(6));
    }

    #[test]
    fn split_replaces_the_original_in_place() {
        let (mut session, roster, settings) = setup();
        let before = session.add_group("Before");
        let g = session.add_group("Middle");
        let after = session.add_group("After");
        session.group_mut(g).unwrap().add_member(PersonId(1));
        session.group_mut(g).unwrap().add_member(PersonId(2));

        let (left, right) = split_group(&mut session, &roster, &settings, g).unwrap();

        let order: Vec<GroupId> = session.groups.iter().map(|g| g.id).collect();
        assert_eq!(order, vec![before, left, right, after]);
        // Fresh ids, never reused.
        assert_eq!(left, GroupId(4));
        assert_eq!(right, GroupId(5));
    }

    #[test]
    fn split_staff_alternate_and_each_half_normalizes() {
        let (mut session, roster, settings) = setup();
        let g = session.add_group("Blue");
        let group = session.group_mut(g).unwrap();
        group.add_member(PersonId(1));
        group.add_member(PersonId(2));
        group.place_supervisor(Slot::Leader, PersonId(21)); // level 2
        group.place_supervisor(Slot::Secondary, PersonId(20)); // level 3
        group.place_supervisor(Slot::Tertiary, PersonId(22)); // level 1

        let (left, right) = split_group(&mut session, &roster, &settings, g).unwrap();

        // Qualification order 20, 21, 22: the left half draws 20 and 22,
        // the right half draws 21. Qualifying supervisors end up leading.
        let half_a = session.group(left).unwrap();
        let half_b = session.group(right).unwrap();
        assert_eq!(half_a.leader, Some(PersonId(20)));
        assert_eq!(half_a.secondary, Some(PersonId(22)));
        assert_eq!(half_b.leader, Some(PersonId(21)));
    }

    #[test]
    fn split_rejects_tiny_groups_untouched() {
        let (mut session, roster, settings) = setup();
        let g = session.add_group("Tiny");
        session.group_mut(g).unwrap().add_member(PersonId(1));

        assert_eq!(
            split_group(&mut session, &roster, &settings, g),
            Err(PlanError::SplitTooSmall(1))
        );
        assert!(session.group(g).is_some());
        assert_eq!(session.group_count(), 1);

        assert_eq!(
            split_group(&mut session, &roster, &settings, GroupId(9)),
            Err(PlanError::GroupNotFound(GroupId(9)))
        );
    }

    #[test]
    fn manual_merge_fills_the_leader_position() {
        let (mut session, roster, settings) = setup();
        let source = session.add_group("Source");
        let target = session.add_group("Target");
        session
            .group_mut(source)
            .unwrap()
            .place_supervisor(Slot::Leader, PersonId(20));
        session.group_mut(source).unwrap().add_member(PersonId(1));
        session.group_mut(target).unwrap().add_member(PersonId(2));
        let mut journal = PlanJournal::new();

        merge_groups(&mut session, &roster, &settings, source, target, &mut journal).unwrap();

        assert!(session.group(source).is_none());
        let group = session.group(target).unwrap();
        assert_eq!(group.leader, Some(PersonId(20)));
        assert_eq!(group.member_count(), 2);
        assert_eq!(journal.warning_count(), 0);
    }

    #[test]
    fn manual_merge_rejects_self_and_unknown() {
        let (mut session, roster, settings) = setup();
        let g = session.add_group("Group 1");
        let mut journal = PlanJournal::new();

        assert_eq!(
            merge_groups(&mut session, &roster, &settings, g, g, &mut journal),
            Err(PlanError::MergeSelf)
        );
        assert_eq!(
            merge_groups(&mut session, &roster, &settings, g, GroupId(9), &mut journal),
            Err(PlanError::GroupNotFound(GroupId(9)))
        );
        assert_eq!(session.group_count(), 1);
    }

    #[test]
    fn absence_before_the_session_evicts() {
        let (mut session, _, _) = setup();
        let g = session.add_group("Group 1");
        session.group_mut(g).unwrap().add_member(PersonId(1));
        session.available_participants.insert(PersonId(1));
        let before = session.starts_at - chrono::Duration::hours(1);

        let effect = set_participant_attendance(&mut session, PersonId(1), false, before);

        assert_eq!(effect, AttendanceEffect::Evicted { group: g, slot: None });
        assert!(!session.available_participants.contains(&PersonId(1)));
        assert!(session.group(g).unwrap().is_empty());
    }

    #[test]
    fn absence_after_the_session_keeps_the_record() {
        let (mut session, _, _) = setup();
        let g = session.add_group("Group 1");
        session
            .group_mut(g)
            .unwrap()
            .place_supervisor(Slot::Leader, PersonId(20));
        session.available_supervisors.insert(PersonId(20));
        let after = session.starts_at + chrono::Duration::hours(1);

        let effect = set_supervisor_attendance(&mut session, PersonId(20), false, after);

        assert_eq!(effect, AttendanceEffect::PoolOnly);
        assert!(!session.available_supervisors.contains(&PersonId(20)));
        assert_eq!(session.group(g).unwrap().leader, Some(PersonId(20)));
    }

    #[test]
    fn marking_present_only_feeds_the_pool() {
        let (mut session, _, _) = setup();
        let now = session.starts_at - chrono::Duration::hours(1);

        let effect = set_supervisor_attendance(&mut session, PersonId(21), true, now);

        assert_eq!(effect, AttendanceEffect::PoolOnly);
        assert!(session.available_supervisors.contains(&PersonId(21)));
    }
}
