//! Supervisor allocation
//!
//! `rebalance_supervisors` redeals every post from scratch across the
//! whole session; `normalize_roles` is the local cleanup that keeps one
//! group's positions canonical after an edit. Both treat the leader
//! qualification floor as soft: an unqualified leader is assigned and
//! warned about rather than leaving the position open.

use muster_types::{
    Group, GroupId, PersonId, PlanJournal, PlannerSettings, Roster, Session, Slot,
};
use std::collections::VecDeque;
use tracing::{debug, info, warn};

/// What a rebalance accomplished
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RebalanceSummary {
    /// Supervisors placed as a group's fourth or later position
    pub extra_assignments: Vec<(PersonId, GroupId)>,
    /// Whether every group ended with leader, secondary, and tertiary
    pub fully_staffed: bool,
}

/// Redeal supervisor posts across the session.
///
/// Qualified sitting leaders are preserved; every other post is cleared
/// and dealt again from the available pool. Leaders are dealt to every
/// group before any group receives a second supervisor, and thereafter
/// the emptiest group always receives next, so no group reaches four
/// posts while another waits below three.
pub fn rebalance_supervisors(
    session: &mut Session,
    roster: &Roster,
    settings: &PlannerSettings,
    journal: &mut PlanJournal,
) -> RebalanceSummary {
    let mut summary = RebalanceSummary::default();
    let floor = settings.min_leader_level;

    // Strongest group first; order is fixed for the whole redeal.
    let order = group_deal_order(session, roster);
    let rank = |id: GroupId| order.iter().position(|g| *g == id).unwrap_or(usize::MAX);

    // Keep qualified leaders, clear everything else.
    let mut preserved: Vec<PersonId> = Vec::new();
    for group in &mut session.groups {
        if let Some(leader) = group.leader {
            let keeps = roster
                .supervisor(leader)
                .map(|s| s.qualifies_for_leader(floor))
                .unwrap_or(floor.is_none());
            if keeps {
                preserved.push(leader);
            } else {
                group.leader = None;
            }
        }
        group.secondary = None;
        group.tertiary = None;
        group.extras.clear();
    }

    let mut pool = assignable_pool(session, roster, &preserved);
    debug!(
        pool = pool.len(),
        preserved = preserved.len(),
        "Supervisor redeal starting"
    );

    // Leader pass: every group gets a leader before anyone doubles up.
    for group_id in &order {
        if pool.is_empty() {
            break;
        }
        let needs_leader = session
            .group(*group_id)
            .map(|g| g.leader.is_none())
            .unwrap_or(false);
        if !needs_leader {
            continue;
        }
        let Some(pick) = pick_leader(&mut pool, roster, floor) else {
            continue;
        };
        if let Some(group) = session.group_mut(*group_id) {
            group.place_supervisor(Slot::Leader, pick);
            let qualifies = roster
                .supervisor(pick)
                .map(|s| s.qualifies_for_leader(floor))
                .unwrap_or(floor.is_none());
            if !qualifies {
                journal.warn(format!(
                    "Group \"{}\": leader {} is below the minimum level",
                    group.label, pick
                ));
            }
            debug!(group = %group_id, supervisor = %pick, "Leader assigned");
        }
    }

    // Fairness pass: always feed the emptiest group next.
    while let Some(next) = pool.pop_front() {
        let Some(target) = session
            .groups
            .iter()
            .map(|g| (g.filled_role_count(), rank(g.id), g.id))
            .min()
            .map(|(_, _, id)| id)
        else {
            break;
        };
        let Some(group) = session.group_mut(target) else {
            break;
        };
        let count = group.filled_role_count();
        let slot = match count {
            0 | 1 => {
                if group.secondary.is_none() {
                    Slot::Secondary
                } else {
                    Slot::Tertiary
                }
            }
            2 => {
                if group.tertiary.is_none() {
                    Slot::Tertiary
                } else {
                    Slot::Extra
                }
            }
            _ => Slot::Extra,
        };
        group.place_supervisor(slot, next);
        if slot == Slot::Extra && count >= 3 {
            summary.extra_assignments.push((next, target));
        }
        debug!(group = %target, supervisor = %next, slot = %slot, "Post assigned");
    }

    summary.fully_staffed = session.groups.iter().all(Group::fully_staffed);
    if !summary.fully_staffed {
        warn!("Supervisor pool exhausted before every group was staffed");
        journal.warn("Not enough supervisors to fully staff every group");
    }
    info!(
        extras = summary.extra_assignments.len(),
        fully_staffed = summary.fully_staffed,
        "Supervisor redeal complete"
    );
    summary
}

/// Make one group's positions canonical. Returns whether anything moved.
///
/// Tertiary slides up into an open secondary, and an open leader position
/// is filled by promoting the first qualifying supervisor from secondary,
/// tertiary, then extras. With no qualification floor enforced, every
/// supervisor qualifies. Running it twice never changes anything further.
pub fn normalize_roles(group: &mut Group, roster: &Roster, settings: &PlannerSettings) -> bool {
    let floor = settings.min_leader_level;
    let mut changed = false;

    if group.secondary.is_none() && group.tertiary.is_some() {
        group.secondary = group.tertiary.take();
        changed = true;
    }

    if group.leader.is_none() {
        let candidates: Vec<(PersonId, Slot)> = group
            .secondary
            .map(|id| (id, Slot::Secondary))
            .into_iter()
            .chain(group.tertiary.map(|id| (id, Slot::Tertiary)))
            .chain(group.extras.iter().map(|id| (*id, Slot::Extra)))
            .collect();
        let promoted = candidates.into_iter().find(|(id, _)| {
            roster
                .supervisor(*id)
                .map(|s| s.qualifies_for_leader(floor))
                .unwrap_or(floor.is_none())
        });
        if let Some((id, from)) = promoted {
            match from {
                Slot::Secondary => group.secondary = None,
                Slot::Tertiary => group.tertiary = None,
                Slot::Extra => {
                    group.extras.remove(&id);
                }
                Slot::Leader => {}
            }
            group.leader = Some(id);
            if group.secondary.is_none() && group.tertiary.is_some() {
                group.secondary = group.tertiary.take();
            }
            changed = true;
        }
    }

    changed
}

/// Deal order: strongest group first, then fuller, then lowest id
fn group_deal_order(session: &Session, roster: &Roster) -> Vec<GroupId> {
    let mut ids: Vec<GroupId> = session.groups.iter().map(|g| g.id).collect();
    ids.sort_by_key(|id| {
        let group = session.group(*id);
        let score = group.map(|g| g.fitness_score(roster)).unwrap_or(0);
        let size = group.map(|g| g.member_count()).unwrap_or(0);
        (std::cmp::Reverse(score), std::cmp::Reverse(size), *id)
    });
    ids
}

/// Available supervisors known to the roster, strongest first, minus the
/// preserved leaders. Ties break on qualification, then name, then id.
fn assignable_pool(
    session: &Session,
    roster: &Roster,
    preserved: &[PersonId],
) -> VecDeque<PersonId> {
    let mut pool: Vec<&muster_types::Supervisor> = session
        .available_supervisors
        .iter()
        .filter(|id| !preserved.contains(id))
        .filter_map(|id| roster.supervisor(*id))
        .collect();
    pool.sort_by_key(|s| {
        (
            std::cmp::Reverse(s.fitness),
            std::cmp::Reverse(s.qualification.level().unwrap_or(i32::MIN)),
            std::cmp::Reverse(s.name.clone()),
            s.id,
        )
    });
    pool.into_iter().map(|s| s.id).collect()
}

/// Choose a leader from the pool front.
///
/// Up to three candidates are drawn; when a floor is enforced and none of
/// them meets it, the nearest qualifying supervisor further back is drawn
/// as a fourth. Best candidate wins (qualifying, then level, then
/// fitness); the rest go back to the front in their original order.
fn pick_leader(
    pool: &mut VecDeque<PersonId>,
    roster: &Roster,
    floor: Option<i32>,
) -> Option<PersonId> {
    let mut drawn: Vec<PersonId> = Vec::new();
    for _ in 0..3 {
        match pool.pop_front() {
            Some(id) => drawn.push(id),
            None => break,
        }
    }
    if drawn.is_empty() {
        return None;
    }

    let qualifies = |id: PersonId| {
        roster
            .supervisor(id)
            .map(|s| s.qualifies_for_leader(floor))
            .unwrap_or(floor.is_none())
    };

    if floor.is_some() && !drawn.iter().any(|id| qualifies(*id)) {
        if let Some(pos) = pool.iter().position(|id| qualifies(*id)) {
            if let Some(id) = pool.remove(pos) {
                drawn.push(id);
            }
        }
    }

    let best = drawn
        .iter()
        .enumerate()
        .max_by_key(|(pos, id)| {
            let level = roster.supervisor(**id).and_then(|s| s.qualification.level());
            let fitness = roster.supervisor(**id).map(|s| s.fitness).unwrap_or(0);
            (qualifies(**id), level, fitness, std::cmp::Reverse(*pos))
        })
        .map(|(pos, _)| pos)?;
    let pick = drawn.remove(best);

    for id in drawn.into_iter().rev() {
        pool.push_front(id);
    }
    Some(pick)
}
