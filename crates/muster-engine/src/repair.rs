//! Undersized-group repair passes
//!
//! Both passes fold a too-small group into a compatible neighbor: the
//! neighbor keeps its identity and label, inherits the members, and the
//! folded group's supervisors fill its open positions (never the leader
//! position). Compatibility is judged on raw balance tags; a group with
//! no tag is treated as sitting exactly at the spread limit, eligible
//! but never preferred.
//!
//! The two passes deliberately differ in persistence. Merging restarts
//! its scan after every success, so a fold that fattens a neighbor can
//! unlock further folds. Dissolving walks the undersized groups once,
//! widening the spread tolerance per group before giving up on it.

use crate::{capacity, size_targets};
use muster_types::{
    Group, GroupId, PersonId, PlanError, PlanJournal, PlanResult, PlannerSettings, Session, Slot,
};
use tracing::{debug, info, warn};

/// What a merge pass accomplished
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RepairOutcome {
    /// Folds performed, as (source, target) pairs in order
    pub merged: Vec<(GroupId, GroupId)>,
    /// Groups still below minimum size when the pass gave up
    pub unresolved: Vec<GroupId>,
}

/// What a dissolve pass accomplished
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DissolveOutcome {
    /// Folds performed, as (source, target) pairs in order
    pub dissolved: Vec<(GroupId, GroupId)>,
    /// Undersized groups no tolerance could place
    pub failed: Vec<GroupId>,
}

/// Repeatedly fold undersized groups into compatible neighbors.
///
/// Scans in session order, folds the first undersized group that has an
/// eligible target, then restarts the scan. Terminates because every
/// fold removes a group. Groups left undersized are warned about in the
/// journal, never errors.
pub fn merge_small_groups(
    session: &mut Session,
    settings: &PlannerSettings,
    journal: &mut PlanJournal,
) -> RepairOutcome {
    let mut outcome = RepairOutcome::default();
    if settings.group_size.is_none() {
        debug!("Group size not enforced, merge pass skipped");
        return outcome;
    }

    loop {
        let Some((source_id, target_id)) = next_merge(session, settings) else {
            break;
        };
        let source_label = group_label(session, source_id);
        let target_label = group_label(session, target_id);
        if fold_group(session, source_id, target_id, false).is_err() {
            break;
        }
        debug!(source = %source_id, target = %target_id, "Undersized group folded");
        journal.note(format!(
            "Merged group \"{source_label}\" into \"{target_label}\""
        ));
        outcome.merged.push((source_id, target_id));
    }

    for group in &session.groups {
        if is_undersized(group, settings) {
            warn!(group = %group.id, members = group.member_count(), "Group left undersized");
            journal.warn(format!(
                "Group \"{}\" has {} members, below the minimum of {}",
                group.label,
                group.member_count(),
                size_targets(group, settings).min,
            ));
            outcome.unresolved.push(group.id);
        }
    }

    info!(
        merged = outcome.merged.len(),
        unresolved = outcome.unresolved.len(),
        "Merge pass complete"
    );
    outcome
}

/// One-shot fold of every undersized, non-empty group, escalating the
/// spread tolerance per group.
///
/// Candidates are collected up front; a candidate that an earlier fold
/// already fattened past the minimum is skipped. Three tolerances are
/// tried per group (the configured limit, then one and two wider); a
/// group with no target at any tolerance is left untouched and warned
/// about. The pass never restarts.
pub fn dissolve_small_groups(
    session: &mut Session,
    settings: &PlannerSettings,
    journal: &mut PlanJournal,
) -> DissolveOutcome {
    let mut outcome = DissolveOutcome::default();
    if settings.group_size.is_none() {
        debug!("Group size not enforced, dissolve pass skipped");
        return outcome;
    }

    let candidates: Vec<GroupId> = session
        .groups
        .iter()
        .filter(|g| !g.is_empty() && is_undersized(g, settings))
        .map(|g| g.id)
        .collect();

    for source_id in candidates {
        let target = {
            let Some(source) = session.group(source_id) else {
                continue;
            };
            if !is_undersized(source, settings) {
                continue;
            }
            let tolerances = match settings.max_fitness_spread {
                Some(limit) => vec![Some(limit), Some(limit + 1), Some(limit + 2)],
                None => vec![None],
            };
            tolerances
                .into_iter()
                .find_map(|tol| best_fold_target(session, source, settings, tol))
        };

        match target {
            Some(target_id) => {
                let source_label = group_label(session, source_id);
                let target_label = group_label(session, target_id);
                if fold_group(session, source_id, target_id, false).is_err() {
                    continue;
                }
                debug!(source = %source_id, target = %target_id, "Undersized group dissolved");
                journal.note(format!(
                    "Dissolved group \"{source_label}\" into \"{target_label}\""
                ));
                outcome.dissolved.push((source_id, target_id));
            }
            None => {
                warn!(group = %source_id, "No fold target at any tolerance");
                journal.warn(format!(
                    "No compatible group found for \"{}\"; left as is",
                    group_label(session, source_id)
                ));
                outcome.failed.push(source_id);
            }
        }
    }

    info!(
        dissolved = outcome.dissolved.len(),
        failed = outcome.failed.len(),
        "Dissolve pass complete"
    );
    outcome
}

/// Fold `source` into `target`: members unioned, supervisors placed into
/// open positions, `source` removed from the session.
///
/// Supervisors arrive in position order (leader, secondary, tertiary,
/// extras) and fill the target's first open named position, falling back
/// to extras. The leader position is only ever filled when `fill_leader`
/// is set (manual merges; the repair passes never touch it). Returns the
/// placements made.
pub(crate) fn fold_group(
    session: &mut Session,
    source_id: GroupId,
    target_id: GroupId,
    fill_leader: bool,
) -> PlanResult<Vec<(PersonId, Slot)>> {
    if source_id == target_id {
        return Err(PlanError::MergeSelf);
    }
    if session.group(target_id).is_none() {
        return Err(PlanError::GroupNotFound(target_id));
    }
    let source = session.remove_group(source_id)?;
    let Some(target) = session.group_mut(target_id) else {
        return Err(PlanError::GroupNotFound(target_id));
    };

    let mut placements = Vec::new();
    for sid in source.supervisors() {
        let slot = if fill_leader && target.leader.is_none() {
            Slot::Leader
        } else if target.secondary.is_none() {
            Slot::Secondary
        } else if target.tertiary.is_none() {
            Slot::Tertiary
        } else {
            Slot::Extra
        };
        target.place_supervisor(slot, sid);
        placements.push((sid, slot));
    }
    for pid in source.members {
        target.add_member(pid);
    }
    Ok(placements)
}

/// Below the enforced minimum and actually repairable (staffed)
fn is_undersized(group: &Group, settings: &PlannerSettings) -> bool {
    capacity(group, settings) > 0 && group.member_count() < size_targets(group, settings).min
}

/// First undersized group that has somewhere to go, with its best target
fn next_merge(session: &Session, settings: &PlannerSettings) -> Option<(GroupId, GroupId)> {
    session
        .groups
        .iter()
        .filter(|g| is_undersized(g, settings))
        .find_map(|source| {
            best_fold_target(session, source, settings, settings.max_fitness_spread)
                .map(|target| (source.id, target))
        })
}

/// Best target for folding `source`, within a tag-gap tolerance.
///
/// Eligibility: a different, staffed group whose capacity holds the
/// combined membership as it stands now, before the fold adds staff.
/// Ranking: narrowest tag gap, then smallest combined size, then lowest
/// id.
fn best_fold_target(
    session: &Session,
    source: &Group,
    settings: &PlannerSettings,
    tolerance: Option<i32>,
) -> Option<GroupId> {
    let base_gap = settings.max_fitness_spread.unwrap_or(0);
    session
        .groups
        .iter()
        .filter(|t| t.id != source.id)
        .filter(|t| capacity(t, settings) > 0)
        .filter(|t| source.member_count() + t.member_count() <= capacity(t, settings))
        .filter(|t| match tolerance {
            Some(tol) => tag_gap(source, t, base_gap) <= tol,
            None => true,
        })
        .min_by_key(|t| {
            (
                tag_gap(source, t, base_gap),
                source.member_count() + t.member_count(),
                t.id,
            )
        })
        .map(|t| t.id)
}

/// Distance between two groups' balance tags; an unset tag on either
/// side counts as exactly the configured spread limit
fn tag_gap(a: &Group, b: &Group, unset: i32) -> i32 {
    match (a.balance_tag, b.balance_tag) {
        (Some(x), Some(y)) => (x - y).abs(),
        _ => unset,
    }
}

fn group_label(session: &Session, id: GroupId) -> String {
    session
        .group(id)
        .map(|g| g.label.clone())
        .unwrap_or_default()
}
