//! Capacity and size-target model
//!
//! Capacity is purely a function of staffing: every filled supervisor
//! position accounts for a fixed number of members. Size targets clamp
//! the configured band against that capacity so the targets the repair
//! passes chase are always achievable.

use muster_types::{
    ComplianceIssue, ComplianceReport, Group, PlannerSettings, Roster, SizeBand,
};

/// How many members this group's current staffing accounts for
pub fn capacity(group: &Group, settings: &PlannerSettings) -> usize {
    let per_position = settings.capacity_per_supervisor.max(0) as usize;
    group.filled_role_count() * per_position
}

/// Achievable size targets for one group, `min <= preferred <= max`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SizeTargets {
    pub min: usize,
    pub preferred: usize,
    pub max: usize,
}

/// Clamp the configured size band against the group's capacity.
///
/// The chain runs top down so the ordering survives degenerate inputs:
/// max first (never below 1), preferred against max, min against
/// preferred. An unenforced band degrades to `{0, capacity, capacity}`.
pub fn size_targets(group: &Group, settings: &PlannerSettings) -> SizeTargets {
    let cap = capacity(group, settings);
    let band = settings.group_size.unwrap_or(SizeBand {
        min: 0,
        preferred: cap.min(i32::MAX as usize) as i32,
        max: cap.min(i32::MAX as usize) as i32,
    });

    let max = (band.max.max(0) as usize).min(cap).max(1);
    let preferred = (band.preferred.max(0) as usize).min(max);
    let min = (band.min.max(0) as usize).min(preferred);
    SizeTargets { min, preferred, max }
}

/// Spread between the strongest and weakest member, if any are known
pub fn fitness_spread(group: &Group, roster: &Roster) -> Option<i32> {
    let mut levels = group
        .members
        .iter()
        .filter_map(|id| roster.participant_fitness(*id));
    let first = levels.next()?;
    let (lo, hi) = levels.fold((first, first), |(lo, hi), l| (lo.min(l), hi.max(l)));
    Some(hi - lo)
}

/// Check one group against every enforced soft constraint.
///
/// Read-only; violations end up as journal warnings only when a mutating
/// operation chooses to surface them.
pub fn check_group_compliance(
    group: &Group,
    roster: &Roster,
    settings: &PlannerSettings,
) -> ComplianceReport {
    let mut report = ComplianceReport::clean(group.id);

    let cap = capacity(group, settings);
    let members = group.member_count();
    if members > cap {
        report.issues.push(ComplianceIssue::OverCapacity {
            capacity: cap,
            members,
        });
    }

    if let Some(minimum) = settings.min_leader_level {
        if let Some(leader) = group.leader {
            if let Some(supervisor) = roster.supervisor(leader) {
                if !supervisor.qualifies_for_leader(Some(minimum)) {
                    report.issues.push(ComplianceIssue::LeaderBelowMinimum {
                        leader,
                        level: supervisor.qualification.level(),
                        minimum,
                    });
                }
            }
        }
    }

    if let Some(limit) = settings.max_fitness_spread {
        if let Some(spread) = fitness_spread(group, roster) {
            if spread > limit {
                report
                    .issues
                    .push(ComplianceIssue::SpreadExceeded { spread, limit });
            }
        }
    }

    if settings.group_size.is_some() {
        let targets = size_targets(group, settings);
        if members < targets.min {
            report.issues.push(ComplianceIssue::BelowMinimumSize {
                members,
                minimum: targets.min as i32,
            });
        }
    }

    report
}
