//! Planner configuration
//!
//! Raw configuration arrives as a flat list of [`Parameter`] records (the
//! shape an admin screen edits). The engine never reads that list: it is
//! resolved once, up front, into a strongly typed [`PlannerSettings`]
//! where `None` always means "not enforced".

use serde::{Deserialize, Serialize};

/// Parameters at or above this priority are treated as absent
pub const DISABLED_PRIORITY: i32 = 99;

/// Members a single filled supervisor position accounts for, absent
/// any configuration
pub const DEFAULT_CAPACITY_PER_SUPERVISOR: i32 = 4;

/// A configured value: a single number or an inclusive band
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamValue {
    Scalar(i32),
    Range { min: i32, max: i32 },
}

impl ParamValue {
    /// Collapse to one number: the scalar itself, or the band midpoint
    pub fn scalar_or_midpoint(&self) -> i32 {
        match self {
            ParamValue::Scalar(v) => *v,
            ParamValue::Range { min, max } => (min + max) / 2,
        }
    }
}

/// The tunables the planner understands
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParamId {
    /// Members one supervisor position accounts for
    CapacityPerSupervisor,
    /// Qualification floor for the leader position
    MinLeaderLevel,
    /// Preferred group size band; drives the repair passes
    GroupSize,
    /// Widest tolerated fitness spread within a group
    FitnessSpread,
}

/// One row of raw configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub id: ParamId,
    pub value: ParamValue,
    /// Lower wins; at or above [`DISABLED_PRIORITY`] the row is inert
    pub priority: i32,
    pub enabled: bool,
    /// Whether an admin flagged this as a hard requirement. Planning
    /// treats every constraint as soft; this only colors reporting.
    pub requirement: bool,
}

impl Parameter {
    pub fn new(id: ParamId, value: ParamValue) -> Self {
        Self {
            id,
            value,
            priority: 1,
            enabled: true,
            requirement: false,
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_requirement(mut self, requirement: bool) -> Self {
        self.requirement = requirement;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Whether this row participates in resolution at all
    pub fn is_enforced(&self) -> bool {
        self.enabled && self.priority < DISABLED_PRIORITY
    }
}

/// Desired group size band, `min <= preferred <= max` by construction
/// of [`PlannerSettings::resolve`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeBand {
    pub min: i32,
    pub preferred: i32,
    pub max: i32,
}

impl SizeBand {
    pub fn new(min: i32, preferred: i32, max: i32) -> Self {
        Self { min, preferred, max }
    }

    fn from_value(value: ParamValue) -> Self {
        match value {
            ParamValue::Scalar(v) => Self::new(v, v, v),
            ParamValue::Range { min, max } => Self::new(min, (min + max) / 2, max),
        }
    }
}

/// Fully resolved configuration. `None` means the constraint is not
/// enforced anywhere: no leader floor, no repair minimum, no spread cap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerSettings {
    pub capacity_per_supervisor: i32,
    pub min_leader_level: Option<i32>,
    pub group_size: Option<SizeBand>,
    pub max_fitness_spread: Option<i32>,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            capacity_per_supervisor: DEFAULT_CAPACITY_PER_SUPERVISOR,
            min_leader_level: Some(2),
            group_size: Some(SizeBand::new(4, 6, 8)),
            max_fitness_spread: Some(2),
        }
    }
}

impl PlannerSettings {
    /// Settings with nothing enforced beyond the capacity default
    pub fn unenforced() -> Self {
        Self {
            capacity_per_supervisor: DEFAULT_CAPACITY_PER_SUPERVISOR,
            min_leader_level: None,
            group_size: None,
            max_fitness_spread: None,
        }
    }

    /// One-time resolution of raw parameter rows. Disabled rows are
    /// skipped outright; among duplicates of one id the lowest priority
    /// wins, first row breaking ties.
    pub fn resolve(parameters: &[Parameter]) -> Self {
        let mut settings = Self::unenforced();
        for id in [
            ParamId::CapacityPerSupervisor,
            ParamId::MinLeaderLevel,
            ParamId::GroupSize,
            ParamId::FitnessSpread,
        ] {
            let winner = parameters
                .iter()
                .filter(|p| p.id == id && p.is_enforced())
                .min_by_key(|p| p.priority);
            let Some(param) = winner else { continue };
            match id {
                ParamId::CapacityPerSupervisor => {
                    settings.capacity_per_supervisor = param.value.scalar_or_midpoint().max(0);
                }
                ParamId::MinLeaderLevel => {
                    settings.min_leader_level = Some(param.value.scalar_or_midpoint());
                }
                ParamId::GroupSize => {
                    settings.group_size = Some(SizeBand::from_value(param.value));
                }
                ParamId::FitnessSpread => {
                    settings.max_fitness_spread = Some(param.value.scalar_or_midpoint());
                }
            }
        }
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_empty_enforces_nothing() {
        let settings = PlannerSettings::resolve(&[]);
        assert_eq!(settings.capacity_per_supervisor, 4);
        assert_eq!(settings.min_leader_level, None);
        assert_eq!(settings.group_size, None);
        assert_eq!(settings.max_fitness_spread, None);
    }

    #[test]
    fn resolve_reads_scalars_and_ranges() {
        let params = vec![
            Parameter::new(ParamId::CapacityPerSupervisor, ParamValue::Scalar(3)),
            Parameter::new(ParamId::GroupSize, ParamValue::Range { min: 4, max: 8 }),
            Parameter::new(ParamId::MinLeaderLevel, ParamValue::Scalar(2)),
            Parameter::new(ParamId::FitnessSpread, ParamValue::Scalar(1)),
        ];
        let settings = PlannerSettings::resolve(&params);
        assert_eq!(settings.capacity_per_supervisor, 3);
        assert_eq!(settings.group_size, Some(SizeBand::new(4, 6, 8)));
        assert_eq!(settings.min_leader_level, Some(2));
        assert_eq!(settings.max_fitness_spread, Some(1));
    }

    #[test]
    fn disabled_rows_are_invisible() {
        let params = vec![
            Parameter::new(ParamId::MinLeaderLevel, ParamValue::Scalar(3)).disabled(),
            Parameter::new(ParamId::FitnessSpread, ParamValue::Scalar(2))
                .with_priority(DISABLED_PRIORITY),
        ];
        let settings = PlannerSettings::resolve(&params);
        assert_eq!(settings.min_leader_level, None);
        assert_eq!(settings.max_fitness_spread, None);
    }

    #[test]
    fn lowest_priority_wins_among_duplicates() {
        let params = vec![
            Parameter::new(ParamId::GroupSize, ParamValue::Scalar(10)).with_priority(5),
            Parameter::new(ParamId::GroupSize, ParamValue::Scalar(6)).with_priority(2),
        ];
        let settings = PlannerSettings::resolve(&params);
        assert_eq!(settings.group_size, Some(SizeBand::new(6, 6, 6)));
    }

    #[test]
    fn scalar_group_size_collapses_the_band() {
        let params = vec![Parameter::new(ParamId::GroupSize, ParamValue::Scalar(5))];
        let settings = PlannerSettings::resolve(&params);
        assert_eq!(settings.group_size, Some(SizeBand::new(5, 5, 5)));
    }

    #[test]
    fn requirement_flag_never_hardens_resolution() {
        let soft = vec![Parameter::new(ParamId::MinLeaderLevel, ParamValue::Scalar(3))];
        let hard = vec![
            Parameter::new(ParamId::MinLeaderLevel, ParamValue::Scalar(3)).with_requirement(true),
        ];
        assert_eq!(
            PlannerSettings::resolve(&soft),
            PlannerSettings::resolve(&hard)
        );
    }
}
