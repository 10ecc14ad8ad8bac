use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumString};

use crate::domain::UseCase;
use crate::error::DispatchError;

/// Objective selected for one optimization run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ObjectiveMode {
    /// Maximize net cash flow across all trading channels.
    Cashflow,
    /// Prefer direct and stored PV self-consumption over market arbitrage.
    GreenEnergy,
}

impl ObjectiveMode {
    pub fn from_name(name: &str) -> Result<Self, DispatchError> {
        name.parse()
            .map_err(|_| DispatchError::UnknownObjective(name.to_string()))
    }
}

/// LP solver backend. Both backends are pure Rust and always available.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SolverKind {
    /// Simplex backend, exact vertex solutions. Default.
    Microlp,
    /// Interior-point backend; expect looser numerical tolerance.
    Clarabel,
}

impl SolverKind {
    pub fn from_name(name: &str) -> Result<Self, DispatchError> {
        name.parse()
            .map_err(|_| DispatchError::UnknownSolver(name.to_string()))
    }
}

/// Per-channel activation switches.
///
/// A disabled channel keeps its flow variables but pins them to [0, 0], so
/// the model topology is the same for every flag combination.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChannelFlags {
    #[serde(default)]
    pub pv_to_community: bool,
    #[serde(default)]
    pub storage_to_wholesale: bool,
    #[serde(default)]
    pub storage_to_community: bool,
    #[serde(default)]
    pub community_to_storage: bool,
    #[serde(default)]
    pub community_to_home: bool,
}

/// Run configuration for the dispatch engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DispatchConfig {
    /// Storage sub-accounts to instantiate. Absent use-cases get no
    /// variables at all, unlike flag-disabled channels.
    #[serde(default = "default_use_cases")]
    pub use_cases: BTreeSet<UseCase>,
    #[serde(default)]
    pub flags: ChannelFlags,
    #[serde(default = "default_objective")]
    pub objective: ObjectiveMode,
    #[serde(default = "default_solver")]
    pub solver: SolverKind,
    /// Proportional fee on gross wholesale revenue, in [0, 1).
    #[serde(default)]
    pub wholesale_fee: f64,
    /// Duration of one timestep in hours; scales objective terms only.
    #[serde(default = "default_hours_per_timestep")]
    pub hours_per_timestep: f64,
}

fn default_use_cases() -> BTreeSet<UseCase> {
    UseCase::iter().collect()
}

fn default_objective() -> ObjectiveMode {
    ObjectiveMode::Cashflow
}

fn default_solver() -> SolverKind {
    SolverKind::Microlp
}

fn default_hours_per_timestep() -> f64 {
    1.0
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            use_cases: default_use_cases(),
            flags: ChannelFlags::default(),
            objective: default_objective(),
            solver: default_solver(),
            wholesale_fee: 0.0,
            hours_per_timestep: default_hours_per_timestep(),
        }
    }
}

impl DispatchConfig {
    /// Load configuration from `dispatch.toml` plus `DISPATCH__`-prefixed
    /// environment overrides, layered over the defaults.
    pub fn load() -> Result<Self, DispatchError> {
        let figment = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file("dispatch.toml"))
            .merge(Env::prefixed("DISPATCH__").split("__"));
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DispatchError> {
        if !self.wholesale_fee.is_finite() || !(0.0..1.0).contains(&self.wholesale_fee) {
            return Err(DispatchError::invalid_input(format!(
                "wholesale fee must be in [0, 1), got {}",
                self.wholesale_fee
            )));
        }
        if !self.hours_per_timestep.is_finite() || self.hours_per_timestep <= 0.0 {
            return Err(DispatchError::invalid_input(format!(
                "hours per timestep must be positive, got {}",
                self.hours_per_timestep
            )));
        }
        Ok(())
    }
}
