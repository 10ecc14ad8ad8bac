//! Solved-model state and the tables derived from it.
//!
//! `SolvedDispatch` only exists after a successful solve, so there is no way
//! to ask for results too early.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::domain::{DispatchInputs, TimeAxis, UseCase};

/// Solved values of one storage sub-account.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SolvedUseCase {
    pub pv_in: Vec<f64>,
    pub market_in: Option<Vec<f64>>,
    pub out: Vec<f64>,
    pub level: Vec<f64>,
}

/// Solved values of the full variable space.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SolvedFlows {
    pub pv_to_feed_in: Vec<f64>,
    pub pv_to_wholesale: Vec<f64>,
    pub pv_to_community: Vec<f64>,
    pub pv_to_home: Vec<f64>,
    pub grid_to_home: Vec<f64>,
    pub community_to_home: Vec<f64>,
    pub use_cases: BTreeMap<UseCase, SolvedUseCase>,
}

/// Where each unit of household demand came from, per timestep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandCoverage {
    pub index: TimeAxis,
    pub demand: Vec<f64>,
    pub from_grid: Vec<f64>,
    pub from_pv: Vec<f64>,
    pub from_storage: Vec<f64>,
    pub from_community: Vec<f64>,
}

/// Where the available PV generation went, per timestep. Storage columns
/// exist for all four sub-accounts; inactive ones are zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PvUsage {
    pub index: TimeAxis,
    pub generation: Vec<f64>,
    pub to_home: Vec<f64>,
    pub to_feed_in: Vec<f64>,
    pub to_community: Vec<f64>,
    pub to_wholesale: Vec<f64>,
    pub to_storage: BTreeMap<UseCase, Vec<f64>>,
}

/// State-of-charge trajectory per active sub-account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageUsage {
    pub index: TimeAxis,
    pub soc: BTreeMap<UseCase, Vec<f64>>,
}

/// All three result tables of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchResults {
    pub demand_coverage: DemandCoverage,
    pub pv_usage: PvUsage,
    pub storage_usage: StorageUsage,
}

/// A successfully solved dispatch model.
#[derive(Debug, Clone, PartialEq)]
pub struct SolvedDispatch {
    objective: f64,
    flows: SolvedFlows,
    inputs: DispatchInputs,
}

impl SolvedDispatch {
    pub(crate) fn new(objective: f64, flows: SolvedFlows, inputs: DispatchInputs) -> Self {
        Self {
            objective,
            flows,
            inputs,
        }
    }

    /// Objective value reported by the solver. In cashflow mode this is the
    /// net cash flow; in green-energy mode it includes the self-consumption
    /// reward terms.
    pub fn objective(&self) -> f64 {
        self.objective
    }

    pub fn demand_coverage(&self) -> DemandCoverage {
        let steps = self.inputs.len();
        let from_storage = self
            .flows
            .use_cases
            .get(&UseCase::Home)
            .map(|home| home.out.clone())
            .unwrap_or_else(|| vec![0.0; steps]);
        DemandCoverage {
            index: self.inputs.axis().clone(),
            demand: self.inputs.demand().to_vec(),
            from_grid: self.flows.grid_to_home.clone(),
            from_pv: self.flows.pv_to_home.clone(),
            from_storage,
            from_community: self.flows.community_to_home.clone(),
        }
    }

    pub fn pv_usage(&self) -> PvUsage {
        let steps = self.inputs.len();
        let to_storage = UseCase::iter()
            .map(|use_case| {
                let charged = self
                    .flows
                    .use_cases
                    .get(&use_case)
                    .map(|uc| uc.pv_in.clone())
                    .unwrap_or_else(|| vec![0.0; steps]);
                (use_case, charged)
            })
            .collect();
        PvUsage {
            index: self.inputs.axis().clone(),
            generation: self.inputs.solar().to_vec(),
            to_home: self.flows.pv_to_home.clone(),
            to_feed_in: self.flows.pv_to_feed_in.clone(),
            to_community: self.flows.pv_to_community.clone(),
            to_wholesale: self.flows.pv_to_wholesale.clone(),
            to_storage,
        }
    }

    pub fn storage_usage(&self) -> StorageUsage {
        StorageUsage {
            index: self.inputs.axis().clone(),
            soc: self
                .flows
                .use_cases
                .iter()
                .map(|(&use_case, uc)| (use_case, uc.level.clone()))
                .collect(),
        }
    }

    pub fn results(&self) -> DispatchResults {
        DispatchResults {
            demand_coverage: self.demand_coverage(),
            pv_usage: self.pv_usage(),
            storage_usage: self.storage_usage(),
        }
    }
}
