//! Decision variables and feasibility constraints for one dispatch instance.
//!
//! Every directed energy-flow edge gets one non-negative continuous variable
//! per timestep. Channels switched off by a flag keep their variables pinned
//! to [0, 0], so constraint expressions look the same for every flag
//! combination. Use-cases absent from the active list get no variables at
//! all.

use std::collections::BTreeMap;

use good_lp::{constraint, variable, Constraint, Expression, ProblemVariables, Variable};

use crate::config::DispatchConfig;
use crate::domain::{DispatchInputs, Storage, UseCase};

/// Variables attributed to one storage sub-account.
pub(crate) struct UseCaseVars {
    /// PV charged into this sub-account.
    pub pv_in: Vec<Variable>,
    /// Market-side charge (grid for home, community/wholesale from their
    /// markets); `None` for the sell-only feed-in sub-account.
    pub market_in: Option<Vec<Variable>>,
    /// Discharge into the sub-account's matching sink.
    pub out: Vec<Variable>,
    /// State of charge at the end of each timestep.
    pub level: Vec<Variable>,
}

/// The full variable space of one model instance.
pub(crate) struct FlowVars {
    pub pv_to_feed_in: Vec<Variable>,
    pub pv_to_wholesale: Vec<Variable>,
    pub pv_to_community: Vec<Variable>,
    pub pv_to_home: Vec<Variable>,
    pub grid_to_home: Vec<Variable>,
    pub community_to_home: Vec<Variable>,
    pub use_cases: BTreeMap<UseCase, UseCaseVars>,
}

impl FlowVars {
    pub(crate) fn variable_count(&self) -> usize {
        let base = self.pv_to_feed_in.len()
            + self.pv_to_wholesale.len()
            + self.pv_to_community.len()
            + self.pv_to_home.len()
            + self.grid_to_home.len()
            + self.community_to_home.len();
        let per_use_case: usize = self
            .use_cases
            .values()
            .map(|uc| {
                uc.pv_in.len()
                    + uc.market_in.as_ref().map_or(0, Vec::len)
                    + uc.out.len()
                    + uc.level.len()
            })
            .sum();
        base + per_use_case
    }
}

/// One vector of flow variables; disabled channels are pinned to [0, 0]
/// instead of being omitted.
fn flow_vector(vars: &mut ProblemVariables, steps: usize, enabled: bool) -> Vec<Variable> {
    let definition = if enabled {
        variable().min(0.0)
    } else {
        variable().min(0.0).max(0.0)
    };
    vars.add_vector(definition, steps)
}

pub(crate) fn build_flows(
    vars: &mut ProblemVariables,
    steps: usize,
    config: &DispatchConfig,
) -> FlowVars {
    let flags = &config.flags;

    let mut use_cases = BTreeMap::new();
    for &use_case in &config.use_cases {
        let out_enabled = match use_case {
            UseCase::Home | UseCase::FeedIn => true,
            UseCase::Community => flags.storage_to_community,
            UseCase::Wholesale => flags.storage_to_wholesale,
        };
        let market_in_enabled = match use_case {
            UseCase::Home | UseCase::Wholesale => true,
            UseCase::Community => flags.community_to_storage,
            UseCase::FeedIn => false,
        };
        use_cases.insert(
            use_case,
            UseCaseVars {
                pv_in: flow_vector(vars, steps, true),
                market_in: use_case
                    .has_market_inflow()
                    .then(|| flow_vector(vars, steps, market_in_enabled)),
                out: flow_vector(vars, steps, out_enabled),
                level: flow_vector(vars, steps, true),
            },
        );
    }

    FlowVars {
        pv_to_feed_in: flow_vector(vars, steps, true),
        pv_to_wholesale: flow_vector(vars, steps, true),
        pv_to_community: flow_vector(vars, steps, flags.pv_to_community),
        pv_to_home: flow_vector(vars, steps, true),
        grid_to_home: flow_vector(vars, steps, true),
        community_to_home: flow_vector(vars, steps, flags.community_to_home),
        use_cases,
    }
}

pub(crate) fn build_constraints(
    flows: &FlowVars,
    storage: &Storage,
    inputs: &DispatchInputs,
) -> Vec<Constraint> {
    let steps = inputs.len();
    let rate_limit = storage.rate_limit();
    let charge_eff = storage.charge_efficiency;
    let inv_discharge_eff = 1.0 / storage.discharge_efficiency;
    let mut constraints = Vec::with_capacity(steps * (5 + flows.use_cases.len()));

    for t in 0..steps {
        // Demand must be covered exactly.
        let mut coverage = flows.pv_to_home[t] + flows.grid_to_home[t] + flows.community_to_home[t];
        if let Some(home) = flows.use_cases.get(&UseCase::Home) {
            coverage += home.out[t];
        }
        constraints.push(constraint!(coverage == inputs.demand()[t]));

        // PV may be curtailed, never exceeded.
        let mut generation = flows.pv_to_home[t]
            + flows.pv_to_feed_in[t]
            + flows.pv_to_community[t]
            + flows.pv_to_wholesale[t];
        for uc in flows.use_cases.values() {
            generation += uc.pv_in[t];
        }
        constraints.push(constraint!(generation <= inputs.solar()[t]));

        // Shared physical ceilings across all sub-accounts.
        let mut total_charge = Expression::default();
        let mut total_discharge = Expression::default();
        let mut total_level = Expression::default();
        for uc in flows.use_cases.values() {
            total_charge += uc.pv_in[t];
            if let Some(market_in) = &uc.market_in {
                total_charge += market_in[t];
            }
            total_discharge += uc.out[t];
            total_level += uc.level[t];
        }
        constraints.push(constraint!(total_charge <= rate_limit));
        constraints.push(constraint!(total_discharge <= rate_limit));
        constraints.push(constraint!(total_level <= storage.volume));
    }

    // Per-use-case state of charge, starting from an implicit empty store.
    // Charge losses are taken on entry, discharge losses on exit.
    for uc in flows.use_cases.values() {
        for t in 0..steps {
            let mut delta = charge_eff * uc.pv_in[t] - inv_discharge_eff * uc.out[t];
            if let Some(market_in) = &uc.market_in {
                delta += charge_eff * market_in[t];
            }
            let recurrence = if t == 0 {
                constraint!(uc.level[t] == delta)
            } else {
                constraint!(uc.level[t] == uc.level[t - 1] + delta)
            };
            constraints.push(recurrence);
        }
    }

    constraints
}
