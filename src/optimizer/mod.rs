//! The optimization engine: model building, objective composition, solver
//! invocation, and result extraction.
//!
//! One `DispatchProblem` is one ephemeral model instance: built fresh,
//! solved once, then queried through the `SolvedDispatch` it turns into.

mod model;
mod objective;
mod results;
mod solver;

pub use results::{DemandCoverage, DispatchResults, PvUsage, SolvedDispatch, StorageUsage};

use good_lp::{Constraint, Expression, ProblemVariables};
use tracing::{debug, info};

use crate::config::DispatchConfig;
use crate::domain::{DispatchInputs, Storage};
use crate::error::DispatchError;
use model::FlowVars;

/// A fully constructed, not yet solved dispatch model.
pub struct DispatchProblem {
    vars: ProblemVariables,
    flows: FlowVars,
    constraints: Vec<Constraint>,
    objective: Expression,
    inputs: DispatchInputs,
    config: DispatchConfig,
}

impl DispatchProblem {
    /// Build the variable space, constraints, and objective for one run.
    ///
    /// A missing storage descriptor is treated as a zero-volume unit, which
    /// the capacity constraints pin to zero flow everywhere.
    pub fn build(
        storage: Option<&Storage>,
        inputs: &DispatchInputs,
        config: &DispatchConfig,
    ) -> Result<Self, DispatchError> {
        config.validate()?;
        let storage = storage.cloned().unwrap_or_else(Storage::none);
        storage.validate()?;

        let mut vars = ProblemVariables::new();
        let flows = model::build_flows(&mut vars, inputs.len(), config);
        let constraints = model::build_constraints(&flows, &storage, inputs);
        let objective = objective::compose_objective(&flows, inputs, config);

        debug!(
            steps = inputs.len(),
            variables = flows.variable_count(),
            constraints = constraints.len(),
            objective = %config.objective,
            storage_id = storage.id,
            volume = storage.volume,
            "dispatch model built"
        );

        Ok(Self {
            vars,
            flows,
            constraints,
            objective,
            inputs: inputs.clone(),
            config: config.clone(),
        })
    }

    /// Submit the model to the configured backend. Consumes the instance;
    /// re-optimization means building a fresh one.
    pub fn solve(self) -> Result<SolvedDispatch, DispatchError> {
        let Self {
            vars,
            flows,
            constraints,
            objective,
            inputs,
            config,
        } = self;

        info!(solver = %config.solver, steps = inputs.len(), "solving dispatch model");
        let (flows, objective_value) =
            solver::solve_model(config.solver, vars, flows, constraints, objective)?;
        info!(objective = objective_value, "dispatch model solved");

        Ok(SolvedDispatch::new(objective_value, flows, inputs))
    }
}

/// Build and solve in one step.
pub fn solve_dispatch(
    storage: Option<&Storage>,
    inputs: &DispatchInputs,
    config: &DispatchConfig,
) -> Result<SolvedDispatch, DispatchError> {
    DispatchProblem::build(storage, inputs, config)?.solve()
}
