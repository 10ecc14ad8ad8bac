//! Storage valuation: the objective delta a candidate unit adds over a
//! baseline, for one candidate or a whole catalog.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::DispatchConfig;
use crate::domain::{DispatchInputs, Storage};
use crate::error::DispatchError;
use crate::optimizer::solve_dispatch;

/// One valuation row: the candidate's physical parameters, its own objective
/// value, and its worth relative to the baseline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageWorth {
    pub id: i64,
    pub c_rate: f64,
    pub volume: f64,
    pub charge_efficiency: f64,
    pub discharge_efficiency: f64,
    pub objective: f64,
    pub worth: f64,
}

impl StorageWorth {
    fn from_run(storage: &Storage, objective: f64, worth: f64) -> Self {
        Self {
            id: storage.id,
            c_rate: storage.c_rate,
            volume: storage.volume,
            charge_efficiency: storage.charge_efficiency,
            discharge_efficiency: storage.discharge_efficiency,
            objective,
            worth,
        }
    }
}

/// Marginal value of `candidate` versus `baseline`: solves the identical
/// model twice and returns `candidate objective - baseline objective`.
pub fn storage_worth(
    baseline: Option<&Storage>,
    candidate: &Storage,
    inputs: &DispatchInputs,
    config: &DispatchConfig,
) -> Result<f64, DispatchError> {
    let baseline_objective = solve_dispatch(baseline, inputs, config)?.objective();
    let candidate_objective = solve_dispatch(Some(candidate), inputs, config)?.objective();
    Ok(candidate_objective - baseline_objective)
}

/// Value a list of candidates against one shared baseline run.
///
/// Solves once for the baseline and once per candidate. With
/// `include_baseline` the baseline leads the table as a zero-worth reference
/// row.
pub fn storage_worth_batch(
    baseline: Option<&Storage>,
    candidates: &[Storage],
    inputs: &DispatchInputs,
    config: &DispatchConfig,
    include_baseline: bool,
) -> Result<Vec<StorageWorth>, DispatchError> {
    let baseline_objective = solve_dispatch(baseline, inputs, config)?.objective();

    let mut rows = Vec::with_capacity(candidates.len() + usize::from(include_baseline));
    if include_baseline {
        let baseline = baseline.cloned().unwrap_or_else(Storage::none);
        rows.push(StorageWorth::from_run(&baseline, baseline_objective, 0.0));
    }

    for candidate in candidates {
        let objective = solve_dispatch(Some(candidate), inputs, config)?.objective();
        let worth = objective - baseline_objective;
        debug!(candidate = candidate.id, objective, worth, "storage valued");
        rows.push(StorageWorth::from_run(candidate, objective, worth));
    }

    Ok(rows)
}
