//! Backend dispatch and solution extraction.
//!
//! Both backends are pure Rust: microlp is a simplex implementation and
//! returns vertex solutions, clarabel is an interior-point solver with
//! slightly looser numerics. Solver failures map onto the crate error
//! taxonomy and are never retried.

use good_lp::{Constraint, Expression, ProblemVariables, Solution, SolverModel, Variable};

use crate::config::SolverKind;
use crate::error::DispatchError;
use crate::optimizer::model::FlowVars;
use crate::optimizer::results::{SolvedFlows, SolvedUseCase};

pub(crate) fn solve_model(
    kind: SolverKind,
    vars: ProblemVariables,
    flows: FlowVars,
    constraints: Vec<Constraint>,
    objective: Expression,
) -> Result<(SolvedFlows, f64), DispatchError> {
    // The solver consumes the objective; keep a copy to evaluate it on the
    // solution afterwards.
    let snapshot = objective.clone();
    match kind {
        SolverKind::Microlp => {
            let mut model = vars.maximise(objective).using(good_lp::microlp);
            for constraint in constraints {
                model = model.with(constraint);
            }
            let solution = model.solve()?;
            Ok(harvest(&flows, &snapshot, &solution))
        }
        SolverKind::Clarabel => {
            let mut model = vars.maximise(objective).using(good_lp::clarabel);
            for constraint in constraints {
                model = model.with(constraint);
            }
            let solution = model.solve()?;
            Ok(harvest(&flows, &snapshot, &solution))
        }
    }
}

fn harvest(
    flows: &FlowVars,
    objective: &Expression,
    solution: &impl Solution,
) -> (SolvedFlows, f64) {
    (extract(flows, solution), objective.eval_with(solution))
}

fn extract(flows: &FlowVars, solution: &impl Solution) -> SolvedFlows {
    SolvedFlows {
        pv_to_feed_in: values(&flows.pv_to_feed_in, solution),
        pv_to_wholesale: values(&flows.pv_to_wholesale, solution),
        pv_to_community: values(&flows.pv_to_community, solution),
        pv_to_home: values(&flows.pv_to_home, solution),
        grid_to_home: values(&flows.grid_to_home, solution),
        community_to_home: values(&flows.community_to_home, solution),
        use_cases: flows
            .use_cases
            .iter()
            .map(|(&use_case, uc)| {
                let solved = SolvedUseCase {
                    pv_in: values(&uc.pv_in, solution),
                    market_in: uc.market_in.as_ref().map(|vars| values(vars, solution)),
                    out: values(&uc.out, solution),
                    level: values(&uc.level, solution),
                };
                (use_case, solved)
            })
            .collect(),
    }
}

fn values(vars: &[Variable], solution: &impl Solution) -> Vec<f64> {
    vars.iter().map(|&var| solution.value(var)).collect()
}
