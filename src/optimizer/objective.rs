//! Objective composition.
//!
//! Both modes maximize. Revenue carries a positive sign, expenditure a
//! negative one, and every term is scaled by the timestep duration so a
//! power rate times a price becomes money.

use good_lp::Expression;

use crate::config::{DispatchConfig, ObjectiveMode};
use crate::domain::{DispatchInputs, UseCase};
use crate::optimizer::model::FlowVars;

/// Reward multiplier that puts self-consumption ahead of any cashflow
/// attainable from the same energy. Cashflow terms stay in the objective as
/// tie-breakers.
pub(crate) const GREEN_PRIORITY_WEIGHT: f64 = 1_000.0;
/// Direct PV consumption outranks...
const GREEN_DIRECT_WEIGHT: f64 = 2.0;
/// ...PV parked in the home sub-account for later use.
const GREEN_STORED_WEIGHT: f64 = 1.0;

pub(crate) fn compose_objective(
    flows: &FlowVars,
    inputs: &DispatchInputs,
    config: &DispatchConfig,
) -> Expression {
    let dt = config.hours_per_timestep;
    let fee = config.wholesale_fee;
    let mut objective = Expression::default();

    for t in 0..inputs.len() {
        let mut cashflow = Expression::default();

        // Feed-in tariff pays for exported PV, direct or via the feed-in
        // sub-account.
        let mut feed_in_sales = Expression::from(flows.pv_to_feed_in[t]);
        if let Some(feed_in) = flows.use_cases.get(&UseCase::FeedIn) {
            feed_in_sales += feed_in.out[t];
        }
        cashflow += inputs.feed_in_price()[t] * feed_in_sales;

        // Supplier purchases, for the household and for the home sub-account.
        let mut grid_purchases = Expression::from(flows.grid_to_home[t]);
        if let Some(home) = flows.use_cases.get(&UseCase::Home) {
            if let Some(market_in) = &home.market_in {
                grid_purchases += market_in[t];
            }
        }
        cashflow -= inputs.grid_price()[t] * grid_purchases;

        // Community market: sales minus purchases at one local price.
        let mut community_net = Expression::from(flows.pv_to_community[t]);
        community_net -= flows.community_to_home[t];
        if let Some(community) = flows.use_cases.get(&UseCase::Community) {
            community_net += community.out[t];
            if let Some(market_in) = &community.market_in {
                community_net -= market_in[t];
            }
        }
        cashflow += inputs.community_price()[t] * community_net;

        // Wholesale: the trading fee reduces gross revenue, never the
        // purchase side. PV sold wholesale earns nothing.
        if let Some(wholesale) = flows.use_cases.get(&UseCase::Wholesale) {
            cashflow += (1.0 - fee) * inputs.wholesale_price()[t] * wholesale.out[t];
            if let Some(market_in) = &wholesale.market_in {
                cashflow -= inputs.wholesale_price()[t] * market_in[t];
            }
        }

        objective += dt * cashflow;
    }

    if config.objective == ObjectiveMode::GreenEnergy {
        for t in 0..inputs.len() {
            let mut reward = GREEN_DIRECT_WEIGHT * flows.pv_to_home[t];
            if let Some(home) = flows.use_cases.get(&UseCase::Home) {
                reward += GREEN_STORED_WEIGHT * home.pv_in[t];
            }
            objective += GREEN_PRIORITY_WEIGHT * dt * reward;
        }
    }

    objective
}
