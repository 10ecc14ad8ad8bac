//! Bidding-curve construction: discrete (volume, worth) points become a
//! stepwise marginal-price curve.

use itertools::Itertools;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use tracing::debug;

use crate::error::DispatchError;

/// One discrete capacity level and the total value attached to it, usually a
/// row from a storage valuation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorthPoint {
    pub volume: f64,
    pub worth: f64,
}

impl WorthPoint {
    pub fn new(volume: f64, worth: f64) -> Self {
        Self { volume, worth }
    }
}

/// Which side of the market the curve is meant for. Both sides are computed
/// identically over ascending volumes; the side only matters to whoever
/// consumes the curve.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BidSide {
    Buy,
    Sell,
}

impl BidSide {
    pub fn from_name(name: &str) -> Result<Self, DispatchError> {
        name.parse()
            .map_err(|_| DispatchError::UnknownBidSide(name.to_string()))
    }
}

/// One step of the curve: a marginal volume at a marginal price, with the
/// running total of volume and the per-unit price of this step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BidStep {
    pub volume: f64,
    pub marginal_price: f64,
    pub cumulative_volume: f64,
    pub marginal_price_per_unit: f64,
}

/// Build the marginal-price step curve from a (volume, worth) point set.
///
/// A (0, 0) anchor is inserted when no zero-volume point is present, points
/// are sorted ascending by volume, and successive differences become the
/// steps. Steps with zero marginal volume are dropped.
pub fn bidding_curve(points: &[WorthPoint], side: BidSide) -> Result<Vec<BidStep>, DispatchError> {
    for point in points {
        if !point.volume.is_finite() || !point.worth.is_finite() || point.volume < 0.0 {
            return Err(DispatchError::invalid_input(format!(
                "bidding point (volume {}, worth {}) is not usable",
                point.volume, point.worth
            )));
        }
    }

    let mut sorted = points.to_vec();
    if !sorted.iter().any(|p| p.volume == 0.0) {
        sorted.push(WorthPoint::new(0.0, 0.0));
    }
    sorted.sort_by_key(|p| OrderedFloat(p.volume));
    debug!(side = %side, points = sorted.len(), "constructing bidding curve");

    let mut cumulative_volume = 0.0;
    let steps = sorted
        .iter()
        .tuple_windows()
        .filter_map(|(previous, next)| {
            let volume = next.volume - previous.volume;
            if volume <= 0.0 {
                return None;
            }
            let marginal_price = (next.worth - previous.worth).abs();
            cumulative_volume += volume;
            Some(BidStep {
                volume,
                marginal_price,
                cumulative_volume,
                marginal_price_per_unit: marginal_price / volume,
            })
        })
        .collect();

    Ok(steps)
}
