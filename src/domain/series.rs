use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::DispatchError;

/// One aligned numeric series, optionally labeled with timestamps.
///
/// The engine always works on a 0-based integer step index; timestamps are
/// kept only to label outputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    values: Vec<f64>,
    timestamps: Option<Vec<DateTime<Utc>>>,
}

impl TimeSeries {
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            values,
            timestamps: None,
        }
    }

    pub fn with_timestamps(
        values: Vec<f64>,
        timestamps: Vec<DateTime<Utc>>,
    ) -> Result<Self, DispatchError> {
        if values.len() != timestamps.len() {
            return Err(DispatchError::index_mismatch(format!(
                "{} values labeled with {} timestamps",
                values.len(),
                timestamps.len()
            )));
        }
        Ok(Self {
            values,
            timestamps: Some(timestamps),
        })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn timestamps(&self) -> Option<&[DateTime<Utc>]> {
        self.timestamps.as_deref()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Two series share an index when lengths match and their timestamp
    /// labels (or the absence of labels) are identical.
    pub fn index_matches(&self, other: &TimeSeries) -> bool {
        self.values.len() == other.values.len() && self.timestamps == other.timestamps
    }

    fn into_parts(self) -> (Vec<f64>, Option<Vec<DateTime<Utc>>>) {
        (self.values, self.timestamps)
    }
}

impl From<Vec<f64>> for TimeSeries {
    fn from(values: Vec<f64>) -> Self {
        TimeSeries::new(values)
    }
}

/// Index labels shared by all inputs of one run, echoed on every output
/// table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeAxis {
    /// Plain 0-based integer steps.
    Steps(usize),
    /// The original timestamp labels, one per step.
    Timestamps(Vec<DateTime<Utc>>),
}

impl TimeAxis {
    pub fn len(&self) -> usize {
        match self {
            TimeAxis::Steps(n) => *n,
            TimeAxis::Timestamps(stamps) => stamps.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Prices for the four trading channels, one series per channel, currency
/// per energy unit. Negative prices are legal on every channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketPrices {
    pub feed_in: TimeSeries,
    pub grid: TimeSeries,
    pub community: TimeSeries,
    pub wholesale: TimeSeries,
}

impl MarketPrices {
    pub fn new(
        feed_in: impl Into<TimeSeries>,
        grid: impl Into<TimeSeries>,
        community: impl Into<TimeSeries>,
        wholesale: impl Into<TimeSeries>,
    ) -> Self {
        Self {
            feed_in: feed_in.into(),
            grid: grid.into(),
            community: community.into(),
            wholesale: wholesale.into(),
        }
    }
}

/// Validated, index-aligned input set for one optimization run.
///
/// Construction enforces index equality across all six series and normalizes
/// any timestamped index to integer steps, keeping the timestamps for output
/// labeling.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchInputs {
    demand: Vec<f64>,
    solar: Vec<f64>,
    feed_in_price: Vec<f64>,
    grid_price: Vec<f64>,
    community_price: Vec<f64>,
    wholesale_price: Vec<f64>,
    axis: TimeAxis,
}

impl DispatchInputs {
    pub fn new(
        demand: impl Into<TimeSeries>,
        solar: impl Into<TimeSeries>,
        prices: MarketPrices,
    ) -> Result<Self, DispatchError> {
        let demand = demand.into();
        let solar = solar.into();
        if demand.is_empty() {
            return Err(DispatchError::invalid_input(
                "horizon is empty, at least one timestep is required",
            ));
        }

        for (name, series) in [
            ("solar generation", &solar),
            ("feed-in price", &prices.feed_in),
            ("grid price", &prices.grid),
            ("community price", &prices.community),
            ("wholesale price", &prices.wholesale),
        ] {
            if !demand.index_matches(series) {
                return Err(DispatchError::index_mismatch(format!(
                    "{} does not share the demand index ({} vs {} steps)",
                    name,
                    series.len(),
                    demand.len()
                )));
            }
        }

        let (demand, labels) = demand.into_parts();
        let axis = match labels {
            Some(stamps) => {
                warn!(
                    steps = stamps.len(),
                    "timestamped index normalized to integer steps; timestamps kept for output labels"
                );
                TimeAxis::Timestamps(stamps)
            }
            None => TimeAxis::Steps(demand.len()),
        };

        Ok(Self {
            demand,
            solar: solar.into_parts().0,
            feed_in_price: prices.feed_in.into_parts().0,
            grid_price: prices.grid.into_parts().0,
            community_price: prices.community.into_parts().0,
            wholesale_price: prices.wholesale.into_parts().0,
            axis,
        })
    }

    /// Number of timesteps in the horizon.
    pub fn len(&self) -> usize {
        self.demand.len()
    }

    pub fn is_empty(&self) -> bool {
        self.demand.is_empty()
    }

    pub fn axis(&self) -> &TimeAxis {
        &self.axis
    }

    pub fn demand(&self) -> &[f64] {
        &self.demand
    }

    pub fn solar(&self) -> &[f64] {
        &self.solar
    }

    pub fn feed_in_price(&self) -> &[f64] {
        &self.feed_in_price
    }

    pub fn grid_price(&self) -> &[f64] {
        &self.grid_price
    }

    pub fn community_price(&self) -> &[f64] {
        &self.community_price
    }

    pub fn wholesale_price(&self) -> &[f64] {
        &self.wholesale_price
    }
}
