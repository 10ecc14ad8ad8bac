use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::error::DispatchError;

/// Efficiency applied on charge and discharge when none is given.
const DEFAULT_EFFICIENCY: f64 = 0.98;

/// Purpose-bound sub-account of storage capacity.
///
/// Each use-case tracks its own state-of-charge trajectory; all of them share
/// one physical volume and c-rate ceiling. A use-case discharges only into
/// its matching sink (home storage to the household, wholesale storage to the
/// wholesale market, and so on).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum UseCase {
    Home,
    FeedIn,
    Community,
    Wholesale,
}

impl UseCase {
    pub fn from_name(name: &str) -> Result<Self, DispatchError> {
        name.parse()
            .map_err(|_| DispatchError::UnknownUseCase(name.to_string()))
    }

    /// Whether the sub-account can be charged from its market side
    /// (grid for home, community and wholesale from their markets).
    /// The feed-in tariff is sell-only, so that sub-account charges
    /// from PV alone.
    pub fn has_market_inflow(self) -> bool {
        !matches!(self, UseCase::FeedIn)
    }
}

/// Physical description of one storage unit.
///
/// Read-only for the lifetime of an optimization run. `volume` is the energy
/// capacity; `c_rate` is the fraction of that volume the unit can charge or
/// discharge within one hour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Storage {
    pub id: i64,
    pub c_rate: f64,
    pub volume: f64,
    pub charge_efficiency: f64,
    pub discharge_efficiency: f64,
}

impl Storage {
    /// Build a storage unit with the default 0.98 charge/discharge
    /// efficiency.
    pub fn new(id: i64, c_rate: f64, volume: f64) -> Result<Self, DispatchError> {
        let storage = Self {
            id,
            c_rate,
            volume,
            charge_efficiency: DEFAULT_EFFICIENCY,
            discharge_efficiency: DEFAULT_EFFICIENCY,
        };
        storage.validate()?;
        Ok(storage)
    }

    /// Replace both efficiencies; each must lie in (0, 1].
    pub fn with_efficiency(mut self, charge: f64, discharge: f64) -> Result<Self, DispatchError> {
        self.charge_efficiency = charge;
        self.discharge_efficiency = discharge;
        self.validate()?;
        Ok(self)
    }

    /// Zero-volume sentinel: capacity constraints force every storage flow
    /// to zero, so "no storage" needs no special casing in the model.
    pub fn none() -> Self {
        Self {
            id: 0,
            c_rate: 1.0,
            volume: 0.0,
            charge_efficiency: 1.0,
            discharge_efficiency: 1.0,
        }
    }

    /// Maximum charge or discharge rate, energy per hour.
    pub fn rate_limit(&self) -> f64 {
        self.c_rate * self.volume
    }

    pub(crate) fn validate(&self) -> Result<(), DispatchError> {
        if !self.c_rate.is_finite() || self.c_rate <= 0.0 {
            return Err(DispatchError::invalid_input(format!(
                "c-rate must be positive, got {}",
                self.c_rate
            )));
        }
        if !self.volume.is_finite() || self.volume < 0.0 {
            return Err(DispatchError::invalid_input(format!(
                "volume must be non-negative, got {}",
                self.volume
            )));
        }
        for (name, value) in [
            ("charge efficiency", self.charge_efficiency),
            ("discharge efficiency", self.discharge_efficiency),
        ] {
            if !value.is_finite() || value <= 0.0 || value > 1.0 {
                return Err(DispatchError::invalid_input(format!(
                    "{} must be in (0, 1], got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}
