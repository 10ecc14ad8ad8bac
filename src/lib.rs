//! Prosumer dispatch engine.
//!
//! Builds a linear program over a fixed horizon for a household with PV
//! generation and battery storage trading across four channels (regulated
//! feed-in tariff, grid supplier, community market, wholesale market),
//! solves it with a pure-Rust LP backend, and derives storage valuations
//! and bidding curves from repeated solves.
//!
//! The storage volume is partitioned into purpose-bound sub-accounts
//! ("use-cases"), each with its own state-of-charge trajectory under one
//! shared physical ceiling. One solve is one ephemeral model instance:
//! build, solve, read the tables.

pub mod bidding;
pub mod config;
pub mod domain;
pub mod error;
pub mod optimizer;
pub mod telemetry;
pub mod valuation;

pub use bidding::{bidding_curve, BidSide, BidStep, WorthPoint};
pub use config::{ChannelFlags, DispatchConfig, ObjectiveMode, SolverKind};
pub use domain::{DispatchInputs, MarketPrices, Storage, TimeAxis, TimeSeries, UseCase};
pub use error::DispatchError;
pub use optimizer::{
    solve_dispatch, DemandCoverage, DispatchProblem, DispatchResults, PvUsage, SolvedDispatch,
    StorageUsage,
};
pub use valuation::{storage_worth, storage_worth_batch, StorageWorth};
