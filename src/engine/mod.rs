//! Settlement engine: bet registry and per-player aggregation.

pub mod aggregator;
pub mod registry;

pub use aggregator::{Aggregator, BetSettlement, Ledger, SettlementReport, TeamShare};
pub use registry::{BetId, BetInstance, BetRegistry, FrozenRound};
