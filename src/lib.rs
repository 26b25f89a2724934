//! Correlated synthetic-metrics engine behind a marketing analytics
//! dashboard: simulator core, single-owner tick loop, table queries,
//! chart series and file exports.

pub mod campaigns;
pub mod config;
pub mod export;
pub mod format;
pub mod logging;
pub mod rng;
pub mod runtime;
pub mod series;
pub mod simulator;
