//! Job cost engine: hierarchy roll-ups, bid leveling, commitment and billing
//! totals, schedule variance, cashflow, and a reconciliation audit that
//! recomputes every stored figure the detail rows can derive.
//!
//! Documents load through [`loader`], engine functions are pure and total,
//! and [`report::build_dashboard`] assembles the whole picture into one
//! serializable struct.

pub mod engine;
pub mod fixtures;
pub mod loader;
pub mod models;
pub mod report;
pub mod util;
