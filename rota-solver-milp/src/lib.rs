//! Mixed-integer roster solver for Rota.
//!
//! This crate provides [`MilpSolver`], the default implementation of the
//! [`Solver`](rota_core::Solver) trait. Each request becomes a binary
//! assignment model over `(staff, day, shift)` triples, built with `good_lp`
//! and solved by HiGHS within a configurable time budget.
//!
//! Leave and the one-shift-per-day rule are hard constraints. Coverage, the
//! weekly cap, rest periods and shift preferences are soft: each carries a
//! slack variable weighted by [`PenaltyWeights`], and the solver minimises
//! their weighted sum.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod config;
mod extract;
mod model;
mod solver;

pub use config::{MilpSolverConfig, PenaltyWeights, PenaltyWeightsError};
pub use solver::MilpSolver;
