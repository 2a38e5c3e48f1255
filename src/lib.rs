//! goldcalc - expected gold to finish a unit at max rank
//!
//! Estimates how many rerolls and how much gold it takes to collect the
//! remaining copies of a unit from a shared pool, plus sweeps and a Monte
//! Carlo cross-check built on the same model.

pub mod build_info;
pub mod constants;
pub mod estimator;
pub mod simulator;
pub mod sweep;
