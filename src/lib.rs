//! Forwarder Ranking - Multi-criteria freight forwarder ranking.
//!
//! This crate derives criterion weights from pairwise judgments (AHP), ranks
//! alternatives by TOPSIS closeness to an ideal solution, and explains the
//! outcome in plain language.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
