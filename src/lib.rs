//! Mixmaker - ELO-balanced team mixing engine
//!
//! This crate turns a set of platform users into two rating-balanced
//! teams through a gather → balance → adjust → finalize session
//! lifecycle, with ratings pulled live from the FACEIT API.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
