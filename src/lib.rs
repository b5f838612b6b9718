//! Pensum Engine for university teaching workloads
//!
//! This crate provides the rules engine behind workload (pensum) planning:
//! it derives an employee's teaching threshold from their position, job time,
//! reductions and threshold factors, and validates additional-hours and
//! exam-hours entries against per-factor, per-group and overtime caps.
//!
//! Every rule is a pure function of a [`models::Pensum`] snapshot and the
//! [`config::PensumConfig`] rule tables loaded from YAML.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
