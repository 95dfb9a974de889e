//! Hydration intake aggregation and reporting engine.
//!
//! The crate is laid out as a hexagon. [`domain`] holds the intake entity,
//! range resolution, aggregation, and the driving and driven ports;
//! [`outbound`] holds adapters implementing driven ports; [`services`] wires
//! them together. Configuration and telemetry sit at the edge and never leak
//! into the domain.

pub mod config;
pub mod domain;
pub mod outbound;
pub mod services;
pub mod telemetry;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
