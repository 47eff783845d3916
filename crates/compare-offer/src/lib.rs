//! CompareOffer: job offer records and a weighted comparison engine.
//!
//! [`scoring`] turns one offer plus a [`scoring::WeightConfiguration`] into a score,
//! [`comparison`] ranks a selected subset, and [`offers`] carries the owner-scoped storage,
//! service and HTTP routes around them.

pub mod comparison;
pub mod config;
pub mod error;
pub mod offers;
pub mod scoring;
pub mod telemetry;
