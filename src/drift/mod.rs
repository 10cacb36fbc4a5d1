//! Snapshot capture and drift detection for CI regression gating.

pub mod compare;
pub mod snapshot;
