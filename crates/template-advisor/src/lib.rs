//! Template Advisor: a deterministic recommendation engine that matches a
//! business to a workspace template from a short categorical survey, plus the
//! configuration, telemetry, and error plumbing shared by its delivery
//! surfaces.

pub mod advisor;
pub mod config;
pub mod error;
pub mod telemetry;
