//! CLI command implementations.

pub mod analyze;
pub mod dashboard;
pub mod journal;
pub mod lookup;
pub mod news;
pub mod scan;
pub mod validate;
