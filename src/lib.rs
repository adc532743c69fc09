//! Customer behaviour dashboard: filter and chart a customer table, and
//! predict satisfaction with a pre-trained classifier.

pub mod config;
pub mod data;
pub mod error;
pub mod predict;
pub mod session;

pub use error::{DashboardError, DashboardResult};
