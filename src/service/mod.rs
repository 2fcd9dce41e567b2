//! Service Module
//!
//! Cache-aside access to upstream reports.

mod reports;

pub use reports::{ReportsService, TOP_COUNT};
