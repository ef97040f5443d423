// Re-export public API
pub mod api;
pub mod cicheck;
pub mod dast;
pub mod error;
pub mod findings;
pub mod model;
pub mod poll;
pub mod risk;
pub mod sarif;
pub mod status;

pub use api::{ApiError, AppApi};
pub use dast::{run_dast_check, DastCheckOptions, DastOutcome};
pub use error::CoreError;
pub use risk::RiskLevel;
pub use status::{FileDynamicStatus, ScanStatus};
