pub mod cicheck;
pub mod dastcheck;
pub mod sarif;
pub mod schedule;
