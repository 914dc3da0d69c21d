mod attendance_service;
pub mod duplicate_rules;

pub use attendance_service::{summarize, AttendanceService};
