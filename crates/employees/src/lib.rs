//! `staffhq-employees` — employee records, attendance, leave.

pub mod attendance;
pub mod employee;
pub mod leave;

pub use attendance::AttendanceDay;
pub use employee::EmployeeProfile;
pub use leave::{LeaveKind, LeaveRequest, LeaveStatus};
