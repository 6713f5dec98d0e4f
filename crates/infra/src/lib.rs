//! `staffhq-infra` — injected persistence interfaces and their in-memory
//! implementations.
//!
//! Handlers and the gate depend on the traits in [`repository`]; tests and
//! the default server wiring use the in-memory stores in [`memory`]. Nothing
//! in here builds query text from ids: tenant filtering is a typed predicate
//! applied inside each store.

pub mod admin;
pub mod memory;
pub mod notify;
pub mod repository;

pub use admin::RoleAdministration;
pub use memory::{
    InMemoryAttendanceRepository, InMemoryCompanyRepository, InMemoryLeaveRepository,
    InMemoryPayslipRepository, InMemorySalaryProfileRepository, InMemoryUserDirectory,
};
pub use notify::{
    InMemoryNotificationSink, Notification, NotificationSink, NotifyError, enqueue_best_effort,
};
pub use repository::{
    AttendanceRepository, CompanyRepository, LeaveRepository, PayslipRepository,
    SalaryProfileRepository, UserDirectory,
};
