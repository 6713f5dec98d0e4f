//! Infrastructure wiring for the HTTP application.

use std::sync::Arc;

use staffhq_infra::{
    AttendanceRepository, CompanyRepository, InMemoryAttendanceRepository,
    InMemoryCompanyRepository, InMemoryLeaveRepository, InMemoryNotificationSink,
    InMemoryPayslipRepository, InMemorySalaryProfileRepository, InMemoryUserDirectory,
    LeaveRepository, NotificationSink, PayslipRepository, RoleAdministration,
    SalaryProfileRepository, UserDirectory,
};

/// Everything the handlers need, behind the injected repository interfaces.
pub struct AppServices {
    pub users: Arc<dyn UserDirectory>,
    pub companies: Arc<dyn CompanyRepository>,
    pub attendance: Arc<dyn AttendanceRepository>,
    pub leave: Arc<dyn LeaveRepository>,
    pub salaries: Arc<dyn SalaryProfileRepository>,
    pub payslips: Arc<dyn PayslipRepository>,
    pub notifications: Arc<dyn NotificationSink>,
    pub role_admin: RoleAdministration,
}

impl AppServices {
    /// Default wiring: in-memory stores throughout.
    pub fn in_memory() -> Self {
        let users: Arc<dyn UserDirectory> = Arc::new(InMemoryUserDirectory::new());
        let notifications: Arc<dyn NotificationSink> = Arc::new(InMemoryNotificationSink::new());
        let role_admin = RoleAdministration::new(Arc::clone(&users), Arc::clone(&notifications));

        Self {
            users,
            companies: Arc::new(InMemoryCompanyRepository::new()),
            attendance: Arc::new(InMemoryAttendanceRepository::new()),
            leave: Arc::new(InMemoryLeaveRepository::new()),
            salaries: Arc::new(InMemorySalaryProfileRepository::new()),
            payslips: Arc::new(InMemoryPayslipRepository::new()),
            notifications,
            role_admin,
        }
    }
}
