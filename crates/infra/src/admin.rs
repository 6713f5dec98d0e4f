//! Role and status administration.
//!
//! Wraps the directory's atomic mutations with their side effect: a
//! best-effort notification to the affected principal.

use std::sync::Arc;

use staffhq_auth::Role;
use staffhq_core::{DomainResult, TenantId, UserId};
use staffhq_employees::EmployeeProfile;

use crate::notify::{Notification, NotificationSink, enqueue_best_effort};
use crate::repository::UserDirectory;

pub struct RoleAdministration {
    directory: Arc<dyn UserDirectory>,
    notifications: Arc<dyn NotificationSink>,
}

impl RoleAdministration {
    pub fn new(directory: Arc<dyn UserDirectory>, notifications: Arc<dyn NotificationSink>) -> Self {
        Self {
            directory,
            notifications,
        }
    }

    /// Change `target`'s role. The last-admin invariant is enforced atomically
    /// by the directory; on success the affected user is notified.
    pub fn change_role(
        &self,
        tenant_id: TenantId,
        target: UserId,
        new_role: Role,
    ) -> DomainResult<EmployeeProfile> {
        let updated = self.directory.change_role(tenant_id, target, new_role)?;

        enqueue_best_effort(
            self.notifications.as_ref(),
            Notification::info(
                target,
                format!("Your role has been updated to {}", new_role.label()),
                "role_change",
            ),
        );

        Ok(updated)
    }

    /// Activate or deactivate `target`, with the same guard and notification.
    pub fn set_active(
        &self,
        tenant_id: TenantId,
        target: UserId,
        is_active: bool,
    ) -> DomainResult<EmployeeProfile> {
        let updated = self.directory.set_active(tenant_id, target, is_active)?;

        let message = if is_active {
            "Your account has been activated"
        } else {
            "Your account has been deactivated"
        };
        enqueue_best_effort(
            self.notifications.as_ref(),
            Notification::info(target, message, "status_change"),
        );

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::memory::InMemoryUserDirectory;
    use crate::notify::{InMemoryNotificationSink, NotifyError};

    fn setup() -> (Arc<InMemoryUserDirectory>, Arc<InMemoryNotificationSink>, RoleAdministration) {
        let directory = Arc::new(InMemoryUserDirectory::new());
        let sink = Arc::new(InMemoryNotificationSink::new());
        let admin = RoleAdministration::new(
            Arc::clone(&directory) as Arc<dyn UserDirectory>,
            Arc::clone(&sink) as Arc<dyn NotificationSink>,
        );
        (directory, sink, admin)
    }

    fn seed(directory: &InMemoryUserDirectory, tenant: TenantId, role: Role, email: &str) -> UserId {
        let profile = EmployeeProfile::new(
            tenant,
            "Test",
            "User",
            email,
            role,
            "Staff",
            Utc::now().date_naive(),
            Utc::now(),
        )
        .unwrap();
        let id = profile.user_id;
        directory.insert(profile).unwrap();
        id
    }

    #[test]
    fn role_change_notifies_the_target() {
        let (directory, sink, admin) = setup();
        let tenant = TenantId::new();
        seed(&directory, tenant, Role::Admin, "admin@acme.test");
        let target = seed(&directory, tenant, Role::Employee, "emp@acme.test");

        let updated = admin.change_role(tenant, target, Role::HrOfficer).unwrap();
        assert_eq!(updated.role, Role::HrOfficer);

        let notes = sink.for_user(target);
        assert_eq!(notes.len(), 1);
        assert!(notes[0].message.contains("HR Officer"));
        assert_eq!(notes[0].reference_type, "role_change");
    }

    #[test]
    fn rejected_change_sends_no_notification() {
        let (directory, sink, admin) = setup();
        let tenant = TenantId::new();
        let only_admin = seed(&directory, tenant, Role::Admin, "admin@acme.test");

        assert!(admin.change_role(tenant, only_admin, Role::Employee).is_err());
        assert!(sink.all().is_empty());
    }

    #[test]
    fn notification_failure_does_not_fail_the_update() {
        struct FailingSink;
        impl NotificationSink for FailingSink {
            fn enqueue(&self, _n: Notification) -> Result<(), NotifyError> {
                Err(NotifyError::Unavailable("boom".into()))
            }
        }

        let directory = Arc::new(InMemoryUserDirectory::new());
        let admin = RoleAdministration::new(
            Arc::clone(&directory) as Arc<dyn UserDirectory>,
            Arc::new(FailingSink),
        );
        let tenant = TenantId::new();
        seed(&directory, tenant, Role::Admin, "admin@acme.test");
        let target = seed(&directory, tenant, Role::Employee, "emp@acme.test");

        let updated = admin.set_active(tenant, target, false).unwrap();
        assert!(!updated.is_active);
    }
}
