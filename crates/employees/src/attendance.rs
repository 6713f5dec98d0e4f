use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use staffhq_core::{DomainError, DomainResult, TenantId, UserId};

/// One employee's attendance for one calendar day.
///
/// A day holds at most one open session: check-in opens it, check-out closes
/// it and records hours worked. A second check-in while a session is open is
/// a conflict, as is checking out with nothing open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceDay {
    pub tenant_id: TenantId,
    pub employee_id: UserId,
    pub date: NaiveDate,
    pub check_in: Option<DateTime<Utc>>,
    pub check_out: Option<DateTime<Utc>>,
    pub hours_worked: f64,
}

impl AttendanceDay {
    pub fn open(tenant_id: TenantId, employee_id: UserId, date: NaiveDate) -> Self {
        Self {
            tenant_id,
            employee_id,
            date,
            check_in: None,
            check_out: None,
            hours_worked: 0.0,
        }
    }

    pub fn has_open_session(&self) -> bool {
        self.check_in.is_some() && self.check_out.is_none()
    }

    pub fn check_in(&mut self, at: DateTime<Utc>) -> DomainResult<()> {
        if self.has_open_session() {
            return Err(DomainError::conflict(
                "you already have an open check-in session. Please check out first",
            ));
        }
        // Re-checking in after a completed session starts the day over; the
        // previous hours are kept until the next check-out recomputes them.
        self.check_in = Some(at);
        self.check_out = None;
        Ok(())
    }

    pub fn check_out(&mut self, at: DateTime<Utc>) -> DomainResult<()> {
        let Some(started) = self.check_in else {
            return Err(DomainError::conflict(
                "no open check-in session found for today. Please check in first",
            ));
        };
        if self.check_out.is_some() {
            return Err(DomainError::conflict(
                "you have already checked out for today",
            ));
        }

        self.check_out = Some(at);
        self.hours_worked = ((at - started).num_seconds().max(0) as f64) / 3600.0;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn day() -> AttendanceDay {
        AttendanceDay::open(TenantId::new(), UserId::new(), Utc::now().date_naive())
    }

    #[test]
    fn check_in_then_out_records_hours() {
        let mut d = day();
        let start = Utc::now();
        d.check_in(start).unwrap();
        assert!(d.has_open_session());

        d.check_out(start + Duration::hours(8)).unwrap();
        assert!(!d.has_open_session());
        assert!((d.hours_worked - 8.0).abs() < 1e-9);
    }

    #[test]
    fn double_check_in_is_a_conflict() {
        let mut d = day();
        d.check_in(Utc::now()).unwrap();
        assert!(matches!(d.check_in(Utc::now()), Err(DomainError::Conflict(_))));
    }

    #[test]
    fn check_out_without_session_is_a_conflict() {
        let mut d = day();
        assert!(matches!(d.check_out(Utc::now()), Err(DomainError::Conflict(_))));
    }

    #[test]
    fn clock_skew_never_yields_negative_hours() {
        let mut d = day();
        let start = Utc::now();
        d.check_in(start).unwrap();
        d.check_out(start - Duration::minutes(5)).unwrap();
        assert_eq!(d.hours_worked, 0.0);
    }
}
