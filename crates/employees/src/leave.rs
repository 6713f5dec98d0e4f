use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use staffhq_core::{DomainError, DomainResult, LeaveRequestId, TenantId, UserId};

/// Kind of time off requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveKind {
    Paid,
    Sick,
    Unpaid,
}

/// Leave request lifecycle: pending until HR/admin decides, then frozen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveRequest {
    pub id: LeaveRequestId,
    pub tenant_id: TenantId,
    pub employee_id: UserId,
    pub kind: LeaveKind,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days_requested: i64,
    pub reason: String,
    pub status: LeaveStatus,
    pub decided_by: Option<UserId>,
    pub decision_notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl LeaveRequest {
    pub fn submit(
        tenant_id: TenantId,
        employee_id: UserId,
        kind: LeaveKind,
        start_date: NaiveDate,
        end_date: NaiveDate,
        reason: impl Into<String>,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        if end_date < start_date {
            return Err(DomainError::validation(
                "end date must not be before start date",
            ));
        }

        Ok(Self {
            id: LeaveRequestId::new(),
            tenant_id,
            employee_id,
            kind,
            start_date,
            end_date,
            days_requested: (end_date - start_date).num_days() + 1,
            reason: reason.into(),
            status: LeaveStatus::Pending,
            decided_by: None,
            decision_notes: None,
            created_at: now,
        })
    }

    pub fn approve(&mut self, approver: UserId, notes: Option<String>) -> DomainResult<()> {
        self.decide(LeaveStatus::Approved, approver, notes)
    }

    pub fn reject(&mut self, approver: UserId, notes: Option<String>) -> DomainResult<()> {
        self.decide(LeaveStatus::Rejected, approver, notes)
    }

    fn decide(&mut self, status: LeaveStatus, approver: UserId, notes: Option<String>) -> DomainResult<()> {
        if self.status != LeaveStatus::Pending {
            return Err(DomainError::invariant(format!(
                "leave request has already been {}",
                match self.status {
                    LeaveStatus::Approved => "approved",
                    LeaveStatus::Rejected => "rejected",
                    LeaveStatus::Pending => unreachable!(),
                }
            )));
        }
        self.status = status;
        self.decided_by = Some(approver);
        self.decision_notes = notes;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> LeaveRequest {
        let start = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 3, 6).unwrap();
        LeaveRequest::submit(
            TenantId::new(),
            UserId::new(),
            LeaveKind::Paid,
            start,
            end,
            "family trip",
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn day_count_is_inclusive() {
        assert_eq!(request().days_requested, 5);
    }

    #[test]
    fn inverted_range_is_rejected() {
        let start = NaiveDate::from_ymd_opt(2026, 3, 6).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let err = LeaveRequest::submit(
            TenantId::new(),
            UserId::new(),
            LeaveKind::Sick,
            start,
            end,
            "",
            Utc::now(),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn deciding_twice_is_an_invariant_violation() {
        let mut req = request();
        let hr = UserId::new();

        req.approve(hr, Some("enjoy".into())).unwrap();
        assert_eq!(req.status, LeaveStatus::Approved);
        assert_eq!(req.decided_by, Some(hr));

        let err = req.reject(hr, None).unwrap_err();
        match err {
            DomainError::InvariantViolation(msg) => assert!(msg.contains("approved")),
            other => panic!("expected invariant violation, got {other:?}"),
        }
    }
}
