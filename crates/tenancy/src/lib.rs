//! `staffhq-tenancy` — companies (tenants), subscription plans, quotas.

pub mod company;

pub use company::{Company, SubscriptionPlan};
