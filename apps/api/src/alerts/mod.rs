// Alert subsystem: persisted criteria owned by employers (resume alerts)
// or candidates (job alerts), CRUD with ownership checks, and on-demand
// ranking of a supplied pool against an alert.

pub mod handlers;
pub mod store;
pub mod validation;
