pub mod alert;
pub mod candidate;
pub mod job;
