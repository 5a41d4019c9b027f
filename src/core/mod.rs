pub mod filter;
pub mod recurrence;
pub mod session;
pub mod task;
