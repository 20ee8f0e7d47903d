//! # Adapters
//!
//! In-memory implementations of the outbound ports. Production deployments
//! swap these for durable equivalents without touching the service.

pub mod audit_log;
pub mod clock;
pub mod vault;

pub use audit_log::InMemoryAuditLog;
pub use clock::{ManualClock, SystemClock};
