//! Core business logic - framework-agnostic gift lifecycle and its persistence.

/// Human-readable labels for statuses and push channels
pub mod description;
/// Database-backed gift operations: creation, lookups, guarded transitions, expiry sweep
pub mod gift;
/// Pure gift lifecycle state machine
pub mod lifecycle;
/// Periodic expiry sweep loop
pub mod sweeper;
/// Public token generation
pub mod token;
