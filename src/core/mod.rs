//! Core business logic - framework-agnostic period validation, line-item
//! calculation, and certificate lifecycle operations.

/// Line-item aggregation: evaluates template rules against the raw event streams
pub mod calculate;
/// Certificate lifecycle: creation, numbering, lock flags, line items, totals
pub mod certificate;
/// Manual line item operations (lock-gated)
pub mod field;
/// Bulk certificate generation and recalculation for a period
pub mod generate;
/// Certificate period validation against the contract window and sibling certificates
pub mod period;
