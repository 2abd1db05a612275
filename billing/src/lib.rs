//! The billing engine: exactly one monetizable event per verification call.
//!
//! The idempotency key is the verification id. Appends are the only
//! mutation, duplicates are rejected, and every accepted event is emitted to
//! the downstream settlement sink exactly once.

pub mod engine;
pub mod event;
pub mod sink;

pub use engine::{BillingEngine, BillingError};
pub use event::BillingEvent;
pub use sink::{BillingSink, LogSink};
