//! Service layer bridging agent action-group events to the employee record table.
//! - `retry`: throttle-aware retry policy wrapped around every store call.
//! - `store`: the `RecordStore` seam with DynamoDB and in-memory backends.
//! - `records`: fetch / conditional update with error translation.
//! - `dispatcher`: turns an event into a response envelope.

pub mod errors;
pub mod retry;
pub mod observability;
pub mod store;
pub mod records;
pub mod dispatcher;

pub use dispatcher::Dispatcher;
pub use records::RecordAccessor;
pub use retry::RetryPolicy;
