//! Domain types shared by the store accessor, the dispatcher and the HTTP harness.
//! - `attribute` / `record`: the keyed employee record and its blank-field rules.
//! - `agent`: the inbound action-group event and the outbound response envelope.
//! - `body`: the JSON body carried inside the envelope.

pub mod errors;
pub mod attribute;
pub mod record;
pub mod agent;
pub mod body;

pub use attribute::AttrValue;
pub use record::{Record, KEY_ATTRIBUTE};

#[cfg(test)]
mod tests;
