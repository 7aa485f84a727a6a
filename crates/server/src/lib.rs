//! Local HTTP harness: serves the dispatcher over `POST /invoke` so the
//! handler can be exercised without the agent runtime.

pub mod errors;
pub mod routes;
pub mod startup;

pub use startup::run;
