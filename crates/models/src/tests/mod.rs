/// Blank-field rules and response views of a record
pub mod record_tests;
