//! Shared building blocks for the record bridge crates: logging setup and
//! small wire types that every surface reuses.

pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn health_serializes_status_field() {
        let h = types::Health::ok();
        let json = serde_json::to_value(&h).expect("serialize health");
        assert_eq!(json["status"], "ok");
    }

    #[test]
    fn logging_init_is_idempotent() {
        // second call must not panic on an already-set global subscriber
        utils::logging::init_logging_default();
        utils::logging::init_logging_json();
    }
}
