use once_cell::sync::Lazy;
use prometheus::{register_int_counter, Encoder, IntCounter, TextEncoder};

// Prometheus metrics (default registry)
pub static REQUESTS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "record_bridge_requests_total",
        "Total agent events dispatched"
    )
    .expect("register requests_total")
});

pub static RETRIES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "record_bridge_retries_total",
        "Total store calls retried after throttling"
    )
    .expect("register retries_total")
});

pub static CONFLICTS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "record_bridge_conflicts_total",
        "Total writes rejected because the field was already filled"
    )
    .expect("register conflicts_total")
});

pub static STORE_ERRORS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "record_bridge_store_errors_total",
        "Total store calls that failed after retries"
    )
    .expect("register store_errors_total")
});

/// Render the default registry in the Prometheus text format.
pub fn encode_metrics() -> Result<String, String> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| format!("metrics encode error: {e}"))?;
    String::from_utf8(buffer).map_err(|e| format!("metrics encode error: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touched_counters_show_up_in_exposition() {
        REQUESTS_TOTAL.inc();
        RETRIES_TOTAL.inc_by(0);
        let text = encode_metrics().expect("encode");
        assert!(text.contains("record_bridge_requests_total"));
        assert!(text.contains("record_bridge_retries_total"));
    }
}
