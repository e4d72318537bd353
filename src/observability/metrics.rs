//! Metrics collection and exposition.
//!
//! # Metrics
//! - `player_server_requests_total` (counter): by method, route, status
//! - `player_server_request_duration_seconds` (histogram): by route
//! - `player_server_connections_total` (counter)
//! - `player_server_dropped_connections_total` (counter): by reason

use ::metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus exporter on `addr`. Must run inside a tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// `method` must come from a fixed vocabulary such as `Method::label`.
pub fn record_request(method: &'static str, route: &'static str, status: u16, start: Instant) {
    counter!(
        "player_server_requests_total",
        "method" => method,
        "route" => route,
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("player_server_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_connection() {
    counter!("player_server_connections_total").increment(1);
}

/// A connection closed without a response.
pub fn record_dropped(reason: &'static str) {
    counter!("player_server_dropped_connections_total", "reason" => reason).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::Method;

    #[test]
    fn test_client_methods_share_one_series() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        ::metrics::with_local_recorder(&recorder, || {
            for i in 0..500 {
                let method = Method::parse(&format!("X{i}"));
                record_request(method.label(), "not_found", 404, Instant::now());
            }
            record_request(Method::Get.label(), "list_players", 200, Instant::now());
        });

        let rendered = handle.render();
        let series: Vec<_> = rendered
            .lines()
            .filter(|line| line.starts_with("player_server_requests_total{"))
            .collect();
        assert_eq!(series.len(), 2, "{rendered}");
        assert!(series.iter().any(|line| line.contains("method=\"other\"") && line.ends_with(" 500")));
        assert!(series.iter().any(|line| line.contains("method=\"GET\"")));
    }
}
