//! Prometheus metrics for HUD observability.

use metrics::{counter, gauge};

/// Initialize metrics exporter (Prometheus).
pub fn init_metrics() {
    let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
    if let Err(e) = builder.install() {
        tracing::warn!("Failed to install Prometheus exporter: {}", e);
    }
}

/// Record a pushed snapshot.
pub fn snapshot_received(changed: bool) {
    counter!("hud_snapshots_received_total", "changed" => changed.to_string()).increment(1);
}

/// Set the number of resources in the current snapshot.
pub fn resources_tracked(count: usize) {
    gauge!("hud_resources").set(count as f64);
}

/// Set the number of errored builds in the current snapshot.
pub fn build_errors(count: usize) {
    gauge!("hud_build_errors").set(count as f64);
}

/// Record a rendered view.
pub fn view_rendered(view: &str) {
    counter!("hud_views_rendered_total", "view" => view.to_string()).increment(1);
}
