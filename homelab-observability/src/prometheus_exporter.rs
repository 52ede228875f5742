use prometheus::{Encoder, TextEncoder};

/// Render prometheus text exposition format from a registry.
pub fn render_metrics(registry: &prometheus::Registry) -> String {
    let encoder = TextEncoder::new();
    let metric_families = registry.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::warn!(error = %e, "failed to encode metrics");
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use prometheus::{IntCounter, IntGauge, Opts, Registry};

    #[test]
    fn render_empty_registry_returns_empty_string() {
        let registry = Registry::new();
        assert!(render_metrics(&registry).is_empty());
    }

    #[test]
    fn render_registry_with_counter_and_gauge() {
        let registry = Registry::new();
        let counter = IntCounter::with_opts(Opts::new("writes_total", "Writes")).unwrap();
        let gauge = IntGauge::with_opts(Opts::new("hosts", "Hosts")).unwrap();
        registry.register(Box::new(counter.clone())).unwrap();
        registry.register(Box::new(gauge.clone())).unwrap();
        counter.inc();
        gauge.set(42);

        let output = render_metrics(&registry);
        assert!(output.contains("writes_total 1"));
        assert!(output.contains("hosts 42"));
        assert!(output.contains("# TYPE hosts gauge"));
    }
}
