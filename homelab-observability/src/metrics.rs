use crate::prometheus_exporter::render_metrics;
use homelab_core::edit::DocumentCounts;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry};

/// Metrics collector. All counters are gated behind `enabled`.
///
/// When disabled, no registry is created and every recording call returns
/// immediately.
pub struct MetricsCollector {
    enabled: bool,
    registry: Option<Registry>,
    pub http_requests_total: Option<IntCounterVec>,
    pub http_request_duration: Option<HistogramVec>,
    pub document_writes_total: Option<IntCounterVec>,
    pub hosts: Option<IntGauge>,
    pub services: Option<IntGauge>,
    pub connections: Option<IntGauge>,
}

impl MetricsCollector {
    /// Create a new collector. When `enabled = false`, everything is None.
    pub fn new(enabled: bool) -> anyhow::Result<Self> {
        if !enabled {
            return Ok(Self::disabled());
        }

        let registry = Registry::new();

        let http_requests_total = IntCounterVec::new(
            Opts::new("homelab_http_requests_total", "Total HTTP requests"),
            &["path", "method", "status"],
        )?;

        let http_request_duration = HistogramVec::new(
            HistogramOpts::new("homelab_http_request_duration_seconds", "Request latency")
                .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0, 30.0, 60.0]),
            &["path"],
        )?;

        let document_writes_total = IntCounterVec::new(
            Opts::new("homelab_document_writes_total", "Data file write attempts"),
            &["outcome"],
        )?;

        let hosts = IntGauge::new("homelab_hosts", "Hosts in the document")?;
        let services = IntGauge::new("homelab_services", "Services across all hosts")?;
        let connections = IntGauge::new("homelab_connections", "Connections between hosts")?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration.clone()))?;
        registry.register(Box::new(document_writes_total.clone()))?;
        registry.register(Box::new(hosts.clone()))?;
        registry.register(Box::new(services.clone()))?;
        registry.register(Box::new(connections.clone()))?;

        Ok(Self {
            enabled: true,
            registry: Some(registry),
            http_requests_total: Some(http_requests_total),
            http_request_duration: Some(http_request_duration),
            document_writes_total: Some(document_writes_total),
            hosts: Some(hosts),
            services: Some(services),
            connections: Some(connections),
        })
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            registry: None,
            http_requests_total: None,
            http_request_duration: None,
            document_writes_total: None,
            hosts: None,
            services: None,
            connections: None,
        }
    }

    /// Record a request (no-op when disabled).
    #[inline]
    pub fn record_request(&self, path: &str, method: &str, status: u16, duration_secs: f64) {
        if !self.enabled {
            return;
        }
        if let Some(ref counter) = self.http_requests_total {
            let mut buf = itoa::Buffer::new();
            let status_str = buf.format(status);
            counter.with_label_values(&[path, method, status_str]).inc();
        }
        if let Some(ref hist) = self.http_request_duration {
            hist.with_label_values(&[path]).observe(duration_secs);
        }
    }

    /// Count a write attempt and, on success, refresh the document gauges.
    pub fn record_write(&self, counts: Option<DocumentCounts>) {
        if !self.enabled {
            return;
        }
        let outcome = if counts.is_some() { "ok" } else { "error" };
        if let Some(ref counter) = self.document_writes_total {
            counter.with_label_values(&[outcome]).inc();
        }
        if let Some(counts) = counts {
            self.set_counts(counts);
        }
    }

    pub fn set_counts(&self, counts: DocumentCounts) {
        let pairs = [
            (&self.hosts, counts.hosts),
            (&self.services, counts.services),
            (&self.connections, counts.connections),
        ];
        for (gauge, value) in pairs {
            if let Some(gauge) = gauge {
                gauge.set(i64::try_from(value).unwrap_or(i64::MAX));
            }
        }
    }

    /// Render prometheus text exposition format.
    pub fn render(&self) -> String {
        self.registry.as_ref().map(render_metrics).unwrap_or_default()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}
