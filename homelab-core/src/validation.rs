//! Whole-document validation.
//!
//! Runs before every write. All issues are collected so the caller can show
//! every problem at once; paths use dotted JSON notation (`hosts.0.ip`).

use crate::model::{Host, InfrastructureData, Service};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::LazyLock;

static IPV4_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,3}\.){3}\d{1,3}$").expect("IPv4 pattern compiles"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Dotted IPv4 with every octet in 0..=255.
pub fn is_valid_ipv4(ip: &str) -> bool {
    IPV4_SHAPE.is_match(ip) && ip.split('.').all(|octet| octet.parse::<u8>().is_ok())
}

pub fn is_valid_port(port: u16) -> bool {
    port >= 1
}

fn require_non_empty(issues: &mut Vec<ValidationIssue>, path: String, value: &str) {
    if value.trim().is_empty() {
        issues.push(ValidationIssue::new(path, "must not be empty"));
    }
}

fn check_service(issues: &mut Vec<ValidationIssue>, prefix: &str, service: &Service) {
    require_non_empty(issues, format!("{prefix}.id"), &service.id);
    require_non_empty(issues, format!("{prefix}.name"), &service.name);
    if !is_valid_port(service.port) {
        issues.push(ValidationIssue::new(
            format!("{prefix}.port"),
            "Port must be between 1 and 65535",
        ));
    }
}

fn check_host(issues: &mut Vec<ValidationIssue>, index: usize, host: &Host) {
    let prefix = format!("hosts.{index}");
    require_non_empty(issues, format!("{prefix}.id"), &host.id);
    require_non_empty(issues, format!("{prefix}.name"), &host.name);
    if !is_valid_ipv4(&host.ip) {
        issues.push(ValidationIssue::new(format!("{prefix}.ip"), "Invalid IP address"));
    }
    require_non_empty(issues, format!("{prefix}.location.id"), &host.location.id);
    require_non_empty(issues, format!("{prefix}.location.label"), &host.location.label);
    if !host.position.x.is_finite() || !host.position.y.is_finite() {
        issues.push(ValidationIssue::new(
            format!("{prefix}.position"),
            "Position must be finite",
        ));
    }

    let mut service_ids = HashSet::new();
    for (j, service) in host.services.iter().enumerate() {
        let svc_prefix = format!("{prefix}.services.{j}");
        check_service(issues, &svc_prefix, service);
        if !service_ids.insert(service.id.as_str()) {
            issues.push(ValidationIssue::new(
                format!("{svc_prefix}.id"),
                format!("Duplicate service id '{}'", service.id),
            ));
        }
    }
}

/// Validate a whole document, returning every issue found.
pub fn validate(doc: &InfrastructureData) -> Result<(), Vec<ValidationIssue>> {
    let mut issues = Vec::new();

    let mut location_ids = HashSet::new();
    for (i, location) in doc.locations.iter().enumerate() {
        require_non_empty(&mut issues, format!("locations.{i}.id"), &location.id);
        require_non_empty(&mut issues, format!("locations.{i}.label"), &location.label);
        if !location_ids.insert(location.id.as_str()) {
            issues.push(ValidationIssue::new(
                format!("locations.{i}.id"),
                format!("Duplicate location id '{}'", location.id),
            ));
        }
    }

    let mut host_ids = HashSet::new();
    for (i, host) in doc.hosts.iter().enumerate() {
        check_host(&mut issues, i, host);
        if !host_ids.insert(host.id.as_str()) {
            issues.push(ValidationIssue::new(
                format!("hosts.{i}.id"),
                format!("Duplicate host id '{}'", host.id),
            ));
        }
    }

    let mut connection_ids = HashSet::new();
    for (i, conn) in doc.connections.iter().enumerate() {
        let prefix = format!("connections.{i}");
        require_non_empty(&mut issues, format!("{prefix}.id"), &conn.id);
        require_non_empty(&mut issues, format!("{prefix}.sourceHostId"), &conn.source_host_id);
        require_non_empty(&mut issues, format!("{prefix}.targetHostId"), &conn.target_host_id);
        if !connection_ids.insert(conn.id.as_str()) {
            issues.push(ValidationIssue::new(
                format!("{prefix}.id"),
                format!("Duplicate connection id '{}'", conn.id),
            ));
        }
        for (field, host_id) in [
            ("sourceHostId", &conn.source_host_id),
            ("targetHostId", &conn.target_host_id),
        ] {
            if !host_id.is_empty() && !host_ids.contains(host_id.as_str()) {
                issues.push(ValidationIssue::new(
                    format!("{prefix}.{field}"),
                    format!("Unknown host '{host_id}'"),
                ));
            }
        }
    }

    if issues.is_empty() { Ok(()) } else { Err(issues) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AppSettings, Connection, GeographicLocation, Position, Protocol};

    fn lan() -> GeographicLocation {
        GeographicLocation {
            id: "lan".into(),
            label: "LAN".into(),
        }
    }

    fn host(id: &str, ip: &str) -> Host {
        Host {
            id: id.into(),
            name: format!("host-{id}"),
            ip: ip.into(),
            location: lan(),
            position: Position::default(),
            services: vec![],
            metadata: None,
        }
    }

    fn doc(hosts: Vec<Host>, connections: Vec<Connection>) -> InfrastructureData {
        InfrastructureData {
            version: "1.0".into(),
            locations: vec![lan()],
            hosts,
            connections,
            settings: AppSettings::default(),
        }
    }

    fn conn(id: &str, a: &str, b: &str) -> Connection {
        Connection {
            id: id.into(),
            source_host_id: a.into(),
            target_host_id: b.into(),
            label: None,
        }
    }

    #[test]
    fn ipv4_shape_and_range() {
        assert!(is_valid_ipv4("192.168.1.10"));
        assert!(is_valid_ipv4("100.64.0.1"));
        assert!(!is_valid_ipv4("256.1.1.1"));
        assert!(!is_valid_ipv4("10.0.0"));
        assert!(!is_valid_ipv4("nas.local"));
        assert!(!is_valid_ipv4("1.2.3.4 "));
    }

    #[test]
    fn valid_document_passes() {
        let d = doc(vec![host("a", "10.0.0.1"), host("b", "10.0.0.2")], vec![conn("c1", "a", "b")]);
        assert!(validate(&d).is_ok());
    }

    #[test]
    fn bad_ip_reports_path() {
        let d = doc(vec![host("a", "10.0.0.999")], vec![]);
        let issues = validate(&d).unwrap_err();
        assert_eq!(issues, vec![ValidationIssue::new("hosts.0.ip", "Invalid IP address")]);
    }

    #[test]
    fn zero_port_and_empty_name_both_reported() {
        let mut h = host("a", "10.0.0.1");
        h.services.push(Service {
            id: "s1".into(),
            name: " ".into(),
            port: 0,
            protocol: Protocol::Http,
            description: None,
            api_endpoint: None,
        });
        let issues = validate(&doc(vec![h], vec![])).unwrap_err();
        let paths: Vec<_> = issues.iter().map(|i| i.path.as_str()).collect();
        assert_eq!(paths, vec!["hosts.0.services.0.name", "hosts.0.services.0.port"]);
    }

    #[test]
    fn dangling_connection_is_rejected() {
        let d = doc(vec![host("a", "10.0.0.1")], vec![conn("c1", "a", "ghost")]);
        let issues = validate(&d).unwrap_err();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path, "connections.0.targetHostId");
    }

    #[test]
    fn duplicate_host_ids_are_rejected() {
        let d = doc(vec![host("a", "10.0.0.1"), host("a", "10.0.0.2")], vec![]);
        let issues = validate(&d).unwrap_err();
        assert_eq!(issues[0].path, "hosts.1.id");
    }
}
