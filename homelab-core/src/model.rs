use serde::{Deserialize, Serialize};

/// Canvas coordinates of a host node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Default for Position {
    fn default() -> Self {
        Self { x: 200.0, y: 200.0 }
    }
}

/// A network location. Hosts sharing a location id are on the same network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeographicLocation {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    #[default]
    Http,
    Https,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Http => "http",
            Protocol::Https => "https",
        }
    }

    /// Port a browser assumes when none is given in the URL.
    pub fn default_port(&self) -> u16 {
        match self {
            Protocol::Http => 80,
            Protocol::Https => 443,
        }
    }
}

/// A named port on a host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub name: String,
    pub port: u16,
    pub protocol: Protocol,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Marks services that expose an API the dashboard can test (e.g. Ollama).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_endpoint: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hardware: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A machine record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Host {
    pub id: String,
    pub name: String,
    pub ip: String,
    pub location: GeographicLocation,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HostMetadata>,
}

/// An edge between two hosts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub id: String,
    pub source_host_id: String,
    pub target_host_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Connection {
    pub fn touches(&self, host_id: &str) -> bool {
        self.source_host_id == host_id || self.target_host_id == host_id
    }

    /// True when both connections join the same pair of hosts, in either direction.
    pub fn links_same_pair(&self, source: &str, target: &str) -> bool {
        (self.source_host_id == source && self.target_host_id == target)
            || (self.source_host_id == target && self.target_host_id == source)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(rename = "showIPs")]
    pub show_ips: bool,
    #[serde(rename = "showPorts")]
    pub show_ports: bool,
    #[serde(rename = "darkMode", default)]
    pub dark_mode: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            show_ips: true,
            show_ports: true,
            dark_mode: false,
        }
    }
}

/// The whole document persisted to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfrastructureData {
    pub version: String,
    #[serde(default)]
    pub locations: Vec<GeographicLocation>,
    #[serde(default)]
    pub hosts: Vec<Host>,
    #[serde(default)]
    pub connections: Vec<Connection>,
    pub settings: AppSettings,
}

pub const DEFAULT_VERSION: &str = "1.0";

impl Default for InfrastructureData {
    fn default() -> Self {
        Self {
            version: DEFAULT_VERSION.to_string(),
            locations: vec![GeographicLocation {
                id: "home".to_string(),
                label: "Home".to_string(),
            }],
            hosts: Vec::new(),
            connections: Vec::new(),
            settings: AppSettings::default(),
        }
    }
}
