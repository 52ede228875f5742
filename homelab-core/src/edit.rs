//! In-memory edit helpers for the infrastructure document.
//!
//! Every helper mutates the document in place and returns the touched record.
//! Persisting the result is up to the caller (see `homelab-store`).

use crate::error::HomelabError;
use crate::model::{
    AppSettings, Connection, GeographicLocation, Host, HostMetadata, InfrastructureData, Position,
    Protocol, Service,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Host to create. The location is picked by id from the document's
/// locations, or given inline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHost {
    pub name: String,
    pub ip: String,
    #[serde(default)]
    pub location_id: Option<String>,
    #[serde(default)]
    pub location: Option<GeographicLocation>,
    #[serde(default)]
    pub position: Option<Position>,
    #[serde(default)]
    pub metadata: Option<HostMetadata>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub location_id: Option<String>,
    #[serde(default)]
    pub location: Option<GeographicLocation>,
    #[serde(default)]
    pub position: Option<Position>,
    /// Absent keeps the metadata, `null` removes it.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub metadata: Option<Option<HostMetadata>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewService {
    pub name: String,
    pub port: u16,
    #[serde(default)]
    pub protocol: Protocol,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub api_endpoint: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub protocol: Option<Protocol>,
    /// Absent keeps the description, `null` removes it.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub api_endpoint: Option<Option<bool>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsPatch {
    #[serde(rename = "showIPs", default)]
    pub show_ips: Option<bool>,
    #[serde(rename = "showPorts", default)]
    pub show_ports: Option<bool>,
    #[serde(rename = "darkMode", default)]
    pub dark_mode: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DocumentCounts {
    pub hosts: usize,
    pub services: usize,
    pub connections: usize,
    pub locations: usize,
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

impl InfrastructureData {
    pub fn host(&self, id: &str) -> Option<&Host> {
        self.hosts.iter().find(|h| h.id == id)
    }

    fn host_mut(&mut self, id: &str) -> Result<&mut Host, HomelabError> {
        self.hosts
            .iter_mut()
            .find(|h| h.id == id)
            .ok_or_else(|| HomelabError::HostNotFound(id.to_string()))
    }

    pub fn service(&self, host_id: &str, service_id: &str) -> Result<(&Host, &Service), HomelabError> {
        let host = self
            .host(host_id)
            .ok_or_else(|| HomelabError::HostNotFound(host_id.to_string()))?;
        let service = host
            .services
            .iter()
            .find(|s| s.id == service_id)
            .ok_or_else(|| HomelabError::ServiceNotFound(service_id.to_string()))?;
        Ok((host, service))
    }

    pub fn location(&self, id: &str) -> Option<&GeographicLocation> {
        self.locations.iter().find(|l| l.id == id)
    }

    fn resolve_location(
        &self,
        location_id: Option<&str>,
        inline: Option<GeographicLocation>,
    ) -> Result<Option<GeographicLocation>, HomelabError> {
        match (location_id, inline) {
            (Some(id), _) => self
                .location(id)
                .cloned()
                .map(Some)
                .ok_or_else(|| HomelabError::LocationNotFound(id.to_string())),
            (None, inline) => Ok(inline),
        }
    }

    pub fn counts(&self) -> DocumentCounts {
        DocumentCounts {
            hosts: self.hosts.len(),
            services: self.hosts.iter().map(|h| h.services.len()).sum(),
            connections: self.connections.len(),
            locations: self.locations.len(),
        }
    }

    // ── Hosts ────────────────────────────────────────────────────

    pub fn add_host(&mut self, new: NewHost) -> Result<Host, HomelabError> {
        let name = new.name.trim().to_string();
        if name.is_empty() {
            return Err(HomelabError::InvalidInput("Name is required".into()));
        }
        let location = self
            .resolve_location(new.location_id.as_deref(), new.location)?
            .ok_or_else(|| HomelabError::InvalidInput("Please select a location".into()))?;

        let host = Host {
            id: new_id(),
            name,
            ip: new.ip.trim().to_string(),
            location,
            position: new.position.unwrap_or_default(),
            services: Vec::new(),
            metadata: new.metadata,
        };
        self.hosts.push(host.clone());
        Ok(host)
    }

    pub fn update_host(&mut self, id: &str, patch: HostPatch) -> Result<Host, HomelabError> {
        let location = self.resolve_location(patch.location_id.as_deref(), patch.location)?;
        let host = self.host_mut(id)?;
        if let Some(name) = patch.name {
            host.name = name.trim().to_string();
        }
        if let Some(ip) = patch.ip {
            host.ip = ip.trim().to_string();
        }
        if let Some(location) = location {
            host.location = location;
        }
        if let Some(position) = patch.position {
            host.position = position;
        }
        if let Some(metadata) = patch.metadata {
            host.metadata = metadata;
        }
        Ok(host.clone())
    }

    /// Remove a host together with every connection that touches it.
    pub fn delete_host(&mut self, id: &str) -> Result<Host, HomelabError> {
        let idx = self
            .hosts
            .iter()
            .position(|h| h.id == id)
            .ok_or_else(|| HomelabError::HostNotFound(id.to_string()))?;
        let host = self.hosts.remove(idx);
        self.connections.retain(|c| !c.touches(id));
        Ok(host)
    }

    pub fn update_host_position(&mut self, id: &str, x: f64, y: f64) -> Result<Host, HomelabError> {
        let host = self.host_mut(id)?;
        host.position = Position { x, y };
        Ok(host.clone())
    }

    // ── Services ─────────────────────────────────────────────────

    pub fn add_service(&mut self, host_id: &str, new: NewService) -> Result<Service, HomelabError> {
        let name = new.name.trim().to_string();
        if name.is_empty() {
            return Err(HomelabError::InvalidInput("Name is required".into()));
        }
        let host = self.host_mut(host_id)?;
        let service = Service {
            id: new_id(),
            name,
            port: new.port,
            protocol: new.protocol,
            description: new.description,
            api_endpoint: new.api_endpoint,
        };
        host.services.push(service.clone());
        Ok(service)
    }

    pub fn update_service(
        &mut self,
        host_id: &str,
        service_id: &str,
        patch: ServicePatch,
    ) -> Result<Service, HomelabError> {
        let host = self.host_mut(host_id)?;
        let service = host
            .services
            .iter_mut()
            .find(|s| s.id == service_id)
            .ok_or_else(|| HomelabError::ServiceNotFound(service_id.to_string()))?;
        if let Some(name) = patch.name {
            service.name = name.trim().to_string();
        }
        if let Some(port) = patch.port {
            service.port = port;
        }
        if let Some(protocol) = patch.protocol {
            service.protocol = protocol;
        }
        if let Some(description) = patch.description {
            service.description = description.filter(|d| !d.trim().is_empty());
        }
        if let Some(api_endpoint) = patch.api_endpoint {
            service.api_endpoint = api_endpoint;
        }
        Ok(service.clone())
    }

    pub fn delete_service(&mut self, host_id: &str, service_id: &str) -> Result<Service, HomelabError> {
        let host = self.host_mut(host_id)?;
        let idx = host
            .services
            .iter()
            .position(|s| s.id == service_id)
            .ok_or_else(|| HomelabError::ServiceNotFound(service_id.to_string()))?;
        Ok(host.services.remove(idx))
    }

    // ── Connections ──────────────────────────────────────────────

    pub fn add_connection(
        &mut self,
        source_host_id: &str,
        target_host_id: &str,
        label: Option<String>,
    ) -> Result<Connection, HomelabError> {
        if source_host_id == target_host_id {
            return Err(HomelabError::InvalidInput(
                "A host cannot be connected to itself".into(),
            ));
        }
        for id in [source_host_id, target_host_id] {
            if self.host(id).is_none() {
                return Err(HomelabError::HostNotFound(id.to_string()));
            }
        }
        if self
            .connections
            .iter()
            .any(|c| c.links_same_pair(source_host_id, target_host_id))
        {
            return Err(HomelabError::DuplicateConnection(
                source_host_id.to_string(),
                target_host_id.to_string(),
            ));
        }

        let connection = Connection {
            id: new_id(),
            source_host_id: source_host_id.to_string(),
            target_host_id: target_host_id.to_string(),
            label: label.filter(|l| !l.trim().is_empty()),
        };
        self.connections.push(connection.clone());
        Ok(connection)
    }

    pub fn delete_connection(&mut self, id: &str) -> Result<Connection, HomelabError> {
        let idx = self
            .connections
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| HomelabError::ConnectionNotFound(id.to_string()))?;
        Ok(self.connections.remove(idx))
    }

    // ── Locations & settings ─────────────────────────────────────

    pub fn add_location(&mut self, label: &str) -> Result<GeographicLocation, HomelabError> {
        let label = label.trim();
        if label.is_empty() {
            return Err(HomelabError::InvalidInput("Label is required".into()));
        }
        let location = GeographicLocation {
            id: new_id(),
            label: label.to_string(),
        };
        self.locations.push(location.clone());
        Ok(location)
    }

    pub fn toggle_dark_mode(&mut self) -> AppSettings {
        self.settings.dark_mode = !self.settings.dark_mode;
        self.settings
    }

    pub fn update_settings(&mut self, patch: SettingsPatch) -> AppSettings {
        if let Some(v) = patch.show_ips {
            self.settings.show_ips = v;
        }
        if let Some(v) = patch.show_ports {
            self.settings.show_ports = v;
        }
        if let Some(v) = patch.dark_mode {
            self.settings.dark_mode = v;
        }
        self.settings
    }
}
