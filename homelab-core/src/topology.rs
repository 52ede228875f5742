use crate::model::{Connection, Host, InfrastructureData, Position};
use serde::Serialize;

/// How an edge is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeStyle {
    /// Both hosts sit on the same network location.
    Solid,
    /// The hosts sit on different network locations.
    Dashed,
}

impl EdgeStyle {
    pub fn legend_label(&self) -> &'static str {
        match self {
            EdgeStyle::Solid => "Same Network",
            EdgeStyle::Dashed => "Cross Network",
        }
    }
}

/// Classify a connection by comparing the location ids of its endpoints.
/// A dangling endpoint falls back to `Solid`.
pub fn classify_connection(connection: &Connection, hosts: &[Host]) -> EdgeStyle {
    let find = |id: &str| hosts.iter().find(|h| h.id == id);
    match (find(&connection.source_host_id), find(&connection.target_host_id)) {
        (Some(source), Some(target)) if source.location.id != target.location.id => EdgeStyle::Dashed,
        _ => EdgeStyle::Solid,
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopologyNode {
    pub id: String,
    pub label: String,
    pub ip: String,
    pub location_id: String,
    pub location_label: String,
    pub position: Position,
    pub service_count: usize,
    pub draggable: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopologyEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub style: EdgeStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LegendEntry {
    pub style: EdgeStyle,
    pub label: &'static str,
}

/// Node-link view of the document, ready for the dashboard canvas.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopologyView {
    pub nodes: Vec<TopologyNode>,
    pub edges: Vec<TopologyEdge>,
    pub legend: Vec<LegendEntry>,
    pub dark_mode: bool,
}

impl TopologyView {
    pub fn build(doc: &InfrastructureData, editable: bool) -> Self {
        let nodes = doc
            .hosts
            .iter()
            .map(|host| TopologyNode {
                id: host.id.clone(),
                label: host.name.clone(),
                ip: host.ip.clone(),
                location_id: host.location.id.clone(),
                location_label: host.location.label.clone(),
                position: host.position,
                service_count: host.services.len(),
                draggable: editable,
            })
            .collect();

        let edges = doc
            .connections
            .iter()
            .map(|conn| TopologyEdge {
                id: conn.id.clone(),
                source: conn.source_host_id.clone(),
                target: conn.target_host_id.clone(),
                style: classify_connection(conn, &doc.hosts),
                label: conn.label.clone(),
            })
            .collect();

        let legend = [EdgeStyle::Solid, EdgeStyle::Dashed]
            .into_iter()
            .map(|style| LegendEntry {
                style,
                label: style.legend_label(),
            })
            .collect();

        Self {
            nodes,
            edges,
            legend,
            dark_mode: doc.settings.dark_mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AppSettings, GeographicLocation};

    fn host(id: &str, location: &str) -> Host {
        Host {
            id: id.into(),
            name: id.to_uppercase(),
            ip: "10.0.0.1".into(),
            location: GeographicLocation {
                id: location.into(),
                label: location.into(),
            },
            position: Position { x: 1.0, y: 2.0 },
            services: vec![],
            metadata: None,
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
    fn same_location_is_solid() {
        let hosts = vec![host("a", "lan"), host("b", "lan")];
        assert_eq!(classify_connection(&conn("c", "a", "b"), &hosts), EdgeStyle::Solid);
    }

    #[test]
    fn different_location_is_dashed() {
        let hosts = vec![host("a", "lan"), host("b", "vps")];
        assert_eq!(classify_connection(&conn("c", "a", "b"), &hosts), EdgeStyle::Dashed);
    }

    #[test]
    fn missing_endpoint_falls_back_to_solid() {
        let hosts = vec![host("a", "lan")];
        assert_eq!(classify_connection(&conn("c", "a", "gone"), &hosts), EdgeStyle::Solid);
    }

    #[test]
    fn view_carries_nodes_edges_and_legend() {
        let doc = InfrastructureData {
            version: "1.0".into(),
            locations: vec![],
            hosts: vec![host("a", "lan"), host("b", "vps")],
            connections: vec![conn("c1", "a", "b")],
            settings: AppSettings::default(),
        };
        let view = TopologyView::build(&doc, true);
        assert_eq!(view.nodes.len(), 2);
        assert!(view.nodes.iter().all(|n| n.draggable));
        assert_eq!(view.edges[0].style, EdgeStyle::Dashed);
        assert_eq!(view.legend.len(), 2);
        assert_eq!(view.legend[1].label, "Cross Network");

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["edges"][0]["style"], "dashed");
        assert_eq!(json["nodes"][0]["serviceCount"], 0);
    }
}
