//! Road network: nodes with coordinates, links with lengths.
//!
//! Only what the KPI pipeline needs is kept: node positions (for the zone
//! grid extent) and link lengths (for bus kilometres).  Topology is stored
//! but never traversed.

use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use quick_xml::events::Event;
use tp_core::{BoundingBox, LinkId, NodeId, Point};
use tracing::info;

use crate::NetworkResult;
use crate::xml::{open_input, required, required_f64, xml_reader};

#[derive(Clone, Debug, PartialEq)]
pub struct Link {
    pub id:       LinkId,
    pub from:     NodeId,
    pub to:       NodeId,
    /// Length in metres.
    pub length_m: f64,
}

/// Nodes and links keyed by id.  Construct with [`Network::load`] or
/// [`NetworkBuilder`].
#[derive(Clone, Debug, Default)]
pub struct Network {
    nodes: HashMap<NodeId, Point>,
    links: HashMap<LinkId, Link>,
}

impl Network {
    /// Read a MATSim `network.xml` (optionally gzipped).
    pub fn load(path: &Path) -> NetworkResult<Self> {
        let network = Self::from_reader(open_input(path)?)?;
        info!(
            path = %path.display(),
            nodes = network.node_count(),
            links = network.link_count(),
            "loaded network"
        );
        Ok(network)
    }

    pub fn from_reader<R: BufRead>(source: R) -> NetworkResult<Self> {
        let mut reader = xml_reader(source);
        let mut builder = NetworkBuilder::new();
        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) | Event::Empty(e) => match e.local_name().as_ref() {
                    b"node" => {
                        let id = required(&e, "node", "id")?;
                        let x = required_f64(&e, "node", "x")?;
                        let y = required_f64(&e, "node", "y")?;
                        builder.add_node(id, Point::new(x, y));
                    }
                    b"link" => {
                        let id = required(&e, "link", "id")?;
                        let from = required(&e, "link", "from")?;
                        let to = required(&e, "link", "to")?;
                        let length = required_f64(&e, "link", "length")?;
                        builder.add_link(id, from, to, length);
                    }
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }
        Ok(builder.build())
    }

    #[inline]
    pub fn node(&self, id: &str) -> Option<Point> {
        self.nodes.get(id).copied()
    }

    #[inline]
    pub fn link(&self, id: &str) -> Option<&Link> {
        self.links.get(id)
    }

    /// Length of link `id` in metres.
    #[inline]
    pub fn link_length(&self, id: &str) -> Option<f64> {
        self.links.get(id).map(|l| l.length_m)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Extent of all node coordinates.
    pub fn bbox(&self) -> BoundingBox {
        BoundingBox::from_points(self.nodes.values().copied())
    }
}

/// Incremental construction of a [`Network`]; later entries with the same
/// id replace earlier ones.
#[derive(Default)]
pub struct NetworkBuilder {
    nodes: HashMap<NodeId, Point>,
    links: HashMap<LinkId, Link>,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, id: impl Into<NodeId>, pos: Point) -> &mut Self {
        self.nodes.insert(id.into(), pos);
        self
    }

    pub fn add_link(
        &mut self,
        id: impl Into<LinkId>,
        from: impl Into<NodeId>,
        to: impl Into<NodeId>,
        length_m: f64,
    ) -> &mut Self {
        let id = id.into();
        self.links.insert(id.clone(), Link { id, from: from.into(), to: to.into(), length_m });
        self
    }

    pub fn build(self) -> Network {
        Network { nodes: self.nodes, links: self.links }
    }
}
