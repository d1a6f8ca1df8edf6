use serde::{Deserialize, Serialize};

/// The Static Analysis View of a circuit.
///
/// `Schematic` is the graph representation extracted from the Axon builder.
/// The ingress serves it as JSON so the page circuit can be inspected.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Schematic {
    pub name: String,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Schematic {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn last_node_id(&self) -> Option<&str> {
        self.nodes.last().map(|n| n.id.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub kind: NodeKind,
    pub label: String,
    pub input_type: String,
    pub output_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    Ingress, // Start of the chain
    Atom,    // Single transition
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub label: Option<String>,
}
