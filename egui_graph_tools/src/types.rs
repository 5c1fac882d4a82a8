//! Lightweight graph model types: nodes, pins and groups.

use uuid::Uuid;

/// Identity of a node (leaf or group) in the graph model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub Uuid);

impl NodeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

/// Role of a pin. A pin is exactly one of the two, for its whole lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PinRole {
    Input,
    Output,
}

impl PinRole {
    /// The role a link endpoint must have to connect to a pin of this role.
    pub fn opposite(self) -> Self {
        match self {
            PinRole::Input => PinRole::Output,
            PinRole::Output => PinRole::Input,
        }
    }

    pub fn is_output(self) -> bool {
        self == PinRole::Output
    }
}

/// Information about a pin of a leaf node.
#[derive(Clone, Debug, PartialEq)]
pub struct PinInfo {
    pub name: String,
    pub display_name: String,
    pub role: PinRole,
}

impl PinInfo {
    pub fn input(name: &str, display_name: &str) -> Self {
        Self {
            name: name.to_string(),
            display_name: display_name.to_string(),
            role: PinRole::Input,
        }
    }

    pub fn output(name: &str, display_name: &str) -> Self {
        Self {
            name: name.to_string(),
            display_name: display_name.to_string(),
            role: PinRole::Output,
        }
    }
}

/// A plain node owning a set of pins.
#[derive(Clone, Debug)]
pub struct Leaf {
    pub id: NodeId,
    pub name: String,
    pub pins: Vec<PinInfo>,
}

impl Leaf {
    pub fn new(name: &str, pins: Vec<PinInfo>) -> Self {
        Self {
            id: NodeId::new(),
            name: name.to_string(),
            pins,
        }
    }

    pub fn inputs(&self) -> impl Iterator<Item = &PinInfo> {
        self.pins.iter().filter(|p| p.role == PinRole::Input)
    }

    pub fn outputs(&self) -> impl Iterator<Item = &PinInfo> {
        self.pins.iter().filter(|p| p.role == PinRole::Output)
    }
}

/// A named cluster of leaves and sub-groups.
///
/// Only direct members are listed; members of sub-groups belong to those
/// sub-groups.
#[derive(Clone, Debug)]
pub struct Group {
    pub id: NodeId,
    pub name: String,
    pub leaves: Vec<NodeId>,
    pub groups: Vec<NodeId>,
}

impl Group {
    pub fn new(name: &str) -> Self {
        Self {
            id: NodeId::new(),
            name: name.to_string(),
            leaves: Vec::new(),
            groups: Vec::new(),
        }
    }

    pub fn with_leaves(mut self, leaves: impl IntoIterator<Item = NodeId>) -> Self {
        self.leaves.extend(leaves);
        self
    }

    pub fn with_groups(mut self, groups: impl IntoIterator<Item = NodeId>) -> Self {
        self.groups.extend(groups);
        self
    }

    /// Returns whether `id` is a direct leaf or sub-group of this group.
    pub fn is_direct_member(&self, id: NodeId) -> bool {
        self.leaves.contains(&id) || self.groups.contains(&id)
    }
}
