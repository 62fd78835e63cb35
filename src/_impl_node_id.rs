use crate::NodeId;
use std::fmt::{Display, Error, Formatter};

impl NodeId {
    /// Try to construct a `NodeId` from the given index. The id is only valid
    /// in networks with more than `index` nodes.
    pub fn from_index(index: usize) -> NodeId {
        NodeId(index)
    }

    /// Convert this id into the underlying zero-based index.
    pub fn to_index(self) -> usize {
        self.0
    }
}

impl From<usize> for NodeId {
    fn from(val: usize) -> Self {
        NodeId(val)
    }
}

impl From<NodeId> for usize {
    fn from(value: NodeId) -> Self {
        value.0
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        write!(f, "RbnNode({})", self.0)
    }
}
