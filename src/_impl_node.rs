use crate::Node;
use std::fmt::{Display, Error, Formatter};

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}", self.name)
    }
}

impl Node {
    /// Human-readable name of this node.
    pub fn get_name(&self) -> &String {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use crate::Topology;

    #[test]
    fn basic_node_test() {
        let topology = Topology::new(vec!["A".to_string()]);
        let a = topology.find_node("A").unwrap();
        let a = &topology[a];
        assert_eq!("A", a.to_string().as_str());
        assert_eq!("A", a.get_name());
    }
}
