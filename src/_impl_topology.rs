use crate::{Node, NodeId, NodeIdIterator, RbnError, Topology};
use rand::Rng;
use std::collections::HashMap;
use std::ops::Index;

/// Methods for safely constructing new instances of `Topology`.
impl Topology {
    /// Create a new `Topology` with nodes using the given names and no inputs.
    ///
    /// The ordering of the nodes is preserved. Duplicate names are not detected here;
    /// use the `.rbn` parser or `is_valid_name` when names come from the outside.
    pub fn new(nodes: Vec<String>) -> Topology {
        let mut node_to_index = HashMap::new();
        for (i, name) in nodes.iter().enumerate() {
            node_to_index.insert(name.clone(), NodeId(i));
        }
        Topology {
            inputs: vec![Vec::new(); nodes.len()],
            node_to_index,
            nodes: nodes.into_iter().map(|name| Node { name }).collect(),
        }
    }

    /// Create a new `Topology` of `count` anonymous nodes named `x_1 .. x_count`.
    pub fn with_node_count(count: usize) -> Topology {
        Self::new((1..=count).map(|i| format!("x_{}", i)).collect())
    }

    /// Add a new input to the `target` node.
    ///
    /// The input is appended at the end of the target's ordered input list. Returns
    /// `Err` if `target` or `input` are not valid nodes, when the input would be a
    /// self-loop, or when the same input is already listed.
    pub fn add_input(&mut self, target: &str, input: &str) -> Result<(), RbnError> {
        let target = self.get_target(target)?;
        let input = self.get_input(input)?;
        self.assert_not_self_loop(target, input)?;
        self.assert_no_input(target, input)?;
        self.inputs[target.0].push(input);
        Ok(())
    }

    /// Add all given inputs to the `target` node, in order.
    pub fn add_inputs(&mut self, target: &str, inputs: &[&str]) -> Result<(), RbnError> {
        for input in inputs {
            self.add_input(target, input)?;
        }
        Ok(())
    }

    /// **(internal)** Utility method to safely obtain a target node (using an appropriate error message).
    fn get_target(&self, name: &str) -> Result<NodeId, RbnError> {
        self.find_node(name).ok_or_else(|| {
            RbnError::Configuration(format!("Invalid input: Unknown target node {}.", name))
        })
    }

    /// **(internal)** Utility method to safely obtain an input node (using an appropriate error message).
    fn get_input(&self, name: &str) -> Result<NodeId, RbnError> {
        self.find_node(name).ok_or_else(|| {
            RbnError::Configuration(format!("Invalid input: Unknown input node {}.", name))
        })
    }

    /// **(internal)** Utility method to ensure a node is not wired to itself.
    fn assert_not_self_loop(&self, target: NodeId, input: NodeId) -> Result<(), RbnError> {
        if target != input {
            Ok(())
        } else {
            Err(RbnError::Configuration(format!(
                "Invalid input: {} cannot be its own input.",
                self.get_node(target)
            )))
        }
    }

    /// **(internal)** Utility method to ensure the input is not listed twice.
    fn assert_no_input(&self, target: NodeId, input: NodeId) -> Result<(), RbnError> {
        if !self.inputs[target.0].contains(&input) {
            Ok(())
        } else {
            Err(RbnError::Configuration(format!(
                "Invalid input: {} already reads {}.",
                self.get_node(target),
                self.get_node(input)
            )))
        }
    }
}

/// Random generation of topologies.
impl Topology {
    /// Generate a random wiring of `count` nodes where the in-degree of every node is
    /// drawn uniformly from `min_k ..= max_k`.
    ///
    /// Every node draws its inputs uniformly, without replacement, from the set of all
    /// *other* nodes - the node itself is excluded from the candidate pool before
    /// sampling, so the requested in-degree is always reached exactly. Requires
    /// `min_k <= max_k` and `max_k < count`; the in-degree is additionally clamped to
    /// the `count - 1` available candidates.
    pub fn random<R: Rng>(
        count: usize,
        min_k: usize,
        max_k: usize,
        rng: &mut R,
    ) -> Result<Topology, RbnError> {
        if count == 0 {
            return Err(RbnError::Configuration(
                "A network needs at least one node.".to_string(),
            ));
        }
        if min_k > max_k {
            return Err(RbnError::Configuration(format!(
                "min_k ({}) cannot be greater than max_k ({}).",
                min_k, max_k
            )));
        }
        if max_k >= count {
            return Err(RbnError::Configuration(format!(
                "max_k ({}) cannot be greater than or equal to the number of nodes ({}).",
                max_k, count
            )));
        }
        let mut topology = Self::with_node_count(count);
        for target in 0..count {
            let k = rng.gen_range(min_k..=max_k).min(count - 1);
            let sample = rand::seq::index::sample(rng, count - 1, k);
            let inputs: Vec<NodeId> = sample
                .iter()
                // Candidates at or above the target are shifted by one to skip it.
                .map(|i| NodeId(if i >= target { i + 1 } else { i }))
                .collect();
            topology.inputs[target] = inputs;
        }
        tracing::debug!(
            nodes = count,
            min_k,
            max_k,
            "generated random topology"
        );
        Ok(topology)
    }
}

/// Some basic utility methods for inspecting the `Topology`.
impl Topology {
    /// The number of nodes in this `Topology`.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Find a `NodeId` for the given name, or `None` if the node does not exist.
    pub fn find_node(&self, name: &str) -> Option<NodeId> {
        self.node_to_index.get(name).cloned()
    }

    /// Return a `Node` corresponding to the given `NodeId`.
    pub fn get_node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Shorthand for `self.get_node(id).get_name()`.
    pub fn get_node_name(&self, id: NodeId) -> &String {
        &self.nodes[id.0].name
    }

    /// The ordered input list of the given node.
    pub fn inputs(&self, target: NodeId) -> &[NodeId] {
        &self.inputs[target.0]
    }

    /// The in-degree of the given node.
    pub fn in_degree(&self, target: NodeId) -> usize {
        self.inputs[target.0].len()
    }

    /// The largest in-degree in this `Topology`.
    pub fn max_in_degree(&self) -> usize {
        self.inputs.iter().map(|inputs| inputs.len()).max().unwrap_or(0)
    }

    /// Return an iterator over all node ids of this topology.
    pub fn nodes(&self) -> NodeIdIterator {
        (0..self.nodes.len()).map(NodeId)
    }

    /// A static check that allows to verify validity of a node name.
    pub fn is_valid_name(name: &str) -> bool {
        crate::ID_REGEX.is_match(name)
    }
}

/// Allow indexing `Topology` using `NodeId` objects.
impl Index<NodeId> for Topology {
    type Output = Node;

    fn index(&self, index: NodeId) -> &Self::Output {
        self.get_node(index)
    }
}

#[cfg(test)]
mod tests {
    use crate::{NodeId, RbnError, Topology};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_explicit_topology() {
        let names = vec!["a", "b_1", "b_2", "c"];
        let mut topology = Topology::new(names.into_iter().map(|s| s.to_string()).collect());
        topology.add_inputs("a", &["b_1"]).unwrap();
        topology.add_inputs("c", &["a", "b_2"]).unwrap();

        assert!(topology.add_input("a", "a").is_err());
        assert!(topology.add_input("a", "b_1").is_err());
        assert!(topology.add_input("a", "d").is_err());
        assert!(topology.add_input("d", "a").is_err());

        assert_eq!(4, topology.num_nodes());
        assert_eq!(Some(NodeId(1)), topology.find_node("b_1"));
        assert_eq!("b_2", topology.get_node_name(NodeId(2)));
        assert_eq!("b_2", topology[NodeId(2)].get_name());
        assert_eq!(vec![NodeId(0), NodeId(2)], topology.inputs(NodeId(3)).to_vec());
        assert_eq!(2, topology.in_degree(NodeId(3)));
        assert_eq!(0, topology.in_degree(NodeId(1)));
        assert_eq!(2, topology.max_in_degree());
        assert!(Topology::is_valid_name("b_1"));
        assert!(!Topology::is_valid_name("b 1"));
    }

    #[test]
    fn test_random_topology_degree_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let topology = Topology::random(25, 2, 5, &mut rng).unwrap();
        assert_eq!(25, topology.num_nodes());
        for node in topology.nodes() {
            let inputs = topology.inputs(node);
            assert!((2..=5).contains(&inputs.len()));
            // No self-loops and no duplicates.
            assert!(!inputs.contains(&node));
            let mut sorted = inputs.to_vec();
            sorted.sort();
            sorted.dedup();
            assert_eq!(sorted.len(), inputs.len());
        }
    }

    #[test]
    fn test_random_topology_single_input() {
        // With exactly one input per node, the input can never be the node itself.
        for seed in 0..50 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let topology = Topology::random(4, 1, 1, &mut rng).unwrap();
            for node in topology.nodes() {
                assert_eq!(1, topology.in_degree(node));
                assert_ne!(node, topology.inputs(node)[0]);
            }
        }
    }

    #[test]
    fn test_random_topology_invalid_configuration() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(matches!(
            Topology::random(5, 1, 5, &mut rng),
            Err(RbnError::Configuration(_))
        ));
        assert!(matches!(
            Topology::random(5, 3, 2, &mut rng),
            Err(RbnError::Configuration(_))
        ));
        assert!(matches!(
            Topology::random(0, 0, 0, &mut rng),
            Err(RbnError::Configuration(_))
        ));
    }

    #[test]
    fn test_random_topology_is_reproducible() {
        let mut r_1 = ChaCha8Rng::seed_from_u64(123);
        let mut r_2 = ChaCha8Rng::seed_from_u64(123);
        assert_eq!(
            Topology::random(10, 1, 3, &mut r_1).unwrap(),
            Topology::random(10, 1, 3, &mut r_2).unwrap()
        );
    }
}
