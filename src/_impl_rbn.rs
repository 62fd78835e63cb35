use crate::{
    FunctionPolicy, NodeId, Rbn, RbnError, State, Topology, TruthTable, UpdateFunction, MAX_ARITY,
};
use rand::Rng;

/// Methods for safely building `Rbn`s.
impl Rbn {
    /// Construct a new `Rbn` from a `Topology` and one `UpdateFunction` per node,
    /// given in node order.
    ///
    /// Every function is materialized into an explicit truth table whose arity is the
    /// node's in-degree; a function that cannot be materialized for that in-degree
    /// (wrong explicit table size, `NOT` on a node without exactly one input) is a
    /// configuration error. The noise level of the new network is zero.
    pub fn new(topology: Topology, functions: Vec<UpdateFunction>) -> Result<Rbn, RbnError> {
        if functions.len() != topology.num_nodes() {
            return Err(RbnError::Configuration(format!(
                "{} update functions given for {} nodes.",
                functions.len(),
                topology.num_nodes()
            )));
        }
        let mut tables: Vec<TruthTable> = Vec::with_capacity(functions.len());
        for node in topology.nodes() {
            let table = functions[node.to_index()]
                .build_table(topology.in_degree(node))
                .map_err(|e| match e {
                    RbnError::Configuration(message) => RbnError::Configuration(format!(
                        "Cannot build function of {}: {}",
                        topology.get_node(node),
                        message
                    )),
                    other => other,
                })?;
            tables.push(table);
        }
        Ok(Rbn {
            topology,
            functions,
            tables,
            noise_level: 0.0,
        })
    }

    /// Generate a random `Rbn` of `count` nodes with in-degrees drawn uniformly from
    /// `min_k ..= max_k`, update functions assigned by the given policy, and the given
    /// per-step noise level.
    ///
    /// The whole configuration is checked *before* the first random draw, so an
    /// invalid request never consumes randomness from the generator.
    pub fn random<R: Rng>(
        count: usize,
        min_k: usize,
        max_k: usize,
        noise_level: f64,
        policy: FunctionPolicy,
        rng: &mut R,
    ) -> Result<Rbn, RbnError> {
        Self::check_noise_level(noise_level)?;
        if max_k > MAX_ARITY {
            return Err(RbnError::Configuration(format!(
                "max_k ({}) cannot be greater than {} (truth tables are materialized).",
                max_k, MAX_ARITY
            )));
        }
        let topology = Topology::random(count, min_k, max_k, rng)?;
        let mut functions: Vec<UpdateFunction> = Vec::with_capacity(count);
        for node in topology.nodes() {
            let arity = topology.in_degree(node);
            let function = match policy {
                FunctionPolicy::RandomTable => UpdateFunction::random_table(arity, rng)?,
                FunctionPolicy::NamedOperator => UpdateFunction::random_operator(arity, rng),
            };
            functions.push(function);
        }
        let mut network = Self::new(topology, functions)?;
        network.noise_level = noise_level;
        Ok(network)
    }

    /// Read an `Rbn` from an `.rbn` file on the given path.
    pub fn try_from_file<T: AsRef<std::path::Path>>(path: T) -> Result<Rbn, RbnError> {
        let path: &std::path::Path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(content) => Self::try_from(content.as_str()),
            Err(e) => Err(RbnError::Configuration(format!("File not readable: {}", e))),
        }
    }

    /// Set the probability with which every node's bit is independently flipped after
    /// each synchronous update. Must be a value in `[0, 1]`.
    pub fn set_noise_level(&mut self, noise_level: f64) -> Result<(), RbnError> {
        Self::check_noise_level(noise_level)?;
        self.noise_level = noise_level;
        Ok(())
    }

    /// **(internal)** Utility method to validate a noise level before it is used.
    fn check_noise_level(noise_level: f64) -> Result<(), RbnError> {
        if !(0.0..=1.0).contains(&noise_level) {
            return Err(RbnError::Configuration(format!(
                "noise_level ({}) must lie in [0, 1].",
                noise_level
            )));
        }
        Ok(())
    }
}

/// Some basic utility methods for inspecting the `Rbn`.
impl Rbn {
    /// The number of nodes in this network.
    pub fn num_nodes(&self) -> usize {
        self.topology.num_nodes()
    }

    /// The wiring of this network.
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// The declared update function of the given node.
    pub fn get_function(&self, node: NodeId) -> &UpdateFunction {
        &self.functions[node.to_index()]
    }

    /// The materialized truth table of the given node.
    pub fn get_table(&self, node: NodeId) -> &TruthTable {
        &self.tables[node.to_index()]
    }

    /// The current per-step bit-flip probability.
    pub fn noise_level(&self) -> f64 {
        self.noise_level
    }
}

/// The synchronous update engine.
impl Rbn {
    /// Compute the successor of the given `State` under one synchronous update.
    ///
    /// Every node reads only the *pre-step* snapshot: the new state is assembled on
    /// the side and returned as a whole, so no node can observe another node's new
    /// value within the same step. The wiring and the truth tables are never touched.
    ///
    /// When `noise_level` is positive, every bit of the new state is then flipped
    /// independently with that probability (one Bernoulli trial per node). With a
    /// zero noise level the generator is not consulted at all, and the result is a
    /// pure function of the input snapshot.
    pub fn step<R: Rng>(&self, state: &State, rng: &mut R) -> Result<State, RbnError> {
        if state.len() != self.num_nodes() {
            return Err(RbnError::Consistency(format!(
                "A state of {} nodes given to a network of {} nodes.",
                state.len(),
                self.num_nodes()
            )));
        }
        let mut next = State::empty(self.num_nodes());
        for node in self.topology.nodes() {
            let inputs: Vec<bool> = self
                .topology
                .inputs(node)
                .iter()
                .map(|input| state.get_bit(*input))
                .collect();
            let value = self.tables[node.to_index()].eval(&inputs)?;
            next.set(node.to_index(), value);
        }
        if self.noise_level > 0.0 {
            for i in 0..next.len() {
                if rng.gen_bool(self.noise_level) {
                    next.flip(i);
                }
            }
        }
        Ok(next)
    }
}
