use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;
use thiserror::Error;

pub mod render;
pub mod simulation;

/// **(internal)** Implements the `.rbn` parser for `Rbn` objects.
mod _rbn_parser;
/// **(internal)** Utility methods for `BooleanOp`.
mod _impl_boolean_op;
/// **(internal)** Utility methods for `Node`.
mod _impl_node;
/// **(internal)** Utility methods for `NodeId`.
mod _impl_node_id;
/// **(internal)** Construction, validation and random generation of `Rbn`.
mod _impl_rbn;
/// **(internal)** `Rbn` to `.rbn` string.
mod _impl_rbn_display;
/// **(internal)** Utility methods for `State`.
mod _impl_state;
/// **(internal)** Construction, validation and random generation of `Topology`.
mod _impl_topology;
/// **(internal)** Utility methods for `TruthTable`.
mod _impl_truth_table;
/// **(internal)** Utility methods for `UpdateFunction`.
mod _impl_update_function;

lazy_static! {
    /// A regex which describes a valid node name.
    pub static ref ID_REGEX: Regex = Regex::new(r"^[a-zA-Z0-9_]+$").unwrap();
}

/// The largest supported node in-degree.
///
/// Update functions are materialized as explicit truth tables with `2^K` entries, so
/// the in-degree has to stay reasonably small. A `2^20`-bit table is 128KiB; anything
/// beyond that is almost certainly a configuration mistake.
pub const MAX_ARITY: usize = 20;

/// An error produced when constructing or simulating a random Boolean network.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum RbnError {
    /// The requested network parameters are invalid. Reported before any random draws
    /// are made, and never recovered internally.
    #[error("Invalid configuration: {0}")]
    Configuration(String),
    /// An internal invariant of an already constructed network does not hold. This
    /// should never happen; when it does, we fail loudly instead of substituting
    /// a default.
    #[error("Consistency violation: {0}")]
    Consistency(String),
}

/// A type-safe index of a node inside an `Rbn` (or a `Topology`).
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct NodeId(usize);

/// A node of a random Boolean network.
///
/// Node has a `name` and holds a single bit of network state.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Node {
    name: String,
}

/// The fixed wiring of a random Boolean network.
///
/// For every node, `Topology` stores an ordered list of distinct *input* nodes whose
/// current states the node's update function reads. A node never lists itself as an
/// input. The wiring is created once and is immutable for the lifetime of the network.
///
/// Input lists of different nodes are drawn independently, so the resulting directed
/// graph can contain cycles, overlapping fan-in, or completely asymmetric dependencies.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Topology {
    nodes: Vec<Node>,
    inputs: Vec<Vec<NodeId>>,
    node_to_index: HashMap<String, NodeId>,
}

/// Possible named Boolean operators that can define a node's update function.
///
/// The semantics of each operator over the ordered input bits `b_1 .. b_K` is fixed:
///
///  - `And` is true iff every `b_i` is true (vacuously true for `K = 0`).
///  - `Or` is true iff some `b_i` is true.
///  - `Not` is `!b_1` and is only defined for `K = 1`.
///  - `Xor` is `b_1 != b_2` for `K = 2` and `b_1` for `K = 1`; for every other arity
///    it degenerates to constant false.
///  - `Identity` is `b_1`, or false for `K = 0`.
///  - `Nand` and `Nor` are the negations of `And` and `Or`.
///  - `Majority` is true iff *strictly* more than `K/2` inputs are true (an even tie
///    resolves to false).
///  - `Parity` is the sum of the inputs modulo two.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum BooleanOp {
    And,
    Or,
    Not,
    Xor,
    Identity,
    Nand,
    Nor,
    Majority,
    Parity,
}

/// An explicit truth table of an update function with `K` ordered inputs.
///
/// The table has exactly `2^K` output bits, one for every combination of input values.
/// A combination is encoded as a `K`-bit integer where the *first* input provides the
/// most significant bit. Tables are total by construction; there is no way to leave
/// a combination unassigned.
#[derive(Clone, PartialEq)]
pub struct TruthTable {
    arity: usize,
    outputs: bitvector::BitVector,
}

/// A construction policy for one node's update function.
///
/// This is a tagged alternative to passing Boolean closures around: the variant fully
/// determines the materialized `TruthTable`, which makes networks printable and runs
/// replayable.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum UpdateFunction {
    /// A function that ignores its inputs and always outputs the given bit.
    Const(bool),
    /// A function given by one of the named Boolean operators.
    Op(BooleanOp),
    /// A fully explicit truth table.
    Table(TruthTable),
}

/// Possible policies for assigning update functions to the nodes of a random network.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum FunctionPolicy {
    /// Every node gets an explicit truth table where each of the `2^K` output bits is
    /// an independent uniform random bit (maximum behavioral diversity).
    RandomTable,
    /// Every node gets one of the canonical named operators applicable to its
    /// in-degree, or a constant function with a random output bit.
    NamedOperator,
}

/// One synchronous snapshot of the state of every node in the network.
///
/// `State` is a dense bit vector indexed by `NodeId`. It is only ever replaced as a
/// whole: a simulation step computes a complete new `State` before the old one is
/// considered stale, so a partially updated snapshot is never observable.
#[derive(Clone, PartialEq)]
pub struct State {
    len: usize,
    values: bitvector::BitVector,
}

/// A random Boolean network: wiring, update functions, and noise level.
///
/// `Rbn` owns its `Topology`, the declared `UpdateFunction` of every node, and the
/// materialized `TruthTable` of every node (the table arity always matches the node's
/// in-degree). All of these are fixed at construction time; only the `noise_level`
/// can be reconfigured between runs.
#[derive(Clone, PartialEq)]
pub struct Rbn {
    topology: Topology,
    functions: Vec<UpdateFunction>,
    tables: Vec<TruthTable>,
    noise_level: f64,
}

/// An iterator over all `NodeId`s of a `Topology`.
pub type NodeIdIterator = std::iter::Map<std::ops::Range<usize>, fn(usize) -> NodeId>;
