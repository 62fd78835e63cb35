//! Read-only collaborators that turn a simulation `History` into text.
//!
//! These renderers contain no simulation logic: they consume the snapshot sequence
//! produced by the driver and format it, either as a per-node heatmap (one row per
//! node, one column per time step) or as a fixed-width table (one row per time step,
//! one column per node). Both expect a history produced by the network whose
//! `Topology` is given.

use crate::simulation::History;
use crate::Topology;
use std::fmt::Write;

/// The glyph used for a set bit in the heatmap.
const ONE: char = '#';
/// The glyph used for an unset bit in the heatmap.
const ZERO: char = '.';

/// Render the history as a heatmap with one labelled row per node and one column
/// per time step (time flows to the right).
pub fn heatmap_string(topology: &Topology, history: &History) -> String {
    let width = topology
        .nodes()
        .map(|node| topology.get_node_name(node).len())
        .max()
        .unwrap_or(0);
    let mut result = String::new();
    for node in topology.nodes() {
        let name = topology.get_node_name(node);
        write!(result, "{:width$} ", name, width = width).unwrap();
        for state in history.iter() {
            result.push(if state.get_bit(node) { ONE } else { ZERO });
        }
        result.push('\n');
    }
    result
}

/// Render the history as a fixed-width grid of time steps times nodes, with a
/// header row of node names and one row per snapshot.
pub fn table_string(topology: &Topology, history: &History) -> String {
    let step_width = "step".len().max(decimal_width(history.steps()));
    let mut result = String::new();
    write!(result, "{:>step_width$}", "step", step_width = step_width).unwrap();
    for node in topology.nodes() {
        write!(result, " {}", topology.get_node_name(node)).unwrap();
    }
    result.push('\n');
    for (step, state) in history.iter().enumerate() {
        write!(result, "{:>step_width$}", step, step_width = step_width).unwrap();
        for node in topology.nodes() {
            let width = topology.get_node_name(node).len();
            let bit = u8::from(state.get_bit(node));
            write!(result, " {:>width$}", bit, width = width).unwrap();
        }
        result.push('\n');
    }
    result
}

/// **(internal)** The number of decimal digits of the given value.
fn decimal_width(value: usize) -> usize {
    value.to_string().len()
}
