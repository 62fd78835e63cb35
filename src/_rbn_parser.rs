use crate::{BooleanOp, Rbn, RbnError, Topology, TruthTable, UpdateFunction};
use fxhash::FxHashMap;
use lazy_static::lazy_static;
use regex::Regex;
use std::convert::TryFrom;

lazy_static! {
    /// Matches one `.rbn` rule: `target: HEAD(input, input, ...)`, where `HEAD` is
    /// a named operator, `CONST(bit)`, or `TABLE[bits]`.
    static ref RULE_REGEX: Regex = Regex::new(
        r"^(?P<target>[a-zA-Z0-9_]+)\s*:\s*(?:(?P<op>[A-Z]+)(?:\(\s*(?P<bit>[01])\s*\))?|TABLE\[(?P<bits>[01]+)\])\s*\((?P<args>[^()]*)\)$"
    )
    .unwrap();
}

/// **(internal)** A helper struct for representing a parsed rule that has not been
/// integrated into an `Rbn` yet.
#[derive(Clone, Debug, Eq, PartialEq)]
struct RuleTemp {
    target: String,
    function: UpdateFunction,
    inputs: Vec<String>,
}

impl TryFrom<&str> for RuleTemp {
    type Error = RbnError;

    fn try_from(line: &str) -> Result<Self, Self::Error> {
        let capture = RULE_REGEX.captures(line.trim()).ok_or_else(|| {
            RbnError::Configuration(format!("String \"{}\" is not a valid rule.", line))
        })?;
        let target = capture["target"].to_string();
        let function = match (capture.name("op"), capture.name("bit"), capture.name("bits")) {
            (Some(op), None, None) => {
                let op = BooleanOp::try_from(op.as_str())
                    .map_err(RbnError::Configuration)?;
                UpdateFunction::mk_op(op)
            }
            (Some(op), Some(bit), None) => {
                if op.as_str() != "CONST" {
                    return Err(RbnError::Configuration(format!(
                        "Operator {} does not take a bit argument.",
                        op.as_str()
                    )));
                }
                UpdateFunction::mk_const(bit.as_str() == "1")
            }
            (None, None, Some(bits)) => {
                let outputs = bits.as_str().chars().map(|c| c == '1').collect();
                UpdateFunction::mk_table(TruthTable::from_outputs(outputs)?)
            }
            _ => unreachable!("The rule regex admits exactly one head alternative."),
        };
        let inputs: Vec<String> = capture["args"]
            .split(',')
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();
        Ok(RuleTemp {
            target,
            function,
            inputs,
        })
    }
}

impl TryFrom<&str> for Rbn {
    type Error = RbnError;

    /// Parse an `Rbn` from its `.rbn` string representation.
    ///
    /// Every non-blank line that is not a `#` comment declares one node together with
    /// its update function and ordered inputs. Inputs must reference declared nodes,
    /// self-loops and duplicate inputs are rejected, and an explicit table must have
    /// exactly `2^K` output bits for a node with `K` inputs.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let mut rules: Vec<RuleTemp> = Vec::new();
        let mut rule_index: FxHashMap<String, usize> = FxHashMap::default();
        for line in value.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let rule = RuleTemp::try_from(line)?;
            if rule_index.contains_key(&rule.target) {
                return Err(RbnError::Configuration(format!(
                    "Duplicate rule for node {}.",
                    rule.target
                )));
            }
            rule_index.insert(rule.target.clone(), rules.len());
            rules.push(rule);
        }
        if rules.is_empty() {
            return Err(RbnError::Configuration(
                "A network needs at least one node.".to_string(),
            ));
        }
        let mut topology = Topology::new(rules.iter().map(|r| r.target.clone()).collect());
        for rule in &rules {
            let inputs: Vec<&str> = rule.inputs.iter().map(|name| name.as_str()).collect();
            topology.add_inputs(&rule.target, &inputs)?;
        }
        let functions = rules.into_iter().map(|rule| rule.function).collect();
        Rbn::new(topology, functions)
    }
}
