use crate::BooleanOp;
use crate::BooleanOp::*;
use std::convert::TryFrom;
use std::fmt::{Display, Error, Formatter};

impl BooleanOp {
    /// Evaluate this operator on the given ordered input bits.
    ///
    /// The semantics for every arity is documented on `BooleanOp` itself. The only
    /// combination that cannot be evaluated is `Not` with arity other than one.
    pub fn eval(self, inputs: &[bool]) -> Option<bool> {
        let ones = inputs.iter().filter(|b| **b).count();
        match self {
            And => Some(ones == inputs.len()),
            Or => Some(ones > 0),
            Not => {
                if inputs.len() == 1 {
                    Some(!inputs[0])
                } else {
                    None
                }
            }
            Xor => match inputs.len() {
                1 => Some(inputs[0]),
                2 => Some(inputs[0] != inputs[1]),
                // Degenerate for every other arity.
                _ => Some(false),
            },
            Identity => Some(!inputs.is_empty() && inputs[0]),
            Nand => Some(ones != inputs.len()),
            Nor => Some(ones == 0),
            Majority => Some(2 * ones > inputs.len()),
            Parity => Some(ones % 2 == 1),
        }
    }

    /// True if this operator can be used for a node with the given in-degree.
    pub fn supports_arity(self, arity: usize) -> bool {
        match self {
            Not => arity == 1,
            _ => true,
        }
    }

    /// All operators applicable to a node with the given in-degree.
    pub fn all_for_arity(arity: usize) -> Vec<BooleanOp> {
        [And, Or, Not, Xor, Identity, Nand, Nor, Majority, Parity]
            .into_iter()
            .filter(|op| op.supports_arity(arity))
            .collect()
    }
}

impl Display for BooleanOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        let name = match self {
            And => "AND",
            Or => "OR",
            Not => "NOT",
            Xor => "XOR",
            Identity => "IDENTITY",
            Nand => "NAND",
            Nor => "NOR",
            Majority => "MAJORITY",
            Parity => "PARITY",
        };
        write!(f, "{}", name)?;
        Ok(())
    }
}

impl TryFrom<&str> for BooleanOp {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "AND" => Ok(And),
            "OR" => Ok(Or),
            "NOT" => Ok(Not),
            "XOR" => Ok(Xor),
            "IDENTITY" => Ok(Identity),
            "NAND" => Ok(Nand),
            "NOR" => Ok(Nor),
            "MAJORITY" => Ok(Majority),
            "PARITY" => Ok(Parity),
            _ => Err(format!("\"{}\" is not a Boolean operator.", value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::BooleanOp;
    use std::convert::TryFrom;

    #[test]
    fn operator_semantics() {
        use crate::BooleanOp::*;
        let t = true;
        let f = false;
        assert_eq!(Some(true), And.eval(&[t, t, t]));
        assert_eq!(Some(false), And.eval(&[t, f, t]));
        assert_eq!(Some(true), Or.eval(&[f, f, t]));
        assert_eq!(Some(false), Or.eval(&[f, f]));
        assert_eq!(Some(true), Not.eval(&[f]));
        assert_eq!(None, Not.eval(&[f, t]));
        assert_eq!(Some(true), Xor.eval(&[t, f]));
        assert_eq!(Some(false), Xor.eval(&[t, t]));
        assert_eq!(Some(true), Xor.eval(&[t]));
        // XOR is degenerate above two inputs.
        assert_eq!(Some(false), Xor.eval(&[t, t, t]));
        assert_eq!(Some(true), Identity.eval(&[t, f]));
        assert_eq!(Some(false), Nand.eval(&[t, t]));
        assert_eq!(Some(true), Nor.eval(&[f, f]));
        // Strict majority: a tie on even arity resolves to false.
        assert_eq!(Some(true), Majority.eval(&[t, t, f]));
        assert_eq!(Some(false), Majority.eval(&[t, f]));
        assert_eq!(Some(true), Parity.eval(&[t, t, t]));
        assert_eq!(Some(false), Parity.eval(&[t, t, f, f]));
    }

    #[test]
    fn operator_semantics_zero_arity() {
        use crate::BooleanOp::*;
        // "All inputs are true" is vacuously true, "some input is true" is false.
        assert_eq!(Some(true), And.eval(&[]));
        assert_eq!(Some(false), Or.eval(&[]));
        assert_eq!(Some(false), Nand.eval(&[]));
        assert_eq!(Some(true), Nor.eval(&[]));
        assert_eq!(Some(false), Identity.eval(&[]));
        assert_eq!(Some(false), Majority.eval(&[]));
        assert_eq!(Some(false), Parity.eval(&[]));
        assert_eq!(Some(false), Xor.eval(&[]));
        assert_eq!(None, Not.eval(&[]));
    }

    #[test]
    fn operator_names_round_trip() {
        for op in BooleanOp::all_for_arity(1) {
            assert_eq!(Ok(op), BooleanOp::try_from(op.to_string().as_str()));
        }
        assert!(BooleanOp::try_from("MAYBE").is_err());
    }

    #[test]
    fn operator_arity_support() {
        use crate::BooleanOp::*;
        assert!(Not.supports_arity(1));
        assert!(!Not.supports_arity(2));
        assert!(Majority.supports_arity(0));
        assert_eq!(9, BooleanOp::all_for_arity(1).len());
        assert_eq!(8, BooleanOp::all_for_arity(3).len());
    }
}
