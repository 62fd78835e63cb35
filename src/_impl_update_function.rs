use crate::UpdateFunction::*;
use crate::{BooleanOp, RbnError, TruthTable, UpdateFunction};
use rand::Rng;
use std::fmt::{Display, Error, Formatter};

/// Constructor and destructor utility methods. These mainly avoid exhaustive pattern
/// matching when not necessary.
impl UpdateFunction {
    /// Create a function with a fixed output bit.
    pub fn mk_const(value: bool) -> UpdateFunction {
        Const(value)
    }

    /// Create a function defined by a named operator.
    pub fn mk_op(op: BooleanOp) -> UpdateFunction {
        Op(op)
    }

    /// Create a function defined by an explicit truth table.
    pub fn mk_table(table: TruthTable) -> UpdateFunction {
        Table(table)
    }

    /// If `Const`, return the value, otherwise return `None`.
    pub fn as_const(&self) -> Option<bool> {
        match self {
            Const(value) => Some(*value),
            _ => None,
        }
    }

    /// If `Op`, return the operator, otherwise return `None`.
    pub fn as_op(&self) -> Option<BooleanOp> {
        match self {
            Op(op) => Some(*op),
            _ => None,
        }
    }

    /// If `Table`, return the table, otherwise return `None`.
    pub fn as_table(&self) -> Option<&TruthTable> {
        match self {
            Table(table) => Some(table),
            _ => None,
        }
    }

    /// Materialize this function as a truth table for a node with the given in-degree.
    ///
    /// For `Const` and `Op` the table is derived from the declared semantics. An
    /// explicit `Table` is used verbatim, but its arity must match the in-degree.
    pub fn build_table(&self, arity: usize) -> Result<TruthTable, RbnError> {
        match self {
            Const(value) => TruthTable::constant(arity, *value),
            Op(op) => TruthTable::from_op(*op, arity),
            Table(table) => {
                if table.arity() != arity {
                    return Err(RbnError::Configuration(format!(
                        "A table of {} inputs assigned to a node with {} inputs.",
                        table.arity(),
                        arity
                    )));
                }
                Ok(table.clone())
            }
        }
    }

    /// The "unconstrained Boolean function" policy: an explicit table where every
    /// output bit is drawn independently.
    pub fn random_table<R: Rng>(arity: usize, rng: &mut R) -> Result<UpdateFunction, RbnError> {
        Ok(Table(TruthTable::random(arity, rng)?))
    }

    /// The named-operator policy: one of the canonical operators applicable to the
    /// given in-degree, or a constant function with a random output bit, drawn
    /// uniformly.
    pub fn random_operator<R: Rng>(arity: usize, rng: &mut R) -> UpdateFunction {
        let ops = BooleanOp::all_for_arity(arity);
        // The extra candidate is the CONSTANT-random function.
        let choice = rng.gen_range(0..=ops.len());
        if choice == ops.len() {
            Const(rng.gen_bool(0.5))
        } else {
            Op(ops[choice])
        }
    }
}

impl Display for UpdateFunction {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        match self {
            Const(value) => write!(f, "CONST({})", u8::from(*value)),
            Op(op) => write!(f, "{}", op),
            Table(table) => write!(f, "TABLE[{}]", table),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{BooleanOp, RbnError, TruthTable, UpdateFunction};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn build_table_for_every_variant() {
        let constant = UpdateFunction::mk_const(true).build_table(2).unwrap();
        assert_eq!("1111", constant.to_string());

        let op = UpdateFunction::mk_op(BooleanOp::Or).build_table(2).unwrap();
        assert_eq!("0111", op.to_string());

        let explicit = TruthTable::from_outputs(vec![false, true, true, false]).unwrap();
        let table = UpdateFunction::mk_table(explicit.clone()).build_table(2).unwrap();
        assert_eq!(explicit, table);
    }

    #[test]
    fn build_table_checks_arity() {
        let explicit = TruthTable::from_outputs(vec![false, true]).unwrap();
        assert!(matches!(
            UpdateFunction::mk_table(explicit).build_table(2),
            Err(RbnError::Configuration(_))
        ));
        assert!(matches!(
            UpdateFunction::mk_op(BooleanOp::Not).build_table(3),
            Err(RbnError::Configuration(_))
        ));
    }

    #[test]
    fn random_operator_respects_arity() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..100 {
            let function = UpdateFunction::random_operator(3, &mut rng);
            if let Some(op) = function.as_op() {
                assert!(op.supports_arity(3));
            } else {
                assert!(function.as_const().is_some());
            }
        }
    }

    #[test]
    fn accessors_match_variants() {
        assert_eq!(Some(false), UpdateFunction::mk_const(false).as_const());
        assert_eq!(
            Some(BooleanOp::Xor),
            UpdateFunction::mk_op(BooleanOp::Xor).as_op()
        );
        assert!(UpdateFunction::mk_const(true).as_table().is_none());
    }

    #[test]
    fn display_of_function_heads() {
        let table = TruthTable::from_outputs(vec![false, true, true, false]).unwrap();
        assert_eq!("CONST(1)", UpdateFunction::mk_const(true).to_string());
        assert_eq!("MAJORITY", UpdateFunction::mk_op(BooleanOp::Majority).to_string());
        assert_eq!("TABLE[0110]", UpdateFunction::mk_table(table).to_string());
    }
}
