use crate::{BooleanOp, RbnError, TruthTable, MAX_ARITY};
use rand::Rng;
use std::fmt::{Debug, Display, Error, Formatter};

/* Same as `State`: the wrapped `bitvector` is not `Eq`, but a truth table is. */
impl Eq for TruthTable {}

impl TruthTable {
    /// Create a table for a function of `arity` inputs where every output is `value`.
    pub fn constant(arity: usize, value: bool) -> Result<TruthTable, RbnError> {
        Self::check_arity(arity)?;
        let mut outputs = bitvector::BitVector::new(1 << arity);
        if value {
            for i in 0..(1 << arity) {
                outputs.insert(i);
            }
        }
        Ok(TruthTable { arity, outputs })
    }

    /// Create a table by evaluating the given named operator on every combination
    /// of `arity` input bits.
    ///
    /// Returns an error when the operator does not support the requested arity
    /// (at the moment, only `NOT` with arity other than one).
    pub fn from_op(op: BooleanOp, arity: usize) -> Result<TruthTable, RbnError> {
        Self::check_arity(arity)?;
        if !op.supports_arity(arity) {
            return Err(RbnError::Configuration(format!(
                "Operator {} cannot be used with {} inputs.",
                op, arity
            )));
        }
        let mut outputs = bitvector::BitVector::new(1 << arity);
        for index in 0..(1usize << arity) {
            let inputs = Self::decode_index(index, arity);
            let value = op.eval(&inputs).ok_or_else(|| {
                RbnError::Consistency(format!(
                    "Operator {} not defined for combination {:?}.",
                    op, inputs
                ))
            })?;
            if value {
                outputs.insert(index);
            }
        }
        Ok(TruthTable { arity, outputs })
    }

    /// Create a table where each of the `2^arity` outputs is an independent uniform
    /// random bit. This is the "unconstrained Boolean function" policy.
    pub fn random<R: Rng>(arity: usize, rng: &mut R) -> Result<TruthTable, RbnError> {
        Self::check_arity(arity)?;
        let mut outputs = bitvector::BitVector::new(1 << arity);
        for index in 0..(1usize << arity) {
            if rng.gen_bool(0.5) {
                outputs.insert(index);
            }
        }
        Ok(TruthTable { arity, outputs })
    }

    /// Create a table from an explicit output vector, ordered by combination index.
    ///
    /// The vector length must be a power of two (it determines the arity).
    pub fn from_outputs(values: Vec<bool>) -> Result<TruthTable, RbnError> {
        if values.is_empty() || !values.len().is_power_of_two() {
            return Err(RbnError::Configuration(format!(
                "A truth table needs 2^k outputs, but {} were given.",
                values.len()
            )));
        }
        let arity = values.len().trailing_zeros() as usize;
        Self::check_arity(arity)?;
        let mut outputs = bitvector::BitVector::new(values.len());
        for (index, value) in values.iter().enumerate() {
            if *value {
                outputs.insert(index);
            }
        }
        Ok(TruthTable { arity, outputs })
    }

    /// The number of inputs of the tabled function.
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// The number of entries in this table, i.e. `2^arity`.
    pub fn len(&self) -> usize {
        1 << self.arity
    }

    pub fn is_empty(&self) -> bool {
        false // A table always has at least the entry for the empty combination.
    }

    /// The output bit stored for the given combination index.
    pub fn get(&self, index: usize) -> bool {
        self.values_index_check(index);
        self.outputs.contains(index)
    }

    /// Evaluate the tabled function on the given ordered input bits.
    ///
    /// Returns a `Consistency` error when the number of inputs does not match the
    /// table arity - under a correctly constructed network this cannot happen.
    pub fn eval(&self, inputs: &[bool]) -> Result<bool, RbnError> {
        if inputs.len() != self.arity {
            return Err(RbnError::Consistency(format!(
                "A table of {} inputs evaluated with {} inputs.",
                self.arity,
                inputs.len()
            )));
        }
        Ok(self.get(Self::encode_inputs(inputs)))
    }

    /// Encode ordered input bits into a combination index. The first input provides
    /// the most significant bit.
    pub fn encode_inputs(inputs: &[bool]) -> usize {
        inputs
            .iter()
            .fold(0usize, |index, bit| (index << 1) | usize::from(*bit))
    }

    /// **(internal)** Inverse of `encode_inputs` for the given arity.
    fn decode_index(index: usize, arity: usize) -> Vec<bool> {
        (0..arity)
            .map(|position| (index >> (arity - 1 - position)) & 1 == 1)
            .collect()
    }

    /// **(internal)** Reject arities whose tables we refuse to materialize.
    fn check_arity(arity: usize) -> Result<(), RbnError> {
        if arity > MAX_ARITY {
            return Err(RbnError::Configuration(format!(
                "Cannot materialize a truth table with {} inputs (at most {} supported).",
                arity, MAX_ARITY
            )));
        }
        Ok(())
    }

    /// **(internal)** Check that the given combination index is valid - panic otherwise.
    fn values_index_check(&self, index: usize) {
        if index >= self.len() {
            panic!(
                "Accessing combination {} in a table of {} entries.",
                index,
                self.len()
            );
        }
    }
}

impl Display for TruthTable {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        for index in 0..self.len() {
            write!(f, "{}", if self.get(index) { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl Debug for TruthTable {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        write!(f, "TruthTable({})[{}]", self.arity, self)
    }
}
