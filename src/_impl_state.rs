use crate::{NodeId, State};
use rand::Rng;
use std::fmt::{Debug, Display, Error, Formatter};

/* The `bitvector` crate does not implement `Eq`, but a fixed-length state is clearly `Eq`. */
impl Eq for State {}

impl State {
    /// Create a new `State` of the given length with all bits set to false.
    pub fn empty(len: usize) -> State {
        State {
            len,
            values: bitvector::BitVector::new(len),
        }
    }

    /// Create a new `State` where every bit is drawn independently and uniformly
    /// from the given random generator.
    pub fn random<R: Rng>(len: usize, rng: &mut R) -> State {
        let mut state = Self::empty(len);
        for i in 0..len {
            if rng.gen_bool(0.5) {
                state.set(i, true);
            }
        }
        state
    }

    /// The number of nodes covered by this `State`.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get the bit of the node at the given index.
    pub fn get(&self, index: usize) -> bool {
        self.check_access(index);
        self.values.contains(index)
    }

    /// Shorthand for `self.get(id.to_index())`.
    pub fn get_bit(&self, id: NodeId) -> bool {
        self.get(id.to_index())
    }

    /// Set the bit of the node at the given index to `value`.
    pub fn set(&mut self, index: usize, value: bool) {
        self.check_access(index);
        if value {
            self.values.insert(index);
        } else {
            self.values.remove(index);
        }
    }

    /// Invert the bit of the node at the given index.
    pub fn flip(&mut self, index: usize) {
        self.check_access(index);
        if self.values.contains(index) {
            self.values.remove(index);
        } else {
            self.values.insert(index);
        }
    }

    /// Return the values in this `State` as a vector of Booleans.
    pub fn values(&self) -> Vec<bool> {
        (0..self.len).map(|i| self.get(i)).collect()
    }

    /// A vector of the indices of the nodes which are set.
    pub fn ones(&self) -> Vec<usize> {
        self.values.iter().collect()
    }

    /// **(internal)** Check that the given index is valid in this `State` - panic otherwise.
    fn check_access(&self, index: usize) {
        if index >= self.len {
            panic!(
                "Accessing node {} in a state of {} nodes.",
                index, self.len
            );
        }
    }
}

impl From<Vec<bool>> for State {
    fn from(items: Vec<bool>) -> Self {
        let mut state = State::empty(items.len());
        for (i, val) in items.iter().enumerate() {
            if *val {
                state.set(i, true);
            }
        }
        state
    }
}

impl Display for State {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        for i in 0..self.len {
            write!(f, "{}", if self.get(i) { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl Debug for State {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        write!(f, "State({})[{}]", self.len, self)
    }
}

#[cfg(test)]
mod tests {
    use crate::State;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn state_basic_operations() {
        let mut state = State::empty(4);
        assert_eq!(4, state.len());
        state.set(1, true);
        state.flip(2);
        assert!(state.get(1));
        assert!(state.get(2));
        assert!(!state.get(3));
        state.flip(2);
        assert!(!state.get(2));
        assert_eq!(vec![false, true, false, false], state.values());
        assert_eq!(vec![1], state.ones());
        assert_eq!("0100", state.to_string());
    }

    #[test]
    fn state_from_values_round_trip() {
        let values = vec![true, false, true, true, false];
        let state = State::from(values.clone());
        assert_eq!(values, state.values());
        assert_eq!(state, State::from(state.values()));
    }

    #[test]
    fn state_random_is_reproducible() {
        let mut r_1 = ChaCha8Rng::seed_from_u64(17);
        let mut r_2 = ChaCha8Rng::seed_from_u64(17);
        assert_eq!(State::random(32, &mut r_1), State::random(32, &mut r_2));
    }

    #[test]
    #[should_panic]
    fn state_out_of_range_access() {
        State::empty(3).get(3);
    }
}
