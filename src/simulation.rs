//! The simulation driver: it owns the network, the seeded random generator, and the
//! time-ordered history of visited states.
//!
//! Everything random - topology, function tables, the initial state, and the noise
//! draws - derives from the one generator held by the driver, so a run is fully
//! reproducible from its seed.

use crate::{Rbn, RbnError, State};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::ops::Index;

/// An append-only, time-ordered sequence of network state snapshots.
///
/// Index `0` is the initial state and index `i` is the state after `i` synchronous
/// update steps. A history never shrinks, and downstream consumers (renderers,
/// analysis code) only ever read it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct History {
    snapshots: Vec<State>,
}

impl History {
    /// **(internal)** Start a new history from the given initial state.
    pub(crate) fn new(initial: State) -> History {
        History {
            snapshots: vec![initial],
        }
    }

    /// **(internal)** Append the state reached by one more update step.
    pub(crate) fn push(&mut self, state: State) {
        self.snapshots.push(state);
    }

    /// The number of snapshots, i.e. the number of performed steps plus one.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        false // A history always contains at least the initial state.
    }

    /// The number of update steps this history covers.
    pub fn steps(&self) -> usize {
        self.snapshots.len() - 1
    }

    /// The initial state of the run.
    pub fn initial(&self) -> &State {
        &self.snapshots[0]
    }

    /// The most recent state of the run.
    pub fn current(&self) -> &State {
        &self.snapshots[self.snapshots.len() - 1]
    }

    /// The snapshot after `index` update steps.
    pub fn get(&self, index: usize) -> &State {
        &self.snapshots[index]
    }

    /// Iterate over the snapshots in time order.
    pub fn iter(&self) -> std::slice::Iter<'_, State> {
        self.snapshots.iter()
    }

    /// All snapshots in time order.
    pub fn snapshots(&self) -> &[State] {
        &self.snapshots
    }
}

impl Index<usize> for History {
    type Output = State;

    fn index(&self, index: usize) -> &Self::Output {
        &self.snapshots[index]
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a State;
    type IntoIter = std::slice::Iter<'a, State>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A stateful run of one `Rbn`.
///
/// The simulation holds the *current* state (always the last history entry) and a
/// `ChaCha8Rng` from which every remaining random decision is drawn. An instance is
/// not safe to share between threads without external synchronization, because a
/// step replaces the current state as a whole.
#[derive(Clone)]
pub struct Simulation {
    network: Rbn,
    rng: ChaCha8Rng,
    history: History,
}

impl Simulation {
    /// Create a simulation of the given network, with a random initial state and all
    /// further random decisions derived from `seed`.
    pub fn new(network: Rbn, seed: u64) -> Simulation {
        Self::with_rng(network, ChaCha8Rng::seed_from_u64(seed))
    }

    /// Create a simulation that continues consuming an existing generator. Useful
    /// when the network itself was generated from the same seed.
    pub fn with_rng(network: Rbn, mut rng: ChaCha8Rng) -> Simulation {
        let initial = State::random(network.num_nodes(), &mut rng);
        Simulation {
            network,
            rng,
            history: History::new(initial),
        }
    }

    /// Create a simulation starting from an explicitly given initial state.
    pub fn with_initial_state(
        network: Rbn,
        initial: State,
        seed: u64,
    ) -> Result<Simulation, RbnError> {
        if initial.len() != network.num_nodes() {
            return Err(RbnError::Configuration(format!(
                "An initial state of {} nodes given for a network of {} nodes.",
                initial.len(),
                network.num_nodes()
            )));
        }
        Ok(Simulation {
            network,
            rng: ChaCha8Rng::seed_from_u64(seed),
            history: History::new(initial),
        })
    }

    /// The simulated network.
    pub fn network(&self) -> &Rbn {
        &self.network
    }

    /// The current state (the last snapshot of the history).
    pub fn current(&self) -> &State {
        self.history.current()
    }

    /// The history accumulated so far.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Advance the simulation by one synchronous update step.
    pub fn step(&mut self) -> Result<(), RbnError> {
        let next = self.network.step(self.history.current(), &mut self.rng)?;
        self.history.push(next);
        Ok(())
    }

    /// Advance the simulation by `steps` update steps and return the full history,
    /// including the initial state and every intermediate snapshot.
    pub fn run(&mut self, steps: usize) -> Result<&History, RbnError> {
        for _ in 0..steps {
            self.step()?;
        }
        tracing::debug!(steps, snapshots = self.history.len(), "simulation advanced");
        Ok(&self.history)
    }
}

/// Simulate `steps` update steps of the given network, with the initial state and
/// every other random decision derived from `seed`. The returned history contains
/// exactly `steps + 1` snapshots.
pub fn simulate(network: Rbn, steps: usize, seed: u64) -> Result<History, RbnError> {
    let mut simulation = Simulation::new(network, seed);
    simulation.run(steps)?;
    Ok(simulation.history)
}

#[cfg(test)]
mod tests {
    use crate::simulation::{simulate, Simulation};
    use crate::{FunctionPolicy, Rbn, RbnError, State};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::convert::TryFrom;

    fn small_network(noise_level: f64) -> Rbn {
        let mut rng = ChaCha8Rng::seed_from_u64(31);
        Rbn::random(6, 1, 2, noise_level, FunctionPolicy::NamedOperator, &mut rng).unwrap()
    }

    #[test]
    fn history_has_steps_plus_one_snapshots() {
        for steps in [0usize, 1, 17] {
            let history = simulate(small_network(0.0), steps, 8).unwrap();
            assert_eq!(steps + 1, history.len());
            assert_eq!(steps, history.steps());
        }
    }

    #[test]
    fn zero_steps_leave_the_initial_state_untouched() {
        let network = small_network(0.0);
        let initial = State::from(vec![true, false, true, true, false, false]);
        let mut simulation =
            Simulation::with_initial_state(network, initial.clone(), 0).unwrap();
        let history = simulation.run(0).unwrap();
        assert_eq!(1, history.len());
        assert_eq!(&initial, history.initial());
        assert_eq!(&initial, history.current());
    }

    #[test]
    fn runs_are_reproducible_from_the_seed() {
        // Noise draws included: both runs must make identical random decisions.
        let h_1 = simulate(small_network(0.3), 40, 99).unwrap();
        let h_2 = simulate(small_network(0.3), 40, 99).unwrap();
        assert_eq!(h_1, h_2);
    }

    #[test]
    fn noiseless_runs_depend_only_on_the_initial_state() {
        let network = small_network(0.0);
        let initial = State::from(vec![false, true, false, true, false, true]);
        // Different seeds, same initial state: without noise the trajectories agree.
        let mut s_1 =
            Simulation::with_initial_state(network.clone(), initial.clone(), 1).unwrap();
        let mut s_2 = Simulation::with_initial_state(network, initial, 2).unwrap();
        assert_eq!(s_1.run(20).unwrap(), s_2.run(20).unwrap());
    }

    #[test]
    fn driver_replays_the_declared_dynamics() {
        let network = Rbn::try_from(
            "
            x_1: IDENTITY(x_2)
            x_2: NOT(x_1)
            x_3: AND(x_1, x_2)
        ",
        )
        .unwrap();
        let initial = State::from(vec![true, false, false]);
        let mut simulation = Simulation::with_initial_state(network, initial, 0).unwrap();
        let history = simulation.run(2).unwrap();
        assert_eq!(vec![true, false, false], history[0].values());
        assert_eq!(vec![false, false, false], history[1].values());
        assert_eq!(vec![false, true, false], history[2].values());
    }

    #[test]
    fn initial_state_must_match_the_network() {
        let network = small_network(0.0);
        let initial = State::from(vec![true, false]);
        assert!(matches!(
            Simulation::with_initial_state(network, initial, 0),
            Err(RbnError::Configuration(_))
        ));
    }

    #[test]
    fn history_is_iterable_in_time_order() {
        let history = simulate(small_network(0.0), 3, 5).unwrap();
        let lengths: Vec<usize> = history.iter().map(|state| state.len()).collect();
        assert_eq!(vec![6; 4], lengths);
        assert_eq!(history.get(0), history.initial());
        assert_eq!(history.get(3), history.current());
    }
}
