use itertools::Itertools;
use log::trace;

use fsm_collections::VecSet;

use crate::AutomatonError;
use crate::Nfa;
use crate::StateIndex;
use crate::Transition;
use crate::ensure_valid;
use crate::epsilon_closure;

/// The configuration of the automaton after consuming a single symbol.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulationStep {
    /// The consumed symbol, none for the initial step.
    pub symbol: Option<char>,
    /// The active states after taking the epsilon closure.
    pub active: VecSet<StateIndex>,
    /// The transitions labelled with the symbol that were taken from the
    /// previously active states.
    pub fired: Vec<Transition>,
}

/// The complete trace of running an automaton on an input word.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Simulation {
    accepted: bool,
    steps: Vec<SimulationStep>,
}

impl Simulation {
    /// Returns true iff the last active set contains an accepting state.
    pub fn accepted(&self) -> bool {
        self.accepted
    }

    /// Returns all steps, the first step is the initial configuration.
    pub fn steps(&self) -> &[SimulationStep] {
        &self.steps
    }

    /// Returns the step with the given number, step zero is the initial configuration.
    pub fn step(&self, index: usize) -> Option<&SimulationStep> {
        self.steps.get(index)
    }

    /// Returns the number of steps, which is one more than the length of the input.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// A simulation always contains the initial step.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Returns the final configuration.
    pub fn last_step(&self) -> &SimulationStep {
        self.steps.last().expect("A simulation contains at least the initial step")
    }
}

/// Runs the automaton on the given input and records the set of active states
/// after every symbol.
///
/// A symbol only matches a transition whose label is exactly that symbol. The
/// whole input is always consumed, also when no state is active anymore, so
/// the trace has one step per symbol plus the initial step.
pub fn simulate(nfa: &Nfa, input: impl IntoIterator<Item = char>) -> Result<Simulation, AutomatonError> {
    ensure_valid(nfa)?;

    let initial = epsilon_closure(nfa, nfa.start_states());
    trace!("Initial states {initial:?}");

    let mut steps = vec![SimulationStep {
        symbol: None,
        active: initial,
        fired: Vec::new(),
    }];

    for symbol in input {
        let label = nfa.find_label(&symbol.to_string());
        let current = &steps[steps.len() - 1].active;

        let fired: Vec<Transition> = match label {
            Some(label) if !nfa.is_epsilon(label) => current
                .iter()
                .flat_map(|state_index| nfa.outgoing_transitions(*state_index))
                .filter(|transition| transition.label == label)
                .copied()
                .collect(),
            _ => Vec::new(),
        };

        let active = epsilon_closure(nfa, fired.iter().map(|transition| transition.to));
        trace!(
            "Symbol {symbol} fired [{}], active states {active:?}",
            fired
                .iter()
                .format_with(", ", |transition, f| f(&format_args!("{} -> {}", transition.from, transition.to)))
        );

        steps.push(SimulationStep {
            symbol: Some(symbol),
            active,
            fired,
        });
    }

    let accepted = steps[steps.len() - 1]
        .active
        .iter()
        .any(|state_index| nfa.is_accepting(*state_index));

    Ok(Simulation { accepted, steps })
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    use crate::Diagnostic;
    use crate::NfaBuilder;

    /// Accepts the words over {a, b} whose second to last symbol is an a.
    fn second_to_last_a() -> Nfa {
        let mut builder = NfaBuilder::new();
        let s0 = builder.add_state();
        let s1 = builder.add_state();
        let s2 = builder.add_state();
        builder.set_start(s0, true);
        builder.set_accept(s2, true);
        builder.add_transition(s0, "a", s0);
        builder.add_transition(s0, "b", s0);
        builder.add_transition(s0, "a", s1);
        builder.add_transition(s1, "a", s2);
        builder.add_transition(s1, "b", s2);
        builder.finish()
    }

    #[test]
    fn test_simulate_trace() {
        let nfa = second_to_last_a();
        let simulation = simulate(&nfa, "aab".chars()).unwrap();

        assert!(simulation.accepted());
        assert_eq!(simulation.len(), 4);

        let states = |indices: &[usize]| -> VecSet<StateIndex> { indices.iter().copied().map(StateIndex::new).collect() };
        assert_eq!(simulation.step(0).unwrap().symbol, None);
        assert_eq!(simulation.step(0).unwrap().active, states(&[0]));
        assert_eq!(simulation.step(1).unwrap().active, states(&[0, 1]));
        assert_eq!(simulation.step(2).unwrap().active, states(&[0, 1, 2]));
        assert_eq!(simulation.step(3).unwrap().active, states(&[0, 2]));
        assert_eq!(simulation.step(3).unwrap().symbol, Some('b'));

        // From {0, 1, 2} the b transitions of states 0 and 1 fire.
        assert_eq!(simulation.last_step().fired.len(), 2);
    }

    #[test]
    fn test_simulate_rejects_and_continues() {
        let nfa = second_to_last_a();
        let simulation = simulate(&nfa, "acb".chars()).unwrap();

        assert!(!simulation.accepted());
        assert_eq!(simulation.len(), 4);
        assert!(simulation.step(2).unwrap().active.is_empty());
        assert!(simulation.last_step().active.is_empty());
    }

    #[test]
    fn test_simulate_epsilon_closure() {
        let mut builder = NfaBuilder::new();
        let s0 = builder.add_state();
        let s1 = builder.add_state();
        let s2 = builder.add_state();
        builder.set_start(s0, true);
        builder.set_accept(s2, true);
        builder.add_epsilon_transition(s0, s1);
        builder.add_transition(s1, "x", s2);
        let nfa = builder.finish();

        let simulation = simulate(&nfa, "x".chars()).unwrap();
        assert!(simulation.accepted());
        assert_eq!(simulation.step(0).unwrap().active.as_slice(), &[s0, s1]);
        assert_eq!(simulation.last_step().fired, vec![nfa.transitions()[1]]);

        // The epsilon character does not match epsilon transitions.
        assert!(!simulate(&nfa, "ε".chars()).unwrap().accepted());
    }

    #[test]
    fn test_simulate_refuses_invalid() {
        let mut builder = NfaBuilder::new();
        let s0 = builder.add_state();
        builder.set_accept(s0, true);
        let nfa = builder.finish();

        assert_eq!(
            simulate(&nfa, "".chars()),
            Err(AutomatonError::Invalid(vec![Diagnostic::NoStartState]))
        );
    }
}
