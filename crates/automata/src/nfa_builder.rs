use log::warn;

use fsm_collections::IndexedSet;

use crate::EPSILON;
use crate::EPSILON_LABEL;
use crate::LabelIndex;
use crate::Nfa;
use crate::State;
use crate::StateIndex;
use crate::Transition;

/// Incrementally constructs an [`Nfa`].
///
/// The builder does not check that transitions refer to existing states,
/// that is reported afterwards by [`crate::validate`]. This is the entry
/// point for automata that are drawn by an external editor.
pub struct NfaBuilder {
    states: Vec<State>,
    labels: IndexedSet<String>,
    transitions: Vec<Transition>,
}

impl NfaBuilder {
    pub fn new() -> Self {
        let mut labels = IndexedSet::new();
        let (epsilon, _) = labels.insert(EPSILON.to_string());
        debug_assert_eq!(*epsilon, *EPSILON_LABEL, "The epsilon label must be the first label");

        Self {
            states: Vec::new(),
            labels,
            transitions: Vec::new(),
        }
    }

    /// Adds a state named after its index, for example `q3`.
    pub fn add_state(&mut self) -> StateIndex {
        let name = format!("q{}", self.states.len());
        self.add_named_state(name)
    }

    /// Adds a state with the given display name.
    pub fn add_named_state(&mut self, name: impl Into<String>) -> StateIndex {
        self.states.push(State::new(name));
        StateIndex::new(self.states.len() - 1)
    }

    /// Marks the given state as a start state, or removes the mark. A state
    /// that does not exist is ignored.
    pub fn set_start(&mut self, state: StateIndex, is_start: bool) {
        match self.states.get_mut(*state) {
            Some(state) => state.is_start = is_start,
            None => warn!("Ignoring the start mark of state {state}, which does not exist"),
        }
    }

    /// Marks the given state as an accepting state, or removes the mark. A
    /// state that does not exist is ignored.
    pub fn set_accept(&mut self, state: StateIndex, is_accept: bool) {
        match self.states.get_mut(*state) {
            Some(state) => state.is_accept = is_accept,
            None => warn!("Ignoring the accept mark of state {state}, which does not exist"),
        }
    }

    /// Adds a transition with the given label, the label [`EPSILON`] denotes an
    /// epsilon transition.
    pub fn add_transition(&mut self, from: StateIndex, label: &str, to: StateIndex) {
        let label = self.label_index(label);
        self.transitions.push(Transition::new(from, label, to));
    }

    /// Adds an epsilon transition.
    pub fn add_epsilon_transition(&mut self, from: StateIndex, to: StateIndex) {
        self.transitions.push(Transition::new(from, EPSILON_LABEL, to));
    }

    /// Returns the number of states added so far.
    pub fn num_of_states(&self) -> usize {
        self.states.len()
    }

    /// Returns the number of transitions added so far.
    pub fn num_of_transitions(&self) -> usize {
        self.transitions.len()
    }

    /// Returns the automaton consisting of the added states and transitions.
    pub fn finish(self) -> Nfa {
        Nfa::new(self.states, self.labels.into_vec(), self.transitions)
    }

    /// Returns the index of the given label, interning it when necessary.
    fn label_index(&mut self, label: &str) -> LabelIndex {
        let (index, _) = self.labels.insert(label.to_string());
        LabelIndex::new(*index)
    }
}

impl Default for NfaBuilder {
    fn default() -> Self {
        Self::new()
    }
}
