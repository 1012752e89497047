use std::fmt;

use fsm_utilities::TagIndex;

/// A unique type for the labels.
pub struct LabelTag;

/// A unique type for the states.
pub struct StateTag;

/// The index type for a label.
pub type LabelIndex = TagIndex<usize, LabelTag>;

/// The index for a state.
pub type StateIndex = TagIndex<usize, StateTag>;

/// The text of the reserved epsilon label.
pub const EPSILON: &str = "ε";

/// The epsilon label always has index zero.
pub const EPSILON_LABEL: LabelIndex = LabelIndex::new(0);

/// A single state of an automaton.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct State {
    pub name: String,
    pub is_start: bool,
    pub is_accept: bool,
}

impl State {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_start: false,
            is_accept: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Transition {
    pub from: StateIndex,
    pub label: LabelIndex,
    pub to: StateIndex,
}

impl Transition {
    /// Constructs a new transition.
    pub fn new(from: StateIndex, label: LabelIndex, to: StateIndex) -> Self {
        Self { from, label, to }
    }
}

/// A nondeterministic finite automaton with epsilon transitions.
///
/// The transitions are kept exactly as they were supplied, including the ones
/// that refer to states that do not exist, such that [`crate::validate`] can
/// report them. The outgoing transition index only contains the transitions
/// between existing states, so algorithms never index out of bounds.
#[derive(Clone, PartialEq, Eq)]
pub struct Nfa {
    states: Vec<State>,

    /// The label for every index, the first label is always [`EPSILON`].
    labels: Vec<String>,

    /// All transitions in the order they were added.
    transitions: Vec<Transition>,

    /// For every state the offset into `outgoing`, with an additional sentinel.
    outgoing_start: Vec<usize>,
    /// Indices into `transitions` sorted by source state.
    outgoing: Vec<usize>,
}

impl Nfa {
    /// Creates a new automaton, the labels must start with the epsilon label
    /// and every transition label must be a valid label index.
    pub(crate) fn new(states: Vec<State>, labels: Vec<String>, transitions: Vec<Transition>) -> Nfa {
        debug_assert_eq!(labels.first().map(String::as_str), Some(EPSILON), "Label zero must be epsilon");
        debug_assert!(
            transitions.iter().all(|transition| *transition.label < labels.len()),
            "Every transition label must be interned"
        );

        let num_of_states = states.len();
        let is_wellformed = |transition: &Transition| *transition.from < num_of_states && *transition.to < num_of_states;

        // Count the number of outgoing transitions for every state.
        let mut outgoing_start = vec![0; num_of_states + 1];
        for transition in transitions.iter().filter(|transition| is_wellformed(*transition)) {
            outgoing_start[*transition.from + 1] += 1;
        }

        // Prefix sum, afterwards outgoing_start[s] is the first position for state s.
        for state in 0..num_of_states {
            outgoing_start[state + 1] += outgoing_start[state];
        }

        // Place the transitions, using a separate cursor per state.
        let mut cursor = outgoing_start.clone();
        let mut outgoing = vec![0; outgoing_start[num_of_states]];
        for (index, transition) in transitions.iter().enumerate() {
            if is_wellformed(transition) {
                outgoing[cursor[*transition.from]] = index;
                cursor[*transition.from] += 1;
            }
        }

        Nfa {
            states,
            labels,
            transitions,
            outgoing_start,
            outgoing,
        }
    }

    /// Returns the number of states.
    pub fn num_of_states(&self) -> usize {
        self.states.len()
    }

    /// Returns the number of transitions, including the ill-formed ones.
    pub fn num_of_transitions(&self) -> usize {
        self.transitions.len()
    }

    /// Returns the number of labels, including the epsilon label.
    pub fn num_of_labels(&self) -> usize {
        self.labels.len()
    }

    /// Iterate over all state indices of the automaton.
    pub fn iter_states(&self) -> impl Iterator<Item = StateIndex> + use<> {
        (0..self.num_of_states()).map(StateIndex::new)
    }

    /// Returns the state with the given index.
    pub fn state(&self, state_index: StateIndex) -> &State {
        &self.states[*state_index]
    }

    /// Returns all the states.
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Returns the indices of the states that are marked as start state.
    pub fn start_states(&self) -> impl Iterator<Item = StateIndex> + '_ {
        self.iter_states().filter(|state_index| self.state(*state_index).is_start)
    }

    /// Returns true iff the given state exists and is accepting.
    pub fn is_accepting(&self, state_index: StateIndex) -> bool {
        self.states.get(*state_index).is_some_and(|state| state.is_accept)
    }

    /// Returns all transitions as they were supplied.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Returns the outgoing transitions of the given state, only transitions
    /// between existing states are considered. A state that does not exist has
    /// no outgoing transitions.
    pub fn outgoing_transitions(&self, state_index: StateIndex) -> impl Iterator<Item = &Transition> + '_ {
        let range = if *state_index < self.num_of_states() {
            self.outgoing_start[*state_index]..self.outgoing_start[*state_index + 1]
        } else {
            0..0
        };

        self.outgoing[range].iter().map(|&index| &self.transitions[index])
    }

    /// Returns the list of labels.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Returns the text of the given label.
    pub fn label(&self, label_index: LabelIndex) -> &str {
        &self.labels[*label_index]
    }

    /// Returns the index of the label with the given text, if it is used.
    pub fn find_label(&self, label: &str) -> Option<LabelIndex> {
        self.labels.iter().position(|other| other == label).map(LabelIndex::new)
    }

    /// Returns true iff the given label index is the epsilon label.
    pub fn is_epsilon(&self, label_index: LabelIndex) -> bool {
        label_index == EPSILON_LABEL
    }

    /// Returns the alphabet: the labels, other than epsilon, of the transitions
    /// between existing states. They are sorted on their text.
    pub fn alphabet(&self) -> Vec<LabelIndex> {
        let mut used = vec![false; self.labels.len()];
        for state_index in self.iter_states() {
            for transition in self.outgoing_transitions(state_index) {
                used[*transition.label] = true;
            }
        }

        let mut alphabet: Vec<LabelIndex> = (1..self.labels.len())
            .filter(|&label| used[label])
            .map(LabelIndex::new)
            .collect();
        alphabet.sort_by(|left, right| self.label(*left).cmp(self.label(*right)));
        alphabet
    }
}

impl fmt::Display for Nfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Print some information about the automaton.
        writeln!(f, "Number of states: {}", self.num_of_states())?;
        writeln!(f, "Number of start states: {}", self.start_states().count())?;
        writeln!(
            f,
            "Number of accepting states: {}",
            self.states.iter().filter(|state| state.is_accept).count()
        )?;
        writeln!(f, "Number of symbols: {}", self.alphabet().len())?;
        write!(f, "Number of transitions: {}", self.num_of_transitions())
    }
}

impl fmt::Debug for Nfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{self}")?;

        for (index, state) in self.states.iter().enumerate() {
            writeln!(
                f,
                "{index}: {}{}{}",
                state.name,
                if state.is_start { " (start)" } else { "" },
                if state.is_accept { " (accept)" } else { "" }
            )?;
        }

        for transition in &self.transitions {
            let label_name = &self.labels[*transition.label];
            writeln!(f, "{} --[{label_name}]-> {}", transition.from, transition.to)?;
        }

        Ok(())
    }
}
