use std::fmt;

use itertools::Itertools;

use fsm_collections::VecSet;
use fsm_utilities::TagIndex;

use crate::StateIndex;

/// A unique type for the symbols of a deterministic automaton.
pub struct SymbolTag;

/// The index of a symbol in the alphabet of a [`Dfa`].
pub type SymbolIndex = TagIndex<usize, SymbolTag>;

/// A state of a deterministic automaton.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DfaState {
    pub name: String,
    pub is_start: bool,
    pub is_accept: bool,

    /// The states of the nondeterministic automaton that this state represents.
    pub nfa_states: VecSet<StateIndex>,
}

/// A deterministic finite automaton with a partial transition function.
///
/// The transitions are stored in a dense table with one entry for every
/// state and symbol, so every state has at most one successor per symbol.
#[derive(Clone, PartialEq, Eq)]
pub struct Dfa {
    states: Vec<DfaState>,

    /// The symbols, sorted on their text.
    alphabet: Vec<String>,

    /// The successor of state `s` for symbol `a` is at `s * alphabet.len() + a`.
    table: Vec<Option<StateIndex>>,
}

impl Dfa {
    /// Creates an automaton without states over the given alphabet, which must
    /// be sorted and free of duplicates.
    pub fn new(alphabet: Vec<String>) -> Self {
        assert!(
            alphabet.windows(2).all(|pair| pair[0] < pair[1]),
            "The alphabet {alphabet:?} must be sorted and without duplicates"
        );

        Self {
            states: Vec::new(),
            alphabet,
            table: Vec::new(),
        }
    }

    /// Adds a state without outgoing transitions.
    pub fn add_state(&mut self, state: DfaState) -> StateIndex {
        self.states.push(state);
        self.table.extend(std::iter::repeat_n(None, self.alphabet.len()));
        StateIndex::new(self.states.len() - 1)
    }

    /// Sets the successor of `from` for the given symbol, replacing the
    /// previous successor.
    pub fn set_transition(&mut self, from: StateIndex, symbol: SymbolIndex, to: StateIndex) {
        debug_assert!(*to < self.states.len(), "Target state {to} does not exist");
        let position = self.position(from, symbol);
        self.table[position] = Some(to);
    }

    /// Returns the successor of the given state for the given symbol.
    pub fn transition(&self, from: StateIndex, symbol: SymbolIndex) -> Option<StateIndex> {
        self.table[self.position(from, symbol)]
    }

    /// Returns all (symbol, successor) pairs of the given state, in alphabet order.
    pub fn outgoing_transitions(&self, from: StateIndex) -> impl Iterator<Item = (SymbolIndex, StateIndex)> + '_ {
        let start = *from * self.alphabet.len();
        self.table[start..start + self.alphabet.len()]
            .iter()
            .enumerate()
            .filter_map(|(symbol, to)| to.map(|to| (SymbolIndex::new(symbol), to)))
    }

    /// Returns the number of states.
    pub fn num_of_states(&self) -> usize {
        self.states.len()
    }

    /// Returns the number of transitions.
    pub fn num_of_transitions(&self) -> usize {
        self.table.iter().filter(|to| to.is_some()).count()
    }

    /// Iterate over all state indices of the automaton.
    pub fn iter_states(&self) -> impl Iterator<Item = StateIndex> + use<> {
        (0..self.num_of_states()).map(StateIndex::new)
    }

    /// Returns the state with the given index.
    pub fn state(&self, state_index: StateIndex) -> &DfaState {
        &self.states[*state_index]
    }

    /// Returns the index of the start state, or None when there are no states.
    pub fn initial_state_index(&self) -> Option<StateIndex> {
        debug_assert!(
            self.states.iter().filter(|state| state.is_start).count() <= 1,
            "A deterministic automaton has at most one start state"
        );

        self.states
            .iter()
            .position(|state| state.is_start)
            .map(StateIndex::new)
    }

    /// Returns true iff the given state is accepting.
    pub fn is_accepting(&self, state_index: StateIndex) -> bool {
        self.states[*state_index].is_accept
    }

    /// Returns the alphabet, sorted on the text of the symbols.
    pub fn alphabet(&self) -> &[String] {
        &self.alphabet
    }

    /// Returns the text of the given symbol.
    pub fn symbol(&self, symbol: SymbolIndex) -> &str {
        &self.alphabet[*symbol]
    }

    /// Returns the index of the symbol with the given text.
    pub fn find_symbol(&self, symbol: &str) -> Option<SymbolIndex> {
        self.alphabet
            .binary_search_by(|other| other.as_str().cmp(symbol))
            .ok()
            .map(SymbolIndex::new)
    }

    /// Returns true iff the automaton accepts the given word. A symbol outside
    /// of the alphabet, or a missing transition, rejects the word.
    pub fn accepts<'a>(&self, word: impl IntoIterator<Item = &'a str>) -> bool {
        let Some(mut current) = self.initial_state_index() else {
            return false;
        };

        for symbol in word {
            let Some(symbol) = self.find_symbol(symbol) else {
                return false;
            };

            match self.transition(current, symbol) {
                Some(next) => current = next,
                None => return false,
            }
        }

        self.is_accepting(current)
    }

    fn position(&self, from: StateIndex, symbol: SymbolIndex) -> usize {
        debug_assert!(*symbol < self.alphabet.len(), "Symbol {symbol} is not in the alphabet");
        *from * self.alphabet.len() + *symbol
    }
}

impl fmt::Display for Dfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of states: {}", self.num_of_states())?;
        writeln!(
            f,
            "Number of accepting states: {}",
            self.states.iter().filter(|state| state.is_accept).count()
        )?;
        writeln!(f, "Alphabet: {{{}}}", self.alphabet.iter().format(", "))?;
        write!(f, "Number of transitions: {}", self.num_of_transitions())
    }
}

impl fmt::Debug for Dfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{self}")?;

        for state_index in self.iter_states() {
            let state = self.state(state_index);
            writeln!(
                f,
                "{state_index}: {} {:?}{}{}",
                state.name,
                state.nfa_states,
                if state.is_start { " (start)" } else { "" },
                if state.is_accept { " (accept)" } else { "" }
            )?;
        }

        for state_index in self.iter_states() {
            for (symbol, to) in self.outgoing_transitions(state_index) {
                writeln!(f, "{state_index} --[{}]-> {to}", self.symbol(symbol))?;
            }
        }

        Ok(())
    }
}
