use std::collections::VecDeque;
use std::fmt;

use itertools::Itertools;
use log::debug;
use log::trace;

use fsm_automata::Dfa;
use fsm_automata::EPSILON;
use fsm_automata::StateIndex;
use fsm_automata::SymbolIndex;
use fsm_collections::IndexedSet;
use fsm_collections::SetIndex;

use crate::AnalysisError;

/// A word on which two automata disagree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CounterExample {
    pub word: Vec<String>,
    pub accepted_by_left: bool,
    pub accepted_by_right: bool,
}

impl fmt::Display for CounterExample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.word.is_empty() {
            write!(f, "{EPSILON}")
        } else {
            write!(f, "{}", self.word.iter().format(""))
        }
    }
}

/// A pair of states, where None is the implicit sink that rejects everything.
type Pair = (Option<StateIndex>, Option<StateIndex>);

/// Finds a shortest word that is accepted by exactly one of the two automata,
/// by a breadth first search over pairs of states.
///
/// The search uses the union of both alphabets, and among the shortest words
/// returns the first in alphabet order. Returns `Ok(None)` when both automata
/// accept the same language.
pub fn find_counter_example(left: &Dfa, right: &Dfa) -> Result<Option<CounterExample>, AnalysisError> {
    let (Some(left_initial), Some(right_initial)) = (left.initial_state_index(), right.initial_state_index())
    else {
        return Err(AnalysisError::EmptyAutomaton);
    };

    let alphabet: Vec<&String> = left.alphabet().iter().merge(right.alphabet()).dedup().collect();
    let left_symbols: Vec<Option<SymbolIndex>> = alphabet.iter().map(|symbol| left.find_symbol(symbol)).collect();
    let right_symbols: Vec<Option<SymbolIndex>> = alphabet.iter().map(|symbol| right.find_symbol(symbol)).collect();

    // For every discovered pair the pair and symbol it was reached by.
    let mut pairs: IndexedSet<Pair> = IndexedSet::new();
    let mut parent: Vec<Option<(SetIndex, usize)>> = Vec::new();
    let mut queue: VecDeque<SetIndex> = VecDeque::new();

    let (initial, _) = pairs.insert((Some(left_initial), Some(right_initial)));
    parent.push(None);
    queue.push_back(initial);

    while let Some(pair_index) = queue.pop_front() {
        let (left_state, right_state) = *pairs.get(pair_index).expect("Queued pairs are always discovered");

        let accepted_by_left = left_state.is_some_and(|state_index| left.is_accepting(state_index));
        let accepted_by_right = right_state.is_some_and(|state_index| right.is_accepting(state_index));
        if accepted_by_left != accepted_by_right {
            // Reconstruct the word by following the parents back to the initial pair.
            let mut word = Vec::new();
            let mut current = pair_index;
            while let Some((previous, symbol)) = parent[*current] {
                word.push(alphabet[symbol].clone());
                current = previous;
            }
            word.reverse();

            let counter_example = CounterExample {
                word,
                accepted_by_left,
                accepted_by_right,
            };
            debug!(
                "Found counter example {counter_example} after exploring {} pairs",
                pairs.len()
            );
            return Ok(Some(counter_example));
        }

        for symbol in 0..alphabet.len() {
            let next = (
                step(left, left_state, left_symbols[symbol]),
                step(right, right_state, right_symbols[symbol]),
            );

            if next == (None, None) {
                continue;
            }

            let (next_index, inserted) = pairs.insert(next);
            if inserted {
                trace!("Discovered pair {next:?} on {}", alphabet[symbol]);
                parent.push(Some((pair_index, symbol)));
                queue.push_back(next_index);
            }
        }
    }

    debug!("No counter example after exploring {} pairs", pairs.len());
    Ok(None)
}

/// Returns the successor in the given automaton, where a missing state or symbol leads to the sink.
fn step(dfa: &Dfa, state: Option<StateIndex>, symbol: Option<SymbolIndex>) -> Option<StateIndex> {
    dfa.transition(state?, symbol?)
}
