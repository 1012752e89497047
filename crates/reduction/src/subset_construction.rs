use std::collections::VecDeque;

use itertools::Itertools;
use log::debug;
use log::trace;

use fsm_automata::Dfa;
use fsm_automata::DfaState;
use fsm_automata::Nfa;
use fsm_automata::StateIndex;
use fsm_automata::SymbolIndex;
use fsm_automata::epsilon_closure;
use fsm_collections::IndexedSet;
use fsm_collections::VecSet;
use fsm_utilities::Timing;

/// Determinizes the given automaton with the subset construction.
///
/// Every state of the resulting automaton is an epsilon closed set of states
/// of the input, and the alphabet consists of the non epsilon labels of the
/// input. States are explored in breadth first order, so the start state is
/// always state zero. When more than `state_limit` states would be created the
/// exploration stops immediately and the second component is true. The
/// automaton returned in that case is partial and must not be used for
/// further analysis.
pub fn subset_construction(nfa: &Nfa, state_limit: usize, timing: &mut Timing) -> (Dfa, bool) {
    let mut timer = timing.start("determinize");

    // Maps every label of the input to its symbol, epsilon has no symbol.
    let alphabet = nfa.alphabet();
    let mut symbol_of: Vec<Option<SymbolIndex>> = vec![None; nfa.num_of_labels()];
    for (symbol, label) in alphabet.iter().enumerate() {
        symbol_of[**label] = Some(SymbolIndex::new(symbol));
    }

    let mut dfa = Dfa::new(alphabet.iter().map(|label| nfa.label(*label).to_string()).collect());
    let mut subsets: IndexedSet<VecSet<StateIndex>> = IndexedSet::new();
    let mut queue: VecDeque<StateIndex> = VecDeque::new();
    let mut truncated = false;

    'explore: {
        if state_limit == 0 {
            truncated = true;
            break 'explore;
        }

        let initial = epsilon_closure(nfa, nfa.start_states());
        subsets.insert(initial.clone());
        let mut initial_state = new_state(nfa, initial);
        initial_state.is_start = true;
        queue.push_back(dfa.add_state(initial_state));

        while let Some(state_index) = queue.pop_front() {
            // Collect the targets of all non epsilon transitions per symbol.
            let mut targets: Vec<Vec<StateIndex>> = vec![Vec::new(); alphabet.len()];
            for nfa_state in dfa.state(state_index).nfa_states.iter() {
                for transition in nfa.outgoing_transitions(*nfa_state) {
                    if let Some(symbol) = symbol_of[*transition.label] {
                        targets[*symbol].push(transition.to);
                    }
                }
            }

            for (symbol, targets) in targets.into_iter().enumerate() {
                if targets.is_empty() {
                    continue;
                }

                let closure = epsilon_closure(nfa, targets);
                let to = match subsets.index(&closure) {
                    Some(index) => StateIndex::new(*index),
                    None => {
                        if subsets.len() >= state_limit {
                            truncated = true;
                            break 'explore;
                        }

                        subsets.insert(closure.clone());
                        let to = dfa.add_state(new_state(nfa, closure));
                        trace!("Discovered state {} as {}", to, dfa.state(to).name);
                        queue.push_back(to);
                        to
                    }
                };

                dfa.set_transition(state_index, SymbolIndex::new(symbol), to);
            }
        }
    }

    if truncated {
        debug!(
            "Determinization stopped after {} states, exceeding the limit of {state_limit} states",
            dfa.num_of_states()
        );
    } else {
        debug!(
            "Determinized {} states into {} states and {} transitions",
            nfa.num_of_states(),
            dfa.num_of_states(),
            dfa.num_of_transitions()
        );
    }

    timer.finish();
    (dfa, truncated)
}

/// Creates the state for the given set, named after its members.
fn new_state(nfa: &Nfa, nfa_states: VecSet<StateIndex>) -> DfaState {
    let name = nfa_states
        .iter()
        .map(|state_index| nfa.state(*state_index).name.as_str())
        .join(",");
    let is_accept = nfa_states.iter().any(|state_index| nfa.is_accepting(*state_index));

    DfaState {
        name: format!("{{{name}}}"),
        is_start: false,
        is_accept,
        nfa_states,
    }
}
