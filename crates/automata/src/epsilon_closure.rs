use bitvec::bitvec;
use bitvec::order::Lsb0;

use fsm_collections::VecSet;

use crate::Nfa;
use crate::StateIndex;

/// Returns the set of states reachable from the given seed states by
/// following only epsilon transitions, including the seeds themselves.
///
/// Seeds that do not exist in the automaton are ignored. Uses an explicit
/// stack so that long chains of epsilon transitions can not exhaust the call
/// stack.
pub fn epsilon_closure(nfa: &Nfa, seeds: impl IntoIterator<Item = StateIndex>) -> VecSet<StateIndex> {
    let mut visited = bitvec![usize, Lsb0; 0; nfa.num_of_states()];
    let mut stack = Vec::new();

    for seed in seeds {
        if *seed < nfa.num_of_states() && !visited[*seed] {
            visited.set(*seed, true);
            stack.push(seed);
        }
    }

    while let Some(state_index) = stack.pop() {
        for transition in nfa.outgoing_transitions(state_index) {
            if nfa.is_epsilon(transition.label) && !visited[*transition.to] {
                visited.set(*transition.to, true);
                stack.push(transition.to);
            }
        }
    }

    // The ones are yielded in increasing order, so the set is already sorted.
    visited.iter_ones().map(StateIndex::new).collect()
}
