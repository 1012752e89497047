use rand::Rng;

use crate::EPSILON;
use crate::Nfa;
use crate::NfaBuilder;
use crate::StateIndex;

/// Generates a random automaton with the desired number of states, labels and
/// out degree. Label zero is epsilon and the other labels are lower case
/// letters. State zero is always a start state, every other state is a start
/// or accepting state with a fixed probability.
pub fn random_nfa(rng: &mut impl Rng, num_of_states: usize, num_of_labels: u32, outdegree: usize) -> Nfa {
    assert!(
        num_of_labels < 27,
        "Too many labels requested, we only support alphabetic labels."
    );
    assert!(num_of_states > 0, "An automaton needs at least a start state");

    // Introduce lower case letters for the labels.
    let mut labels: Vec<String> = Vec::new();
    labels.push(EPSILON.to_string());
    for i in 0..num_of_labels.saturating_sub(1) {
        labels.push(char::from_digit(i + 10, 36).expect("Digits from 10 to 35 are letters").to_string());
    }

    let mut builder = NfaBuilder::new();
    for state_index in 0..num_of_states {
        let state = builder.add_state();
        builder.set_start(state, state_index == 0 || rng.random_bool(0.1));
        builder.set_accept(state, rng.random_bool(0.3));
    }

    for state_index in 0..num_of_states {
        // Introduce outgoing transitions for this state based on the desired out degree.
        for _ in 0..rng.random_range(0..=outdegree) {
            // Pick a random label and state.
            let label = &labels[rng.random_range(0..labels.len())];
            let to = rng.random_range(0..num_of_states);

            builder.add_transition(StateIndex::new(state_index), label, StateIndex::new(to));
        }
    }

    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    use fsm_utilities::random_test;

    use crate::Diagnostic;
    use crate::validate;

    #[test]
    fn test_random_nfa_is_valid() {
        random_test(100, |rng| {
            let nfa = random_nfa(rng, 10, 3, 3);

            assert!(nfa.start_states().next().is_some());
            assert!(nfa.alphabet().len() <= 2);
            assert!(
                !validate(&nfa).iter().any(Diagnostic::is_blocking),
                "A random automaton has no blocking diagnostics"
            );
        });
    }
}
