use log::debug;

use fsm_automata::Nfa;
use fsm_automata::ensure_valid;
use fsm_utilities::Timing;

use crate::AnalysisError;
use crate::CounterExample;
use crate::Side;
use crate::find_counter_example;
use crate::minimize;
use crate::subset_construction;

/// The number of states that determinization may create when no limit is configured.
pub const DEFAULT_STATE_LIMIT: usize = 10_000;

/// The outcome of comparing the languages of two automata.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Equivalence {
    /// Both automata accept the same words.
    Equivalent,

    /// The counter example is accepted by exactly one of the automata.
    NotEquivalent(CounterExample),

    /// The given automaton has more states than allowed, so equivalence is undecided.
    LimitReached { side: Side, state_limit: usize },
}

impl Equivalence {
    pub fn is_equivalent(&self) -> bool {
        matches!(self, Equivalence::Equivalent)
    }

    /// Returns true iff the comparison was inconclusive.
    pub fn limit_reached(&self) -> bool {
        matches!(self, Equivalence::LimitReached { .. })
    }

    pub fn counter_example(&self) -> Option<&CounterExample> {
        match self {
            Equivalence::NotEquivalent(counter_example) => Some(counter_example),
            _ => None,
        }
    }

    /// Returns a human readable explanation of the outcome.
    pub fn message(&self) -> String {
        match self {
            Equivalence::Equivalent => "The automata accept the same language".to_string(),
            Equivalence::NotEquivalent(counter_example) => {
                let side = if counter_example.accepted_by_left {
                    Side::Left
                } else {
                    Side::Right
                };
                format!("The automata are not equivalent, only the {side} automaton accepts {counter_example}")
            }
            Equivalence::LimitReached { side, state_limit } => format!(
                "The {side} automaton has more than {state_limit} states, so equivalence is too large to decide"
            ),
        }
    }
}

/// Decides whether the two automata accept the same language.
///
/// Both automata are determinized and minimized, after which a counter example
/// is searched for. Reports [`Equivalence::LimitReached`] when either side
/// needs more than `state_limit` states, which is different from the automata
/// not being equivalent.
pub fn check_equivalence(
    left: &Nfa,
    right: &Nfa,
    state_limit: usize,
    timing: &mut Timing,
) -> Result<Equivalence, AnalysisError> {
    for (side, nfa) in [(Side::Left, left), (Side::Right, right)] {
        if nfa.start_states().next().is_none() {
            return Err(AnalysisError::MissingStartState(side));
        }

        ensure_valid(nfa).map_err(|error| AnalysisError::Invalid(side, error))?;
    }

    let mut minimal = Vec::new();
    for (side, nfa) in [(Side::Left, left), (Side::Right, right)] {
        let (dfa, truncated) = subset_construction(nfa, state_limit, timing);
        if truncated {
            debug!("Determinizing the {side} automaton exceeded the limit of {state_limit} states");
            return Ok(Equivalence::LimitReached { side, state_limit });
        }

        let dfa = minimize(&dfa, timing);
        if dfa.num_of_states() > state_limit {
            return Ok(Equivalence::LimitReached { side, state_limit });
        }

        minimal.push(dfa);
    }

    let mut timer = timing.start("counter example");
    let counter_example = find_counter_example(&minimal[0], &minimal[1])?;
    timer.finish();

    let result = match counter_example {
        None => Equivalence::Equivalent,
        Some(counter_example) => Equivalence::NotEquivalent(counter_example),
    };

    debug!("{}", result.message());
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_case::test_case;
    use test_log::test;

    use fsm_automata::AutomatonError;
    use fsm_automata::Diagnostic;
    use fsm_automata::NfaBuilder;
    use fsm_automata::StateIndex;
    use fsm_automata::simulate;
    use fsm_automata::thompson;
    use fsm_syntax::random_regex;
    use fsm_utilities::random_test;

    use crate::test_utility::nfa_of;

    fn check(left: &str, right: &str, state_limit: usize) -> Equivalence {
        check_equivalence(&nfa_of(left), &nfa_of(right), state_limit, &mut Timing::new()).unwrap()
    }

    #[test_case("ab|ab", "ab" ; "duplicate alternative")]
    #[test_case("(a|b)*", "(a*b*)*" ; "nested stars")]
    #[test_case("a+", "aa*" ; "plus")]
    #[test_case("a?", "ε|a" ; "optional")]
    #[test_case("[a-c]", "a|b|c" ; "class")]
    fn test_equivalent(left: &str, right: &str) {
        let result = check(left, right, DEFAULT_STATE_LIMIT);
        assert!(result.is_equivalent(), "{}", result.message());
        assert_eq!(result.counter_example(), None);
        assert!(!result.limit_reached());
    }

    #[test]
    fn test_not_equivalent() {
        let result = check("a*", "a+", DEFAULT_STATE_LIMIT);
        assert!(!result.is_equivalent());
        assert!(!result.limit_reached());

        let counter_example = result.counter_example().unwrap();
        assert!(counter_example.word.is_empty());
        assert!(counter_example.accepted_by_left);
        assert!(!counter_example.accepted_by_right);
        assert!(result.message().contains("only the first automaton accepts ε"));

        let result = check("a+", "a*", DEFAULT_STATE_LIMIT);
        assert!(result.message().contains("only the second automaton"));
    }

    #[test]
    fn test_limit_reached() {
        let result = check("(a|b)*a(a|b)(a|b)(a|b)(a|b)", "(a|b)*", 10);
        assert!(result.limit_reached());
        assert!(!result.is_equivalent());
        assert_eq!(
            result,
            Equivalence::LimitReached {
                side: Side::Left,
                state_limit: 10
            }
        );
        assert!(result.message().contains("too large to decide"));
    }

    #[test]
    fn test_check_invalid_automata() {
        let mut builder = NfaBuilder::new();
        let s0 = builder.add_state();
        builder.set_accept(s0, true);
        let without_start = builder.finish();

        let mut builder = NfaBuilder::new();
        let s0 = builder.add_state();
        builder.set_start(s0, true);
        builder.add_transition(s0, "a", StateIndex::new(7));
        let dangling = builder.finish();

        let valid = nfa_of("a");
        let mut timing = Timing::new();
        assert_eq!(
            check_equivalence(&valid, &without_start, DEFAULT_STATE_LIMIT, &mut timing),
            Err(AnalysisError::MissingStartState(Side::Right))
        );
        assert_eq!(
            check_equivalence(&dangling, &valid, DEFAULT_STATE_LIMIT, &mut timing),
            Err(AnalysisError::Invalid(
                Side::Left,
                AutomatonError::Invalid(vec![Diagnostic::InvalidStateReference {
                    transition: 0,
                    state: StateIndex::new(7)
                }])
            ))
        );

        // A label of two symbols can never be matched by a single input symbol.
        let mut builder = NfaBuilder::new();
        let s0 = builder.add_state();
        let s1 = builder.add_state();
        builder.set_start(s0, true);
        builder.set_accept(s1, true);
        builder.add_transition(s0, "ab", s1);
        let multi_symbol = builder.finish();

        assert_eq!(
            check_equivalence(&multi_symbol, &nfa_of("ab"), DEFAULT_STATE_LIMIT, &mut timing),
            Err(AnalysisError::Invalid(
                Side::Left,
                AutomatonError::Invalid(vec![Diagnostic::MultiSymbolLabel { transition: 0 }])
            ))
        );
    }

    #[test]
    fn test_random_equivalence() {
        random_test(100, |rng| {
            let left = thompson(&random_regex(rng, 3, 2)).unwrap();
            let right = thompson(&random_regex(rng, 3, 2)).unwrap();
            let mut timing = Timing::new();

            // Reflexive and symmetric.
            assert!(
                check_equivalence(&left, &left, DEFAULT_STATE_LIMIT, &mut timing)
                    .unwrap()
                    .is_equivalent()
            );

            let result = check_equivalence(&left, &right, DEFAULT_STATE_LIMIT, &mut timing).unwrap();
            let reversed = check_equivalence(&right, &left, DEFAULT_STATE_LIMIT, &mut timing).unwrap();
            assert_eq!(result.is_equivalent(), reversed.is_equivalent());

            // The counter example is accepted by exactly the reported automaton.
            if let Some(counter_example) = result.counter_example() {
                let word = counter_example.word.concat();
                assert_eq!(
                    simulate(&left, word.chars()).unwrap().accepted(),
                    counter_example.accepted_by_left
                );
                assert_eq!(
                    simulate(&right, word.chars()).unwrap().accepted(),
                    counter_example.accepted_by_right
                );
                assert_ne!(counter_example.accepted_by_left, counter_example.accepted_by_right);
            }
        });
    }
}
