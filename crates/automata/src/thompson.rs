use log::debug;

use fsm_syntax::EPSILON_CHAR;
use fsm_syntax::RegexExpr;
use fsm_syntax::RegexNode;

use crate::ConstructionError;
use crate::Nfa;
use crate::NfaBuilder;
use crate::StateIndex;

/// A partially constructed automaton with a single entry and exit state.
#[derive(Clone, Copy)]
struct Fragment {
    entry: StateIndex,
    exit: StateIndex,
}

/// Translates the regular expression into a nondeterministic automaton using
/// Thompson's construction.
///
/// The entry state of the expression is the only start state, and its exit
/// state the only accepting state. Fails on nodes that have no meaning, such
/// as an empty character class, without returning a partial automaton.
pub fn thompson(regex: &RegexNode) -> Result<Nfa, ConstructionError> {
    let mut builder = NfaBuilder::new();

    let fragment = build_fragment(&mut builder, regex)?;
    builder.set_start(fragment.entry, true);
    builder.set_accept(fragment.exit, true);

    debug!(
        "Thompson's construction of {regex} has {} states and {} transitions",
        builder.num_of_states(),
        builder.num_of_transitions()
    );
    Ok(builder.finish())
}

/// Adds the states and transitions for the given node, and returns its entry and exit.
fn build_fragment(builder: &mut NfaBuilder, node: &RegexNode) -> Result<Fragment, ConstructionError> {
    match &node.expr {
        RegexExpr::Epsilon => {
            let fragment = new_fragment(builder);
            builder.add_epsilon_transition(fragment.entry, fragment.exit);
            Ok(fragment)
        }
        RegexExpr::Symbol(symbol) => {
            check_symbol(*symbol, node)?;

            let fragment = new_fragment(builder);
            builder.add_transition(fragment.entry, &symbol.to_string(), fragment.exit);
            Ok(fragment)
        }
        RegexExpr::Class(symbols) => {
            if symbols.is_empty() {
                return Err(ConstructionError {
                    message: "Empty character class".to_string(),
                    position: node.span.start,
                });
            }

            for symbol in symbols {
                check_symbol(*symbol, node)?;
            }

            let fragment = new_fragment(builder);
            for symbol in symbols {
                builder.add_transition(fragment.entry, &symbol.to_string(), fragment.exit);
            }
            Ok(fragment)
        }
        RegexExpr::Concat(lhs, rhs) => {
            let lhs = build_fragment(builder, lhs)?;
            let rhs = build_fragment(builder, rhs)?;
            builder.add_epsilon_transition(lhs.exit, rhs.entry);

            Ok(Fragment {
                entry: lhs.entry,
                exit: rhs.exit,
            })
        }
        RegexExpr::Alternation(lhs, rhs) => {
            let fragment = new_fragment(builder);
            let lhs = build_fragment(builder, lhs)?;
            let rhs = build_fragment(builder, rhs)?;

            builder.add_epsilon_transition(fragment.entry, lhs.entry);
            builder.add_epsilon_transition(fragment.entry, rhs.entry);
            builder.add_epsilon_transition(lhs.exit, fragment.exit);
            builder.add_epsilon_transition(rhs.exit, fragment.exit);
            Ok(fragment)
        }
        RegexExpr::Star(inner) => {
            let fragment = new_fragment(builder);
            let inner = build_fragment(builder, inner)?;

            builder.add_epsilon_transition(fragment.entry, inner.entry);
            builder.add_epsilon_transition(fragment.entry, fragment.exit);
            builder.add_epsilon_transition(inner.exit, inner.entry);
            builder.add_epsilon_transition(inner.exit, fragment.exit);
            Ok(fragment)
        }
        RegexExpr::Plus(inner) => {
            let fragment = new_fragment(builder);
            let inner = build_fragment(builder, inner)?;

            // Same as the star, but without the edge that skips the inner expression.
            builder.add_epsilon_transition(fragment.entry, inner.entry);
            builder.add_epsilon_transition(inner.exit, inner.entry);
            builder.add_epsilon_transition(inner.exit, fragment.exit);
            Ok(fragment)
        }
        RegexExpr::Optional(inner) => {
            let fragment = new_fragment(builder);
            let inner = build_fragment(builder, inner)?;

            builder.add_epsilon_transition(fragment.entry, inner.entry);
            builder.add_epsilon_transition(fragment.entry, fragment.exit);
            builder.add_epsilon_transition(inner.exit, fragment.exit);
            Ok(fragment)
        }
    }
}

/// Allocates a fresh entry and exit state.
fn new_fragment(builder: &mut NfaBuilder) -> Fragment {
    Fragment {
        entry: builder.add_state(),
        exit: builder.add_state(),
    }
}

/// The epsilon character is reserved and can not label a transition.
fn check_symbol(symbol: char, node: &RegexNode) -> Result<(), ConstructionError> {
    if symbol == EPSILON_CHAR {
        return Err(ConstructionError {
            message: format!("The symbol {EPSILON_CHAR} is reserved for the empty word"),
            position: node.span.start,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::VecDeque;

    use log::trace;
    use test_case::test_case;
    use test_log::test;

    use fsm_syntax::Span;
    use fsm_syntax::parse_regex;
    use fsm_syntax::random_regex;
    use fsm_utilities::random_test;

    use crate::simulate;
    use crate::validate;

    /// Returns the states reachable from the given state over any transition.
    fn reachable(nfa: &Nfa, from: StateIndex) -> Vec<bool> {
        let mut visited = vec![false; nfa.num_of_states()];
        let mut queue = VecDeque::from([from]);
        visited[*from] = true;

        while let Some(state_index) = queue.pop_front() {
            for transition in nfa.outgoing_transitions(state_index) {
                if !visited[*transition.to] {
                    visited[*transition.to] = true;
                    queue.push_back(transition.to);
                }
            }
        }

        visited
    }

    fn accepts(nfa: &Nfa, word: &str) -> bool {
        simulate(nfa, word.chars()).unwrap().accepted()
    }

    #[test]
    fn test_thompson_scenario() {
        let nfa = thompson(&parse_regex("a(b|c)*").unwrap()).unwrap();

        assert!(accepts(&nfa, "a"));
        assert!(accepts(&nfa, "abcbc"));
        assert!(!accepts(&nfa, "b"));
        assert!(!accepts(&nfa, ""));
    }

    #[test_case("a+", &["a", "aaa"], &["", "b"] ; "plus")]
    #[test_case("a?b", &["b", "ab"], &["", "aab"] ; "optional")]
    #[test_case("[a-c]d", &["ad", "cd"], &["d", "dd"] ; "class")]
    #[test_case("ε", &[""], &["a"] ; "epsilon")]
    #[test_case("(ab)*", &["", "ab", "abab"], &["a", "aba"] ; "star")]
    fn test_thompson_operators(text: &str, accepted: &[&str], rejected: &[&str]) {
        let nfa = thompson(&parse_regex(text).unwrap()).unwrap();
        for word in accepted {
            assert!(accepts(&nfa, word), "{text} should accept {word:?}");
        }
        for word in rejected {
            assert!(!accepts(&nfa, word), "{text} should reject {word:?}");
        }
    }

    #[test]
    fn test_thompson_fragment_sizes() {
        // Every node introduces exactly two states, concatenation introduces none.
        let nfa = thompson(&parse_regex("a|b").unwrap()).unwrap();
        assert_eq!(nfa.num_of_states(), 6);
        assert_eq!(nfa.num_of_transitions(), 6);

        let nfa = thompson(&parse_regex("ab").unwrap()).unwrap();
        assert_eq!(nfa.num_of_states(), 4);
        assert_eq!(nfa.num_of_transitions(), 3);
    }

    #[test]
    fn test_thompson_empty_class() {
        let regex = RegexNode::concat(
            RegexNode::symbol('a'),
            RegexNode::new(RegexExpr::Class(Vec::new()), Span::new(1, 3)),
        );

        let error = thompson(&regex).unwrap_err();
        assert_eq!(error.position, 1);
        assert!(error.to_string().contains("Empty character class"));
    }

    #[test]
    fn test_thompson_reserved_symbol() {
        let regex = RegexNode::new(RegexExpr::Symbol(EPSILON_CHAR), Span::new(4, 5));
        assert_eq!(thompson(&regex).unwrap_err().position, 4);
    }

    #[test]
    fn test_random_thompson_structure() {
        random_test(100, |rng| {
            let regex = random_regex(rng, 4, 3);
            trace!("{regex}");
            let nfa = thompson(&regex).unwrap();

            let start: Vec<StateIndex> = nfa.start_states().collect();
            let accept: Vec<StateIndex> = nfa.iter_states().filter(|s| nfa.is_accepting(*s)).collect();
            assert_eq!(start.len(), 1, "{regex} must have exactly one start state");
            assert_eq!(accept.len(), 1, "{regex} must have exactly one accepting state");

            // The exit is reachable from the entry, and the other way around.
            assert!(reachable(&nfa, start[0])[*accept[0]]);
            assert_ne!(start[0], accept[0]);
            assert_eq!(nfa.num_of_states(), 2 * (regex.size() - count_concatenations(&regex)));

            // All states are reachable and there are no blocking diagnostics.
            assert!(validate(&nfa).is_empty(), "{:?}", validate(&nfa));
        });
    }

    fn count_concatenations(regex: &RegexNode) -> usize {
        match &regex.expr {
            RegexExpr::Epsilon | RegexExpr::Symbol(_) | RegexExpr::Class(_) => 0,
            RegexExpr::Concat(lhs, rhs) => 1 + count_concatenations(lhs) + count_concatenations(rhs),
            RegexExpr::Alternation(lhs, rhs) => count_concatenations(lhs) + count_concatenations(rhs),
            RegexExpr::Star(inner) | RegexExpr::Plus(inner) | RegexExpr::Optional(inner) => {
                count_concatenations(inner)
            }
        }
    }
}
