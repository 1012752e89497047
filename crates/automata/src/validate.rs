use std::collections::VecDeque;
use std::fmt;

use bitvec::bitvec;
use bitvec::order::Lsb0;
use log::debug;
use log::warn;

use crate::AutomatonError;
use crate::Nfa;
use crate::StateIndex;

/// Whether a diagnostic prevents algorithms from running on the automaton.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Blocking,
    Warning,
}

/// A structural problem found by [`validate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    /// No state is marked as start state.
    NoStartState,
    /// The transition with the given index refers to a state that does not exist.
    InvalidStateReference { transition: usize, state: StateIndex },
    /// The transition with the given index has an empty, non epsilon, label.
    EmptyLabel { transition: usize },
    /// The label of the transition with the given index consists of more than
    /// one character, so no input symbol can ever match it.
    MultiSymbolLabel { transition: usize },
    /// The state can not be reached from any start state.
    UnreachableState { state: StateIndex },
    /// No state is marked as accepting, so the language is empty.
    NoAcceptState,
}

impl Diagnostic {
    /// Returns the severity of this diagnostic.
    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::NoStartState
            | Diagnostic::InvalidStateReference { .. }
            | Diagnostic::EmptyLabel { .. }
            | Diagnostic::MultiSymbolLabel { .. } => Severity::Blocking,
            Diagnostic::UnreachableState { .. } | Diagnostic::NoAcceptState => Severity::Warning,
        }
    }

    /// Returns true iff this diagnostic is blocking.
    pub fn is_blocking(&self) -> bool {
        self.severity() == Severity::Blocking
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::NoStartState => write!(f, "there is no start state"),
            Diagnostic::InvalidStateReference { transition, state } => {
                write!(f, "transition {transition} refers to state {state} which does not exist")
            }
            Diagnostic::EmptyLabel { transition } => write!(f, "transition {transition} has an empty label"),
            Diagnostic::MultiSymbolLabel { transition } => {
                write!(f, "transition {transition} has a label of more than one symbol")
            }
            Diagnostic::UnreachableState { state } => {
                write!(f, "state {state} is not reachable from a start state")
            }
            Diagnostic::NoAcceptState => write!(f, "there is no accepting state"),
        }
    }
}

/// Checks the structure of the given automaton and returns all problems found.
///
/// Blocking diagnostics come first, in the order of the transitions. The
/// reachability of states is only reported when there is a start state, and
/// considers transitions with any label.
pub fn validate(nfa: &Nfa) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    let has_start = nfa.start_states().next().is_some();
    if !has_start {
        diagnostics.push(Diagnostic::NoStartState);
    }

    for (index, transition) in nfa.transitions().iter().enumerate() {
        for state in [transition.from, transition.to] {
            if *state >= nfa.num_of_states() {
                diagnostics.push(Diagnostic::InvalidStateReference {
                    transition: index,
                    state,
                });
            }
        }

        if !nfa.is_epsilon(transition.label) {
            let mut symbols = nfa.label(transition.label).chars();
            match (symbols.next(), symbols.next()) {
                (None, _) => diagnostics.push(Diagnostic::EmptyLabel { transition: index }),
                (Some(_), Some(_)) => diagnostics.push(Diagnostic::MultiSymbolLabel { transition: index }),
                (Some(_), None) => {}
            }
        }
    }

    if has_start {
        // Breadth first search from all start states.
        let mut visited = bitvec![usize, Lsb0; 0; nfa.num_of_states()];
        let mut queue: VecDeque<StateIndex> = nfa.start_states().collect();
        for state_index in &queue {
            visited.set(**state_index, true);
        }

        while let Some(state_index) = queue.pop_front() {
            for transition in nfa.outgoing_transitions(state_index) {
                if !visited[*transition.to] {
                    visited.set(*transition.to, true);
                    queue.push_back(transition.to);
                }
            }
        }

        diagnostics.extend(
            visited
                .iter_zeros()
                .map(|state| Diagnostic::UnreachableState {
                    state: StateIndex::new(state),
                }),
        );
    }

    if nfa.states().iter().all(|state| !state.is_accept) {
        diagnostics.push(Diagnostic::NoAcceptState);
    }

    debug!("Validation found {} diagnostics", diagnostics.len());
    diagnostics
}

/// Validates the automaton and returns an error listing the blocking
/// diagnostics, if any. Warnings are logged and otherwise ignored.
pub fn ensure_valid(nfa: &Nfa) -> Result<(), AutomatonError> {
    let (blocking, warnings): (Vec<Diagnostic>, Vec<Diagnostic>) =
        validate(nfa).into_iter().partition(Diagnostic::is_blocking);

    for warning in &warnings {
        warn!("{warning}");
    }

    if blocking.is_empty() {
        Ok(())
    } else {
        Err(AutomatonError::Invalid(blocking))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    use crate::EPSILON;
    use crate::NfaBuilder;

    #[test]
    fn test_validate_no_start_state() {
        let mut builder = NfaBuilder::new();
        let s0 = builder.add_state();
        builder.set_accept(s0, true);
        let nfa = builder.finish();

        assert_eq!(validate(&nfa), vec![Diagnostic::NoStartState]);
        assert_eq!(
            ensure_valid(&nfa),
            Err(AutomatonError::Invalid(vec![Diagnostic::NoStartState]))
        );
    }

    #[test]
    fn test_validate_blocking_transitions() {
        let mut builder = NfaBuilder::new();
        let s0 = builder.add_state();
        let s1 = builder.add_state();
        builder.set_start(s0, true);
        builder.set_accept(s1, true);
        builder.add_transition(s0, "a", s1);
        builder.add_transition(s0, "", s1);
        builder.add_transition(s1, EPSILON, StateIndex::new(5));
        let nfa = builder.finish();

        let diagnostics = validate(&nfa);
        assert_eq!(
            diagnostics,
            vec![
                Diagnostic::EmptyLabel { transition: 1 },
                Diagnostic::InvalidStateReference {
                    transition: 2,
                    state: StateIndex::new(5)
                },
            ]
        );
        assert!(diagnostics.iter().all(Diagnostic::is_blocking));
        assert!(ensure_valid(&nfa).is_err());
    }

    #[test]
    fn test_validate_multi_symbol_label() {
        let mut builder = NfaBuilder::new();
        let s0 = builder.add_state();
        let s1 = builder.add_state();
        builder.set_start(s0, true);
        builder.set_accept(s1, true);
        builder.add_transition(s0, "ab", s1);
        builder.add_transition(s0, "ε", s1);
        builder.add_transition(s0, "é", s1);
        let nfa = builder.finish();

        assert_eq!(validate(&nfa), vec![Diagnostic::MultiSymbolLabel { transition: 0 }]);
        assert!(validate(&nfa)[0].is_blocking());
        assert_eq!(
            ensure_valid(&nfa),
            Err(AutomatonError::Invalid(vec![Diagnostic::MultiSymbolLabel { transition: 0 }]))
        );
    }

    #[test]
    fn test_validate_unreachable_is_warning() {
        let mut builder = NfaBuilder::new();
        let s0 = builder.add_state();
        let s1 = builder.add_state();
        let s2 = builder.add_state();
        builder.set_start(s0, true);
        builder.set_accept(s1, true);
        builder.add_epsilon_transition(s0, s1);
        builder.add_transition(s2, "a", s0);
        let nfa = builder.finish();

        let diagnostics = validate(&nfa);
        assert_eq!(diagnostics, vec![Diagnostic::UnreachableState { state: s2 }]);
        assert_eq!(diagnostics[0].severity(), Severity::Warning);
        assert_eq!(ensure_valid(&nfa), Ok(()));
    }

    #[test]
    fn test_validate_does_not_modify() {
        let mut builder = NfaBuilder::new();
        let s0 = builder.add_state();
        builder.add_transition(s0, "", StateIndex::new(3));
        let nfa = builder.finish();
        let copy = nfa.clone();

        let diagnostics = validate(&nfa);
        assert_eq!(diagnostics.len(), 4);
        assert!(diagnostics.contains(&Diagnostic::NoAcceptState));
        assert_eq!(nfa, copy);
    }
}
