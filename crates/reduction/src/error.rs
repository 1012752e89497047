use std::fmt;

use thiserror::Error;

use fsm_automata::AutomatonError;

/// Identifies one of the two automata that are compared.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "first"),
            Side::Right => write!(f, "second"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("The {0} automaton has no start state")]
    MissingStartState(Side),

    #[error("The {0} automaton can not be analysed")]
    Invalid(Side, #[source] AutomatonError),

    #[error("Equivalence can not be determined for an automaton without states")]
    EmptyAutomaton,
}
