use itertools::Itertools;
use thiserror::Error;

use crate::Diagnostic;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AutomatonError {
    #[error("The automaton is invalid: {}", format_diagnostics(.0))]
    Invalid(Vec<Diagnostic>),
}

/// The regular expression could not be translated into an automaton.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} at position {position}")]
pub struct ConstructionError {
    pub message: String,
    /// Byte offset into the text of the regular expression.
    pub position: usize,
}

fn format_diagnostics(diagnostics: &[Diagnostic]) -> String {
    diagnostics.iter().format("; ").to_string()
}
