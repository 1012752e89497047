#![doc = include_str!("../README.md")]
//!
//! This crate does not use unsafe code.

#![forbid(unsafe_code)]

mod dfa;
mod epsilon_closure;
mod error;
mod nfa;
mod nfa_builder;
mod random_nfa;
mod simulate;
mod thompson;
mod validate;

pub use dfa::*;
pub use epsilon_closure::*;
pub use error::*;
pub use nfa::*;
pub use nfa_builder::*;
pub use random_nfa::*;
pub use simulate::*;
pub use thompson::*;
pub use validate::*;
