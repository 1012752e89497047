//! Utility types and functions shared by the automaton analysis crates.
//!
//! Forbid unsafe code in this crate.
#![forbid(unsafe_code)]

mod error;
mod tagged_index;
mod timing;

pub use error::*;
pub use random_test::*;
pub use tagged_index::*;
pub use timing::*;
