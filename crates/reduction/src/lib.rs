#![doc = include_str!("../README.md")]

mod counter_example;
mod equivalence;
mod error;
mod minimize;
mod subset_construction;

pub use counter_example::*;
pub use equivalence::*;
pub use error::*;
pub use minimize::*;
pub use subset_construction::*;

#[cfg(test)]
mod test_utility;
