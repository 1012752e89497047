//! This crate provides the syntax of regular expressions.
//!
//! This crate contains no unsafe code.
#![forbid(unsafe_code)]

mod parse;
mod random_regex;
mod syntax_tree;
mod syntax_tree_display;

pub use parse::*;
pub use random_regex::*;
pub use syntax_tree::*;
