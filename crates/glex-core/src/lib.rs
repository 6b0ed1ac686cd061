#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for glex grammars.
//!
//! A grammar is a graph of typed nodes rather than BNF text:
//! - **Authoring layer** (`TreeNode`, `NodeVariant`): nested tree per named state,
//!   with states referring to each other by name
//! - **Serialization layer** (`grammar`): JSON for authoring, postcard for the
//!   compact form handed to other engines
//!
//! The evaluator in `glex-vm` lowers a `Grammar` into an arena before matching.

mod colors;
mod interner;
mod node;
mod tag;

pub mod grammar;
pub mod utf16;

#[cfg(test)]
mod tag_tests;
#[cfg(test)]
mod utf16_tests;

pub use colors::Colors;
pub use grammar::{Grammar, GrammarError};
pub use interner::{Interner, Symbol};
pub use node::{NodeVariant, Repetition, TreeNode, escape_text};
pub use tag::{Tag, TagPrinter};
