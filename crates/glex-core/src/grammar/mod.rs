//! Grammar: named states plus the root state name.
//!
//! Two interchange formats:
//! - JSON, for authoring and for the bundled grammars
//! - postcard binary, the compact form handed to external engines

mod binary;
mod error;
mod json;
mod types;


pub use error::GrammarError;
pub use types::Grammar;
