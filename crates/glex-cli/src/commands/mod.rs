pub mod check;
pub mod dump;
pub mod eval;
pub mod langs;
pub mod loader;
pub mod report;
pub mod trace;

#[cfg(test)]
mod dump_tests;
#[cfg(test)]
mod eval_tests;
