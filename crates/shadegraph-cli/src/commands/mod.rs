pub mod check;
pub mod compile;
pub mod dump;
pub mod export;
pub mod graph_loader;
pub mod run_common;

#[cfg(test)]
mod compile_tests;
