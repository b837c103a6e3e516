//! Intcode interpreter library.
//!
//! Provides a single-machine Intcode virtual machine with cooperative input
//! suspension, plus the logging utilities it reports through.

pub mod machine;
pub mod utils;
