//! Memory-addressed Intcode virtual machine.
//!
//! Programs are flat sequences of integers. The machine has no general
//! registers: every operand is either an immediate value or a memory cell,
//! addressed absolutely or relative to the relative base.
//!
//! # Architecture
//!
//! - **Memory**: fixed-length `i64` cells, the program followed by zero padding
//! - **Registers**: instruction pointer and relative base only
//! - **Addressing modes**: position, immediate, relative
//! - **I/O**: caller-owned channels borrowed per call; an input instruction
//!   with nothing to read suspends the run driver instead of blocking
//! - **Budget**: optional step limit bounding runaway programs
//!
//! # Modules
//!
//! - [`channel`]: Input/output channel traits
//! - [`decode`]: Side-effect-free instruction decoding
//! - [`errors`]: Load and execution error types
//! - [`interpreter`]: The machine, its step function and run driver
//! - [`isa`]: Instruction set definition and opcode table
//! - [`memory`]: Bounds-checked fixed-length memory
//! - [`operand`]: Addressing modes and operand resolution
//! - [`program`]: Program text parsing

pub mod channel;
pub mod decode;
pub mod errors;
pub mod interpreter;
pub mod isa;
#[cfg(test)]
mod isa_static_check;
pub mod memory;
pub mod operand;
pub mod program;
