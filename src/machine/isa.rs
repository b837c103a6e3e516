//! Instruction Set Architecture (ISA) definitions.
//!
//! The [`for_each_instruction!`](crate::for_each_instruction) macro holds the
//! canonical opcode table and invokes a callback macro for code generation, so
//! the table is written once and consumed by several modules.
//!
//! This module generates:
//! - The [`Instruction`] enum whose discriminants are the opcodes
//! - `TryFrom<i64>` for decoding opcodes
//! - Per-instruction mnemonic, operand count and operand access kinds
//!
//! # Instruction word
//!
//! An instruction word is `modes * 100 + opcode`. The decimal digits of
//! `modes`, read from the least significant end, give the addressing mode of
//! operand 0, 1, 2 in turn (see [`Mode`](super::operand::Mode)). Missing digits
//! are position mode. Operand words follow the instruction word directly.

use crate::machine::errors::VMError;
use std::fmt::{Display, Formatter};

/// Largest operand count of any instruction.
pub const MAX_OPERANDS: usize = 3;

/// How an instruction uses one of its operands.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Access {
    /// The operand's value is read.
    Read,
    /// The operand names the cell the result is written to.
    Write,
}

/// Invokes a callback macro with the complete instruction definition list.
#[macro_export]
macro_rules! for_each_instruction {
    ($callback:ident) => {
        $callback! {
            /// ADD a, b, dst ; dst = a + b
            Add = 1, "ADD" => [a: Read, b: Read, dst: Write],
            /// MUL a, b, dst ; dst = a * b
            Mul = 2, "MUL" => [a: Read, b: Read, dst: Write],
            /// IN dst ; dst = pop front of the input channel
            Input = 3, "IN" => [dst: Write],
            /// OUT src ; push src onto the output channel
            Output = 4, "OUT" => [src: Read],
            /// JT cond, target ; if cond != 0 then IP = target
            JumpIfTrue = 5, "JT" => [cond: Read, target: Read],
            /// JF cond, target ; if cond == 0 then IP = target
            JumpIfFalse = 6, "JF" => [cond: Read, target: Read],
            /// LT a, b, dst ; dst = (a < b) as 1 or 0
            LessThan = 7, "LT" => [a: Read, b: Read, dst: Write],
            /// EQ a, b, dst ; dst = (a == b) as 1 or 0
            Equals = 8, "EQ" => [a: Read, b: Read, dst: Write],
            /// ARB offset ; RB += offset
            AdjustBase = 9, "ARB" => [offset: Read],
            /// HALT ; stop the machine
            Halt = 99, "HALT" => [],
        }
    };
}

#[macro_export]
macro_rules! define_instructions {
    (
        $(
            $(#[$doc:meta])*
            $name:ident = $opcode:literal, $mnemonic:literal => [
                $( $field:ident : $access:ident ),* $(,)?
            ]
        ),* $(,)?
    ) => {
        #[repr(u8)]
        #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
        pub enum Instruction {
            $(
                $(#[$doc])*
                $name = $opcode,
            )*
        }

        impl TryFrom<i64> for Instruction {
            type Error = VMError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                match value {
                    $( $opcode => Ok(Instruction::$name), )*
                    _ => Err(VMError::UnknownOpcode {
                        opcode: value,
                        ip: 0,
                    }),
                }
            }
        }

        impl Instruction {
            /// Every instruction in table order.
            pub const ALL: &'static [Instruction] = &[ $( Instruction::$name ),* ];

            /// Returns the numeric opcode.
            pub const fn opcode(&self) -> i64 {
                *self as i64
            }

            /// Returns the assembly mnemonic for this instruction.
            pub const fn mnemonic(&self) -> &'static str {
                match self {
                    $( Instruction::$name => $mnemonic, )*
                }
            }

            /// Returns how each operand is used, in operand order.
            pub const fn operand_access(&self) -> &'static [Access] {
                match self {
                    $( Instruction::$name => &[ $( Access::$access ),* ], )*
                }
            }

            /// Returns the operand names used in the instruction documentation.
            pub const fn operand_names(&self) -> &'static [&'static str] {
                match self {
                    $( Instruction::$name => &[ $( stringify!($field) ),* ], )*
                }
            }

            /// Returns the number of operand words following the instruction word.
            pub const fn operand_count(&self) -> usize {
                self.operand_access().len()
            }
        }
    };
}

for_each_instruction!(define_instructions);

impl Display for Instruction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mnemonic())
    }
}
