//! Instruction decoding.
//!
//! [`decode`] reads the instruction at a given IP without touching machine
//! state, so the run driver can look ahead at the next instruction before
//! deciding whether to execute it.

use crate::machine::errors::VMError;
use crate::machine::isa::{Instruction, MAX_OPERANDS};
use crate::machine::memory::Memory;
use crate::machine::operand::{Mode, Operand};

/// A fully decoded instruction.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Decoded {
    pub instruction: Instruction,
    /// Address of the instruction word.
    pub ip: usize,
    operands: [Operand; MAX_OPERANDS],
}

impl Decoded {
    /// Operands in order; the slice length is the instruction's operand count.
    pub fn operands(&self) -> &[Operand] {
        &self.operands[..self.instruction.operand_count()]
    }

    pub fn operand(&self, index: usize) -> Operand {
        self.operands[index]
    }

    /// Address of the following instruction when no jump is taken.
    pub fn next_ip(&self) -> usize {
        self.ip + 1 + self.instruction.operand_count()
    }
}

/// Decodes the instruction whose word is at `ip`.
///
/// Fails with [`VMError::UnknownOpcode`] for negative words or opcodes outside
/// the table, [`VMError::InvalidMode`] for a mode digit other than 0, 1, 2,
/// and [`VMError::OutOfBoundsAddress`] if the instruction runs past the end of
/// memory. Mode digits beyond the operand count are ignored.
pub fn decode(memory: &Memory, ip: usize) -> Result<Decoded, VMError> {
    let word = memory.fetch(ip)?;
    if word < 0 {
        return Err(VMError::UnknownOpcode { opcode: word, ip });
    }

    let opcode = word % 100;
    let instruction = Instruction::try_from(opcode)
        .map_err(|_| VMError::UnknownOpcode { opcode, ip })?;

    let mut operands = [Operand::default(); MAX_OPERANDS];
    let mut modes = word / 100;
    for (index, slot) in operands
        .iter_mut()
        .take(instruction.operand_count())
        .enumerate()
    {
        let digit = modes % 10;
        modes /= 10;
        let mode = Mode::try_from(digit).map_err(|_| VMError::InvalidMode {
            mode: digit,
            operand: index,
            ip,
        })?;
        *slot = Operand::new(mode, memory.fetch(ip + 1 + index)?);
    }

    Ok(Decoded {
        instruction,
        ip,
        operands,
    })
}
