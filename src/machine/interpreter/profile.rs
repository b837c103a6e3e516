use crate::machine::isa::Instruction;

/// One counter slot per possible opcode value (`word % 100`).
const OPCODE_SLOTS: usize = 100;

/// Count of executed instructions per opcode.
///
/// Backed by a flat array indexed by opcode so recording is a single add on
/// the hot path.
#[derive(Clone, Debug)]
pub struct ExecProfile {
    counts: [u64; OPCODE_SLOTS],
}

impl Default for ExecProfile {
    fn default() -> Self {
        Self {
            counts: [0; OPCODE_SLOTS],
        }
    }
}

impl ExecProfile {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub(super) fn record(&mut self, instruction: Instruction) {
        let slot = &mut self.counts[instruction as usize];
        *slot = slot.saturating_add(1);
    }

    /// Returns how many times `instruction` executed.
    pub fn count(&self, instruction: Instruction) -> u64 {
        self.counts[instruction as usize]
    }

    /// Returns the number of executed instructions.
    pub fn total(&self) -> u64 {
        self.counts
            .iter()
            .fold(0u64, |acc, &v| acc.saturating_add(v))
    }

    /// Iterates over every instruction with its count, in table order.
    pub fn iter(&self) -> impl Iterator<Item = (Instruction, u64)> + '_ {
        Instruction::ALL
            .iter()
            .map(move |&instr| (instr, self.count(instr)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let profile = ExecProfile::new();
        assert_eq!(profile.total(), 0);
        assert!(profile.iter().all(|(_, n)| n == 0));
    }

    #[test]
    fn records_per_instruction() {
        let mut profile = ExecProfile::new();
        profile.record(Instruction::Add);
        profile.record(Instruction::Add);
        profile.record(Instruction::Halt);
        assert_eq!(profile.count(Instruction::Add), 2);
        assert_eq!(profile.count(Instruction::Halt), 1);
        assert_eq!(profile.count(Instruction::Mul), 0);
        assert_eq!(profile.total(), 3);
        assert_eq!(profile.iter().count(), Instruction::ALL.len());
    }
}
