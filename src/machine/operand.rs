use crate::machine::errors::VMError;
use crate::machine::memory::Memory;

/// Addressing mode of a single operand.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Mode {
    /// The parameter is an address; the operand is the cell it names.
    #[default]
    Position,
    /// The parameter is the operand.
    Immediate,
    /// The parameter is an offset from the relative base.
    Relative,
}

impl TryFrom<i64> for Mode {
    type Error = VMError;

    fn try_from(digit: i64) -> Result<Self, Self::Error> {
        match digit {
            0 => Ok(Mode::Position),
            1 => Ok(Mode::Immediate),
            2 => Ok(Mode::Relative),
            _ => Err(VMError::InvalidMode {
                mode: digit,
                operand: 0,
                ip: 0,
            }),
        }
    }
}

/// A parameter word together with the mode it is interpreted in.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Operand {
    pub mode: Mode,
    /// Raw parameter word as stored in memory.
    pub raw: i64,
}

impl Operand {
    pub const fn new(mode: Mode, raw: i64) -> Self {
        Self { mode, raw }
    }

    /// Returns the effective address, or `None` in immediate mode.
    ///
    /// Relative addresses saturate, so an overflowing `relative_base + raw`
    /// still resolves to an out-of-bounds address.
    pub const fn address(&self, relative_base: i64) -> Option<i64> {
        match self.mode {
            Mode::Position => Some(self.raw),
            Mode::Immediate => None,
            Mode::Relative => Some(relative_base.saturating_add(self.raw)),
        }
    }

    /// Returns the operand's value for read use.
    pub fn value(&self, memory: &Memory, relative_base: i64) -> Result<i64, VMError> {
        match self.mode {
            Mode::Position => memory.read(self.raw),
            Mode::Immediate => Ok(self.raw),
            Mode::Relative => memory.read(relative_base.saturating_add(self.raw)),
        }
    }

    /// Resolves the memory index a destination operand writes to.
    ///
    /// `ip` and `operand` only identify the instruction in the error raised for
    /// an immediate-mode destination.
    pub fn target(
        &self,
        memory: &Memory,
        relative_base: i64,
        ip: usize,
        operand: usize,
    ) -> Result<usize, VMError> {
        match self.address(relative_base) {
            Some(address) => memory.resolve(address),
            None => Err(VMError::InvalidWriteMode { ip, operand }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory() -> Memory {
        Memory::new(vec![10, 20, 30, 40, 50], 0)
    }

    #[test]
    fn mode_try_from_valid() {
        assert_eq!(Mode::try_from(0i64), Ok(Mode::Position));
        assert_eq!(Mode::try_from(1i64), Ok(Mode::Immediate));
        assert_eq!(Mode::try_from(2i64), Ok(Mode::Relative));
    }

    #[test]
    fn mode_try_from_invalid() {
        for digit in 3i64..=9 {
            assert!(matches!(
                Mode::try_from(digit),
                Err(VMError::InvalidMode { mode, .. }) if mode == digit
            ));
        }
    }

    #[test]
    fn position_reads_named_cell() {
        let op = Operand::new(Mode::Position, 3);
        assert_eq!(op.value(&memory(), 100), Ok(40));
        assert_eq!(op.address(100), Some(3));
    }

    #[test]
    fn immediate_reads_raw_word() {
        let op = Operand::new(Mode::Immediate, -7);
        assert_eq!(op.value(&memory(), 0), Ok(-7));
        assert_eq!(op.address(0), None);
    }

    #[test]
    fn relative_offsets_from_base() {
        let op = Operand::new(Mode::Relative, -1);
        assert_eq!(op.value(&memory(), 3), Ok(30));
        assert_eq!(op.target(&memory(), 3, 0, 2), Ok(2));
    }

    #[test]
    fn relative_matches_position_at_same_address() {
        let mem = memory();
        for base in -5i64..10 {
            for offset in -5i64..10 {
                let absolute = base + offset;
                let rel = Operand::new(Mode::Relative, offset);
                let pos = Operand::new(Mode::Position, absolute);
                assert_eq!(rel.value(&mem, base), pos.value(&mem, 0));
                assert_eq!(rel.target(&mem, base, 0, 0), pos.target(&mem, 0, 0, 0));
            }
        }
    }

    #[test]
    fn immediate_target_rejected() {
        let op = Operand::new(Mode::Immediate, 1);
        assert_eq!(
            op.target(&memory(), 0, 4, 2),
            Err(VMError::InvalidWriteMode { ip: 4, operand: 2 })
        );
    }

    #[test]
    fn out_of_bounds_reads_fail() {
        let mem = memory();
        assert_eq!(
            Operand::new(Mode::Position, 5).value(&mem, 0),
            Err(VMError::OutOfBoundsAddress { address: 5, len: 5 })
        );
        assert_eq!(
            Operand::new(Mode::Relative, -1).value(&mem, 0),
            Err(VMError::OutOfBoundsAddress {
                address: -1,
                len: 5
            })
        );
    }

    #[test]
    fn relative_overflow_saturates() {
        let op = Operand::new(Mode::Relative, i64::MAX);
        assert_eq!(op.address(10), Some(i64::MAX));
        assert!(matches!(
            op.value(&memory(), 10),
            Err(VMError::OutOfBoundsAddress { .. })
        ));
    }
}
