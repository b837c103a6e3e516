use crate::machine::errors::VMError;

/// Fixed-length machine memory.
///
/// Holds the program words followed by zero padding. The length is fixed at
/// construction; every access is bounds-checked against it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Memory {
    cells: Vec<i64>,
}

impl Memory {
    /// Creates memory holding `program` followed by `extra` zero cells.
    pub fn new(program: Vec<i64>, extra: usize) -> Self {
        let mut cells = program;
        cells.resize(cells.len() + extra, 0);
        Self { cells }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn as_slice(&self) -> &[i64] {
        &self.cells
    }

    fn out_of_bounds(&self, address: i64) -> VMError {
        VMError::OutOfBoundsAddress {
            address,
            len: self.cells.len(),
        }
    }

    /// Maps a program-level address to a cell index.
    ///
    /// Returns [`VMError::OutOfBoundsAddress`] if `address` is negative or not
    /// below the memory length.
    pub fn resolve(&self, address: i64) -> Result<usize, VMError> {
        usize::try_from(address)
            .ok()
            .filter(|&index| index < self.cells.len())
            .ok_or_else(|| self.out_of_bounds(address))
    }

    /// Returns the word at `address`.
    pub fn read(&self, address: i64) -> Result<i64, VMError> {
        let index = self.resolve(address)?;
        Ok(self.cells[index])
    }

    /// Returns the word at cell `index`, used for instruction fetch.
    pub fn fetch(&self, index: usize) -> Result<i64, VMError> {
        self.cells
            .get(index)
            .copied()
            .ok_or_else(|| self.out_of_bounds(i64::try_from(index).unwrap_or(i64::MAX)))
    }

    /// Stores `value` into cell `index`.
    pub fn write(&mut self, index: usize, value: i64) -> Result<(), VMError> {
        let len = self.cells.len();
        let slot = self
            .cells
            .get_mut(index)
            .ok_or(VMError::OutOfBoundsAddress {
                address: i64::try_from(index).unwrap_or(i64::MAX),
                len,
            })?;
        *slot = value;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_with_zeros() {
        let mem = Memory::new(vec![1, 2, 3], 4);
        assert_eq!(mem.len(), 7);
        assert_eq!(mem.as_slice(), &[1, 2, 3, 0, 0, 0, 0]);
    }

    #[test]
    fn resolve_bounds() {
        let mem = Memory::new(vec![0; 4], 0);
        assert_eq!(mem.resolve(0), Ok(0));
        assert_eq!(mem.resolve(3), Ok(3));
        assert_eq!(
            mem.resolve(4),
            Err(VMError::OutOfBoundsAddress { address: 4, len: 4 })
        );
        assert_eq!(
            mem.resolve(-1),
            Err(VMError::OutOfBoundsAddress {
                address: -1,
                len: 4
            })
        );
    }

    #[test]
    fn write_then_read() {
        let mut mem = Memory::new(vec![0; 2], 1);
        mem.write(2, -9).unwrap();
        assert_eq!(mem.read(2), Ok(-9));
        assert_eq!(mem.fetch(2), Ok(-9));
    }

    #[test]
    fn write_out_of_bounds_leaves_memory() {
        let mut mem = Memory::new(vec![5, 6], 0);
        assert!(mem.write(2, 1).is_err());
        assert_eq!(mem.as_slice(), &[5, 6]);
    }

    #[test]
    fn fetch_past_end() {
        let mem = Memory::new(vec![], 0);
        assert!(mem.is_empty());
        assert_eq!(
            mem.fetch(0),
            Err(VMError::OutOfBoundsAddress { address: 0, len: 0 })
        );
    }
}
