use intcode_derive::Error;

/// Errors raised while loading or executing a program.
///
/// Every execution fault is reported before the failing step mutates memory,
/// the instruction pointer or the relative base.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VMError {
    /// Opcode not present in the instruction table (includes negative instruction words).
    #[error("unknown opcode {opcode} at ip {ip}")]
    UnknownOpcode { opcode: i64, ip: usize },
    /// Parameter mode digit other than 0, 1 or 2.
    #[error("invalid parameter mode {mode} for operand {operand} at ip {ip}")]
    InvalidMode { mode: i64, operand: usize, ip: usize },
    /// Resolved address outside `[0, len)`.
    #[error("address {address} out of bounds for memory of length {len}")]
    OutOfBoundsAddress { address: i64, len: usize },
    /// Input instruction executed with an empty input channel.
    #[error("input instruction at ip {ip} has no input available")]
    InputStarved { ip: usize },
    /// Destination operand encoded in immediate mode.
    #[error("operand {operand} at ip {ip} is a write target in immediate mode")]
    InvalidWriteMode { ip: usize, operand: usize },
    /// Program text contained a token that is not an integer.
    #[error("invalid program token {token:?} at index {index}")]
    InvalidProgram { index: usize, token: String },
    /// Configured step budget exhausted.
    #[error("step limit of {limit} reached at ip {ip}")]
    StepLimitExceeded { limit: u64, ip: usize },
    /// Step requested on a machine that already executed halt.
    #[error("machine halted at ip {ip}")]
    Halted { ip: usize },
}
