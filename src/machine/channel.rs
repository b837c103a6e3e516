//! Input and output channel interfaces.
//!
//! Channels belong to the caller. The interpreter borrows them for the length
//! of a single `step` or `run` call, so between calls the caller may push more
//! input, drain output, or hand a machine's output to another machine's input.

use std::collections::VecDeque;

/// FIFO source of input values.
pub trait InputChannel {
    /// Returns true if no value is waiting.
    fn is_empty(&self) -> bool;
    /// Removes and returns the oldest value.
    fn pop_front(&mut self) -> Option<i64>;
}

/// Sink for output values.
pub trait OutputChannel {
    /// Appends a value.
    fn push_back(&mut self, value: i64);
}

impl InputChannel for VecDeque<i64> {
    fn is_empty(&self) -> bool {
        VecDeque::is_empty(self)
    }

    fn pop_front(&mut self) -> Option<i64> {
        VecDeque::pop_front(self)
    }
}

impl OutputChannel for VecDeque<i64> {
    fn push_back(&mut self, value: i64) {
        VecDeque::push_back(self, value);
    }
}

impl OutputChannel for Vec<i64> {
    fn push_back(&mut self, value: i64) {
        self.push(value);
    }
}
