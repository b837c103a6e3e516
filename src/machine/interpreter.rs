//! Core interpreter.
//!
//! The interpreter runs a fetch-decode-execute loop over a single fixed-length
//! memory. Besides the instruction pointer its only register is the relative
//! base. Input and output channels are borrowed per call, never stored, and
//! execution suspends cooperatively when an input instruction finds its
//! channel empty. All arithmetic uses wrapping semantics.

mod config;
mod profile;

pub use config::MachineConfig;
pub use profile::ExecProfile;

use crate::machine::channel::{InputChannel, OutputChannel};
use crate::machine::decode::{Decoded, decode};
use crate::machine::errors::VMError;
use crate::machine::isa::Instruction;
use crate::machine::memory::Memory;
use crate::machine::program::Program;
use crate::{debug, error, info, warn};

/// Why [`Interpreter::run`] returned control to the caller.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Exit {
    /// The next instruction reads input and the input channel is empty.
    AwaitingInput,
    /// The machine has executed halt.
    Halted,
}

/// Where execution continues after an instruction.
enum Flow {
    Next,
    Jump(usize),
    Stop,
}

macro_rules! exec_vm {
    // Entry point
    (
        vm = $vm:ident,
        decoded = $d:ident,
        input = $input:ident,
        output = $output:ident,
        { $( $variant:ident => $handler:ident $args:tt ),* $(,)? }
    ) => {{
        match $d.instruction {
            $(
                Instruction::$variant => exec_vm!(@call $vm, $d, $input, $output, $handler, $args),
            )*
        }
    }};

    // Handler consuming the input channel
    (@call $vm:ident, $d:ident, $input:ident, $output:ident, $handler:ident,
        (input; $( $field:ident : $kind:ident $idx:literal ),* $(,)? )
    ) => {{
        $( let $field = exec_vm!(@read $vm, $d, $kind, $idx)?; )*
        $vm.$handler(&$d, $input, $( $field ),*)
    }};

    // Handler producing output
    (@call $vm:ident, $d:ident, $input:ident, $output:ident, $handler:ident,
        (output; $( $field:ident : $kind:ident $idx:literal ),* $(,)? )
    ) => {{
        $( let $field = exec_vm!(@read $vm, $d, $kind, $idx)?; )*
        $vm.$handler(&$d, $output, $( $field ),*)
    }};

    // Handler touching memory and registers only
    (@call $vm:ident, $d:ident, $input:ident, $output:ident, $handler:ident,
        ( $( $field:ident : $kind:ident $idx:literal ),* $(,)? )
    ) => {{
        $( let $field = exec_vm!(@read $vm, $d, $kind, $idx)?; )*
        $vm.$handler(&$d, $( $field ),*)
    }};

    // Operand value
    (@read $vm:ident, $d:ident, Read, $idx:literal) => {{
        $d.operand($idx).value(&$vm.memory, $vm.relative_base)
    }};

    // Destination cell index
    (@read $vm:ident, $d:ident, Write, $idx:literal) => {{
        $d.operand($idx).target(&$vm.memory, $vm.relative_base, $d.ip, $idx)
    }};
}

/// A single Intcode machine.
pub struct Interpreter {
    /// Name used in log lines.
    name: String,
    memory: Memory,
    /// Address of the next instruction word.
    ip: usize,
    relative_base: i64,
    /// Set by halt; terminal.
    stopped: bool,
    /// Instructions executed so far.
    steps: u64,
    step_limit: Option<u64>,
    profile: ExecProfile,
}

impl Interpreter {
    /// Creates a machine for `program` with `extra_memory` zero cells appended.
    pub fn new(program: Program, extra_memory: usize) -> Self {
        Self::with_config(
            program,
            MachineConfig::default().with_extra_memory(extra_memory),
        )
    }

    pub fn with_config(program: Program, config: MachineConfig) -> Self {
        Self {
            name: config.name,
            memory: Memory::new(program.into_words(), config.extra_memory),
            ip: 0,
            relative_base: 0,
            stopped: false,
            steps: 0,
            step_limit: config.step_limit,
            profile: ExecProfile::new(),
        }
    }

    /// Parses comma-separated program text and creates a machine for it.
    pub fn from_source(source: &str, config: MachineConfig) -> Result<Self, VMError> {
        Ok(Self::with_config(source.parse()?, config))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn memory(&self) -> &[i64] {
        self.memory.as_slice()
    }

    pub fn ip(&self) -> usize {
        self.ip
    }

    pub fn relative_base(&self) -> i64 {
        self.relative_base
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn profile(&self) -> &ExecProfile {
        &self.profile
    }

    /// Overwrites the cell at `address`.
    pub fn poke(&mut self, address: i64, value: i64) -> Result<(), VMError> {
        let index = self.memory.resolve(address)?;
        self.memory.write(index, value)
    }

    /// Decodes the next instruction without changing any state.
    pub fn peek(&self) -> Result<Decoded, VMError> {
        decode(&self.memory, self.ip)
    }

    /// Executes exactly one instruction and returns it.
    ///
    /// Fails with [`VMError::InputStarved`] on an input instruction whose
    /// channel is empty and with [`VMError::Halted`] once the machine has
    /// stopped. On any error memory, IP and relative base are left untouched.
    pub fn step<I: InputChannel, O: OutputChannel>(
        &mut self,
        input: &mut I,
        output: &mut O,
    ) -> Result<Instruction, VMError> {
        if self.stopped {
            return Err(VMError::Halted { ip: self.ip });
        }
        self.check_step_limit()?;
        let decoded = self.peek()?;
        self.execute(decoded, input, output)
    }

    /// Runs until the machine halts or needs input it does not have.
    ///
    /// Suspension consumes nothing and changes nothing, so calling `run` again
    /// without new input returns [`Exit::AwaitingInput`] again.
    pub fn run<I: InputChannel, O: OutputChannel>(
        &mut self,
        input: &mut I,
        output: &mut O,
    ) -> Result<Exit, VMError> {
        let result = self.drive(input, output);
        match &result {
            Ok(Exit::AwaitingInput) => {
                debug!("{}: awaiting input at ip {}", self.name, self.ip)
            }
            Ok(Exit::Halted) => {
                info!("{}: end of program after {} steps", self.name, self.steps)
            }
            Err(e @ VMError::StepLimitExceeded { .. }) => warn!("{}: {}", self.name, e),
            Err(e) => error!("{}: {}", self.name, e),
        }
        result
    }

    /// Runs to halt, treating a suspension on empty input as an error.
    pub fn run_until_halt<I: InputChannel, O: OutputChannel>(
        &mut self,
        input: &mut I,
        output: &mut O,
    ) -> Result<(), VMError> {
        match self.run(input, output)? {
            Exit::Halted => Ok(()),
            Exit::AwaitingInput => Err(VMError::InputStarved { ip: self.ip }),
        }
    }

    fn drive<I: InputChannel, O: OutputChannel>(
        &mut self,
        input: &mut I,
        output: &mut O,
    ) -> Result<Exit, VMError> {
        while !self.stopped {
            let decoded = self.peek()?;
            if decoded.instruction == Instruction::Input && input.is_empty() {
                return Ok(Exit::AwaitingInput);
            }
            self.check_step_limit()?;
            self.execute(decoded, input, output)?;
        }
        Ok(Exit::Halted)
    }

    fn check_step_limit(&self) -> Result<(), VMError> {
        match self.step_limit {
            Some(limit) if self.steps >= limit => Err(VMError::StepLimitExceeded {
                limit,
                ip: self.ip,
            }),
            _ => Ok(()),
        }
    }

    /// Executes a decoded instruction.
    ///
    /// Operands, destinations and jump targets are all resolved before the
    /// first write, so a failing instruction has no effect.
    fn execute<I: InputChannel, O: OutputChannel>(
        &mut self,
        decoded: Decoded,
        input: &mut I,
        output: &mut O,
    ) -> Result<Instruction, VMError> {
        let flow = exec_vm! {
            vm = self,
            decoded = decoded,
            input = input,
            output = output,
            {
                Add => op_add(a: Read 0, b: Read 1, dst: Write 2),
                Mul => op_mul(a: Read 0, b: Read 1, dst: Write 2),
                Input => op_input(input; dst: Write 0),
                Output => op_output(output; src: Read 0),
                JumpIfTrue => op_jump_if_true(cond: Read 0, target: Read 1),
                JumpIfFalse => op_jump_if_false(cond: Read 0, target: Read 1),
                LessThan => op_less_than(a: Read 0, b: Read 1, dst: Write 2),
                Equals => op_equals(a: Read 0, b: Read 1, dst: Write 2),
                AdjustBase => op_adjust_base(offset: Read 0),
                Halt => op_halt(),
            }
        }?;

        match flow {
            Flow::Next => self.ip = decoded.next_ip(),
            Flow::Jump(target) => self.ip = target,
            Flow::Stop => self.stopped = true,
        }
        self.steps += 1;
        self.profile.record(decoded.instruction);
        Ok(decoded.instruction)
    }

    fn op_add(&mut self, _d: &Decoded, a: i64, b: i64, dst: usize) -> Result<Flow, VMError> {
        self.memory.write(dst, a.wrapping_add(b))?;
        Ok(Flow::Next)
    }

    fn op_mul(&mut self, _d: &Decoded, a: i64, b: i64, dst: usize) -> Result<Flow, VMError> {
        self.memory.write(dst, a.wrapping_mul(b))?;
        Ok(Flow::Next)
    }

    fn op_input<I: InputChannel>(
        &mut self,
        d: &Decoded,
        input: &mut I,
        dst: usize,
    ) -> Result<Flow, VMError> {
        let value = input
            .pop_front()
            .ok_or(VMError::InputStarved { ip: d.ip })?;
        self.memory.write(dst, value)?;
        Ok(Flow::Next)
    }

    fn op_output<O: OutputChannel>(
        &mut self,
        _d: &Decoded,
        output: &mut O,
        src: i64,
    ) -> Result<Flow, VMError> {
        output.push_back(src);
        Ok(Flow::Next)
    }

    fn op_jump_if_true(&mut self, _d: &Decoded, cond: i64, target: i64) -> Result<Flow, VMError> {
        if cond != 0 {
            self.jump(target)
        } else {
            Ok(Flow::Next)
        }
    }

    fn op_jump_if_false(&mut self, _d: &Decoded, cond: i64, target: i64) -> Result<Flow, VMError> {
        if cond == 0 {
            self.jump(target)
        } else {
            Ok(Flow::Next)
        }
    }

    /// Jump targets must name a cell; a jump off the end of memory is a fault.
    fn jump(&self, target: i64) -> Result<Flow, VMError> {
        Ok(Flow::Jump(self.memory.resolve(target)?))
    }

    fn op_less_than(&mut self, _d: &Decoded, a: i64, b: i64, dst: usize) -> Result<Flow, VMError> {
        self.memory.write(dst, i64::from(a < b))?;
        Ok(Flow::Next)
    }

    fn op_equals(&mut self, _d: &Decoded, a: i64, b: i64, dst: usize) -> Result<Flow, VMError> {
        self.memory.write(dst, i64::from(a == b))?;
        Ok(Flow::Next)
    }

    fn op_adjust_base(&mut self, _d: &Decoded, offset: i64) -> Result<Flow, VMError> {
        self.relative_base = self.relative_base.wrapping_add(offset);
        Ok(Flow::Next)
    }

    fn op_halt(&mut self, _d: &Decoded) -> Result<Flow, VMError> {
        Ok(Flow::Stop)
    }
}
