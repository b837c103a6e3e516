//! Interpreter benchmark binary.
//!
//! Measures execution time for representative programs.
//! Run with: `cargo run --release --bin bench`

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use intcode::machine::interpreter::{Exit, Interpreter, MachineConfig};
use intcode::machine::program::Program;

// ---------------------------------------------------------------------------
// Benchmark harness
// ---------------------------------------------------------------------------

struct BenchResult {
    name: &'static str,
    iterations: u64,
    total: Duration,
    /// Instructions executed by the last run.
    steps: u64,
}

impl BenchResult {
    fn avg(&self) -> Duration {
        self.total / self.iterations.max(1) as u32
    }

    fn print(&self) {
        let ns_per_op = self.avg().as_nanos();
        let ns_per_step = if self.steps > 0 {
            format!("{:>8.1}", ns_per_op as f64 / self.steps as f64)
        } else {
            "       -".to_string()
        };
        println!(
            "  {:<24} {:>7} iters {:>10.3} us/iter {:>10} steps  {} ns/step",
            self.name,
            self.iterations,
            ns_per_op as f64 / 1000.0,
            self.steps,
            ns_per_step,
        );
    }
}

/// Runs `f` for at least `min_duration`, returning aggregated results.
fn bench<F>(name: &'static str, min_duration: Duration, mut f: F) -> BenchResult
where
    F: FnMut() -> u64,
{
    for _ in 0..5 {
        f();
    }

    let mut iterations = 0u64;
    let mut steps = 0u64;
    let start = Instant::now();
    while start.elapsed() < min_duration {
        steps = f();
        iterations += 1;
    }

    BenchResult {
        name,
        iterations,
        total: start.elapsed(),
        steps,
    }
}

// ---------------------------------------------------------------------------
// Benchmark programs
// ---------------------------------------------------------------------------

const LOOP_COUNT: i64 = 100_000;

/// Decrements cell 20 until it reaches zero.
fn countdown() -> Program {
    let mut words = vec![1001, 20, -1, 20, 1005, 20, 0, 99];
    words.resize(20, 0);
    words.push(LOOP_COUNT);
    Program::new(words)
}

/// Multiply, add and compare per iteration, counting down in cell 20.
fn arithmetic_mix() -> Program {
    let mut words = vec![
        1002, 21, 3, 22, // [22] = [21] * 3
        1, 22, 21, 23, // [23] = [22] + [21]
        7, 23, 22, 24, // [24] = [23] < [22]
        1001, 20, -1, 20, // [20] -= 1
        1005, 20, 0, // loop while [20] != 0
        99,
    ];
    words.extend([LOOP_COUNT, 7, 0, 0, 0]);
    Program::new(words)
}

/// Steps the relative base forward 50 cells, accumulating through relative operands.
fn relative_walk() -> Program {
    let mut words = vec![
        109, 1, // RB += 1
        22201, 0, 100, 100, // [RB+100] = [RB] + [RB+100]
        1001, 200, -1, 200, // [200] -= 1
        1005, 200, 0, // loop while [200] != 0
        99,
    ];
    words.resize(200, 0);
    words.push(50);
    Program::new(words)
}

fn run_program(program: &Program, extra_memory: usize) -> u64 {
    let mut vm = Interpreter::with_config(
        program.clone(),
        MachineConfig::default()
            .with_name("bench")
            .with_extra_memory(extra_memory),
    );
    vm.run_until_halt(&mut VecDeque::<i64>::new(), &mut Vec::<i64>::new())
        .expect("bench program failed");
    vm.steps()
}

/// Feeds values one at a time into an endless echo loop, resuming after each.
fn echo_resume(values: i64) -> u64 {
    let mut vm = Interpreter::new(Program::new(vec![3, 7, 4, 7, 1105, 1, 0, 0]), 0);
    let mut input: VecDeque<i64> = VecDeque::new();
    let mut output: Vec<i64> = Vec::with_capacity(values as usize);
    for value in 0..values {
        input.push_back(value);
        let exit = vm.run(&mut input, &mut output).expect("echo failed");
        assert_eq!(exit, Exit::AwaitingInput);
    }
    assert_eq!(output.len(), values as usize);
    vm.steps()
}

fn main() {
    intcode::utils::log::set_min_level(Some(intcode::utils::log::Level::Warn));
    intcode::utils::log::init_from_env();

    let min = Duration::from_secs(1);
    println!("intcode interpreter benchmarks");

    let countdown = countdown();
    bench("countdown", min, || run_program(&countdown, 0)).print();

    let mix = arithmetic_mix();
    bench("arithmetic_mix", min, || run_program(&mix, 0)).print();

    let walk = relative_walk();
    bench("relative_walk", min, || run_program(&walk, 400)).print();

    bench("echo_resume", min, || echo_resume(10_000)).print();
}
