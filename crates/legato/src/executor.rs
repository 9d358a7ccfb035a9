use std::collections::BTreeMap;

use word_ops::{BitOps, BitwiseOps, WordOps};

use crate::emulator::{self, ControlFlow};
use crate::program::Program;
use crate::state::MachineState;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// Execution did not halt within the configured number of steps.
    #[error("execution exceeded step limit of {limit}")]
    StepLimitExceeded { limit: usize },

    /// Execution reached a program counter with no instruction.
    #[error("program counter {pc} is outside of program with {len} instructions")]
    ProgramCounterOutOfRange { pc: usize, len: usize },

    /// An internal error occurred. This is a fatal error that cannot be safely handled.
    #[error("internal error: {0}")]
    InternalError(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Observations made while executing a program.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionTrace {
    executed: BTreeMap<usize, usize>,
    steps: usize,
    forks: usize,
    merges: usize,
}

impl ExecutionTrace {
    /// Number of times the instruction at `pc` was executed, counted once per executing thread.
    pub fn count(&self, pc: usize) -> usize {
        self.executed.get(&pc).copied().unwrap_or_default()
    }

    /// Total number of instructions executed.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Number of branches whose condition could not be decided.
    pub fn forks(&self) -> usize {
        self.forks
    }

    /// Number of times two threads were joined into one.
    pub fn merges(&self) -> usize {
        self.merges
    }
}

/// A path of execution. The predicate is the condition under which this path is taken.
#[derive(Debug, Clone)]
struct Thread<V: WordOps> {
    predicate: V::Bit,
    state: MachineState<V>,
}

impl<V: WordOps> Thread<V> {
    fn join(self, other: Self) -> Self {
        let state = MachineState::merge(&self.predicate, &self.state, &other.state);
        Self {
            predicate: self.predicate.or(other.predicate),
            state,
        }
    }
}

/// Result of running a program to completion.
#[derive(Debug, Clone)]
pub struct Execution<V: WordOps> {
    state: MachineState<V>,
    predicate: V::Bit,
    trace: ExecutionTrace,
}

impl<V: WordOps> Execution<V> {
    /// State at halt merged across all paths.
    pub fn state(&self) -> &MachineState<V> {
        &self.state
    }

    /// Disjunction of the predicates of all halted paths.
    pub fn predicate(&self) -> &V::Bit {
        &self.predicate
    }

    pub fn trace(&self) -> &ExecutionTrace {
        &self.trace
    }

    pub fn into_state(self) -> MachineState<V> {
        self.state
    }
}

/// Small-step evaluator over program indices.
///
/// The pending thread with the lowest program counter is always stepped first. For programs whose
/// branches jump forward or close a loop this guarantees that all paths reaching a join point are
/// merged there before execution continues past it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Executor {
    step_limit: usize,
}

impl Executor {
    pub fn new(step_limit: usize) -> Self {
        Self { step_limit }
    }

    pub fn step_limit(&self) -> usize {
        self.step_limit
    }

    pub fn run<V: WordOps>(
        &self,
        program: &Program<V>,
        state: MachineState<V>,
    ) -> Result<Execution<V>> {
        let mut pending = BTreeMap::new();
        let mut trace = ExecutionTrace::default();
        let mut halted: Option<Thread<V>> = None;

        pending.insert(
            0,
            Thread {
                predicate: true.into(),
                state,
            },
        );

        while let Some((pc, thread)) = pending.pop_first() {
            if trace.steps >= self.step_limit {
                log::debug!(
                    "Abandoning execution at {pc} with {count} pending threads",
                    count = pending.len() + 1
                );
                return Err(Error::StepLimitExceeded {
                    limit: self.step_limit,
                });
            }

            let instruction = program.get(pc).ok_or(Error::ProgramCounterOutOfRange {
                pc,
                len: program.len(),
            })?;

            log::trace!("Executing {pc}: {instruction:?}");
            trace.steps += 1;
            *trace.executed.entry(pc).or_default() += 1;

            let Thread { predicate, state } = thread;
            let (state, flow) = emulator::emulate(state, instruction);

            match flow {
                ControlFlow::NextInstruction => {
                    schedule(&mut pending, &mut trace, pc + 1, Thread { predicate, state });
                }
                ControlFlow::ConditionalBranch {
                    condition,
                    destination,
                } => match condition.known() {
                    Some(true) => {
                        schedule(&mut pending, &mut trace, destination, Thread { predicate, state });
                    }
                    Some(false) => {
                        schedule(&mut pending, &mut trace, pc + 1, Thread { predicate, state });
                    }
                    None => {
                        log::debug!("Forking at {pc}: paths continue at {destination} and {}", pc + 1);
                        trace.forks += 1;

                        let taken = Thread {
                            predicate: predicate.clone().and(condition.clone()),
                            state: state.clone(),
                        };
                        let not_taken = Thread {
                            predicate: predicate.and(condition.not()),
                            state,
                        };

                        schedule(&mut pending, &mut trace, destination, taken);
                        schedule(&mut pending, &mut trace, pc + 1, not_taken);
                    }
                },
                ControlFlow::Halt => {
                    log::debug!("Path halted at {pc}");
                    let thread = Thread { predicate, state };
                    halted = Some(match halted {
                        Some(previous) => {
                            trace.merges += 1;
                            previous.join(thread)
                        }
                        None => thread,
                    });
                }
            }
        }

        let Thread { predicate, state } = halted.ok_or_else(|| {
            Error::InternalError("no path reached a halt instruction".to_string())
        })?;

        log::info!(
            "Execution halted after {steps} steps with {forks} forks and {merges} merges",
            steps = trace.steps,
            forks = trace.forks,
            merges = trace.merges
        );

        Ok(Execution {
            state,
            predicate,
            trace,
        })
    }
}

fn schedule<V: WordOps>(
    pending: &mut BTreeMap<usize, Thread<V>>,
    trace: &mut ExecutionTrace,
    pc: usize,
    thread: Thread<V>,
) {
    let thread = match pending.remove(&pc) {
        Some(existing) => {
            log::debug!("Merging paths at {pc}");
            trace.merges += 1;
            existing.join(thread)
        }
        None => thread,
    };

    pending.insert(pc, thread);
}
