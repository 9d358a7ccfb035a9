use sym::{SymbolicBit, SymbolicBitVec};
use word_ops::{BitOps, BitwiseOps, WordOps};

use crate::config::VerifierConfig;
use crate::executor::{self, Execution, Executor};
use crate::oracle::{self, SolverOracle, Verdict};
use crate::program::{self, Program};
use crate::state::{ADDRESS_BITS, Flag, MachineState, Register, WORD_BITS};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Program(#[from] program::Error),

    #[error(transparent)]
    Execution(#[from] executor::Error),

    #[error(transparent)]
    Oracle(#[from] oracle::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Initial contents of the registers, memory cells, and flags.
#[derive(Debug, Clone)]
pub struct InitialValues<V: WordOps> {
    pub x: V,
    pub a: V,

    /// Every memory cell holds this value until written.
    pub memory_fill: V,

    pub carry: V::Bit,
    pub zero: V::Bit,
}

impl<V: WordOps> InitialValues<V> {
    pub fn constant(x: u8, a: u8, memory_fill: u8, carry: bool, zero: bool) -> Self {
        Self {
            x: V::constant(x.into(), WORD_BITS),
            a: V::constant(a.into(), WORD_BITS),
            memory_fill: V::constant(memory_fill.into(), WORD_BITS),
            carry: carry.into(),
            zero: zero.into(),
        }
    }
}

/// A multiplier operand stored in memory.
#[derive(Debug, Clone)]
pub struct Factor<V> {
    pub address: V,
    pub value: V,
}

impl<V: WordOps> Factor<V> {
    pub fn constant(address: u32, value: u8) -> Self {
        Self {
            address: V::constant(address.into(), ADDRESS_BITS),
            value: V::constant(value.into(), WORD_BITS),
        }
    }
}

/// A named input of a verification run.
#[derive(Debug, Clone)]
pub enum Input<'a, V: WordOps> {
    Word(&'a V),
    Bit(&'a V::Bit),
}

/// All free inputs of a verification run.
#[derive(Debug, Clone)]
pub struct VerificationInputs<V: WordOps> {
    /// Value of every memory cell of the uninitialized machine. Shadowed by
    /// [InitialValues::memory_fill] before the program runs, so no output depends on it.
    pub memory_base: V,

    pub factor1: Factor<V>,
    pub factor2: Factor<V>,

    /// Address receiving the low byte of the product.
    pub low: V,

    pub initial: InitialValues<V>,
}

impl<V: WordOps> VerificationInputs<V> {
    pub fn named_inputs(&self) -> Vec<(&'static str, Input<'_, V>)> {
        vec![
            ("memory_base", Input::Word(&self.memory_base)),
            ("factor1_address", Input::Word(&self.factor1.address)),
            ("factor1", Input::Word(&self.factor1.value)),
            ("factor2_address", Input::Word(&self.factor2.address)),
            ("factor2", Input::Word(&self.factor2.value)),
            ("low_address", Input::Word(&self.low)),
            ("x", Input::Word(&self.initial.x)),
            ("a", Input::Word(&self.initial.a)),
            ("memory_fill", Input::Word(&self.initial.memory_fill)),
            ("carry", Input::Bit(&self.initial.carry)),
            ("zero", Input::Bit(&self.initial.zero)),
        ]
    }
}

impl VerificationInputs<SymbolicBitVec> {
    /// Inputs where every value is a fresh variable.
    pub fn symbolic() -> Self {
        let word = || SymbolicBitVec::with_size(WORD_BITS);
        let address = || SymbolicBitVec::with_size(ADDRESS_BITS);
        let flag = || -> SymbolicBit { SymbolicBitVec::with_size(1)[0].clone() };

        Self {
            memory_base: word(),
            factor1: Factor {
                address: address(),
                value: word(),
            },
            factor2: Factor {
                address: address(),
                value: word(),
            },
            low: address(),
            initial: InitialValues {
                x: word(),
                a: word(),
                memory_fill: word(),
                carry: flag(),
                zero: flag(),
            },
        }
    }
}

/// The correctness claim of the multiplier: if the factor and output addresses are pairwise
/// distinct then the result equals the product of the factors.
#[derive(Debug, Clone)]
pub struct Obligation<B> {
    pub precondition: B,
    pub conclusion: B,
}

impl<B: BitOps> Obligation<B> {
    /// The implication `precondition => conclusion`. The multiplier is correct if this is valid.
    pub fn claim(&self) -> B {
        self.precondition
            .clone()
            .not()
            .or(self.conclusion.clone())
    }

    /// True if the precondition is known to be false, making the claim trivially valid.
    pub fn is_vacuous(&self) -> bool {
        self.precondition.known() == Some(false)
    }
}

/// Build the obligation for the given inputs and the extracted high and low result bytes.
pub fn obligation<V: WordOps>(inputs: &VerificationInputs<V>, high: &V, low: &V) -> Obligation<V::Bit> {
    let f1 = &inputs.factor1.address;
    let f2 = &inputs.factor2.address;
    let lo = &inputs.low;
    let precondition = f1
        .clone()
        .not_equals(f2.clone())
        .and(f1.clone().not_equals(lo.clone()))
        .and(f2.clone().not_equals(lo.clone()));

    let widen = |value: &V| value.clone().zero_extend(WORD_BITS);
    let product = widen(&inputs.factor1.value).multiply(widen(&inputs.factor2.value));
    let result = widen(high).shift_left(WORD_BITS).add(widen(low));

    Obligation {
        precondition,
        conclusion: result.equals(product),
    }
}

/// Outcome of running the multiplier on a set of inputs.
#[derive(Debug, Clone)]
pub struct VerificationRun<V: WordOps> {
    inputs: VerificationInputs<V>,
    program: Program<V>,
    execution: Execution<V>,
    high: V,
    low: V,
}

impl<V: WordOps> VerificationRun<V> {
    pub fn inputs(&self) -> &VerificationInputs<V> {
        &self.inputs
    }

    pub fn program(&self) -> &Program<V> {
        &self.program
    }

    pub fn execution(&self) -> &Execution<V> {
        &self.execution
    }

    /// High byte of the product, read from the accumulator.
    pub fn high(&self) -> &V {
        &self.high
    }

    /// Low byte of the product, read from the low output address.
    pub fn low(&self) -> &V {
        &self.low
    }

    pub fn obligation(&self) -> Obligation<V::Bit> {
        obligation(&self.inputs, &self.high, &self.low)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Verifier {
    config: VerifierConfig,
}

impl Verifier {
    pub fn new(config: VerifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// The machine state before the first instruction: memory filled uniformly, registers and
    /// flags from the initial values, and both factors written.
    pub fn initial_state<V: WordOps>(&self, inputs: &VerificationInputs<V>) -> MachineState<V> {
        let initial = &inputs.initial;
        MachineState::uninitialized(self.config.memory, inputs.memory_base.clone())
            .with_memory_reset(initial.memory_fill.clone())
            .with_register(Register::X, initial.x.clone())
            .with_register(Register::A, initial.a.clone())
            .with_flag(Flag::Carry, initial.carry.clone())
            .with_flag(Flag::Zero, initial.zero.clone())
            .with_memory(inputs.factor1.address.clone(), inputs.factor1.value.clone())
            .with_memory(inputs.factor2.address.clone(), inputs.factor2.value.clone())
    }

    /// Run the multiplier and extract the result.
    pub fn run<V: WordOps>(&self, inputs: &VerificationInputs<V>) -> Result<VerificationRun<V>> {
        let program = program::multiplier(
            inputs.factor1.address.clone(),
            inputs.factor2.address.clone(),
            inputs.low.clone(),
        )?;

        log::debug!(
            "Running multiplier with {memory} memory:\n{program}",
            memory = self.config.memory
        );

        let state = self.initial_state(inputs);
        let execution = Executor::new(self.config.step_limit).run(&program, state)?;
        let high = execution.state().register(Register::A).clone();
        let low = execution.state().read(&inputs.low);

        Ok(VerificationRun {
            inputs: inputs.clone(),
            program,
            execution,
            high,
            low,
        })
    }

    /// Run the multiplier and discharge its obligation with the oracle.
    pub fn verify<V, O>(
        &self,
        inputs: &VerificationInputs<V>,
        oracle: &O,
    ) -> Result<Verdict<O::Counterexample>>
    where
        V: WordOps,
        O: SolverOracle<V::Bit>,
    {
        let run = self.run(inputs)?;
        let obligation = run.obligation();
        if obligation.is_vacuous() {
            log::info!("Obligation is vacuous: the addresses always alias");
        }

        let verdict = oracle.prove(&obligation.claim())?;
        match &verdict {
            Verdict::Proved => log::info!("Multiplier proved correct"),
            Verdict::Counterexample(_) => log::info!("Multiplier has a counterexample"),
        }

        Ok(verdict)
    }
}
