use sym::{SymbolicBit, SymbolicBitVec};
use test_log::test;
use word_ops::WordOps;

use super::*;
use crate::config::VerifierConfig;
use crate::oracle::{self, SolverOracle, Verdict};
use crate::state::{Flag, Register};
use crate::verify::*;

fn concrete_inputs(f1: u8, f2: u8) -> VerificationInputs<SymbolicBitVec> {
    VerificationInputs {
        memory_base: byte(0xCC),
        factor1: Factor::constant(0x100, f1),
        factor2: Factor::constant(0x101, f2),
        low: address(0x102),
        initial: InitialValues::constant(0x55, 0xAA, 0x33, true, true),
    }
}

#[test]
fn three_times_five() -> Result<()> {
    for strategy in STRATEGIES {
        let verifier = Verifier::new(VerifierConfig::default().with_memory(strategy));
        let run = verifier.run(&concrete_inputs(3, 5))?;

        assert_eq!(run.high().known(), Some(0x00), "{strategy}");
        assert_eq!(run.low().known(), Some(0x0F), "{strategy}");
        assert_eq!(run.execution().trace().count(3), 8);
        assert_eq!(run.execution().trace().forks(), 0);

        let obligation = run.obligation();
        assert_eq!(obligation.precondition.maybe_literal(), Some(true));
        assert_eq!(obligation.conclusion.maybe_literal(), Some(true));
        assert_eq!(obligation.claim().maybe_literal(), Some(true));
        assert!(!obligation.is_vacuous());
    }

    Ok(())
}

#[test]
fn largest_product() -> Result<()> {
    let run = Verifier::default().run(&concrete_inputs(0xFF, 0xFF))?;
    assert_eq!(run.high().known(), Some(0xFE));
    assert_eq!(run.low().known(), Some(0x01));
    assert_eq!(run.obligation().claim().maybe_literal(), Some(true));
    Ok(())
}

#[test]
fn final_machine_state() -> Result<()> {
    let run = Verifier::default().run(&concrete_inputs(0x81, 0x02))?;
    let state = run.execution().state();
    assert_eq!(state.read(&address(0x101)).known(), Some(0x02));
    assert_eq!(state.register(Register::X).known(), Some(0));
    assert_eq!(state.flag(Flag::Zero).maybe_literal(), Some(true));
    Ok(())
}

#[test]
fn initial_state_is_seeded() {
    let inputs = concrete_inputs(7, 9);
    let state = Verifier::default().initial_state(&inputs);
    assert_eq!(state.register(Register::X).known(), Some(0x55));
    assert_eq!(state.register(Register::A).known(), Some(0xAA));
    assert_eq!(state.flag(Flag::Carry).maybe_literal(), Some(true));
    assert_eq!(state.flag(Flag::Zero).maybe_literal(), Some(true));
    assert_eq!(state.read(&address(0x100)).known(), Some(7));
    assert_eq!(state.read(&address(0x101)).known(), Some(9));

    // The uniform fill overrides the base of the uninitialized machine
    assert_eq!(state.read(&address(0x102)).known(), Some(0x33));
}

#[test]
fn memory_base_is_shadowed_by_fill() -> Result<()> {
    let inputs = VerificationInputs::symbolic();
    let run = Verifier::default().run(&inputs)?;

    let outputs = [0x00, 0x5A, 0xFF].map(|base| {
        let mut assignments = assign(&[
            (&inputs.memory_base, base),
            (&inputs.factor1.address, 0x10),
            (&inputs.factor1.value, 0x0D),
            (&inputs.factor2.address, 0x20),
            (&inputs.factor2.value, 0xB1),
            (&inputs.low, 0x30),
            (&inputs.initial.x, 0),
            (&inputs.initial.a, 0),
            (&inputs.initial.memory_fill, 0x42),
        ]);
        assign_bit(&mut assignments, &inputs.initial.carry, false);
        assign_bit(&mut assignments, &inputs.initial.zero, false);
        (
            evaluate(run.high(), &assignments),
            evaluate(run.low(), &assignments),
        )
    });

    let product = 0x0D * 0xB1;
    assert!(outputs.iter().all(|&output| output == (Some(product >> 8), Some(product & 0xFF))));
    Ok(())
}

#[test]
fn aliased_addresses_are_vacuous() -> Result<()> {
    let mut inputs = VerificationInputs::symbolic();
    inputs.factor2.address = inputs.factor1.address.clone();
    inputs.low = inputs.factor1.address.clone();

    let run = Verifier::default().run(&inputs)?;
    let obligation = run.obligation();
    assert!(obligation.is_vacuous());
    assert_eq!(obligation.claim().maybe_literal(), Some(true));
    Ok(())
}

#[test]
fn wrong_result_is_refuted() {
    let inputs = concrete_inputs(3, 5);
    let obligation = obligation(&inputs, &byte(0), &byte(0x10));
    assert_eq!(obligation.precondition.maybe_literal(), Some(true));
    assert_eq!(obligation.claim().maybe_literal(), Some(false));
}

#[test]
fn symbolic_run_matches_product() -> Result<()> {
    let inputs = VerificationInputs::symbolic();
    let run = Verifier::default().run(&inputs)?;
    assert_eq!(run.execution().trace().forks(), 8);

    let claim = run.obligation().claim();
    let samples = [(3, 5), (0, 0xFF), (0xFF, 0xFF), (0x80, 0x02), (0x5A, 0xA5)];
    for (f1, f2) in samples {
        let mut assignments = assign(&[
            (&inputs.memory_base, 0),
            (&inputs.factor1.address, 0x10),
            (&inputs.factor1.value, f1),
            (&inputs.factor2.address, 0x20),
            (&inputs.factor2.value, f2),
            (&inputs.low, 0x30),
            (&inputs.initial.x, 0x99),
            (&inputs.initial.a, 0x77),
            (&inputs.initial.memory_fill, 0x11),
        ]);
        assign_bit(&mut assignments, &inputs.initial.carry, true);
        assign_bit(&mut assignments, &inputs.initial.zero, false);

        let product = f1 * f2;
        assert_eq!(evaluate(run.high(), &assignments), Some(product >> 8));
        assert_eq!(evaluate(run.low(), &assignments), Some(product & 0xFF));
        assert_eq!(evaluate_bit(&claim, &assignments), Some(true));
    }

    Ok(())
}

#[test]
fn named_inputs_cover_every_free_value() {
    let inputs = VerificationInputs::symbolic();
    let names = inputs
        .named_inputs()
        .into_iter()
        .map(|(name, _)| name)
        .collect::<Vec<_>>();
    assert_eq!(
        names,
        [
            "memory_base",
            "factor1_address",
            "factor1",
            "factor2_address",
            "factor2",
            "low_address",
            "x",
            "a",
            "memory_fill",
            "carry",
            "zero"
        ]
    );
}

/// Decides claims by evaluating them under a fixed list of assignments.
struct SamplingOracle {
    samples: Vec<sym::VariableAssignments>,
}

impl SolverOracle<SymbolicBit> for SamplingOracle {
    type Counterexample = sym::VariableAssignments;

    fn prove(&self, claim: &SymbolicBit) -> oracle::Result<Verdict<Self::Counterexample>> {
        for sample in &self.samples {
            match evaluate_bit(claim, sample) {
                Some(true) => continue,
                Some(false) => return Ok(Verdict::Counterexample(sample.clone())),
                None => {
                    return Err(oracle::Error::Unknown {
                        reason: "incomplete sample".to_string(),
                    });
                }
            }
        }

        Ok(Verdict::Proved)
    }
}

#[test]
fn verify_with_oracle() -> Result<()> {
    let inputs = concrete_inputs(12, 13);
    let oracle = SamplingOracle {
        samples: vec![Default::default()],
    };
    let verdict = Verifier::default().verify(&inputs, &oracle)?;
    assert!(verdict.is_proved());
    Ok(())
}

#[test]
fn oracle_failure_is_surfaced() {
    let inputs = VerificationInputs::symbolic();
    let oracle = SamplingOracle {
        samples: vec![Default::default()],
    };
    let result = Verifier::default().verify(&inputs, &oracle);
    assert!(matches!(
        result,
        Err(Error::Oracle(oracle::Error::Unknown { .. }))
    ));
}
