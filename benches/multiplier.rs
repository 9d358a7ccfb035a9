use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use sym::{Evaluator, SymbolicBitVec, VariableAssignments};
use symbolic_legato::config::VerifierConfig;
use symbolic_legato::mem::{Memory, MemoryStrategy};
use symbolic_legato::verify::{Factor, InitialValues, VerificationInputs, Verifier};

const STRATEGIES: [MemoryStrategy; 2] = [MemoryStrategy::Dense, MemoryStrategy::Array];

fn concrete_inputs() -> VerificationInputs<SymbolicBitVec> {
    VerificationInputs {
        memory_base: 0u8.into(),
        factor1: Factor::constant(0x10, 0xA5),
        factor2: Factor::constant(0x11, 0x5A),
        low: 0x12u32.into(),
        initial: InitialValues::constant(0, 0, 0, false, false),
    }
}

fn multiplier(c: &mut Criterion) {
    for strategy in STRATEGIES {
        let verifier = Verifier::new(VerifierConfig::default().with_memory(strategy));

        c.bench_function(&format!("concrete_run_{strategy}"), |b| {
            let inputs = concrete_inputs();
            b.iter(|| verifier.run(&inputs).expect("failed to run multiplier"))
        });

        c.bench_function(&format!("symbolic_obligation_{strategy}"), |b| {
            b.iter_batched(
                VerificationInputs::symbolic,
                |inputs| {
                    verifier
                        .run(&inputs)
                        .expect("failed to run multiplier")
                        .obligation()
                        .claim()
                },
                BatchSize::SmallInput,
            )
        });
    }
}

fn evaluate_claim(c: &mut Criterion) {
    for strategy in STRATEGIES {
        let verifier = Verifier::new(VerifierConfig::default().with_memory(strategy));
        let inputs = VerificationInputs::symbolic();
        let claim = verifier
            .run(&inputs)
            .expect("failed to run multiplier")
            .obligation()
            .claim();

        let mut assignments = VariableAssignments::default();
        let addresses = [&inputs.factor1.address, &inputs.factor2.address, &inputs.low];
        for (offset, address) in (0x100..).zip(addresses) {
            assignments.extend(VariableAssignments::from_value(address, offset).iter());
        }

        c.bench_function(&format!("evaluate_claim_{strategy}"), |b| {
            b.iter_batched(
                || Evaluator::new(assignments.clone()),
                |mut evaluator| evaluator.evaluate(&claim),
                BatchSize::SmallInput,
            )
        });
    }
}

fn memory_reads(c: &mut Criterion) {
    for strategy in STRATEGIES {
        let addresses = (0..16)
            .map(|_| SymbolicBitVec::with_size(32))
            .collect::<Vec<_>>();
        let memory = addresses
            .iter()
            .fold(Memory::reset(strategy, 0u8.into()), |memory, address| {
                memory.write(address.clone(), SymbolicBitVec::with_size(8))
            });
        let probe = SymbolicBitVec::with_size(32);

        c.bench_function(&format!("symbolic_read_{strategy}"), |b| {
            b.iter(|| memory.read(&probe))
        });
    }
}

criterion_group!(benches, multiplier, evaluate_claim, memory_reads);
criterion_main!(benches);
