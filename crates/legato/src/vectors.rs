use sym::{Evaluator, SymbolicBitVec, VariableAssignments};

use crate::verify::{Input, VerificationRun};

/// Concrete inputs and outputs of a single multiplier run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestVector {
    pub inputs: Vec<(&'static str, u64)>,
    pub outputs: Vec<(&'static str, u64)>,
}

impl TestVector {
    /// Evaluate every named input and output of the run under the assignments. Returns `None` if
    /// any value depends on a variable without an assignment.
    pub fn extract(
        run: &VerificationRun<SymbolicBitVec>,
        assignments: &VariableAssignments,
    ) -> Option<Self> {
        let mut evaluator = Evaluator::new(assignments.clone());

        let inputs = run
            .inputs()
            .named_inputs()
            .into_iter()
            .map(|(name, input)| {
                let value = match input {
                    Input::Word(word) => evaluator.evaluate_vec(word)?,
                    Input::Bit(bit) => u64::from(evaluator.evaluate(bit)?),
                };
                Some((name, value))
            })
            .collect::<Option<Vec<_>>>()?;

        let outputs = vec![
            ("high", evaluator.evaluate_vec(run.high())?),
            ("low", evaluator.evaluate_vec(run.low())?),
        ];

        Some(Self { inputs, outputs })
    }

    pub fn input(&self, name: &str) -> Option<u64> {
        lookup(&self.inputs, name)
    }

    pub fn output(&self, name: &str) -> Option<u64> {
        lookup(&self.outputs, name)
    }

    /// The product reconstructed from the high and low output bytes.
    pub fn product(&self) -> Option<u64> {
        Some((self.output("high")? << 8) | self.output("low")?)
    }
}

fn lookup(values: &[(&'static str, u64)], name: &str) -> Option<u64> {
    values
        .iter()
        .find_map(|&(key, value)| (key == name).then_some(value))
}

impl std::fmt::Display for TestVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (name, value) in &self.inputs {
            write!(f, "{name}={value:#x} ")?;
        }

        write!(f, "=>")?;
        for (name, value) in &self.outputs {
            write!(f, " {name}={value:#x}")?;
        }

        Ok(())
    }
}
