use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use sym::{SymbolicBit, VariableAssignments};
use z3::ast::Bool;
use z3::{Config, Context, Params, SatResult, Solver};

use crate::oracle::{Error, Result, SolverOracle, Verdict};

/// Decides claims over [SymbolicBit] with the z3 SMT solver.
#[derive(Debug, Clone, Default)]
pub struct Z3Oracle {
    timeout_ms: Option<u32>,
}

impl Z3Oracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Give up after the given number of milliseconds. The solver then reports unknown.
    pub fn with_timeout_ms(self, timeout_ms: u32) -> Self {
        Self {
            timeout_ms: Some(timeout_ms),
        }
    }
}

impl SolverOracle<SymbolicBit> for Z3Oracle {
    type Counterexample = VariableAssignments;

    fn prove(&self, claim: &SymbolicBit) -> Result<Verdict<VariableAssignments>> {
        if let Some(value) = claim.maybe_literal() {
            log::debug!("Claim is the literal {value}");
            return Ok(if value {
                Verdict::Proved
            } else {
                Verdict::Counterexample(VariableAssignments::default())
            });
        }

        let mut config = Config::new();
        config.set_model_generation(true);
        let context = Context::new(&config);
        let solver = Solver::new(&context);
        if let Some(timeout_ms) = self.timeout_ms {
            let mut params = Params::new(&context);
            params.set_u32("timeout", timeout_ms);
            solver.set_params(&params);
        }

        let mut lowering = Lowering::new(&context);
        let claim = lowering.lower(claim);
        solver.assert(&claim.not());

        match solver.check() {
            SatResult::Unsat => Ok(Verdict::Proved),
            SatResult::Sat => {
                let model = solver.get_model().ok_or(Error::MissingModel)?;
                let assignments = lowering
                    .variables
                    .iter()
                    .filter_map(|(&id, variable)| {
                        model
                            .eval(variable, true)
                            .and_then(|value| value.as_bool())
                            .map(|value| (id, value))
                    })
                    .collect();
                Ok(Verdict::Counterexample(assignments))
            }
            SatResult::Unknown => Err(Error::Unknown {
                reason: solver
                    .get_reason_unknown()
                    .unwrap_or_else(|| "no reason given".to_string()),
            }),
        }
    }
}

/// Translates [SymbolicBit] DAGs into z3 booleans. Shared subterms are translated once.
struct Lowering<'ctx> {
    context: &'ctx Context,
    variables: BTreeMap<usize, Bool<'ctx>>,
    cache: HashMap<*const SymbolicBit, (Rc<SymbolicBit>, Bool<'ctx>)>,
}

impl<'ctx> Lowering<'ctx> {
    fn new(context: &'ctx Context) -> Self {
        Self {
            context,
            variables: BTreeMap::new(),
            cache: HashMap::new(),
        }
    }

    fn lower(&mut self, bit: &SymbolicBit) -> Bool<'ctx> {
        match bit {
            SymbolicBit::Literal(value) => Bool::from_bool(self.context, *value),
            SymbolicBit::Variable(id) => {
                let context = self.context;
                self.variables
                    .entry(*id)
                    .or_insert_with(|| Bool::new_const(context, format!("b{id}")))
                    .clone()
            }
            SymbolicBit::Not(x) => self.lower_shared(x).not(),
            SymbolicBit::And(lhs, rhs) => {
                let lhs = self.lower_shared(lhs);
                let rhs = self.lower_shared(rhs);
                Bool::and(self.context, &[&lhs, &rhs])
            }
        }
    }

    fn lower_shared(&mut self, bit: &Rc<SymbolicBit>) -> Bool<'ctx> {
        let key = Rc::as_ptr(bit);
        if let Some((_, lowered)) = self.cache.get(&key) {
            return lowered.clone();
        }

        let lowered = self.lower(bit);
        self.cache.insert(key, (Rc::clone(bit), lowered.clone()));
        lowered
    }
}
