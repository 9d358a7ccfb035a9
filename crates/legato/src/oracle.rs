#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The solver could not decide the query. The reason is reported as given by the solver.
    #[error("solver returned unknown: {reason}")]
    Unknown { reason: String },

    /// The solver reported a counterexample exists but did not provide one.
    #[error("solver found the claim falsifiable but produced no model")]
    MissingModel,
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict<C> {
    /// The claim holds for every assignment of its variables.
    Proved,

    /// An assignment of variables under which the claim is false.
    Counterexample(C),
}

impl<C> Verdict<C> {
    pub fn is_proved(&self) -> bool {
        matches!(self, Self::Proved)
    }
}

/// A decision procedure for the validity of a symbolic boolean.
pub trait SolverOracle<B> {
    type Counterexample;

    /// Decide whether `claim` holds for every assignment of its variables.
    fn prove(&self, claim: &B) -> Result<Verdict<Self::Counterexample>>;
}
