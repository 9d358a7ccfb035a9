use std::str::FromStr;

use crate::mem::MemoryStrategy;

/// Environment variable selecting the [MemoryStrategy]: `dense` or `array`.
pub const MEMORY_MODEL_VAR: &str = "LEGATO_MEMORY_MODEL";

/// Environment variable overriding [VerifierConfig::step_limit].
pub const STEP_LIMIT_VAR: &str = "LEGATO_STEP_LIMIT";

/// Default bound on executed instructions. The multiplier needs under a hundred steps per path
/// and the longest countdown loop of the machine needs 513.
pub const DEFAULT_STEP_LIMIT: usize = 100_000;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("unknown memory model `{0}`, expected `dense` or `array`")]
    UnknownMemoryModel(String),

    #[error("invalid step limit `{value}`: {source}")]
    InvalidStepLimit {
        value: String,
        source: std::num::ParseIntError,
    },

    #[error("step limit must be positive")]
    ZeroStepLimit,
}

pub type Result<T> = std::result::Result<T, Error>;

impl FromStr for MemoryStrategy {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "dense" => Ok(Self::Dense),
            "array" => Ok(Self::Array),
            _ => Err(Error::UnknownMemoryModel(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifierConfig {
    /// Backing strategy of machine memory.
    pub memory: MemoryStrategy,

    /// Maximum number of instructions executed across all paths before execution is abandoned.
    pub step_limit: usize,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            memory: MemoryStrategy::default(),
            step_limit: DEFAULT_STEP_LIMIT,
        }
    }
}

impl VerifierConfig {
    pub fn with_memory(self, memory: MemoryStrategy) -> Self {
        Self { memory, ..self }
    }

    pub fn with_step_limit(self, step_limit: usize) -> Self {
        Self { step_limit, ..self }
    }

    /// Default configuration overridden by [MEMORY_MODEL_VAR] and [STEP_LIMIT_VAR] when set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Default configuration overridden by the values returned by `lookup` for
    /// [MEMORY_MODEL_VAR] and [STEP_LIMIT_VAR].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(memory) = lookup(MEMORY_MODEL_VAR) {
            config.memory = memory.parse()?;
        }

        if let Some(value) = lookup(STEP_LIMIT_VAR) {
            config.step_limit = value
                .trim()
                .parse()
                .map_err(|source| Error::InvalidStepLimit {
                    value: value.clone(),
                    source,
                })?;

            if config.step_limit == 0 {
                return Err(Error::ZeroStepLimit);
            }
        }

        Ok(config)
    }
}
