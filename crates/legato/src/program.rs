use std::collections::BTreeMap;

use word_ops::WordOps;

use crate::emulator::{Instruction, Target};
use crate::state::Register;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// A branch refers to a label that was never placed.
    #[error("undefined label `{label}` referenced by instruction {pc}")]
    UndefinedLabel { label: String, pc: usize },

    /// The same label was placed more than once.
    #[error("label `{0}` is defined more than once")]
    DuplicateLabel(String),

    /// A branch target does not refer to an instruction of the program.
    #[error("branch target {target} of instruction {pc} is outside of program with {len} instructions")]
    BranchOutOfRange { pc: usize, target: Target, len: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

/// An immutable sequence of instructions with resolved branch targets.
#[derive(Debug, Clone)]
pub struct Program<V> {
    instructions: Vec<Instruction<V>>,

    /// Label names by target, retained for listings.
    labels: BTreeMap<Target, String>,
}

impl<V> Program<V> {
    /// Create a program from instructions whose branch targets are already resolved.
    pub fn new(instructions: Vec<Instruction<V>>) -> Result<Self> {
        Self::with_labels(instructions, BTreeMap::new())
    }

    fn with_labels(
        instructions: Vec<Instruction<V>>,
        labels: BTreeMap<Target, String>,
    ) -> Result<Self> {
        let len = instructions.len();
        for (pc, instruction) in instructions.iter().enumerate() {
            if let Some(target) = instruction.target()
                && target >= len
            {
                return Err(Error::BranchOutOfRange { pc, target, len });
            }
        }

        Ok(Self {
            instructions,
            labels,
        })
    }

    pub fn get(&self, pc: usize) -> Option<&Instruction<V>> {
        self.instructions.get(pc)
    }

    pub fn instructions(&self) -> &[Instruction<V>] {
        &self.instructions
    }

    pub fn label(&self, pc: usize) -> Option<&str> {
        self.labels.get(&pc).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

impl<V: WordOps> std::fmt::Display for Program<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (pc, instruction) in self.instructions.iter().enumerate() {
            if let Some(label) = self.label(pc) {
                writeln!(f, "{label}:")?;
            }

            match instruction.target().and_then(|target| self.label(target)) {
                Some(label) => writeln!(f, "{pc:4}    {} {label}", instruction.mnemonic())?,
                None => writeln!(f, "{pc:4}    {instruction}")?,
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone)]
enum Pending<V> {
    Ready(Instruction<V>),
    BranchIfCarryClear(String),
    BranchIfNotZero(String),
}

/// Builds a [Program] from mnemonics and labels. Labels may be referenced before they are placed.
#[derive(Debug, Clone)]
pub struct Assembler<V> {
    instructions: Vec<Pending<V>>,
    labels: BTreeMap<String, Target>,
    duplicates: Vec<String>,
}

impl<V> Default for Assembler<V> {
    fn default() -> Self {
        Self {
            instructions: Vec::new(),
            labels: BTreeMap::new(),
            duplicates: Vec::new(),
        }
    }
}

impl<V> Assembler<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a label at the next instruction.
    pub fn label(&mut self, name: impl Into<String>) -> &mut Self {
        let name = name.into();
        if self.labels.contains_key(&name) {
            self.duplicates.push(name);
        } else {
            self.labels.insert(name, self.instructions.len());
        }
        self
    }

    pub fn instruction(&mut self, instruction: Instruction<V>) -> &mut Self {
        self.instructions.push(Pending::Ready(instruction));
        self
    }

    pub fn ldx(&mut self, value: u8) -> &mut Self {
        self.instruction(Instruction::Load {
            register: Register::X,
            value,
        })
    }

    pub fn lda(&mut self, value: u8) -> &mut Self {
        self.instruction(Instruction::Load {
            register: Register::A,
            value,
        })
    }

    pub fn clc(&mut self) -> &mut Self {
        self.instruction(Instruction::ClearCarry)
    }

    pub fn ror(&mut self, address: V) -> &mut Self {
        self.instruction(Instruction::RotateMemory(address))
    }

    pub fn ror_register(&mut self, register: Register) -> &mut Self {
        self.instruction(Instruction::RotateRegister(register))
    }

    pub fn adc(&mut self, address: V) -> &mut Self {
        self.instruction(Instruction::AddWithCarry(address))
    }

    pub fn dex(&mut self) -> &mut Self {
        self.instruction(Instruction::Decrement(Register::X))
    }

    pub fn bcc(&mut self, label: impl Into<String>) -> &mut Self {
        self.instructions.push(Pending::BranchIfCarryClear(label.into()));
        self
    }

    pub fn bne(&mut self, label: impl Into<String>) -> &mut Self {
        self.instructions.push(Pending::BranchIfNotZero(label.into()));
        self
    }

    pub fn halt(&mut self) -> &mut Self {
        self.instruction(Instruction::Halt)
    }

    /// Resolve labels and produce the program.
    pub fn assemble(&self) -> Result<Program<V>>
    where
        V: Clone,
    {
        if let Some(label) = self.duplicates.first() {
            return Err(Error::DuplicateLabel(label.clone()));
        }

        let resolve = |label: &String, pc: usize| {
            self.labels
                .get(label)
                .copied()
                .ok_or_else(|| Error::UndefinedLabel {
                    label: label.clone(),
                    pc,
                })
        };

        let instructions = self
            .instructions
            .iter()
            .enumerate()
            .map(|(pc, pending)| match pending {
                Pending::Ready(instruction) => Ok(instruction.clone()),
                Pending::BranchIfCarryClear(label) => {
                    resolve(label, pc).map(Instruction::BranchIfCarryClear)
                }
                Pending::BranchIfNotZero(label) => {
                    resolve(label, pc).map(Instruction::BranchIfNotZero)
                }
            })
            .collect::<Result<Vec<_>>>()?;

        let labels = self
            .labels
            .iter()
            .map(|(label, &target)| (target, label.clone()))
            .collect();

        Program::with_labels(instructions, labels)
    }
}

/// The shift-and-add multiplier. Multiplies the bytes at `factor1` and `factor2`, leaving the
/// high byte of the product in the accumulator and the low byte at `low`.
///
/// ```text
///         ldx #8
///         lda #0
///         clc
/// loop:   ror F1
///         bcc zero
///         clc
///         adc F2
/// zero:   ror A
///         ror LO
///         dex
///         bne loop
///         hlt
/// ```
pub fn multiplier<V: Clone>(factor1: V, factor2: V, low: V) -> Result<Program<V>> {
    Assembler::new()
        .ldx(8)
        .lda(0)
        .clc()
        .label("loop")
        .ror(factor1)
        .bcc("zero")
        .clc()
        .adc(factor2)
        .label("zero")
        .ror_register(Register::A)
        .ror(low)
        .dex()
        .bne("loop")
        .halt()
        .assemble()
}
