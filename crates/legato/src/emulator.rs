use word_ops::{BitwiseOps, WordOps};

use crate::state::{Flag, MachineState, Register, WORD_BITS};

/// Index of an instruction within a [Program](crate::program::Program).
pub type Target = usize;

/// Instructions of the 8-bit accumulator machine. Memory operands are symbolic addresses.
#[derive(Debug, Clone)]
pub enum Instruction<V> {
    /// Load an immediate byte into a register.
    Load { register: Register, value: u8 },

    /// Clear the carry flag.
    ClearCarry,

    /// Rotate the byte at the address right through the carry flag.
    RotateMemory(V),

    /// Rotate the register right through the carry flag.
    RotateRegister(Register),

    /// Add the byte at the address and the carry flag to the accumulator.
    AddWithCarry(V),

    /// Decrement the register modulo 256 and update the zero flag.
    Decrement(Register),

    /// Branch to the target if the carry flag is clear.
    BranchIfCarryClear(Target),

    /// Branch to the target if the zero flag is clear.
    BranchIfNotZero(Target),

    /// Stop execution.
    Halt,
}

impl<V> Instruction<V> {
    /// Branch target of this instruction, if any.
    pub fn target(&self) -> Option<Target> {
        match self {
            Self::BranchIfCarryClear(target) | Self::BranchIfNotZero(target) => Some(*target),
            _ => None,
        }
    }

    pub fn mnemonic(&self) -> &'static str {
        match self {
            Self::Load {
                register: Register::X,
                ..
            } => "ldx",
            Self::Load {
                register: Register::A,
                ..
            } => "lda",
            Self::ClearCarry => "clc",
            Self::RotateMemory(_) | Self::RotateRegister(_) => "ror",
            Self::AddWithCarry(_) => "adc",
            Self::Decrement(Register::X) => "dex",
            Self::Decrement(Register::A) => "dea",
            Self::BranchIfCarryClear(_) => "bcc",
            Self::BranchIfNotZero(_) => "bne",
            Self::Halt => "hlt",
        }
    }
}

impl<V: WordOps> std::fmt::Display for Instruction<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mnemonic = self.mnemonic();
        match self {
            Self::Load { value, .. } => write!(f, "{mnemonic} #{value:#04x}"),
            Self::RotateMemory(address) | Self::AddWithCarry(address) => match address.known() {
                Some(address) => write!(f, "{mnemonic} [{address:#x}]"),
                None => write!(f, "{mnemonic} [symbolic]"),
            },
            Self::RotateRegister(register) => write!(f, "{mnemonic} {register}"),
            Self::BranchIfCarryClear(target) | Self::BranchIfNotZero(target) => {
                write!(f, "{mnemonic} {target}")
            }
            Self::ClearCarry | Self::Decrement(_) | Self::Halt => write!(f, "{mnemonic}"),
        }
    }
}

/// Describes which instruction should be executed next.
#[derive(Debug, Clone, Default)]
pub enum ControlFlow<B> {
    /// The instruction following the current one.
    #[default]
    NextInstruction,

    /// Execution should continue at the destination if the condition holds. Otherwise execution
    /// should continue with the next instruction.
    ConditionalBranch { condition: B, destination: Target },

    /// Execution is complete.
    Halt,
}

/// Execute a single instruction against the state.
pub fn emulate<V: WordOps>(
    state: MachineState<V>,
    instruction: &Instruction<V>,
) -> (MachineState<V>, ControlFlow<V::Bit>) {
    match instruction {
        Instruction::Load { register, value } => {
            let value = V::constant(u64::from(*value), WORD_BITS);
            (state.with_register(*register, value), ControlFlow::NextInstruction)
        }
        Instruction::ClearCarry => (
            state.with_flag(Flag::Carry, false.into()),
            ControlFlow::NextInstruction,
        ),
        Instruction::RotateMemory(address) => {
            let value = state.read(address);
            let carry = state.flag(Flag::Carry).clone();
            let (value, carry) = rotate_right_through_carry(value, carry);
            let state = state
                .with_memory(address.clone(), value)
                .with_flag(Flag::Carry, carry);
            (state, ControlFlow::NextInstruction)
        }
        Instruction::RotateRegister(register) => {
            let value = state.register(*register).clone();
            let carry = state.flag(Flag::Carry).clone();
            let (value, carry) = rotate_right_through_carry(value, carry);
            let state = state
                .with_register(*register, value)
                .with_flag(Flag::Carry, carry);
            (state, ControlFlow::NextInstruction)
        }
        Instruction::AddWithCarry(address) => {
            let operand = state.read(address);
            let accumulator = state.register(Register::A).clone();
            let carry = state.flag(Flag::Carry).clone();
            let (sum, carry) = accumulator.add_with_carry(operand, carry);
            let zero = is_zero(&sum);
            let state = state
                .with_register(Register::A, sum)
                .with_flag(Flag::Carry, carry)
                .with_flag(Flag::Zero, zero);
            (state, ControlFlow::NextInstruction)
        }
        Instruction::Decrement(register) => {
            let value = state
                .register(*register)
                .clone()
                .subtract(V::constant(1, WORD_BITS));
            let zero = is_zero(&value);
            let state = state
                .with_register(*register, value)
                .with_flag(Flag::Zero, zero);
            (state, ControlFlow::NextInstruction)
        }
        Instruction::BranchIfCarryClear(destination) => {
            let condition = state.flag(Flag::Carry).clone().not();
            let flow = ControlFlow::ConditionalBranch {
                condition,
                destination: *destination,
            };
            (state, flow)
        }
        Instruction::BranchIfNotZero(destination) => {
            let condition = state.flag(Flag::Zero).clone().not();
            let flow = ControlFlow::ConditionalBranch {
                condition,
                destination: *destination,
            };
            (state, flow)
        }
        Instruction::Halt => (state, ControlFlow::Halt),
    }
}

/// Rotate right by one bit through the carry. The incoming carry becomes the most significant bit
/// and the least significant bit becomes the outgoing carry.
pub fn rotate_right_through_carry<V: WordOps>(value: V, carry: V::Bit) -> (V, V::Bit) {
    let carry_out = value.bit(0);
    let msb = value.num_bits() - 1;
    let rotated = value.shift_right(1).with_bit(msb, carry);
    (rotated, carry_out)
}

fn is_zero<V: WordOps>(value: &V) -> V::Bit {
    value.clone().equals(V::constant(0, value.num_bits()))
}
