use word_ops::{BitOps, WordOps};

use crate::mem::{Memory, MemoryStrategy};

/// Width of a machine address in bits.
pub const ADDRESS_BITS: usize = 32;

/// Width of a machine word in bits.
pub const WORD_BITS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Register {
    /// Index register. Used as the loop counter of the multiplier.
    X,

    /// Accumulator.
    A,
}

impl std::fmt::Display for Register {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::X => write!(f, "X"),
            Self::A => write!(f, "A"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Flag {
    Carry,
    Zero,
}

impl std::fmt::Display for Flag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Carry => write!(f, "C"),
            Self::Zero => write!(f, "Z"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Registers<V> {
    x: V,
    a: V,
}

impl<V: WordOps> Registers<V> {
    pub fn new(x: V, a: V) -> Self {
        require_width(Register::X, &x);
        require_width(Register::A, &a);
        Self { x, a }
    }

    pub fn get(&self, register: Register) -> &V {
        match register {
            Register::X => &self.x,
            Register::A => &self.a,
        }
    }

    pub fn with(mut self, register: Register, value: V) -> Self {
        require_width(register, &value);
        match register {
            Register::X => self.x = value,
            Register::A => self.a = value,
        }
        self
    }

    pub fn merge(condition: &V::Bit, lhs: &Self, rhs: &Self) -> Self {
        Self {
            x: V::select(condition.clone(), lhs.x.clone(), rhs.x.clone()),
            a: V::select(condition.clone(), lhs.a.clone(), rhs.a.clone()),
        }
    }
}

fn require_width<V: WordOps>(register: Register, value: &V) {
    assert_eq!(
        value.num_bits(),
        WORD_BITS,
        "register {register} must hold a {WORD_BITS}-bit word"
    );
}

#[derive(Debug, Clone)]
pub struct Flags<B> {
    carry: B,
    zero: B,
}

impl<B: BitOps> Flags<B> {
    pub fn new(carry: B, zero: B) -> Self {
        Self { carry, zero }
    }

    pub fn get(&self, flag: Flag) -> &B {
        match flag {
            Flag::Carry => &self.carry,
            Flag::Zero => &self.zero,
        }
    }

    pub fn with(mut self, flag: Flag, value: B) -> Self {
        match flag {
            Flag::Carry => self.carry = value,
            Flag::Zero => self.zero = value,
        }
        self
    }

    pub fn merge(condition: &B, lhs: &Self, rhs: &Self) -> Self {
        Self {
            carry: condition.clone().select(lhs.carry.clone(), rhs.carry.clone()),
            zero: condition.clone().select(lhs.zero.clone(), rhs.zero.clone()),
        }
    }
}

/// Complete machine state. Updates are functional: every `with_*` method consumes the state and
/// returns the updated state.
#[derive(Debug, Clone)]
pub struct MachineState<V: WordOps> {
    memory: Memory<V>,
    registers: Registers<V>,
    flags: Flags<V::Bit>,
}

impl<V: WordOps> MachineState<V> {
    pub fn new(memory: Memory<V>, registers: Registers<V>, flags: Flags<V::Bit>) -> Self {
        Self {
            memory,
            registers,
            flags,
        }
    }

    /// A state whose memory answers every address with `memory_base`. Registers are zero and flags
    /// are clear.
    pub fn uninitialized(strategy: MemoryStrategy, memory_base: V) -> Self {
        require_word(&memory_base);
        let zero = || V::constant(0, WORD_BITS);
        Self::new(
            Memory::reset(strategy, memory_base),
            Registers::new(zero(), zero()),
            Flags::new(false.into(), false.into()),
        )
    }

    pub fn memory(&self) -> &Memory<V> {
        &self.memory
    }

    pub fn registers(&self) -> &Registers<V> {
        &self.registers
    }

    pub fn flags(&self) -> &Flags<V::Bit> {
        &self.flags
    }

    pub fn register(&self, register: Register) -> &V {
        self.registers.get(register)
    }

    pub fn flag(&self, flag: Flag) -> &V::Bit {
        self.flags.get(flag)
    }

    pub fn read(&self, address: &V) -> V {
        require_address(address);
        self.memory.read(address)
    }

    pub fn with_register(self, register: Register, value: V) -> Self {
        Self {
            registers: self.registers.with(register, value),
            ..self
        }
    }

    pub fn with_flag(self, flag: Flag, value: V::Bit) -> Self {
        Self {
            flags: self.flags.with(flag, value),
            ..self
        }
    }

    pub fn with_memory(self, address: V, value: V) -> Self {
        require_address(&address);
        require_word(&value);
        Self {
            memory: self.memory.write(address, value),
            ..self
        }
    }

    /// Replace the memory with one that answers every address with `value`.
    pub fn with_memory_reset(self, value: V) -> Self {
        require_word(&value);
        let strategy = self.memory.strategy();
        Self {
            memory: Memory::reset(strategy, value),
            ..self
        }
    }

    /// Merge two states component-wise. The result agrees with `lhs` where `condition` holds and
    /// with `rhs` otherwise.
    ///
    /// # Panics
    ///
    /// Both states must use the same memory strategy.
    pub fn merge(condition: &V::Bit, lhs: &Self, rhs: &Self) -> Self {
        match condition.known() {
            Some(true) => lhs.clone(),
            Some(false) => rhs.clone(),
            None => Self {
                memory: Memory::merge(condition, &lhs.memory, &rhs.memory),
                registers: Registers::merge(condition, &lhs.registers, &rhs.registers),
                flags: Flags::merge(condition, &lhs.flags, &rhs.flags),
            },
        }
    }
}

fn require_address<V: WordOps>(address: &V) {
    assert_eq!(
        address.num_bits(),
        ADDRESS_BITS,
        "memory address must be {ADDRESS_BITS} bits"
    );
}

fn require_word<V: WordOps>(value: &V) {
    assert_eq!(
        value.num_bits(),
        WORD_BITS,
        "memory value must be a {WORD_BITS}-bit word"
    );
}
