use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::bit::{FALSE, SymbolicBit, TRUE};

mod convert;
mod ops;

/// A little-endian vector of [SymbolicBit]s. Index 0 holds the least significant bit.
#[derive(Debug, Clone)]
pub struct SymbolicBitVec {
    bits: VecDeque<SymbolicBit>,
}

static START_SYMBOL: AtomicUsize = AtomicUsize::new(0);

impl SymbolicBitVec {
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SymbolicBit> {
        self.bits.iter()
    }

    /// Create a vector of fresh [SymbolicBit::Variable]s. Variable identifiers are unique across
    /// all vectors created by this function.
    pub fn with_size(num_bits: usize) -> Self {
        let start_symbol = START_SYMBOL.fetch_add(num_bits, Ordering::SeqCst);
        (start_symbol..start_symbol + num_bits)
            .map(SymbolicBit::Variable)
            .collect()
    }

    /// Create a vector of literal bits holding `value`. Bits of `value` that do not fit in
    /// `num_bits` are discarded.
    pub fn constant(value: u64, num_bits: usize) -> Self {
        (0..num_bits)
            .map(|i| SymbolicBit::Literal(i < 64 && (value >> i) & 0x1 > 0))
            .collect()
    }

    /// Returns the value of this vector if every bit is a literal and the value fits in 64 bits.
    pub fn maybe_literal(&self) -> Option<u64> {
        if self.bits.len() > u64::BITS as usize {
            return None;
        }

        self.bits
            .iter()
            .enumerate()
            .try_fold(0u64, |value, (i, bit)| {
                bit.maybe_literal().map(|b| value | (u64::from(b) << i))
            })
    }

    /// Returns true if each pair of corresponding bits is [identical](SymbolicBit::is_identical).
    pub fn is_identical(&self, rhs: &Self) -> bool {
        self.bits.len() == rhs.bits.len()
            && self
                .bits
                .iter()
                .zip(rhs.bits.iter())
                .all(|(x, y)| x.is_identical(y))
    }

    pub fn equals(self, rhs: Self) -> SymbolicBit {
        assert_eq!(self.bits.len(), rhs.bits.len());
        self.bits
            .into_iter()
            .zip(rhs.bits)
            .fold(TRUE, |eq, (x, y)| eq & x.equals(y))
    }

    /// Create a new `SymbolicBitVec` with `num_bits` additional zero bits as the most significant
    /// bits.
    pub fn zero_extend(mut self, num_bits: usize) -> Self {
        self.bits.extend(std::iter::repeat_n(FALSE, num_bits));
        self
    }

    /// Replace the bit at `index`.
    pub fn with_bit(mut self, index: usize, bit: SymbolicBit) -> Self {
        self.bits[index] = bit;
        self
    }

    /// Ripple-carry addition with an explicit carry into the least significant bit. Returns the
    /// sum, which wraps at the width of the operands, and the carry out of the most significant
    /// bit.
    pub fn addition_with_carry_in(self, rhs: Self, carry_in: SymbolicBit) -> (Self, SymbolicBit) {
        assert_eq!(self.bits.len(), rhs.bits.len());
        let mut carry = carry_in;
        let sum: Self = self
            .bits
            .into_iter()
            .zip(rhs.bits)
            .map(|(x, y)| {
                let sum = x.clone() ^ y.clone() ^ carry.clone();
                carry = (x.clone() & y.clone()) | (carry.clone() & (x ^ y));
                sum
            })
            .collect();

        (sum, carry)
    }

    /// Wrapping multiplication. The product has the width of the operands.
    pub fn multiply(self, rhs: Self) -> Self {
        assert_eq!(self.bits.len(), rhs.bits.len());
        let num_bits = self.len();
        let zero = SymbolicBitVec::constant(0, num_bits);

        rhs.bits
            .into_iter()
            .enumerate()
            .fold(zero.clone(), |product, (i, selector)| {
                // Partial product for bit i of the multiplier
                let partial = (self.clone() << i).mux(zero.clone(), selector);
                product + partial
            })
    }

    pub fn less_than(self, rhs: Self) -> SymbolicBit {
        assert_eq!(self.len(), rhs.len());

        // Scan from the least significant bit: a differing higher bit overrides the result
        self.bits
            .into_iter()
            .zip(rhs.bits)
            .fold(FALSE, |less_than, (x, y)| {
                let differs = !x.clone().equals(y.clone());
                differs.select(!x & y, less_than)
            })
    }

    /// Selects `self` where `selector` is true and `rhs` otherwise.
    pub fn mux(self, rhs: Self, selector: SymbolicBit) -> Self {
        assert_eq!(self.len(), rhs.len());
        self.bits
            .into_iter()
            .zip(rhs.bits)
            .map(|(lhs, rhs)| selector.clone().select(lhs, rhs))
            .collect()
    }

    /// Shifts towards the most significant bit, filling with zeros.
    fn shift_left(self, amount: usize) -> Self {
        let len = self.len();
        std::iter::repeat_n(FALSE, usize::min(amount, len))
            .chain(self.bits.into_iter().take(len.saturating_sub(amount)))
            .collect()
    }

    /// Shifts towards the least significant bit, filling with zeros.
    fn shift_right(self, amount: usize) -> Self {
        let len = self.len();
        self.bits
            .into_iter()
            .skip(amount)
            .chain(std::iter::repeat_n(FALSE, usize::min(amount, len)))
            .collect()
    }
}
