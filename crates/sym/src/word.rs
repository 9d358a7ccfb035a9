use word_ops::{BitOps, WordOps};

use crate::{SymbolicBit, SymbolicBitVec};

impl BitOps for SymbolicBit {
    fn select(self, if_true: Self, if_false: Self) -> Self {
        SymbolicBit::select(self, if_true, if_false)
    }

    fn equals(self, rhs: Self) -> Self {
        SymbolicBit::equals(self, rhs)
    }

    fn known(&self) -> Option<bool> {
        self.maybe_literal()
    }
}

impl WordOps for SymbolicBitVec {
    type Bit = SymbolicBit;

    fn constant(value: u64, num_bits: usize) -> Self {
        // Bits beyond the width are discarded by the constructor
        SymbolicBitVec::constant(value, num_bits)
    }

    fn num_bits(&self) -> usize {
        self.len()
    }

    fn known(&self) -> Option<u64> {
        self.maybe_literal()
    }

    fn add(self, rhs: Self) -> Self {
        self + rhs
    }

    fn add_with_carry(self, rhs: Self, carry_in: Self::Bit) -> (Self, Self::Bit) {
        assert_eq!(self.len(), rhs.len());
        self.addition_with_carry_in(rhs, carry_in)
    }

    fn subtract(self, rhs: Self) -> Self {
        self - rhs
    }

    fn multiply(self, rhs: Self) -> Self {
        SymbolicBitVec::multiply(self, rhs)
    }

    fn zero_extend(self, num_bits: usize) -> Self {
        SymbolicBitVec::zero_extend(self, num_bits)
    }

    fn shift_left(self, amount: usize) -> Self {
        self << amount
    }

    fn shift_right(self, amount: usize) -> Self {
        self >> amount
    }

    fn bit(&self, index: usize) -> Self::Bit {
        self[index].clone()
    }

    fn with_bit(self, index: usize, bit: Self::Bit) -> Self {
        SymbolicBitVec::with_bit(self, index, bit)
    }

    fn equals(self, rhs: Self) -> Self::Bit {
        SymbolicBitVec::equals(self, rhs)
    }

    fn unsigned_less_than(self, rhs: Self) -> Self::Bit {
        self.less_than(rhs)
    }

    fn select(condition: Self::Bit, if_true: Self, if_false: Self) -> Self {
        if_true.mux(if_false, condition)
    }

    fn is_identical(&self, rhs: &Self) -> bool {
        SymbolicBitVec::is_identical(self, rhs)
    }
}
