use super::SymbolicBitVec;
use crate::bit::{FALSE, SymbolicBit, TRUE};

impl std::ops::Index<usize> for SymbolicBitVec {
    type Output = SymbolicBit;

    fn index(&self, index: usize) -> &Self::Output {
        &self.bits[index]
    }
}

impl std::ops::Not for SymbolicBitVec {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.bits.into_iter().map(|bit| !bit).collect()
    }
}

macro_rules! bitwise_op {
    ($trait:ident, $method:ident, $op:tt) => {
        impl std::ops::$trait for SymbolicBitVec {
            type Output = Self;

            fn $method(self, rhs: Self) -> Self::Output {
                assert_eq!(self.bits.len(), rhs.bits.len());
                self.bits
                    .into_iter()
                    .zip(rhs.bits)
                    .map(|(lhs, rhs)| lhs $op rhs)
                    .collect()
            }
        }
    };
}

bitwise_op!(BitAnd, bitand, &);
bitwise_op!(BitOr, bitor, |);
bitwise_op!(BitXor, bitxor, ^);

impl std::ops::Shl<usize> for SymbolicBitVec {
    type Output = Self;

    fn shl(self, rhs: usize) -> Self::Output {
        self.shift_left(rhs)
    }
}

/// Performs an _unsigned_ right shift.
impl std::ops::Shr<usize> for SymbolicBitVec {
    type Output = Self;

    fn shr(self, rhs: usize) -> Self::Output {
        self.shift_right(rhs)
    }
}

/// Wrapping addition.
impl std::ops::Add for SymbolicBitVec {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        let (sum, _) = self.addition_with_carry_in(rhs, FALSE);
        sum
    }
}

/// Wrapping subtraction, computed as `self + !rhs + 1`.
impl std::ops::Sub for SymbolicBitVec {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        let (difference, _) = self.addition_with_carry_in(!rhs, TRUE);
        difference
    }
}
