/// Operations on a fixed-width machine word. The representation of the value is not prescribed:
/// it may be fully known or only partially constrained. All arithmetic is performed modulo the
/// width of the word.
///
/// Unless stated otherwise, binary operations require both operands to have the same width.
/// Violating this is a programming error and implementations are expected to panic.
pub trait WordOps: BitwiseOps + Clone + std::fmt::Debug {
    /// A representation of a single bit. Comparisons and flags produce values of this type.
    type Bit: BitOps;

    /// Create a word of the given width holding `value`. Bits of `value` beyond the width are
    /// discarded.
    fn constant(value: u64, num_bits: usize) -> Self;

    /// Returns the number of bits used to represent this value.
    fn num_bits(&self) -> usize;

    /// Returns the value if every bit of this word is exactly known.
    fn known(&self) -> Option<u64>;

    /// This is standard integer addition. The addition is performed modulo the width of the
    /// word.
    fn add(self, rhs: Self) -> Self;

    /// Addition of `self`, `rhs` and a single carry-in bit. Returns the sum modulo the width of
    /// the word along with the carry out of the most significant bit. The carry out is the bit
    /// that would be at index [Self::num_bits] had the sum been computed one bit wider.
    fn add_with_carry(self, rhs: Self, carry_in: Self::Bit) -> (Self, Self::Bit);

    /// This is standard integer subtraction, performed modulo the width of the word.
    fn subtract(self, rhs: Self) -> Self;

    /// Integer multiplication, performed modulo the width of the word. To get an extended
    /// precision result the operands must first be zero-extended.
    fn multiply(self, rhs: Self) -> Self;

    /// Extend the word with the given number of zero bits in the most significant positions.
    fn zero_extend(self, num_bits: usize) -> Self;

    /// Logical left shift by a fixed amount. Vacated bits are filled with zero.
    fn shift_left(self, amount: usize) -> Self;

    /// Logical right shift by a fixed amount. Vacated bits are filled with zero.
    fn shift_right(self, amount: usize) -> Self;

    /// The bit at the given index, where index 0 is the least significant bit.
    fn bit(&self, index: usize) -> Self::Bit;

    /// Replace the bit at the given index.
    fn with_bit(self, index: usize, bit: Self::Bit) -> Self;

    /// Output is true if `self` equals `rhs` down to the bit.
    fn equals(self, rhs: Self) -> Self::Bit;

    /// Output is true if `self` differs from `rhs` in at least one bit.
    fn not_equals(self, rhs: Self) -> Self::Bit {
        self.equals(rhs).not()
    }

    /// Output is true if `self` is strictly less than `rhs` when both are viewed as unsigned
    /// integers.
    fn unsigned_less_than(self, rhs: Self) -> Self::Bit;

    /// Conditional selection: the result is `if_true` when `condition` holds and `if_false`
    /// otherwise.
    fn select(condition: Self::Bit, if_true: Self, if_false: Self) -> Self;

    /// Returns true if both words are built from the very same terms. Identical words are always
    /// equal. The converse does not hold: equal words need not be identical.
    fn is_identical(&self, rhs: &Self) -> bool;
}

/// A single symbolic boolean.
pub trait BitOps: BitwiseOps + From<bool> + Clone + std::fmt::Debug {
    /// Conditional selection using `self` as the condition.
    fn select(self, if_true: Self, if_false: Self) -> Self;

    /// Output is true if `self` and `rhs` hold the same value.
    fn equals(self, rhs: Self) -> Self;

    /// Returns the value of this bit if it is exactly known.
    fn known(&self) -> Option<bool>;
}

/// Bitwise operations supported by symbolic values.
pub trait BitwiseOps {
    /// Logical-And of the bits of `self` and `rhs`.
    fn and(self, rhs: Self) -> Self;

    /// Bitwise negation.
    fn not(self) -> Self;

    /// Logical-Or of the bits of `self` and `rhs`.
    fn or(self, rhs: Self) -> Self;

    /// Logical Exclusive-Or of the bits of `self` and `rhs`.
    fn xor(self, rhs: Self) -> Self;
}

impl<T> BitwiseOps for T
where
    T: std::ops::BitAnd<Output = T>
        + std::ops::BitOr<Output = T>
        + std::ops::BitXor<Output = T>
        + std::ops::Not<Output = T>,
{
    fn and(self, other: Self) -> Self {
        self & other
    }

    fn not(self) -> Self {
        !self
    }

    fn or(self, other: Self) -> Self {
        self | other
    }

    fn xor(self, other: Self) -> Self {
        self ^ other
    }
}
