use crate::bit::SymbolicBit;
use crate::vec::SymbolicBitVec;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConcretizationError {
    #[error("non-literal bit at index {bit_index}")]
    NonLiteralBit { bit_index: usize },

    #[error("value exceeded maximum number of bits ({max_bits})")]
    Overflow { max_bits: usize },
}

impl From<bool> for SymbolicBit {
    fn from(value: bool) -> Self {
        SymbolicBit::Literal(value)
    }
}

impl TryFrom<SymbolicBit> for bool {
    type Error = ConcretizationError;

    fn try_from(value: SymbolicBit) -> Result<Self, Self::Error> {
        value
            .maybe_literal()
            .ok_or(ConcretizationError::NonLiteralBit { bit_index: 0 })
    }
}

impl From<SymbolicBit> for SymbolicBitVec {
    fn from(value: SymbolicBit) -> Self {
        std::iter::once(value).collect()
    }
}

/// Concretize the bits into an unsigned integer of at most `max_bits` bits. Most significant bits
/// beyond `max_bits` are accepted only if they are literal zeros.
fn concretize<'a>(
    bits: impl IntoIterator<Item = &'a SymbolicBit>,
    max_bits: usize,
) -> Result<u64, ConcretizationError> {
    let mut value = 0u64;
    for (bit_index, bit) in bits.into_iter().enumerate() {
        let bit = bit
            .maybe_literal()
            .ok_or(ConcretizationError::NonLiteralBit { bit_index })?;

        if bit_index >= max_bits {
            if bit {
                return Err(ConcretizationError::Overflow { max_bits });
            }
        } else if bit {
            value |= 1 << bit_index;
        }
    }

    Ok(value)
}

macro_rules! concrete_type {
    ($target:ty) => {
        impl From<$target> for SymbolicBitVec {
            fn from(value: $target) -> Self {
                SymbolicBitVec::constant(u64::from(value), <$target>::BITS as usize)
            }
        }

        impl TryFrom<&SymbolicBitVec> for $target {
            type Error = ConcretizationError;

            fn try_from(value: &SymbolicBitVec) -> Result<Self, Self::Error> {
                let value = concretize(value.iter(), <$target>::BITS as usize)?;

                // Concretization is bounded to the target width
                Ok(value as $target)
            }
        }

        impl TryFrom<SymbolicBitVec> for $target {
            type Error = ConcretizationError;

            fn try_from(value: SymbolicBitVec) -> Result<Self, Self::Error> {
                <$target>::try_from(&value)
            }
        }
    };
}

concrete_type!(u8);
concrete_type!(u16);
concrete_type!(u32);
concrete_type!(u64);
